use soroban_sdk::{Address, Env, Vec};
use crate::events;
use crate::storage;
use crate::types::{FidcError, InvestorType, Role};
use crate::validation;

// ============================================================================
// CONTROLE DE ACESSO
// ============================================================================

/// Valida se `caller` possui o papel administrador de `role`
pub fn require_role_admin(env: &Env, role: Role, caller: &Address) -> Result<(), FidcError> {
    let admin_role = storage::get_role_admin(env, role);
    validation::require_role(
        env,
        admin_role,
        caller,
        FidcError::AccessControlUnauthorizedAccount,
    )
}

/// Papéis de investidor: o `DefaultAdmin` também administra, além do admin configurado
fn require_investor_admin(env: &Env, role: Role, caller: &Address) -> Result<(), FidcError> {
    if storage::has_role(env, Role::DefaultAdmin, caller) {
        return Ok(());
    }
    require_role_admin(env, role, caller)
}

/// Concede o papel; só emite evento quando a associação muda
pub fn grant(env: &Env, role: Role, account: &Address, sender: &Address) -> bool {
    if storage::has_role(env, role, account) {
        return false;
    }
    storage::set_role(env, role, account, true);
    events::emit_role_granted(env, role, account, sender);
    true
}

/// Revoga o papel; só emite evento quando a associação muda
pub fn revoke(env: &Env, role: Role, account: &Address, sender: &Address) -> bool {
    if !storage::has_role(env, role, account) {
        return false;
    }
    storage::set_role(env, role, account, false);
    events::emit_role_revoked(env, role, account, sender);
    true
}

pub fn grant_role(env: &Env, caller: &Address, role: Role, account: &Address) -> Result<(), FidcError> {
    // === CHECKS ===
    require_role_admin(env, role, caller)?;
    validation::require_not_engine(env, account)?;

    // === EFFECTS ===
    grant(env, role, account, caller);
    Ok(())
}

pub fn revoke_role(env: &Env, caller: &Address, role: Role, account: &Address) -> Result<(), FidcError> {
    require_role_admin(env, role, caller)?;
    revoke(env, role, account, caller);
    Ok(())
}

pub fn renounce_role(
    env: &Env,
    caller: &Address,
    role: Role,
    caller_confirmation: &Address,
) -> Result<(), FidcError> {
    if caller != caller_confirmation {
        return Err(FidcError::AccessControlUnauthorizedAccount);
    }
    revoke(env, role, caller, caller);
    Ok(())
}

pub fn set_role_admin(
    env: &Env,
    caller: &Address,
    role: Role,
    admin_role: Role,
) -> Result<(), FidcError> {
    // === CHECKS ===
    validation::require_role(
        env,
        Role::DefaultAdmin,
        caller,
        FidcError::AccessControlUnauthorizedAccount,
    )?;
    // O admin geral é administrado por ele mesmo, sempre
    if role == Role::DefaultAdmin && admin_role != Role::DefaultAdmin {
        return Err(FidcError::ValidationFailed);
    }

    // === EFFECTS ===
    let previous = storage::get_role_admin(env, role);
    storage::set_role_admin(env, role, admin_role);

    // === INTERACTIONS ===
    events::emit_role_admin_changed(env, role, previous, admin_role);
    Ok(())
}

// ============================================================================
// LOTES (MANAGER / VALIDATOR / PAYABLE)
// ============================================================================

/// Concede `role` a todas as contas do lote. Valida tudo antes de gravar.
pub fn approve_accounts(
    env: &Env,
    caller: &Address,
    role: Role,
    accounts: &Vec<Address>,
) -> Result<(), FidcError> {
    // === CHECKS ===
    require_role_admin(env, role, caller)?;
    if accounts.is_empty() {
        return Err(FidcError::ValidationFailed);
    }
    for account in accounts.iter() {
        validation::require_not_engine(env, &account)?;
    }

    // === EFFECTS ===
    for account in accounts.iter() {
        grant(env, role, &account, caller);
    }
    Ok(())
}

pub fn revoke_accounts(
    env: &Env,
    caller: &Address,
    role: Role,
    accounts: &Vec<Address>,
) -> Result<(), FidcError> {
    require_role_admin(env, role, caller)?;
    if accounts.is_empty() {
        return Err(FidcError::ValidationFailed);
    }

    for account in accounts.iter() {
        revoke(env, role, &account, caller);
    }
    Ok(())
}

// ============================================================================
// INVESTIDORES POR FUNDO
// ============================================================================

/// Registra cada investidor no fundo correspondente e concede o papel global
/// da classe. A classe de um investidor num fundo não muda depois de gravada.
pub fn approve_investors(
    env: &Env,
    caller: &Address,
    investors: &Vec<Address>,
    investor_types: &Vec<InvestorType>,
    fidc_ids: &Vec<u32>,
) -> Result<(), FidcError> {
    // === CHECKS ===
    validation::require_same_length(investors.len(), investor_types.len())?;
    validation::require_same_length(investors.len(), fidc_ids.len())?;
    if investors.is_empty() {
        return Err(FidcError::ValidationFailed);
    }

    for i in 0..investors.len() {
        let investor = investors.get_unchecked(i);
        let investor_type = investor_types.get_unchecked(i);
        let fidc_id = fidc_ids.get_unchecked(i);

        validation::require_not_engine(env, &investor)?;
        require_investor_admin(env, investor_type.role(), caller)?;

        let fidc = storage::get_fidc(env, fidc_id)?;
        validation::require_fund_manager(env, &fidc, caller)?;

        if let Some(existing) = storage::get_investor_type(env, fidc_id, &investor) {
            if existing != investor_type {
                return Err(FidcError::AlreadyRegistered);
            }
        }

        // Conflito dentro do próprio lote
        for j in 0..i {
            if investors.get_unchecked(j) == investor
                && fidc_ids.get_unchecked(j) == fidc_id
                && investor_types.get_unchecked(j) != investor_type
            {
                return Err(FidcError::AlreadyRegistered);
            }
        }
    }

    // === EFFECTS ===
    for i in 0..investors.len() {
        let investor = investors.get_unchecked(i);
        let investor_type = investor_types.get_unchecked(i);
        let fidc_id = fidc_ids.get_unchecked(i);

        grant(env, investor_type.role(), &investor, caller);
        storage::set_investor_type(env, fidc_id, &investor, investor_type);

        // === INTERACTIONS ===
        events::emit_investor_registered(env, &investor, fidc_id, investor_type);
    }

    Ok(())
}

/// Remove o registro do investidor no fundo. O papel global fica, pois pode
/// valer para outros fundos.
pub fn revoke_investors(
    env: &Env,
    caller: &Address,
    investors: &Vec<Address>,
    fidc_ids: &Vec<u32>,
) -> Result<(), FidcError> {
    // === CHECKS ===
    validation::require_same_length(investors.len(), fidc_ids.len())?;
    if investors.is_empty() {
        return Err(FidcError::ValidationFailed);
    }

    for i in 0..investors.len() {
        let investor = investors.get_unchecked(i);
        let fidc_id = fidc_ids.get_unchecked(i);

        let fidc = storage::get_fidc(env, fidc_id)?;
        validation::require_fund_manager(env, &fidc, caller)?;

        let investor_type = storage::get_investor_type(env, fidc_id, &investor)
            .ok_or(FidcError::UnauthorizedInvestor)?;
        require_investor_admin(env, investor_type.role(), caller)?;
    }

    // === EFFECTS ===
    for i in 0..investors.len() {
        let investor = investors.get_unchecked(i);
        let fidc_id = fidc_ids.get_unchecked(i);

        // Duplicatas no lote já foram removidas na iteração anterior
        if storage::get_investor_type(env, fidc_id, &investor).is_none() {
            continue;
        }
        storage::remove_investor_type(env, fidc_id, &investor);
        events::emit_investor_removed(env, &investor, fidc_id, caller);
    }

    Ok(())
}

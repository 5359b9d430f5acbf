use soroban_sdk::{symbol_short, Address, Env, Symbol};
use crate::types::{FidcStatus, InvestorType, Role};

//
// EVENTOS DO MOTOR
//
// topic[0] é o nome do evento; os demais tópicos são indexados.
//

/// Tópicos não aceitam enums compostos, então o papel vira um símbolo curto
fn role_topic(role: Role) -> Symbol {
    match role {
        Role::DefaultAdmin => symbol_short!("ADMIN"),
        Role::Manager => symbol_short!("MANAGER"),
        Role::Validator => symbol_short!("VALIDATOR"),
        Role::Payable => symbol_short!("PAYABLE"),
        Role::InvestorSenior => symbol_short!("INV_SEN"),
        Role::InvestorSub => symbol_short!("INV_SUB"),
    }
}

// Controle de acesso
pub fn emit_role_granted(env: &Env, role: Role, account: &Address, sender: &Address) {
    env.events().publish(
        (Symbol::new(env, "RoleGranted"), role_topic(role), account.clone()),
        sender.clone(),
    );
}

pub fn emit_role_revoked(env: &Env, role: Role, account: &Address, sender: &Address) {
    env.events().publish(
        (Symbol::new(env, "RoleRevoked"), role_topic(role), account.clone()),
        sender.clone(),
    );
}

pub fn emit_role_admin_changed(env: &Env, role: Role, previous: Role, new_admin: Role) {
    env.events().publish(
        (Symbol::new(env, "RoleAdminChanged"), role_topic(role)),
        (role_topic(previous), role_topic(new_admin)),
    );
}

pub fn emit_investor_registered(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investor_type: InvestorType,
) {
    env.events().publish(
        (Symbol::new(env, "InvestorRegistered"), investor.clone(), fidc_id),
        investor_type,
    );
}

pub fn emit_investor_removed(env: &Env, investor: &Address, fidc_id: u32, sender: &Address) {
    env.events().publish(
        (Symbol::new(env, "InvestorRemoved"), investor.clone(), fidc_id),
        sender.clone(),
    );
}

// Ciclo de vida do fundo
#[allow(clippy::too_many_arguments)]
pub fn emit_fidc_created(
    env: &Env,
    fidc_id: u32,
    manager: &Address,
    validator: &Address,
    payable: &Address,
    fee: u32,
    annual_yield: u32,
    grace_period: u64,
    senior_spread: u32,
) {
    env.events().publish(
        (Symbol::new(env, "FIDCCreated"), fidc_id),
        (
            manager.clone(),
            validator.clone(),
            payable.clone(),
            fee,
            annual_yield,
            grace_period,
            senior_spread,
        ),
    );
}

pub fn emit_status_changed(env: &Env, fidc_id: u32, old: FidcStatus, new: FidcStatus) {
    env.events().publish(
        (Symbol::new(env, "FIDCStatusChanged"), fidc_id),
        (old, new),
    );
}

pub fn emit_fidc_closed(env: &Env, fidc_id: u32, end_date: u64) {
    env.events().publish(
        (Symbol::new(env, "FIDCClosed"), fidc_id),
        end_date,
    );
}

// Emissão
pub fn emit_pj_approval_changed(
    env: &Env,
    pj: &Address,
    fidc_id: u32,
    is_approved: bool,
    schedule_amount: i128,
    collateral_amount: i128,
) {
    env.events().publish(
        (Symbol::new(env, "PJApprovalChanged"), pj.clone(), fidc_id),
        (is_approved, schedule_amount, collateral_amount),
    );
}

pub fn emit_approved_payable(
    env: &Env,
    fidc_id: u32,
    payable: &Address,
    amount: i128,
    is_approved: bool,
) {
    env.events().publish(
        (Symbol::new(env, "FIDCApprovedPayable"), fidc_id),
        (payable.clone(), amount, is_approved),
    );
}

pub fn emit_pj_revoked(env: &Env, pj: &Address, fidc_id: u32, sender: &Address) {
    env.events().publish(
        (Symbol::new(env, "PJRevoked"), pj.clone(), fidc_id),
        sender.clone(),
    );
}

// Aportes
pub fn emit_deposit(env: &Env, investor: &Address, fidc_id: u32, assets: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("Deposit"), investor.clone(), fidc_id),
        (assets, shares),
    );
}

pub fn emit_investment_registered(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    amount: i128,
    is_senior: bool,
) {
    env.events().publish(
        (Symbol::new(env, "NewInvestmentRegistered"), investor.clone(), fidc_id),
        (investment_id, amount, is_senior),
    );
}

pub fn emit_yield_accrued(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    accrued: i128,
    accumulated: i128,
) {
    env.events().publish(
        (Symbol::new(env, "YieldAccrued"), investor.clone(), fidc_id),
        (investment_id, accrued, accumulated),
    );
}

// Resgates
pub fn emit_yield_paid(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    gross: i128,
    fee: i128,
    net: i128,
) {
    env.events().publish(
        (symbol_short!("YieldPaid"), investor.clone(), fidc_id),
        (investment_id, gross, fee, net),
    );
}

pub fn emit_investment_redeemed(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    principal: i128,
    payout: i128,
    remaining: i128,
) {
    env.events().publish(
        (Symbol::new(env, "InvestmentRedeemed"), investor.clone(), fidc_id),
        (investment_id, principal, payout, remaining),
    );
}

pub fn emit_manager_redeem_all(
    env: &Env,
    fidc_id: u32,
    manager: &Address,
    processed: u32,
    total_paid: i128,
) {
    env.events().publish(
        (Symbol::new(env, "ManagerRedeemAll"), fidc_id),
        (manager.clone(), processed, total_paid),
    );
}

pub fn emit_leftover_withdrawn(env: &Env, fidc_id: u32, recipient: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "LeftoverWithdrawn"), fidc_id),
        (recipient.clone(), amount),
    );
}

// Pausa
pub fn emit_pause(env: &Env, sender: &Address) {
    env.events().publish(
        (symbol_short!("Paused"),),
        sender.clone(),
    );
}

pub fn emit_unpause(env: &Env, sender: &Address) {
    env.events().publish(
        (symbol_short!("Unpaused"),),
        sender.clone(),
    );
}

// Recuperação de tokens enviados por engano
pub fn emit_token_recovered(env: &Env, token: &Address, recipient: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "TokenRecovered"), token.clone()),
        (recipient.clone(), amount),
    );
}

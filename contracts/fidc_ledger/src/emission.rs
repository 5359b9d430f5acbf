use soroban_sdk::{log, Address, Env, Vec};
use crate::events;
use crate::fund;
use crate::settlement;
use crate::shares;
use crate::storage;
use crate::types::{Fidc, FidcError, FidcStatus, Role};
use crate::validation;

// ============================================================================
// FLUXO DE EMISSÃO (VALIDADOR + PAGADOR)
// ============================================================================

/// Ativa o fundo quando as duas aprovações estão presentes.
/// Emite as unidades de recebível (= valor aprovado) na custódia do motor.
fn try_activate(env: &Env, fidc: &mut Fidc) -> Result<(), FidcError> {
    let pj_approved = fidc
        .approved_pj
        .as_ref()
        .map_or(false, |pj| storage::is_pj_approved(env, pj, fidc.id));
    if !(fidc.validator_approved && pj_approved && fidc.payable_approved) {
        storage::set_fidc(env, fidc);
        return Ok(());
    }

    fidc.valid = true;
    shares::issue_receivables(env, fidc.id, fidc.amount)?;
    fund::transition(env, fidc, FidcStatus::Active);
    Ok(())
}

/// Desfaz a validação vigente do fundo: PJ aprovada, valores e flag.
fn clear_validation(env: &Env, fidc: &mut Fidc) {
    if let Some(pj) = fidc.approved_pj.take() {
        storage::set_pj_approved(env, &pj, fidc.id, false);
    }
    fidc.schedule_amount = 0;
    fidc.collateral_amount = 0;
    fidc.validator_approved = false;
}

pub fn approved_emission_validator(
    env: &Env,
    caller: &Address,
    pj: &Address,
    fidc_id: u32,
    schedule_amount: i128,
    collateral_amount: i128,
    is_approved: bool,
) -> Result<(), FidcError> {
    // === CHECKS ===
    validation::require_role(env, Role::Validator, caller, FidcError::Unauthorized)?;
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    if caller != &fidc.validator {
        return Err(FidcError::NotAssociated);
    }
    validation::require_status(&fidc, FidcStatus::Pending)?;

    if is_approved {
        if schedule_amount <= 0 || collateral_amount <= 0 {
            return Err(FidcError::ZeroAmount);
        }
        if collateral_amount > schedule_amount {
            return Err(FidcError::InvalidAmount);
        }
        // Depósito do pagador já feito precisa cobrir a garantia
        if fidc.payable_approved && fidc.amount < collateral_amount {
            return Err(FidcError::InvalidAmount);
        }
    }

    // === EFFECTS ===
    // Uma única PJ validada por fundo; outra PJ só mexe na própria entrada
    let (schedule, collateral) = if is_approved {
        clear_validation(env, &mut fidc);
        fidc.schedule_amount = schedule_amount;
        fidc.collateral_amount = collateral_amount;
        fidc.approved_pj = Some(pj.clone());
        fidc.validator_approved = true;
        (schedule_amount, collateral_amount)
    } else {
        if fidc.approved_pj.as_ref() == Some(pj) {
            clear_validation(env, &mut fidc);
        }
        (0, 0)
    };
    storage::set_pj_approved(env, pj, fidc_id, is_approved);

    // === INTERACTIONS ===
    events::emit_pj_approval_changed(env, pj, fidc_id, is_approved, schedule, collateral);

    try_activate(env, &mut fidc)
}

pub fn approved_emission_payable(
    env: &Env,
    caller: &Address,
    fidc_id: u32,
    amount: i128,
    is_approved: bool,
) -> Result<(), FidcError> {
    // === CHECKS ===
    validation::require_role(env, Role::Payable, caller, FidcError::Unauthorized)?;
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    if caller != &fidc.payable {
        return Err(FidcError::NotAssociated);
    }
    validation::require_status(&fidc, FidcStatus::Pending)?;

    if !is_approved {
        // === EFFECTS ===
        let refund = if fidc.payable_approved { fidc.amount } else { 0 };
        fidc.liquidity = fidc
            .liquidity
            .checked_sub(refund)
            .ok_or(FidcError::ArithmeticOverflow)?;
        fidc.amount = 0;
        fidc.payable_approved = false;
        storage::set_fidc(env, &fidc);

        // === INTERACTIONS ===
        settlement::push(env, caller, refund)?;
        events::emit_approved_payable(env, fidc_id, caller, refund, false);
        return Ok(());
    }

    if amount <= 0 {
        return Err(FidcError::ZeroAmount);
    }
    if fidc.validator_approved && amount < fidc.collateral_amount {
        return Err(FidcError::InvalidAmount);
    }
    if fidc.payable_approved {
        return Err(FidcError::AlreadyRegistered);
    }

    // === INTERACTIONS (entrada de fundos) ===
    settlement::pull(env, caller, amount, FidcError::PayableNotApproved)?;

    // === EFFECTS ===
    fidc.amount = amount;
    fidc.liquidity = fidc
        .liquidity
        .checked_add(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;
    fidc.payable_approved = true;

    events::emit_approved_payable(env, fidc_id, caller, amount, true);
    log!(env, "payable deposit", fidc_id, amount);

    try_activate(env, &mut fidc)
}

/// Revoga aprovações de PJ em lote. Tudo é validado antes de gravar.
pub fn revoke_pj(
    env: &Env,
    caller: &Address,
    pjs: &Vec<Address>,
    fidc_ids: &Vec<u32>,
) -> Result<(), FidcError> {
    // === CHECKS ===
    validation::require_same_length(pjs.len(), fidc_ids.len())?;
    if pjs.is_empty() {
        return Err(FidcError::ValidationFailed);
    }
    for fidc_id in fidc_ids.iter() {
        let fidc = storage::get_fidc(env, fidc_id)?;
        validation::require_fund_manager(env, &fidc, caller)?;
    }

    // === EFFECTS ===
    for i in 0..pjs.len() {
        let pj = pjs.get_unchecked(i);
        let fidc_id = fidc_ids.get_unchecked(i);

        storage::set_pj_approved(env, &pj, fidc_id, false);

        let mut fidc = storage::get_fidc(env, fidc_id)?;
        let validated = fidc.approved_pj.as_ref() == Some(&pj) || pj == fidc.payable;
        if validated && fidc.status == FidcStatus::Pending && fidc.validator_approved {
            clear_validation(env, &mut fidc);
            storage::set_fidc(env, &fidc);
        }

        // === INTERACTIONS ===
        events::emit_pj_revoked(env, &pj, fidc_id, caller);
    }

    Ok(())
}

pub fn is_approved_emission(env: &Env, pj: &Address, fidc_id: u32) -> bool {
    storage::is_pj_approved(env, pj, fidc_id)
}

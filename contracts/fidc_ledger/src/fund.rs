use soroban_sdk::{log, Address, Env};
use crate::events;
use crate::shares;
use crate::storage;
use crate::types::{Fidc, FidcError, FidcStatus, Role};
use crate::validation;

// ============================================================================
// REGISTRO DE FUNDOS
// ============================================================================

/// Cria um fundo em `Pending`. Devolve o id alocado.
#[allow(clippy::too_many_arguments)]
pub fn initialize_fidc(
    env: &Env,
    caller: &Address,
    manager: &Address,
    validator: &Address,
    payable: &Address,
    fee: u32,
    annual_yield: u32,
    grace_period: u64,
    senior_spread: u32,
) -> Result<u32, FidcError> {
    // === CHECKS ===
    if !storage::has_role(env, Role::Manager, caller)
        && !storage::has_role(env, Role::DefaultAdmin, caller)
    {
        return Err(FidcError::Unauthorized);
    }

    validation::require_not_engine(env, manager)?;
    validation::require_not_engine(env, validator)?;
    validation::require_not_engine(env, payable)?;

    validation::require_valid_fund_params(fee, annual_yield, grace_period, senior_spread)?;

    validation::require_role(env, Role::Manager, manager, FidcError::Unauthorized)?;
    validation::require_role(env, Role::Validator, validator, FidcError::ValidatorNotApproved)?;
    validation::require_role(env, Role::Payable, payable, FidcError::PayableNotApproved)?;

    // === EFFECTS ===
    let id = storage::next_fidc_id(env)?;
    let fidc = Fidc {
        id,
        manager: manager.clone(),
        validator: validator.clone(),
        payable: payable.clone(),
        fee,
        annual_yield,
        grace_period,
        senior_spread,
        // A série de recebíveis de cada fundo vive no livro interno do motor
        token_receivable: env.current_contract_address(),
        amount: 0,
        invested: 0,
        senior_invested: 0,
        liquidity: 0,
        schedule_amount: 0,
        collateral_amount: 0,
        approved_pj: None,
        validator_approved: false,
        payable_approved: false,
        valid: false,
        start_date: env.ledger().timestamp(),
        end_date: 0,
        status: FidcStatus::Pending,
    };
    storage::set_fidc(env, &fidc);

    // === INTERACTIONS ===
    events::emit_fidc_created(
        env,
        id,
        manager,
        validator,
        payable,
        fee,
        annual_yield,
        grace_period,
        senior_spread,
    );
    log!(env, "fidc created", id);

    Ok(id)
}

/// Troca o status e emite `FIDCStatusChanged`
pub fn transition(env: &Env, fidc: &mut Fidc, new_status: FidcStatus) {
    let old = fidc.status;
    fidc.status = new_status;
    storage::set_fidc(env, fidc);
    events::emit_status_changed(env, fidc.id, old, new_status);
    log!(env, "fidc status", fidc.id, old as u32, new_status as u32);
}

pub fn close_fidc(env: &Env, caller: &Address, fidc_id: u32) -> Result<(), FidcError> {
    // === CHECKS ===
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_fund_manager(env, &fidc, caller)?;

    match fidc.status {
        FidcStatus::Closed => return Err(FidcError::FidcAlreadyClosed),
        FidcStatus::Active => return Err(FidcError::StatusActive),
        FidcStatus::Pending | FidcStatus::Stopped | FidcStatus::Liquidated => {}
    }

    // === EFFECTS ===
    shares::burn_custody_receivables(env, fidc_id)?;
    fidc.end_date = env.ledger().timestamp();
    transition(env, &mut fidc, FidcStatus::Closed);

    // === INTERACTIONS ===
    events::emit_fidc_closed(env, fidc_id, fidc.end_date);
    Ok(())
}

pub fn stop_fidc(env: &Env, caller: &Address, fidc_id: u32) -> Result<(), FidcError> {
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_fund_manager(env, &fidc, caller)?;
    validation::require_status(&fidc, FidcStatus::Active)?;

    transition(env, &mut fidc, FidcStatus::Stopped);
    Ok(())
}

pub fn resume_fidc(env: &Env, caller: &Address, fidc_id: u32) -> Result<(), FidcError> {
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_fund_manager(env, &fidc, caller)?;
    validation::require_status(&fidc, FidcStatus::Stopped)?;

    transition(env, &mut fidc, FidcStatus::Active);
    Ok(())
}

/// Coloca o fundo em liquidação. A partir daqui só o gestor drena posições.
pub fn liquidate_fidc(env: &Env, caller: &Address, fidc_id: u32) -> Result<(), FidcError> {
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_fund_manager(env, &fidc, caller)?;

    match fidc.status {
        FidcStatus::Closed => return Err(FidcError::FidcAlreadyClosed),
        FidcStatus::Liquidated => return Err(FidcError::InvalidStatus),
        FidcStatus::Pending | FidcStatus::Active | FidcStatus::Stopped => {}
    }

    transition(env, &mut fidc, FidcStatus::Liquidated);
    Ok(())
}

use soroban_sdk::{log, Address, Env, Vec};
use crate::events;
use crate::settlement;
use crate::shares;
use crate::storage;
use crate::types::{FidcError, FidcStatus, Investment, InvestorPosition};
use crate::validation;
use crate::yield_calc;

// ============================================================================
// LIVRO DE APORTES
// ============================================================================

/// Registra um aporte e devolve o id dentro do fundo
pub fn invest(env: &Env, investor: &Address, fidc_id: u32, amount: i128) -> Result<u32, FidcError> {
    // === CHECKS ===
    let mut fidc = storage::get_fidc(env, fidc_id)?;

    let investor_type = storage::get_investor_type(env, fidc_id, investor)
        .ok_or(FidcError::UnauthorizedInvestor)?;
    validation::require_role(
        env,
        investor_type.role(),
        investor,
        FidcError::InvalidInvestorType,
    )?;
    validation::require_status(&fidc, FidcStatus::Active)?;
    validation::require_positive_amount(amount)?;

    let invested = fidc
        .invested
        .checked_add(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;
    if invested > fidc.amount {
        return Err(FidcError::InsufficientFidcAmount);
    }

    let is_senior = investor_type.is_senior();
    let senior_invested = if is_senior {
        fidc.senior_invested
            .checked_add(amount)
            .ok_or(FidcError::ArithmeticOverflow)?
    } else {
        validation::require_senior_ratio(fidc.senior_invested, invested)?;
        fidc.senior_invested
    };

    // === INTERACTIONS (entrada de fundos) ===
    settlement::pull(env, investor, amount, FidcError::InsufficientAllowance)?;

    // === EFFECTS ===
    let now = env.ledger().timestamp();
    let investment_id = storage::next_investment_id(env, fidc_id)?;
    let investment = Investment {
        investment_id,
        fidc_id,
        investor: investor.clone(),
        amount,
        investment_date: now,
        yield_start_time: now,
        is_senior,
        accumulated_yield: 0,
        last_accumulated_yield: 0,
    };
    storage::push_investment(env, &investment);

    fidc.invested = invested;
    fidc.senior_invested = senior_invested;
    fidc.liquidity = fidc
        .liquidity
        .checked_add(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;
    storage::set_fidc(env, &fidc);

    shares::mint_shares(env, fidc_id, investor, amount)?;

    events::emit_deposit(env, investor, fidc_id, amount, amount);
    events::emit_investment_registered(env, investor, fidc_id, investment_id, amount, is_senior);
    log!(env, "invest", fidc_id, investment_id, amount);

    Ok(investment_id)
}

/// Localiza um aporte aberto do investidor.
/// Id desconhecido ou de outro dono: `InvestmentNotFound`; já resgatado: `NoPosition`.
pub fn find_investment(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
) -> Result<Investment, FidcError> {
    let owner = storage::get_investment_owner(env, fidc_id, investment_id)
        .ok_or(FidcError::InvestmentNotFound)?;
    if &owner != investor {
        return Err(FidcError::InvestmentNotFound);
    }
    storage::get_investment(env, fidc_id, investor, investment_id).ok_or(FidcError::NoPosition)
}

/// Checkpoint de rendimento: incorpora o acumulado desde `yield_start_time`
pub fn accrue_yield(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
) -> Result<i128, FidcError> {
    // === CHECKS ===
    let fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_redeemable_status(&fidc)?;
    let mut investment = find_investment(env, investor, fidc_id, investment_id)?;

    // === EFFECTS ===
    let now = env.ledger().timestamp();
    let accrued = yield_calc::fresh_yield(&fidc, &investment, now)?;
    investment.accumulated_yield = investment
        .accumulated_yield
        .checked_add(accrued)
        .ok_or(FidcError::ArithmeticOverflow)?;
    investment.last_accumulated_yield = accrued;
    investment.yield_start_time = now;
    storage::set_investment(env, &investment);

    // === INTERACTIONS ===
    events::emit_yield_accrued(
        env,
        investor,
        fidc_id,
        investment_id,
        accrued,
        investment.accumulated_yield,
    );

    Ok(investment.accumulated_yield)
}

pub fn get_investments(env: &Env, investor: &Address, fidc_id: u32) -> Vec<Investment> {
    storage::get_all_investments(env, fidc_id, investor)
}

pub fn get_investor_position(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
) -> Result<InvestorPosition, FidcError> {
    let investments = get_investments(env, investor, fidc_id);

    let mut total_amount: i128 = 0;
    for investment in investments.iter() {
        total_amount = total_amount
            .checked_add(investment.amount)
            .ok_or(FidcError::ArithmeticOverflow)?;
    }

    Ok(InvestorPosition {
        fidc_id,
        total_amount,
        investments,
    })
}

use soroban_sdk::{log, Address, Env, Vec};
use crate::events;
use crate::investment;
use crate::settlement;
use crate::shares;
use crate::storage;
use crate::types::{Fidc, FidcError, FidcStatus, Investment, YieldBreakdown};
use crate::validation;
use crate::yield_calc;

// ============================================================================
// RESGATES
// ============================================================================

/// Liquida `amount` do aporte contra o caixa do fundo (só EFFECTS).
/// A taxa sai do mesmo caixa, então o fundo precisa cobrir `payout + fee`.
/// Quem chama grava `fidc` e faz as transferências.
fn settle(
    env: &Env,
    fidc: &mut Fidc,
    mut investment: Investment,
    amount: i128,
    now: u64,
) -> Result<YieldBreakdown, FidcError> {
    let (breakdown, carried) = yield_calc::quote(fidc, &investment, amount, now)?;
    let accrued = yield_calc::fresh_yield(fidc, &investment, now)?;

    let outflow = breakdown
        .payout
        .checked_add(breakdown.fee)
        .ok_or(FidcError::ArithmeticOverflow)?;
    if fidc.liquidity < outflow {
        return Err(FidcError::InsufficientLiquidity);
    }

    let remaining = investment
        .amount
        .checked_sub(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;

    if remaining == 0 {
        storage::remove_investment(env, fidc.id, &investment.investor, investment.investment_id);
    } else {
        investment.amount = remaining;
        investment.accumulated_yield = carried;
        investment.last_accumulated_yield = accrued;
        investment.yield_start_time = now;
        storage::set_investment(env, &investment);
    }

    fidc.invested = fidc
        .invested
        .checked_sub(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;
    if investment.is_senior {
        fidc.senior_invested = fidc
            .senior_invested
            .checked_sub(amount)
            .ok_or(FidcError::ArithmeticOverflow)?;
    }
    fidc.liquidity = fidc
        .liquidity
        .checked_sub(outflow)
        .ok_or(FidcError::ArithmeticOverflow)?;

    shares::burn_shares(env, fidc.id, &investment.investor, amount)?;

    events::emit_yield_paid(
        env,
        &investment.investor,
        fidc.id,
        investment.investment_id,
        breakdown.gross_yield,
        breakdown.fee,
        breakdown.net_yield,
    );
    events::emit_investment_redeemed(
        env,
        &investment.investor,
        fidc.id,
        investment.investment_id,
        amount,
        breakdown.payout,
        remaining,
    );

    Ok(breakdown)
}

/// Resgate iniciado pelo investidor. `amount = None` resgata o principal inteiro.
fn redeem_investor(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    amount: Option<i128>,
) -> Result<i128, FidcError> {
    // === CHECKS ===
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_redeemable_status(&fidc)?;
    let now = env.ledger().timestamp();
    validation::require_grace_period_ended(&fidc, now)?;

    if let Some(value) = amount {
        validation::require_positive_amount(value)?;
    }
    let record = investment::find_investment(env, investor, fidc_id, investment_id)?;
    let amount = amount.unwrap_or(record.amount);

    // === EFFECTS ===
    let breakdown = settle(env, &mut fidc, record, amount, now)?;
    storage::set_fidc(env, &fidc);

    // === INTERACTIONS ===
    settlement::push(env, investor, breakdown.payout)?;
    settlement::push(env, &fidc.manager, breakdown.fee)?;
    log!(env, "redeem", fidc_id, investment_id, breakdown.payout);

    Ok(breakdown.payout)
}

pub fn redeem(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    amount: i128,
) -> Result<i128, FidcError> {
    redeem_investor(env, investor, fidc_id, investment_id, Some(amount))
}

pub fn redeem_all(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
) -> Result<i128, FidcError> {
    redeem_investor(env, investor, fidc_id, investment_id, None)
}

/// Encerramento conduzido pelo gestor: ignora a carência e resgata todas as
/// posições abertas dos investidores listados.
pub fn redeem_all_manager(
    env: &Env,
    caller: &Address,
    fidc_id: u32,
    investors: &Vec<Address>,
) -> Result<i128, FidcError> {
    // === CHECKS ===
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_fund_manager(env, &fidc, caller)?;
    if fidc.status == FidcStatus::Pending {
        return Err(FidcError::InvalidStatus);
    }

    // === EFFECTS ===
    let now = env.ledger().timestamp();
    let mut payouts: Vec<(Address, i128)> = Vec::new(env);
    let mut processed: u32 = 0;
    let mut total_paid: i128 = 0;
    let mut total_fee: i128 = 0;

    for investor in investors.iter() {
        let open = storage::get_all_investments(env, fidc_id, &investor);
        if open.is_empty() {
            continue;
        }

        let mut investor_payout: i128 = 0;
        for record in open.iter() {
            let amount = record.amount;
            let breakdown = settle(env, &mut fidc, record, amount, now)?;

            investor_payout = investor_payout
                .checked_add(breakdown.payout)
                .ok_or(FidcError::ArithmeticOverflow)?;
            total_fee = total_fee
                .checked_add(breakdown.fee)
                .ok_or(FidcError::ArithmeticOverflow)?;
            processed = processed
                .checked_add(1)
                .ok_or(FidcError::ArithmeticOverflow)?;
        }

        total_paid = total_paid
            .checked_add(investor_payout)
            .ok_or(FidcError::ArithmeticOverflow)?;
        payouts.push_back((investor, investor_payout));
    }

    if processed == 0 {
        return Err(FidcError::NoValidInvestments);
    }
    storage::set_fidc(env, &fidc);

    // === INTERACTIONS ===
    for (investor, payout) in payouts.iter() {
        settlement::push(env, &investor, payout)?;
    }
    settlement::push(env, &fidc.manager, total_fee)?;

    events::emit_manager_redeem_all(env, fidc_id, caller, processed, total_paid);
    log!(env, "manager redeem all", fidc_id, processed, total_paid);

    Ok(total_paid)
}

/// Cotação do resgate sem alterar estado
pub fn preview_redeem(
    env: &Env,
    investor: &Address,
    fidc_id: u32,
    investment_id: u32,
    amount: i128,
) -> Result<YieldBreakdown, FidcError> {
    let fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_positive_amount(amount)?;
    let record = investment::find_investment(env, investor, fidc_id, investment_id)?;

    let (breakdown, _) = yield_calc::quote(&fidc, &record, amount, env.ledger().timestamp())?;
    Ok(breakdown)
}

/// Devolve ao pagador o que sobrou no caixa de um fundo encerrado e sem posições
pub fn withdraw_leftover(env: &Env, caller: &Address, fidc_id: u32) -> Result<i128, FidcError> {
    // === CHECKS ===
    let mut fidc = storage::get_fidc(env, fidc_id)?;
    validation::require_fund_manager(env, &fidc, caller)?;
    if !fidc.status.is_terminal() || fidc.invested != 0 {
        return Err(FidcError::InvalidStatus);
    }
    if fidc.liquidity <= 0 {
        return Err(FidcError::NoLeftoverAmount);
    }

    // === EFFECTS ===
    let leftover = fidc.liquidity;
    fidc.liquidity = 0;
    storage::set_fidc(env, &fidc);

    // === INTERACTIONS ===
    settlement::push(env, &fidc.payable, leftover)?;
    events::emit_leftover_withdrawn(env, fidc_id, &fidc.payable, leftover);

    Ok(leftover)
}

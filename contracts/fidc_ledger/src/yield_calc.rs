use crate::storage::{BPS_DENOMINATOR, SECONDS_PER_YEAR};
use crate::types::{Fidc, FidcError, Investment, YieldBreakdown};

// ============================================================================
// CÁLCULO DE RENDIMENTO
// ============================================================================
// Juros simples pro rata temporis, sempre multiplicando antes de dividir:
//   bruto = principal × taxa × decorrido / (10000 × SECONDS_PER_YEAR)

/// Taxa anual (bps) aplicável ao aporte
pub fn annual_rate(fidc: &Fidc, is_senior: bool) -> Result<u32, FidcError> {
    if is_senior {
        fidc.annual_yield
            .checked_add(fidc.senior_spread)
            .ok_or(FidcError::ArithmeticOverflow)
    } else {
        Ok(fidc.annual_yield)
    }
}

/// Rendimento bruto de `principal` à taxa `rate_bps` por `elapsed` segundos
pub fn gross_yield(principal: i128, rate_bps: u32, elapsed: u64) -> Result<i128, FidcError> {
    let numerator = principal
        .checked_mul(rate_bps as i128)
        .and_then(|v| v.checked_mul(elapsed as i128))
        .ok_or(FidcError::ArithmeticOverflow)?;
    let denominator = BPS_DENOMINATOR
        .checked_mul(SECONDS_PER_YEAR as i128)
        .ok_or(FidcError::ArithmeticOverflow)?;

    numerator
        .checked_div(denominator)
        .ok_or(FidcError::ArithmeticOverflow)
}

/// Taxa de gestão sobre o bruto
pub fn management_fee(gross: i128, fee_bps: u32) -> Result<i128, FidcError> {
    gross
        .checked_mul(fee_bps as i128)
        .ok_or(FidcError::ArithmeticOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(FidcError::ArithmeticOverflow)
}

/// Rendimento acumulado desde o último checkpoint (`yield_start_time`)
pub fn fresh_yield(fidc: &Fidc, investment: &Investment, now: u64) -> Result<i128, FidcError> {
    let elapsed = now.saturating_sub(investment.yield_start_time);
    let rate = annual_rate(fidc, investment.is_senior)?;
    gross_yield(investment.amount, rate, elapsed)
}

/// Cotação do resgate de `amount` do aporte.
/// Devolve a decomposição e o rendimento bruto que fica com o saldo remanescente.
pub fn quote(
    fidc: &Fidc,
    investment: &Investment,
    amount: i128,
    now: u64,
) -> Result<(YieldBreakdown, i128), FidcError> {
    if amount > investment.amount {
        return Err(FidcError::InsufficientFidcAmount);
    }

    let total_gross = investment
        .accumulated_yield
        .checked_add(fresh_yield(fidc, investment, now)?)
        .ok_or(FidcError::ArithmeticOverflow)?;

    let slice_gross = if amount == investment.amount {
        total_gross
    } else {
        total_gross
            .checked_mul(amount)
            .ok_or(FidcError::ArithmeticOverflow)?
            .checked_div(investment.amount)
            .ok_or(FidcError::ArithmeticOverflow)?
    };

    let fee = management_fee(slice_gross, fidc.fee)?;
    let net_yield = slice_gross
        .checked_sub(fee)
        .ok_or(FidcError::ArithmeticOverflow)?;
    let payout = amount
        .checked_add(net_yield)
        .ok_or(FidcError::ArithmeticOverflow)?;
    let carried = total_gross
        .checked_sub(slice_gross)
        .ok_or(FidcError::ArithmeticOverflow)?;

    Ok((
        YieldBreakdown {
            principal: amount,
            gross_yield: slice_gross,
            fee,
            net_yield,
            payout,
        },
        carried,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FidcStatus;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    const UNIT: i128 = 10_000_000; // 7 casas decimais
    const DAY: u64 = 86_400;

    fn sample_fidc(env: &Env) -> Fidc {
        let addr = Address::generate(env);
        Fidc {
            id: 1,
            manager: addr.clone(),
            validator: addr.clone(),
            payable: addr.clone(),
            fee: 100,
            annual_yield: 1800,
            grace_period: DAY,
            senior_spread: 500,
            token_receivable: addr,
            amount: 1000 * UNIT,
            invested: 0,
            senior_invested: 0,
            liquidity: 0,
            schedule_amount: 1000 * UNIT,
            collateral_amount: 1000 * UNIT,
            approved_pj: None,
            validator_approved: true,
            payable_approved: true,
            valid: true,
            start_date: 0,
            end_date: 0,
            status: FidcStatus::Active,
        }
    }

    fn sample_investment(env: &Env, amount: i128, is_senior: bool) -> Investment {
        Investment {
            investment_id: 1,
            fidc_id: 1,
            investor: Address::generate(env),
            amount,
            investment_date: 0,
            yield_start_time: 0,
            is_senior,
            accumulated_yield: 0,
            last_accumulated_yield: 0,
        }
    }

    #[test]
    fn test_senior_rate_includes_spread() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        assert_eq!(annual_rate(&fidc, true).unwrap(), 2300);
        assert_eq!(annual_rate(&fidc, false).unwrap(), 1800);
    }

    #[test]
    fn test_senior_180_days() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        let inv = sample_investment(&env, 600 * UNIT, true);

        let (b, carried) = quote(&fidc, &inv, inv.amount, 180 * DAY).unwrap();
        assert_eq!(b.gross_yield, 680_547_945);
        assert_eq!(b.fee, 6_805_479);
        assert_eq!(b.net_yield, 673_742_466);
        assert_eq!(b.payout, 6_673_742_466);
        assert_eq!(carried, 0);
    }

    #[test]
    fn test_subordinated_180_days() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        let inv = sample_investment(&env, 400 * UNIT, false);

        let (b, _) = quote(&fidc, &inv, inv.amount, 180 * DAY).unwrap();
        assert_eq!(b.gross_yield, 355_068_493);
        assert_eq!(b.fee, 3_550_684);
        assert_eq!(b.net_yield, 351_517_809);
        assert_eq!(b.payout, 4_351_517_809);
    }

    #[test]
    fn test_zero_elapsed_pays_principal() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        let inv = sample_investment(&env, 600 * UNIT, true);

        let (b, _) = quote(&fidc, &inv, inv.amount, 0).unwrap();
        assert_eq!(b.gross_yield, 0);
        assert_eq!(b.fee, 0);
        assert_eq!(b.payout, inv.amount);
    }

    #[test]
    fn test_partial_slice_is_pro_rata() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        let inv = sample_investment(&env, 600 * UNIT, true);

        let (half, carried) = quote(&fidc, &inv, 300 * UNIT, 180 * DAY).unwrap();
        // 680_547_945 / 2 = 340_273_972 (resto fica com o saldo)
        assert_eq!(half.gross_yield, 340_273_972);
        assert_eq!(carried, 680_547_945 - 340_273_972);
        assert_eq!(half.principal, 300 * UNIT);
    }

    #[test]
    fn test_accumulated_yield_is_carried() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        let mut inv = sample_investment(&env, 600 * UNIT, true);
        inv.accumulated_yield = 1_000;
        inv.yield_start_time = 100;

        let (b, _) = quote(&fidc, &inv, inv.amount, 100).unwrap();
        assert_eq!(b.gross_yield, 1_000);
        assert_eq!(b.fee, 10);
        assert_eq!(b.payout, 600 * UNIT + 990);
    }

    #[test]
    fn test_over_redeem_rejected() {
        let env = Env::default();
        let fidc = sample_fidc(&env);
        let inv = sample_investment(&env, 10, false);
        assert_eq!(
            quote(&fidc, &inv, 11, DAY),
            Err(FidcError::InsufficientFidcAmount)
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            gross_yield(i128::MAX, 5000, 1),
            Err(FidcError::ArithmeticOverflow)
        );
    }
}

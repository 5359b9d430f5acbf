use soroban_sdk::{Address, Env};
use crate::storage;
use crate::types::{Fidc, FidcError, FidcStatus, Role};

// ============================================================================
// VALIDAÇÕES (CHECKS do padrão CEI)
// ============================================================================

/// Valida se o motor já foi inicializado
pub fn require_initialized(env: &Env) -> Result<(), FidcError> {
    if !storage::has_config(env) {
        return Err(FidcError::NotInitialized);
    }
    Ok(())
}

/// Valida se o contrato não está pausado
pub fn require_not_paused(env: &Env) -> Result<(), FidcError> {
    if storage::is_paused(env) {
        return Err(FidcError::ContractPaused);
    }
    Ok(())
}

/// Valida se o amount é estritamente positivo
pub fn require_positive_amount(amount: i128) -> Result<(), FidcError> {
    if amount == 0 {
        return Err(FidcError::ZeroAmount);
    }
    if amount < 0 {
        return Err(FidcError::InvalidAmount);
    }
    Ok(())
}

/// O próprio endereço do motor faz o papel de endereço nulo
pub fn require_not_engine(env: &Env, addr: &Address) -> Result<(), FidcError> {
    if addr == &env.current_contract_address() {
        return Err(FidcError::ZeroAddress);
    }
    Ok(())
}

pub fn require_same_length(left: u32, right: u32) -> Result<(), FidcError> {
    if left != right {
        return Err(FidcError::ValidationFailed);
    }
    Ok(())
}

/// Valida se a conta possui o papel, devolvendo `error` caso contrário
pub fn require_role(
    env: &Env,
    role: Role,
    account: &Address,
    error: FidcError,
) -> Result<(), FidcError> {
    if !storage::has_role(env, role, account) {
        return Err(error);
    }
    Ok(())
}

/// Gestor do fundo ou admin geral
pub fn require_fund_manager(env: &Env, fidc: &Fidc, caller: &Address) -> Result<(), FidcError> {
    if caller == &fidc.manager || storage::has_role(env, Role::DefaultAdmin, caller) {
        return Ok(());
    }
    Err(FidcError::Unauthorized)
}

pub fn require_status(fidc: &Fidc, expected: FidcStatus) -> Result<(), FidcError> {
    if fidc.status != expected {
        return Err(FidcError::InvalidStatus);
    }
    Ok(())
}

/// Resgates iniciados pelo investidor: fundo aberto ou suspenso
pub fn require_redeemable_status(fidc: &Fidc) -> Result<(), FidcError> {
    match fidc.status {
        FidcStatus::Active | FidcStatus::Stopped => Ok(()),
        _ => Err(FidcError::InvalidStatus),
    }
}

/// A carência é um piso rígido contado a partir do início do fundo
pub fn require_grace_period_ended(fidc: &Fidc, now: u64) -> Result<(), FidcError> {
    let unlock = fidc
        .start_date
        .checked_add(fidc.grace_period)
        .ok_or(FidcError::ArithmeticOverflow)?;
    if now < unlock {
        return Err(FidcError::GracePeriodNotEnded);
    }
    Ok(())
}

/// Valida os parâmetros econômicos de um fundo novo
pub fn require_valid_fund_params(
    fee: u32,
    annual_yield: u32,
    grace_period: u64,
    senior_spread: u32,
) -> Result<(), FidcError> {
    if fee > storage::MAX_FEE {
        return Err(FidcError::InvalidFee);
    }

    if annual_yield > storage::MAX_YIELD {
        return Err(FidcError::InvalidYield);
    }

    if senior_spread > storage::MAX_SENIOR_SPREAD {
        return Err(FidcError::InvalidSpread);
    }

    if grace_period < storage::MIN_GRACE_PERIOD || grace_period > storage::MAX_GRACE_PERIOD {
        return Err(FidcError::InvalidGracePeriod);
    }

    Ok(())
}

/// Subordinação: senior_invested × 10000 ≥ invested × MIN_SENIOR_RATIO
pub fn require_senior_ratio(senior_invested: i128, invested: i128) -> Result<(), FidcError> {
    let senior_side = senior_invested
        .checked_mul(storage::BPS_DENOMINATOR)
        .ok_or(FidcError::ArithmeticOverflow)?;
    let floor = invested
        .checked_mul(storage::MIN_SENIOR_RATIO as i128)
        .ok_or(FidcError::ArithmeticOverflow)?;

    if senior_side < floor {
        return Err(FidcError::InvalidSeniorRatio);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount() {
        assert_eq!(require_positive_amount(0), Err(FidcError::ZeroAmount));
        assert_eq!(require_positive_amount(-5), Err(FidcError::InvalidAmount));
        assert!(require_positive_amount(1).is_ok());
    }

    #[test]
    fn test_fund_params_bounds() {
        assert!(require_valid_fund_params(100, 1800, 86_400, 500).is_ok());
        assert!(require_valid_fund_params(
            storage::MAX_FEE,
            storage::MAX_YIELD,
            storage::MAX_GRACE_PERIOD,
            storage::MAX_SENIOR_SPREAD
        )
        .is_ok());

        assert_eq!(
            require_valid_fund_params(storage::MAX_FEE + 1, 1800, 86_400, 500),
            Err(FidcError::InvalidFee)
        );
        assert_eq!(
            require_valid_fund_params(100, storage::MAX_YIELD + 1, 86_400, 500),
            Err(FidcError::InvalidYield)
        );
        assert_eq!(
            require_valid_fund_params(100, 1800, 86_400, storage::MAX_SENIOR_SPREAD + 1),
            Err(FidcError::InvalidSpread)
        );
        assert_eq!(
            require_valid_fund_params(100, 1800, storage::MIN_GRACE_PERIOD - 1, 500),
            Err(FidcError::InvalidGracePeriod)
        );
        assert_eq!(
            require_valid_fund_params(100, 1800, storage::MAX_GRACE_PERIOD + 1, 500),
            Err(FidcError::InvalidGracePeriod)
        );
    }

    #[test]
    fn test_senior_ratio() {
        // 60/40 passa, 50/50 é o limite, 40/60 quebra
        assert!(require_senior_ratio(600, 1000).is_ok());
        assert!(require_senior_ratio(500, 1000).is_ok());
        assert_eq!(
            require_senior_ratio(499, 1000),
            Err(FidcError::InvalidSeniorRatio)
        );
        assert_eq!(require_senior_ratio(0, 1), Err(FidcError::InvalidSeniorRatio));
        assert!(require_senior_ratio(0, 0).is_ok());
    }

    #[test]
    fn test_same_length() {
        assert!(require_same_length(3, 3).is_ok());
        assert_eq!(require_same_length(2, 3), Err(FidcError::ValidationFailed));
    }
}

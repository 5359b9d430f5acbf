use soroban_sdk::{token, Address, Env};
use crate::storage;
use crate::types::FidcError;

// ============================================================================
// ATIVO DE LIQUIDAÇÃO (SEP-41)
// ============================================================================

fn client(env: &Env) -> Result<token::Client<'_>, FidcError> {
    let config = storage::get_config(env)?;
    Ok(token::Client::new(env, &config.settlement_token))
}

/// Saldo do ativo de liquidação mantido pelo motor
pub fn vault_balance(env: &Env) -> Result<i128, FidcError> {
    Ok(client(env)?.balance(&env.current_contract_address()))
}

/// Puxa `amount` de `from` usando a allowance concedida ao motor.
/// `allowance_error` diferencia o fluxo do pagador do fluxo do investidor.
pub fn pull(
    env: &Env,
    from: &Address,
    amount: i128,
    allowance_error: FidcError,
) -> Result<(), FidcError> {
    let token = client(env)?;
    let vault = env.current_contract_address();

    if token.allowance(from, &vault) < amount {
        return Err(allowance_error);
    }
    if token.balance(from) < amount {
        return Err(FidcError::InsufficientBalance);
    }

    token.transfer_from(&vault, from, &vault, &amount);
    Ok(())
}

/// Envia `amount` do cofre do motor para `to`. Valores nulos são ignorados.
pub fn push(env: &Env, to: &Address, amount: i128) -> Result<(), FidcError> {
    if amount <= 0 {
        return Ok(());
    }
    let token = client(env)?;
    token.transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}

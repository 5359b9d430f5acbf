use soroban_sdk::{token, Address, Env};
use crate::events;
use crate::storage;
use crate::types::{FidcError, Role};
use crate::validation;

// ============================================================================
// ADMIN OPS - PAUSA E RECUPERAÇÃO
// ============================================================================

fn require_default_admin(env: &Env, caller: &Address) -> Result<(), FidcError> {
    validation::require_role(
        env,
        Role::DefaultAdmin,
        caller,
        FidcError::AccessControlUnauthorizedAccount,
    )
}

pub fn toggle_pause(env: &Env, caller: &Address, paused: bool) -> Result<(), FidcError> {
    require_default_admin(env, caller)?;

    storage::set_paused(env, paused);

    if paused {
        events::emit_pause(env, caller);
    } else {
        events::emit_unpause(env, caller);
    }
    Ok(())
}

/// Recupera tokens (USDC, XLM, etc) enviados por engano para o contrato.
/// O ativo de liquidação nunca sai por aqui: ele pertence aos fundos.
pub fn recover_erc20(
    env: &Env,
    caller: &Address,
    token_address: &Address,
    amount: i128,
) -> Result<(), FidcError> {
    // === CHECKS ===
    require_default_admin(env, caller)?;

    let config = storage::get_config(env)?;
    let engine = env.current_contract_address();
    if token_address == &config.settlement_token || token_address == &engine {
        return Err(FidcError::InvalidToken);
    }
    validation::require_positive_amount(amount).map_err(|_| FidcError::ZeroAmount)?;

    let client = token::Client::new(env, token_address);
    if client.balance(&engine) < amount {
        return Err(FidcError::InsufficientBalance);
    }

    // === INTERACTIONS ===
    client.transfer(&engine, caller, &amount);
    events::emit_token_recovered(env, token_address, caller, amount);

    Ok(())
}

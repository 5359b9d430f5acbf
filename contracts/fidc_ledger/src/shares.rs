use soroban_sdk::{Address, Env};
use crate::storage::{self, DataKey};
use crate::types::FidcError;

// ============================================================================
// LIVROS DO FUNDO
// ============================================================================
// Cotas: emitidas 1:1 com o principal aportado (estilo ERC-4626).
// Recebíveis: unidades do lastro do fundo, custodiadas pelo motor enquanto
// o fundo está ativo.

pub fn share_balance(env: &Env, fidc_id: u32, holder: &Address) -> i128 {
    storage::get_amount(env, &DataKey::ShareBalance(fidc_id, holder.clone()))
}

pub fn share_supply(env: &Env, fidc_id: u32) -> i128 {
    storage::get_amount(env, &DataKey::ShareSupply(fidc_id))
}

pub fn receivable_balance(env: &Env, fidc_id: u32, holder: &Address) -> i128 {
    storage::get_amount(env, &DataKey::ReceivableBalance(fidc_id, holder.clone()))
}

pub fn receivable_supply(env: &Env, fidc_id: u32) -> i128 {
    storage::get_amount(env, &DataKey::ReceivableSupply(fidc_id))
}

fn credit(env: &Env, balance_key: DataKey, supply_key: DataKey, amount: i128) -> Result<(), FidcError> {
    let new_balance = storage::get_amount(env, &balance_key)
        .checked_add(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;
    let new_supply = storage::get_amount(env, &supply_key)
        .checked_add(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;

    storage::set_amount(env, &balance_key, new_balance);
    storage::set_amount(env, &supply_key, new_supply);
    Ok(())
}

fn debit(env: &Env, balance_key: DataKey, supply_key: DataKey, amount: i128) -> Result<(), FidcError> {
    let balance = storage::get_amount(env, &balance_key);
    if balance < amount {
        return Err(FidcError::InsufficientBalance);
    }
    let new_balance = balance
        .checked_sub(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;
    let new_supply = storage::get_amount(env, &supply_key)
        .checked_sub(amount)
        .ok_or(FidcError::ArithmeticOverflow)?;

    storage::set_amount(env, &balance_key, new_balance);
    storage::set_amount(env, &supply_key, new_supply);
    Ok(())
}

pub fn mint_shares(env: &Env, fidc_id: u32, to: &Address, amount: i128) -> Result<(), FidcError> {
    credit(
        env,
        DataKey::ShareBalance(fidc_id, to.clone()),
        DataKey::ShareSupply(fidc_id),
        amount,
    )
}

pub fn burn_shares(env: &Env, fidc_id: u32, from: &Address, amount: i128) -> Result<(), FidcError> {
    debit(
        env,
        DataKey::ShareBalance(fidc_id, from.clone()),
        DataKey::ShareSupply(fidc_id),
        amount,
    )
}

/// Emite a série de recebíveis do fundo na custódia do motor
pub fn issue_receivables(env: &Env, fidc_id: u32, amount: i128) -> Result<(), FidcError> {
    credit(
        env,
        DataKey::ReceivableBalance(fidc_id, env.current_contract_address()),
        DataKey::ReceivableSupply(fidc_id),
        amount,
    )
}

/// Queima tudo que estiver em custódia; devolve o total queimado
pub fn burn_custody_receivables(env: &Env, fidc_id: u32) -> Result<i128, FidcError> {
    let custody = env.current_contract_address();
    let held = receivable_balance(env, fidc_id, &custody);
    if held > 0 {
        debit(
            env,
            DataKey::ReceivableBalance(fidc_id, custody),
            DataKey::ReceivableSupply(fidc_id),
            held,
        )?;
    }
    Ok(held)
}

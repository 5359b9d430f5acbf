use soroban_sdk::{contracttype, Address, Env, Vec};
use crate::types::{EngineConfig, Fidc, FidcError, InvestorType, Investment, Role};

// ============================================================================
// CONSTANTES
// ============================================================================

/// Taxa de gestão máxima: 20% do rendimento bruto
pub const MAX_FEE: u32 = 2_000;

/// Rendimento anual máximo: 50% a.a.
pub const MAX_YIELD: u32 = 5_000;

/// Spread senior máximo: 20% a.a.
pub const MAX_SENIOR_SPREAD: u32 = 2_000;

/// Carência mínima: 1 dia
pub const MIN_GRACE_PERIOD: u64 = 86_400;

/// Carência máxima: 365 dias
pub const MAX_GRACE_PERIOD: u64 = 31_536_000;

/// Subordinação mínima: a cota senior deve ser ao menos 50% do patrimônio
pub const MIN_SENIOR_RATIO: u32 = 5_000;

pub const BPS_DENOMINATOR: i128 = 10_000;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// TTL para storage crítico (30 dias ~= 518K ledgers)
const CRITICAL_STORAGE_TTL: u32 = 518_400;

/// TTL threshold para bump (7 dias ~= 121K ledgers)
const CRITICAL_STORAGE_THRESHOLD: u32 = 120_960;

// ============================================================================
// CHAVES
// ============================================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // instance
    Config,
    Paused,
    Reentrancy,
    FidcCounter,
    RoleAdmin(Role),
    // persistent
    Role(Role, Address),
    FundInvestor(u32, Address),            // (fidc_id, investor)
    Fidc(u32),
    PjApproval(Address, u32),              // (pj, fidc_id)
    Investment(u32, Address, u32),         // (fidc_id, investor, investment_id)
    InvestorIds(u32, Address),             // (fidc_id, investor)
    NextInvestmentId(u32),
    InvestmentOwner(u32, u32),             // (fidc_id, investment_id)
    ShareBalance(u32, Address),
    ShareSupply(u32),
    ReceivableBalance(u32, Address),
    ReceivableSupply(u32),
}

// ============================================================================
// FUNÇÕES DE BUMP (TTL)
// ============================================================================

/// Faz bump do TTL de storage crítico (config, paused, contador, admins)
pub fn bump_critical_storage(env: &Env) {
    env.storage().instance().extend_ttl(
        CRITICAL_STORAGE_THRESHOLD,
        CRITICAL_STORAGE_TTL,
    );
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        CRITICAL_STORAGE_THRESHOLD,
        CRITICAL_STORAGE_TTL,
    );
}

fn read_persistent<T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
) -> Option<T> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write_persistent<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
    value: &T,
) {
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// ============================================================================
// CONFIGURAÇÃO
// ============================================================================

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<EngineConfig, FidcError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FidcError::NotInitialized)
}

pub fn set_config(env: &Env, config: &EngineConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// PAUSED / REENTRANCY
// ============================================================================

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_reentrancy_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Reentrancy)
        .unwrap_or(false)
}

pub fn set_reentrancy_guard(env: &Env, locked: bool) {
    env.storage().instance().set(&DataKey::Reentrancy, &locked);
}

// ============================================================================
// PAPÉIS
// ============================================================================

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    read_persistent(env, &DataKey::Role(role, account.clone())).unwrap_or(false)
}

pub fn set_role(env: &Env, role: Role, account: &Address, member: bool) {
    let key = DataKey::Role(role, account.clone());
    if member {
        write_persistent(env, &key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

/// Admin padrão: investidores são administrados pelo gestor, o resto pelo admin geral.
fn default_role_admin(role: Role) -> Role {
    match role {
        Role::InvestorSenior | Role::InvestorSub => Role::Manager,
        _ => Role::DefaultAdmin,
    }
}

pub fn get_role_admin(env: &Env, role: Role) -> Role {
    env.storage()
        .instance()
        .get(&DataKey::RoleAdmin(role))
        .unwrap_or(default_role_admin(role))
}

pub fn set_role_admin(env: &Env, role: Role, admin_role: Role) {
    env.storage()
        .instance()
        .set(&DataKey::RoleAdmin(role), &admin_role);
}

pub fn get_investor_type(env: &Env, fidc_id: u32, investor: &Address) -> Option<InvestorType> {
    read_persistent(env, &DataKey::FundInvestor(fidc_id, investor.clone()))
}

pub fn set_investor_type(env: &Env, fidc_id: u32, investor: &Address, investor_type: InvestorType) {
    write_persistent(
        env,
        &DataKey::FundInvestor(fidc_id, investor.clone()),
        &investor_type,
    );
}

pub fn remove_investor_type(env: &Env, fidc_id: u32, investor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::FundInvestor(fidc_id, investor.clone()));
}

// ============================================================================
// FUNDOS
// ============================================================================

pub fn get_fidc_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::FidcCounter)
        .unwrap_or(0)
}

/// Reserva o próximo id de fundo (começa em 1).
pub fn next_fidc_id(env: &Env) -> Result<u32, FidcError> {
    let next = get_fidc_count(env)
        .checked_add(1)
        .ok_or(FidcError::ArithmeticOverflow)?;
    env.storage().instance().set(&DataKey::FidcCounter, &next);
    Ok(next)
}

pub fn get_fidc(env: &Env, fidc_id: u32) -> Result<Fidc, FidcError> {
    read_persistent(env, &DataKey::Fidc(fidc_id)).ok_or(FidcError::FidcNotFound)
}

pub fn set_fidc(env: &Env, fidc: &Fidc) {
    write_persistent(env, &DataKey::Fidc(fidc.id), fidc);
}

pub fn is_pj_approved(env: &Env, pj: &Address, fidc_id: u32) -> bool {
    read_persistent(env, &DataKey::PjApproval(pj.clone(), fidc_id)).unwrap_or(false)
}

pub fn set_pj_approved(env: &Env, pj: &Address, fidc_id: u32, approved: bool) {
    write_persistent(env, &DataKey::PjApproval(pj.clone(), fidc_id), &approved);
}

// ============================================================================
// APORTES
// ============================================================================

/// Reserva o próximo id de aporte dentro do fundo (começa em 1).
pub fn next_investment_id(env: &Env, fidc_id: u32) -> Result<u32, FidcError> {
    let key = DataKey::NextInvestmentId(fidc_id);
    let current: u32 = read_persistent(env, &key).unwrap_or(0);
    let next = current
        .checked_add(1)
        .ok_or(FidcError::ArithmeticOverflow)?;
    write_persistent(env, &key, &next);
    Ok(next)
}

pub fn get_investment(
    env: &Env,
    fidc_id: u32,
    investor: &Address,
    investment_id: u32,
) -> Option<Investment> {
    read_persistent(env, &DataKey::Investment(fidc_id, investor.clone(), investment_id))
}

pub fn set_investment(env: &Env, investment: &Investment) {
    write_persistent(
        env,
        &DataKey::Investment(
            investment.fidc_id,
            investment.investor.clone(),
            investment.investment_id,
        ),
        investment,
    );
}

pub fn get_investment_owner(env: &Env, fidc_id: u32, investment_id: u32) -> Option<Address> {
    read_persistent(env, &DataKey::InvestmentOwner(fidc_id, investment_id))
}

pub fn set_investment_owner(env: &Env, fidc_id: u32, investment_id: u32, owner: &Address) {
    write_persistent(env, &DataKey::InvestmentOwner(fidc_id, investment_id), owner);
}

pub fn get_investor_ids(env: &Env, fidc_id: u32, investor: &Address) -> Vec<u32> {
    read_persistent(env, &DataKey::InvestorIds(fidc_id, investor.clone()))
        .unwrap_or(Vec::new(env))
}

fn set_investor_ids(env: &Env, fidc_id: u32, investor: &Address, ids: &Vec<u32>) {
    let key = DataKey::InvestorIds(fidc_id, investor.clone());
    if ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        write_persistent(env, &key, ids);
    }
}

/// Grava um aporte novo e o anexa à lista ordenada do investidor.
pub fn push_investment(env: &Env, investment: &Investment) {
    set_investment(env, investment);
    set_investment_owner(
        env,
        investment.fidc_id,
        investment.investment_id,
        &investment.investor,
    );

    let mut ids = get_investor_ids(env, investment.fidc_id, &investment.investor);
    ids.push_back(investment.investment_id);
    set_investor_ids(env, investment.fidc_id, &investment.investor, &ids);
}

/// Apaga o registro (resgate total). O dono continua gravado para distinguir
/// "já resgatado" de "inexistente".
pub fn remove_investment(env: &Env, fidc_id: u32, investor: &Address, investment_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Investment(fidc_id, investor.clone(), investment_id));

    let mut ids = get_investor_ids(env, fidc_id, investor);
    if let Some(index) = ids.first_index_of(investment_id) {
        ids.remove(index);
    }
    set_investor_ids(env, fidc_id, investor, &ids);
}

pub fn get_all_investments(env: &Env, fidc_id: u32, investor: &Address) -> Vec<Investment> {
    let ids = get_investor_ids(env, fidc_id, investor);
    let mut investments = Vec::new(env);

    for id in ids.iter() {
        if let Some(investment) = get_investment(env, fidc_id, investor, id) {
            investments.push_back(investment);
        }
    }

    investments
}

// ============================================================================
// LIVROS DO FUNDO (COTAS E RECEBÍVEIS)
// ============================================================================

pub fn get_amount(env: &Env, key: &DataKey) -> i128 {
    read_persistent(env, key).unwrap_or(0)
}

pub fn set_amount(env: &Env, key: &DataKey, amount: i128) {
    if amount == 0 {
        env.storage().persistent().remove(key);
    } else {
        write_persistent(env, key, &amount);
    }
}

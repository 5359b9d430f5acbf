use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};
use crate::access;
use crate::admin;
use crate::emission;
use crate::fund;
use crate::guard::with_reentrancy_guard;
use crate::investment;
use crate::redemption;
use crate::settlement;
use crate::shares;
use crate::storage;
use crate::types::{
    EngineConfig, Fidc, FidcError, InvestorPosition, InvestorType, Investment, Role,
    YieldBreakdown,
};
use crate::validation;

//
// CONTRATO PRINCIPAL - FIDC LEDGER
//

#[contract]
pub struct FidcLedger;

/// Preâmbulo comum às operações mutáveis: auth, inicialização, pausa e TTL
fn enter(env: &Env, caller: &Address, pausable: bool) -> Result<(), FidcError> {
    caller.require_auth();
    validation::require_initialized(env)?;
    if pausable {
        validation::require_not_paused(env)?;
    }
    storage::bump_critical_storage(env);
    Ok(())
}

#[contractimpl]
impl FidcLedger {

    //
    // INICIALIZAÇÃO
    //

    /// Inicializa o motor.
    ///
    /// # Parâmetros
    /// - `admin`: recebe o papel `DefaultAdmin`
    /// - `settlement_token`: token SEP-41 usado em aportes, garantias e pagamentos
    ///
    /// # Erros
    /// - `AlreadyInitialized`: Se o contrato já foi inicializado
    /// - `InvalidToken`: Se o token for o próprio motor
    pub fn initialize(env: Env, admin: Address, settlement_token: Address) -> Result<(), FidcError> {
        // === CHECKS ===
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(FidcError::AlreadyInitialized);
        }
        if settlement_token == env.current_contract_address() {
            return Err(FidcError::InvalidToken);
        }

        // === EFFECTS ===
        storage::set_config(
            &env,
            &EngineConfig {
                settlement_token,
                initialized_at: env.ledger().timestamp(),
            },
        );
        storage::set_paused(&env, false);
        storage::set_reentrancy_guard(&env, false);
        storage::bump_critical_storage(&env);

        // === INTERACTIONS ===
        access::grant(&env, Role::DefaultAdmin, &admin, &admin);
        log!(&env, "fidc ledger initialized");

        Ok(())
    }

    pub fn get_config(env: Env) -> Result<EngineConfig, FidcError> {
        storage::get_config(&env)
    }

    pub fn settlement_token(env: Env) -> Result<Address, FidcError> {
        Ok(storage::get_config(&env)?.settlement_token)
    }

    //
    // CONTROLE DE ACESSO
    // Administração de papéis não é bloqueada pela pausa.
    //

    pub fn grant_role(env: Env, caller: Address, role: Role, account: Address) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::grant_role(&env, &caller, role, &account)
        })
    }

    pub fn revoke_role(env: Env, caller: Address, role: Role, account: Address) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::revoke_role(&env, &caller, role, &account)
        })
    }

    /// O próprio titular abre mão do papel; `caller_confirmation` deve ser ele mesmo.
    pub fn renounce_role(
        env: Env,
        caller: Address,
        role: Role,
        caller_confirmation: Address,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::renounce_role(&env, &caller, role, &caller_confirmation)
        })
    }

    pub fn set_role_admin(env: Env, caller: Address, role: Role, admin_role: Role) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::set_role_admin(&env, &caller, role, admin_role)
        })
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        storage::has_role(&env, role, &account)
    }

    pub fn get_role_admin(env: Env, role: Role) -> Role {
        storage::get_role_admin(&env, role)
    }

    pub fn approve_manager(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::approve_accounts(&env, &caller, Role::Manager, &accounts)
        })
    }

    pub fn approve_validator(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::approve_accounts(&env, &caller, Role::Validator, &accounts)
        })
    }

    pub fn approve_payable(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::approve_accounts(&env, &caller, Role::Payable, &accounts)
        })
    }

    pub fn revoke_manager(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::revoke_accounts(&env, &caller, Role::Manager, &accounts)
        })
    }

    pub fn revoke_validator(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::revoke_accounts(&env, &caller, Role::Validator, &accounts)
        })
    }

    pub fn revoke_payable(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::revoke_accounts(&env, &caller, Role::Payable, &accounts)
        })
    }

    /// Registra investidores em fundos. Os três vetores andam juntos, posição a posição.
    ///
    /// # Erros
    /// - `ValidationFailed`: vetores de tamanhos diferentes ou vazios
    /// - `AccessControlUnauthorizedAccount`: caller não administra o papel da classe
    /// - `Unauthorized`: caller não é gestor do fundo
    /// - `AlreadyRegistered`: investidor já registrado no fundo com outra classe
    pub fn approve_investor(
        env: Env,
        caller: Address,
        investors: Vec<Address>,
        investor_types: Vec<InvestorType>,
        fidc_ids: Vec<u32>,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::approve_investors(&env, &caller, &investors, &investor_types, &fidc_ids)
        })
    }

    pub fn revoke_investor(
        env: Env,
        caller: Address,
        investors: Vec<Address>,
        fidc_ids: Vec<u32>,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            access::revoke_investors(&env, &caller, &investors, &fidc_ids)
        })
    }

    pub fn investor_type(env: Env, investor: Address, fidc_id: u32) -> Option<InvestorType> {
        storage::get_investor_type(&env, fidc_id, &investor)
    }

    //
    // REGISTRO DE FUNDOS
    //

    /// Cria um fundo em `Pending` e devolve o id.
    ///
    /// # Erros
    /// - `Unauthorized`: caller sem `Manager`/`DefaultAdmin`, ou `manager` sem `Manager`
    /// - `ValidatorNotApproved` / `PayableNotApproved`: papéis ausentes
    /// - `InvalidFee`, `InvalidYield`, `InvalidSpread`, `InvalidGracePeriod`
    /// - `ZeroAddress`: algum endereço é o próprio motor
    #[allow(clippy::too_many_arguments)]
    pub fn initialize_fidc(
        env: Env,
        caller: Address,
        manager: Address,
        validator: Address,
        payable: Address,
        fee: u32,
        annual_yield: u32,
        grace_period: u64,
        senior_spread: u32,
    ) -> Result<u32, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            fund::initialize_fidc(
                &env,
                &caller,
                &manager,
                &validator,
                &payable,
                fee,
                annual_yield,
                grace_period,
                senior_spread,
            )
        })
    }

    pub fn close_fidc(env: Env, caller: Address, fidc_id: u32) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            fund::close_fidc(&env, &caller, fidc_id)
        })
    }

    pub fn stop_fidc(env: Env, caller: Address, fidc_id: u32) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            fund::stop_fidc(&env, &caller, fidc_id)
        })
    }

    pub fn resume_fidc(env: Env, caller: Address, fidc_id: u32) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            fund::resume_fidc(&env, &caller, fidc_id)
        })
    }

    pub fn liquidate_fidc(env: Env, caller: Address, fidc_id: u32) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            fund::liquidate_fidc(&env, &caller, fidc_id)
        })
    }

    pub fn fidcs(env: Env, fidc_id: u32) -> Result<Fidc, FidcError> {
        storage::get_fidc(&env, fidc_id)
    }

    pub fn validation_fidc(env: Env, fidc_id: u32) -> Result<bool, FidcError> {
        Ok(storage::get_fidc(&env, fidc_id)?.valid)
    }

    pub fn fidc_count(env: Env) -> u32 {
        storage::get_fidc_count(&env)
    }

    //
    // EMISSÃO
    //

    pub fn approved_emission_validator(
        env: Env,
        caller: Address,
        pj: Address,
        fidc_id: u32,
        schedule_amount: i128,
        collateral_amount: i128,
        is_approved: bool,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            emission::approved_emission_validator(
                &env,
                &caller,
                &pj,
                fidc_id,
                schedule_amount,
                collateral_amount,
                is_approved,
            )
        })
    }

    /// Depósito (ou retirada) da garantia pelo pagador.
    /// Requer allowance prévia do ativo de liquidação para o motor.
    pub fn approved_emission_payable(
        env: Env,
        caller: Address,
        fidc_id: u32,
        amount: i128,
        is_approved: bool,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            emission::approved_emission_payable(&env, &caller, fidc_id, amount, is_approved)
        })
    }

    pub fn revoke_pj(
        env: Env,
        caller: Address,
        pjs: Vec<Address>,
        fidc_ids: Vec<u32>,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            emission::revoke_pj(&env, &caller, &pjs, &fidc_ids)
        })
    }

    pub fn is_approved_emission(env: Env, pj: Address, fidc_id: u32) -> bool {
        emission::is_approved_emission(&env, &pj, fidc_id)
    }

    //
    // APORTES
    //

    /// Aporta `amount` no fundo e devolve o id do aporte.
    /// Requer allowance prévia do ativo de liquidação para o motor.
    pub fn invest(env: Env, investor: Address, fidc_id: u32, amount: i128) -> Result<u32, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &investor, true)?;
            investment::invest(&env, &investor, fidc_id, amount)
        })
    }

    pub fn accrue_yield(
        env: Env,
        investor: Address,
        fidc_id: u32,
        investment_id: u32,
    ) -> Result<i128, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &investor, true)?;
            investment::accrue_yield(&env, &investor, fidc_id, investment_id)
        })
    }

    pub fn get_investments(env: Env, investor: Address, fidc_id: u32) -> Vec<Investment> {
        investment::get_investments(&env, &investor, fidc_id)
    }

    pub fn get_investor_position(
        env: Env,
        investor: Address,
        fidc_id: u32,
    ) -> Result<InvestorPosition, FidcError> {
        investment::get_investor_position(&env, &investor, fidc_id)
    }

    //
    // LIVROS DO FUNDO
    //

    pub fn total_assets(env: Env, fidc_id: u32) -> Result<i128, FidcError> {
        Ok(storage::get_fidc(&env, fidc_id)?.liquidity)
    }

    pub fn balance_of(env: Env, fidc_id: u32, holder: Address) -> i128 {
        shares::share_balance(&env, fidc_id, &holder)
    }

    pub fn total_shares(env: Env, fidc_id: u32) -> i128 {
        shares::share_supply(&env, fidc_id)
    }

    pub fn receivable_balance(env: Env, fidc_id: u32, holder: Address) -> i128 {
        shares::receivable_balance(&env, fidc_id, &holder)
    }

    pub fn receivable_supply(env: Env, fidc_id: u32) -> i128 {
        shares::receivable_supply(&env, fidc_id)
    }

    //
    // RESGATES
    //

    /// Resgata `amount` do principal do aporte e devolve o valor pago.
    ///
    /// # Erros
    /// - `GracePeriodNotEnded`: antes de `start_date + grace_period`
    /// - `InsufficientFidcAmount`: `amount` maior que o principal
    /// - `InsufficientLiquidity`: caixa não cobre pagamento + taxa
    pub fn redeem(
        env: Env,
        investor: Address,
        fidc_id: u32,
        investment_id: u32,
        amount: i128,
    ) -> Result<i128, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &investor, true)?;
            redemption::redeem(&env, &investor, fidc_id, investment_id, amount)
        })
    }

    pub fn redeem_all(
        env: Env,
        investor: Address,
        fidc_id: u32,
        investment_id: u32,
    ) -> Result<i128, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &investor, true)?;
            redemption::redeem_all(&env, &investor, fidc_id, investment_id)
        })
    }

    pub fn redeem_all_manager(
        env: Env,
        caller: Address,
        fidc_id: u32,
        investors: Vec<Address>,
    ) -> Result<i128, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            redemption::redeem_all_manager(&env, &caller, fidc_id, &investors)
        })
    }

    pub fn preview_redeem(
        env: Env,
        investor: Address,
        fidc_id: u32,
        investment_id: u32,
        amount: i128,
    ) -> Result<YieldBreakdown, FidcError> {
        redemption::preview_redeem(&env, &investor, fidc_id, investment_id, amount)
    }

    pub fn withdraw_leftover(env: Env, caller: Address, fidc_id: u32) -> Result<i128, FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            redemption::withdraw_leftover(&env, &caller, fidc_id)
        })
    }

    //
    // PAUSA E RECUPERAÇÃO
    //

    pub fn toggle_pause(env: Env, caller: Address, paused: bool) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, false)?;
            admin::toggle_pause(&env, &caller, paused)
        })
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn recover_erc20(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), FidcError> {
        with_reentrancy_guard(&env, || {
            enter(&env, &caller, true)?;
            admin::recover_erc20(&env, &caller, &token, amount)
        })
    }

    /// Saldo do ativo de liquidação em custódia (soma dos caixas dos fundos)
    pub fn vault_balance(env: Env) -> Result<i128, FidcError> {
        settlement::vault_balance(&env)
    }
}

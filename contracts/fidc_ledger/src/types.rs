use soroban_sdk::{contracterror, contracttype, Address, Vec};

// ============================================================================
// ERROS DO CONTRATO
// ============================================================================
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FidcError {
    // Inicialização (1-9)
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Autorização (10-19)
    Unauthorized = 10,
    UnauthorizedInvestor = 11,
    ValidatorNotApproved = 12,
    AccessControlUnauthorizedAccount = 13,

    // Validação de parâmetros (20-39)
    InvalidFee = 20,
    InvalidYield = 21,
    InvalidSpread = 22,
    InvalidGracePeriod = 23,
    InvalidSeniorRatio = 24,
    InvalidAmount = 25,
    ZeroAmount = 26,
    ZeroAddress = 27,
    InvalidInvestorType = 28,
    InvalidToken = 29,
    ValidationFailed = 30,

    // Conflitos de estado (40-49)
    InvalidStatus = 40,
    FidcAlreadyClosed = 41,
    StatusActive = 42,
    GracePeriodNotEnded = 43,
    ContractPaused = 44,
    AlreadyRegistered = 45,
    FidcNotFound = 46,

    // Recursos e liquidez (50-59)
    InsufficientBalance = 50,
    InsufficientLiquidity = 51,
    InsufficientFidcAmount = 52,
    NoLeftoverAmount = 53,
    NoPosition = 54,
    InvestmentNotFound = 55,
    NoValidInvestments = 56,
    InsufficientAllowance = 57,

    // Integridade (60-69)
    ReentrancyGuardReentrantCall = 60,
    PayableNotApproved = 61,
    NotAssociated = 62,
    ArithmeticOverflow = 63,
}

// ============================================================================
// PAPÉIS (ACCESS CONTROL)
// ============================================================================

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    DefaultAdmin,
    Manager,
    Validator,
    Payable,
    InvestorSenior,
    InvestorSub,
}

/// Classe de cota de um investidor dentro de um fundo.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvestorType {
    Senior,
    Subordinated,
}

impl InvestorType {
    /// Papel global exigido para aportar nesta classe.
    pub fn role(&self) -> Role {
        match self {
            InvestorType::Senior => Role::InvestorSenior,
            InvestorType::Subordinated => Role::InvestorSub,
        }
    }

    pub fn is_senior(&self) -> bool {
        matches!(self, InvestorType::Senior)
    }
}

// ============================================================================
// FUNDO (FIDC)
// ============================================================================

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FidcStatus {
    /// Criado, aguardando aprovação do validador e do pagador
    Pending = 0,
    /// Aberto para aportes e resgates
    Active = 1,
    /// Suspenso pelo gestor, aceita apenas resgates
    Stopped = 2,
    /// Em liquidação, só o gestor drena posições
    Liquidated = 3,
    /// Encerrado
    Closed = 4,
}

impl FidcStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FidcStatus::Liquidated | FidcStatus::Closed)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fidc {
    pub id: u32,
    pub manager: Address,
    pub validator: Address,
    pub payable: Address,
    /// Taxa de gestão sobre o rendimento bruto (bps)
    pub fee: u32,
    /// Rendimento anual base (bps)
    pub annual_yield: u32,
    /// Carência mínima antes de qualquer resgate (segundos)
    pub grace_period: u64,
    /// Prêmio adicional da cota senior (bps)
    pub senior_spread: u32,
    /// Contrato emissor das unidades de recebível deste fundo
    pub token_receivable: Address,
    /// Valor aprovado da emissão (teto de captação)
    pub amount: i128,
    /// Principal aportado e ainda não resgatado
    pub invested: i128,
    /// Parcela senior de `invested`
    pub senior_invested: i128,
    /// Ativo de liquidação custodiado pelo contrato em nome do fundo
    pub liquidity: i128,
    pub schedule_amount: i128,
    pub collateral_amount: i128,
    /// PJ cuja emissão o validador aprovou; `None` até a aprovação
    pub approved_pj: Option<Address>,
    pub validator_approved: bool,
    pub payable_approved: bool,
    pub valid: bool,
    pub start_date: u64,
    pub end_date: u64,
    pub status: FidcStatus,
}

// ============================================================================
// APORTES
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Investment {
    pub investment_id: u32,
    pub fidc_id: u32,
    pub investor: Address,
    pub amount: i128,
    pub investment_date: u64,
    pub yield_start_time: u64,
    pub is_senior: bool,
    pub accumulated_yield: i128,
    pub last_accumulated_yield: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorPosition {
    pub fidc_id: u32,
    pub total_amount: i128,
    pub investments: Vec<Investment>,
}

/// Decomposição de um resgate (cotação ou liquidação efetiva).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldBreakdown {
    pub principal: i128,
    pub gross_yield: i128,
    pub fee: i128,
    pub net_yield: i128,
    pub payout: i128,
}

// ============================================================================
// CONFIGURAÇÃO DO MOTOR
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Token SEP-41 usado para aportes, garantias e pagamentos
    pub settlement_token: Address,
    pub initialized_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_ordering() {
        assert!(FidcError::AlreadyInitialized < FidcError::Unauthorized);
        assert!(FidcError::ValidationFailed < FidcError::InvalidStatus);
        assert!(FidcError::InsufficientAllowance < FidcError::ReentrancyGuardReentrantCall);
    }

    #[test]
    fn test_error_values() {
        assert_eq!(FidcError::AlreadyInitialized as u32, 1);
        assert_eq!(FidcError::Unauthorized as u32, 10);
        assert_eq!(FidcError::GracePeriodNotEnded as u32, 43);
        assert_eq!(FidcError::ArithmeticOverflow as u32, 63);
    }

    #[test]
    fn test_investor_type_maps_to_role() {
        assert_eq!(InvestorType::Senior.role(), Role::InvestorSenior);
        assert_eq!(InvestorType::Subordinated.role(), Role::InvestorSub);
        assert!(InvestorType::Senior.is_senior());
        assert!(!InvestorType::Subordinated.is_senior());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!FidcStatus::Pending.is_terminal());
        assert!(!FidcStatus::Active.is_terminal());
        assert!(!FidcStatus::Stopped.is_terminal());
        assert!(FidcStatus::Liquidated.is_terminal());
        assert!(FidcStatus::Closed.is_terminal());
    }
}

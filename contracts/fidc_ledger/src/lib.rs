#![no_std]

pub mod storage;
mod types;
mod validation;
mod guard;
mod events;
mod access;
mod shares;
mod settlement;
mod yield_calc;
mod fund;
mod emission;
mod investment;
mod redemption;
mod admin;
mod ledger;

// ============================================================================
// CONTRATO PRINCIPAL
// ============================================================================

pub use ledger::{FidcLedger, FidcLedgerClient};
pub use types::*;

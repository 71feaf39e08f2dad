use thiserror::Error;

use alms_settlement::SettlementError;
use alms_types::{AccountId, Amount};

/// Errors produced by ledger operations.
///
/// Every precondition is checked before any mutation; a returned error
/// means the ledger, custody, and registry are exactly as before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("donation or withdrawal amount must be greater than zero")]
    ZeroAmount,

    #[error("caller {caller} is not the owner")]
    Unauthorized { caller: AccountId },

    #[error("owner must not be the null account")]
    NullOwner,

    #[error("insufficient funds: requested {requested}, custody holds {available}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount,
    },

    #[error("settlement transfer failed: {0}")]
    TransferFailed(#[from] SettlementError),

    #[error("accumulator overflow")]
    Overflow,

    #[error("registry integrity violation: {reason}")]
    IntegrityViolation { reason: String },
}

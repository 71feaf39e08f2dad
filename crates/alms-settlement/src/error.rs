use thiserror::Error;

use alms_types::Amount;

/// Errors produced by settlement operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("insufficient allowance: requested {requested}, approved {approved}")]
    InsufficientAllowance { requested: Amount, approved: Amount },

    #[error("insufficient custody: requested {requested}, held {held}")]
    InsufficientCustody { requested: Amount, held: Amount },
}

pub type SettlementResult<T> = Result<T, SettlementError>;

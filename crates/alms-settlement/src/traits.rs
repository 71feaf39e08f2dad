use alms_types::{AccountId, Amount, TokenId};

use crate::error::SettlementResult;

/// Value-movement boundary between the ledger and the outside world.
///
/// All implementations must satisfy these invariants:
/// - Every operation is all-or-nothing: on error, no balance has moved.
/// - `receive_native` and `pull_token` credit custody atomically with the
///   debit of the counterparty.
/// - `pull_token` succeeds only up to the allowance the counterparty has
///   granted to custody beforehand, and consumes it.
/// - Custody queries never mutate state.
pub trait Settlement: Send + Sync {
    /// Move native currency from `from` into custody.
    fn receive_native(&self, from: &AccountId, amount: Amount) -> SettlementResult<()>;

    /// Pull `amount` of `token` from `from` into custody, consuming allowance.
    fn pull_token(&self, token: &TokenId, from: &AccountId, amount: Amount)
        -> SettlementResult<()>;

    /// Pay native currency out of custody to `to`.
    fn push_native(&self, to: &AccountId, amount: Amount) -> SettlementResult<()>;

    /// Pay `amount` of `token` out of custody to `to`.
    fn push_token(&self, token: &TokenId, to: &AccountId, amount: Amount) -> SettlementResult<()>;

    /// Native currency currently held in custody.
    fn native_custody(&self) -> Amount;

    /// Amount of `token` currently held in custody.
    fn token_custody(&self, token: &TokenId) -> Amount;
}

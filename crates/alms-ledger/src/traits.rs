use alms_types::{AccountId, Amount, TokenId};

use crate::error::LedgerError;
use crate::history::DonationHistory;

/// Write boundary for donation-accounting mutations.
///
/// Every method is a single serialized, all-or-nothing step: either the
/// settlement movement and the accounting commit both happen, or neither
/// does.
pub trait DonationWriter: Send + Sync {
    /// Record a native-currency donation from `donor`.
    fn donate_native(&self, donor: &AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Record a token donation from `donor`, pulling the amount through the
    /// settlement layer first.
    fn donate_token(
        &self,
        donor: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Pay native currency out of custody to the owner. Owner-only.
    /// Accounting totals are untouched.
    fn withdraw_native(&self, caller: &AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Pay tokens out of custody to the owner. Owner-only.
    /// Accounting totals are untouched.
    fn withdraw_token(
        &self,
        caller: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Atomically replace the owner. Owner-only.
    fn transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<(), LedgerError>;
}

/// Read boundary for donation-accounting queries.
///
/// Reads observe a consistent snapshot; they never see a record mid-update.
pub trait DonationReader: Send + Sync {
    /// Total native currency ever donated by `donor` (0 for unknown donors).
    fn donation_total(&self, donor: &AccountId) -> Amount;

    /// Total of `token` ever donated by `donor` (0 when absent).
    fn token_donation_total(&self, token: &TokenId, donor: &AccountId) -> Amount;

    /// Enumerate every donor with their native total and materialized
    /// per-token contributions.
    fn all_donations(&self) -> DonationHistory;

    /// The current owner.
    fn current_owner(&self) -> AccountId;

    /// Number of registered donors.
    fn donor_count(&self) -> usize;
}

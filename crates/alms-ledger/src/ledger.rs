use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use alms_events::{EventFilter, EventHub, EventHubConfig, EventPayload, EventStream};
use alms_settlement::Settlement;
use alms_types::{AccountId, Amount, TokenId};

use crate::access::AccessController;
use crate::error::LedgerError;
use crate::history::DonationHistory;
use crate::records::DonorRecord;
use crate::traits::{DonationReader, DonationWriter};

/// The donation-accounting ledger.
///
/// One instance per hosting process: owner, donor registry, and records are
/// constructed once and live as long as the process. Mutations are
/// serialized behind a single write lock, held across the settlement
/// sub-step, so no two operations interleave partially. The settlement
/// capability is injected, never a concrete token implementation.
pub struct DonationLedger {
    access: AccessController,
    settlement: Arc<dyn Settlement>,
    events: EventHub,
    inner: RwLock<RegistryState>,
}

impl std::fmt::Debug for DonationLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonationLedger")
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct RegistryState {
    /// Donor addresses in first-donation order, each at most once.
    donors: Vec<AccountId>,
    /// One record per registered donor.
    records: HashMap<AccountId, DonorRecord>,
}

impl DonationLedger {
    /// Construct a ledger owned by `owner`, settling through `settlement`.
    pub fn new(owner: AccountId, settlement: Arc<dyn Settlement>) -> Result<Self, LedgerError> {
        Self::with_events_config(owner, settlement, EventHubConfig::default())
    }

    /// Construct with an explicit event hub configuration.
    pub fn with_events_config(
        owner: AccountId,
        settlement: Arc<dyn Settlement>,
        events: EventHubConfig,
    ) -> Result<Self, LedgerError> {
        let access = AccessController::new(owner)?;
        info!(owner = %owner, "donation ledger initialized");
        Ok(Self {
            access,
            settlement,
            events: EventHub::new(events),
            inner: RwLock::new(RegistryState::default()),
        })
    }

    /// Subscribe to notifications matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> EventStream {
        self.events.subscribe(filter)
    }

    /// Validate the structural invariants of the donor registry.
    ///
    /// Checks that registry addresses are unique, registry and records
    /// mirror each other exactly, per-record token entries are unique, and
    /// every registered donor has at least one recorded donation.
    pub fn validate_registry(&self) -> Result<(), LedgerError> {
        let state = self.inner.read().expect("ledger lock poisoned");

        let mut seen = HashSet::new();
        for donor in &state.donors {
            if !seen.insert(*donor) {
                return Err(LedgerError::IntegrityViolation {
                    reason: format!("donor {donor} registered more than once"),
                });
            }
            match state.records.get(donor) {
                None => {
                    return Err(LedgerError::IntegrityViolation {
                        reason: format!("donor {donor} has no record"),
                    });
                }
                Some(record) if record.address != *donor => {
                    return Err(LedgerError::IntegrityViolation {
                        reason: format!("record for {donor} carries a different address"),
                    });
                }
                Some(record) => {
                    let mut tokens = HashSet::new();
                    for entry in &record.token_contributions {
                        if !tokens.insert(entry.token) {
                            return Err(LedgerError::IntegrityViolation {
                                reason: format!(
                                    "donor {donor} has duplicate entries for token {}",
                                    entry.token
                                ),
                            });
                        }
                        if entry.amount == 0 {
                            return Err(LedgerError::IntegrityViolation {
                                reason: format!(
                                    "donor {donor} has a zero accumulator for token {}",
                                    entry.token
                                ),
                            });
                        }
                    }
                    if record.native_total == 0 && record.token_contributions.is_empty() {
                        return Err(LedgerError::IntegrityViolation {
                            reason: format!("donor {donor} is registered without any donation"),
                        });
                    }
                }
            }
        }

        if state.records.len() != state.donors.len() {
            return Err(LedgerError::IntegrityViolation {
                reason: "records exist outside the donor registry".into(),
            });
        }

        Ok(())
    }
}

impl DonationWriter for DonationLedger {
    fn donate_native(&self, donor: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let mut state = self.inner.write().expect("ledger lock poisoned");

        // Reject overflow before any value moves; the whole operation aborts.
        let projected = state
            .records
            .get(donor)
            .map(|record| record.native_total)
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.settlement.receive_native(donor, amount)?;

        let RegistryState { donors, records } = &mut *state;
        let record = records.entry(*donor).or_insert_with(|| {
            donors.push(*donor);
            DonorRecord::new(*donor)
        });
        record.native_total = projected;
        drop(state);

        debug!(donor = %donor, amount, total = projected, "native donation recorded");
        self.events.emit(EventPayload::Donation {
            donor: *donor,
            amount,
        });
        Ok(())
    }

    fn donate_token(
        &self,
        donor: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let mut state = self.inner.write().expect("ledger lock poisoned");

        let projected = state
            .records
            .get(donor)
            .map(|record| record.token_total(token))
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // The settlement layer must move the tokens before the accounting
        // commit; on failure nothing below runs.
        self.settlement.pull_token(token, donor, amount)?;

        let RegistryState { donors, records } = &mut *state;
        let record = records.entry(*donor).or_insert_with(|| {
            donors.push(*donor);
            DonorRecord::new(*donor)
        });
        record.commit_token_total(token, projected);
        drop(state);

        debug!(donor = %donor, token = %token, amount, total = projected, "token donation recorded");
        self.events.emit(EventPayload::TokenDonation {
            donor: *donor,
            token: *token,
            amount,
        });
        Ok(())
    }

    fn withdraw_native(&self, caller: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let available = self.settlement.native_custody();
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        self.settlement.push_native(caller, amount)?;
        info!(owner = %caller, amount, "native withdrawal");
        Ok(())
    }

    fn withdraw_token(
        &self,
        caller: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let available = self.settlement.token_custody(token);
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        self.settlement.push_token(token, caller, amount)?;
        info!(owner = %caller, token = %token, amount, "token withdrawal");
        Ok(())
    }

    fn transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<(), LedgerError> {
        let previous = self.access.transfer(caller, new_owner)?;
        info!(previous = %previous, new = %new_owner, "ownership transferred");
        self.events.emit(EventPayload::OwnershipTransfer {
            previous_owner: previous,
            new_owner: *new_owner,
        });
        Ok(())
    }
}

impl DonationReader for DonationLedger {
    fn donation_total(&self, donor: &AccountId) -> Amount {
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .records
            .get(donor)
            .map(|record| record.native_total)
            .unwrap_or(0)
    }

    fn token_donation_total(&self, token: &TokenId, donor: &AccountId) -> Amount {
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .records
            .get(donor)
            .map(|record| record.token_total(token))
            .unwrap_or(0)
    }

    fn all_donations(&self) -> DonationHistory {
        let state = self.inner.read().expect("ledger lock poisoned");

        let mut history = DonationHistory::default();
        for donor in &state.donors {
            // Registry invariant: every registered donor has a record.
            let Some(record) = state.records.get(donor) else {
                continue;
            };
            history.donors.push(*donor);
            history.native_totals.push(record.native_total);
            history
                .token_lists
                .push(record.token_contributions.iter().map(|e| e.token).collect());
            history
                .token_amount_lists
                .push(record.token_contributions.iter().map(|e| e.amount).collect());
        }
        history
    }

    fn current_owner(&self) -> AccountId {
        self.access.current_owner()
    }

    fn donor_count(&self) -> usize {
        let state = self.inner.read().expect("ledger lock poisoned");
        state.donors.len()
    }
}

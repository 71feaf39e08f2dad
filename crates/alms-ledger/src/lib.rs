//! Donation-accounting core for the Alms ledger.
//!
//! This crate is the heart of Alms. It provides:
//! - Per-donor accounting records with checked, append-only accumulators
//! - `DonationWriter` / `DonationReader` trait boundaries
//! - [`DonationLedger`]: serialized mutations over an in-memory registry,
//!   settled through a [`alms_settlement::Settlement`] capability
//! - Owner gating via [`AccessController`]
//! - Full-history enumeration as index-aligned parallel sequences
//! - Structural registry validation
//!
//! Accounting totals are historical: withdrawals move custody, never the
//! recorded totals.

pub mod access;
pub mod error;
pub mod history;
pub mod ledger;
pub mod records;
pub mod traits;

pub use access::AccessController;
pub use error::LedgerError;
pub use history::DonationHistory;
pub use ledger::DonationLedger;
pub use records::{DonorRecord, TokenContribution};
pub use traits::{DonationReader, DonationWriter};

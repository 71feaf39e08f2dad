//! Notification sink for the Alms donation ledger.
//!
//! The ledger emits a [`LedgerEvent`] after every committed mutation that
//! external observers care about. This crate provides:
//! - Event types with content-addressed IDs and integrity hashes
//! - [`EventFilter`] for subscribing to a subset of events
//! - [`EventHub`]: fan-out router delivering events to subscribers

pub mod event;
pub mod hub;

pub use event::{EventId, EventKind, EventPayload, LedgerEvent};
pub use hub::{EventFilter, EventHub, EventHubConfig, EventStream};

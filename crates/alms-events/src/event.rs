use serde::{Deserialize, Serialize};

use alms_types::{AccountId, Amount, TokenId};

/// Unique identifier for a ledger event.
///
/// A content hash of the event, making equal notifications at the same
/// sequence position content-addressable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    /// Content hash of the event (BLAKE3).
    pub hash: [u8; 32],
}

impl EventId {
    /// Create an `EventId` from a raw hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    /// Short hex representation (first 8 hex chars).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.hash[..4])
    }

    /// Full hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evt:{}", self.short_hex())
    }
}

/// Classification of ledger notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A native-currency donation has been recorded.
    DonationReceived,
    /// A token donation has been recorded.
    TokenDonationReceived,
    /// Ownership has moved to a new account.
    OwnershipTransferred,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DonationReceived => "DonationReceived",
            Self::TokenDonationReceived => "TokenDonationReceived",
            Self::OwnershipTransferred => "OwnershipTransferred",
        };
        write!(f, "{s}")
    }
}

/// Payload carried by a ledger notification.
///
/// Each payload shape maps to exactly one [`EventKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    /// A committed native-currency donation.
    Donation { donor: AccountId, amount: Amount },
    /// A committed token donation.
    TokenDonation {
        donor: AccountId,
        token: TokenId,
        amount: Amount,
    },
    /// A completed ownership transfer.
    OwnershipTransfer {
        previous_owner: AccountId,
        new_owner: AccountId,
    },
}

impl EventPayload {
    /// The event kind this payload corresponds to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Donation { .. } => EventKind::DonationReceived,
            Self::TokenDonation { .. } => EventKind::TokenDonationReceived,
            Self::OwnershipTransfer { .. } => EventKind::OwnershipTransferred,
        }
    }

    /// The donor this payload pertains to, when there is one.
    pub fn donor(&self) -> Option<&AccountId> {
        match self {
            Self::Donation { donor, .. } | Self::TokenDonation { donor, .. } => Some(donor),
            Self::OwnershipTransfer { .. } => None,
        }
    }
}

/// A single notification emitted by the ledger after a state commit.
///
/// Every event carries the hub-assigned sequence number, a classification
/// kind, a payload, and a BLAKE3 integrity hash computed over
/// (seq + payload).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Unique event identifier (content-addressed).
    pub id: EventId,
    /// Position in the hub's emission order, starting at 1.
    pub seq: u64,
    /// Classification of this event.
    pub kind: EventKind,
    /// Event-specific payload data.
    pub payload: EventPayload,
    /// BLAKE3 integrity hash over (seq, payload).
    pub integrity_hash: [u8; 32],
}

impl LedgerEvent {
    /// Build a new `LedgerEvent`, computing its integrity hash and ID.
    pub fn new(seq: u64, payload: EventPayload) -> Self {
        let integrity_hash = Self::compute_integrity(seq, &payload);
        Self {
            id: EventId::from_hash(integrity_hash),
            seq,
            kind: payload.kind(),
            payload,
            integrity_hash,
        }
    }

    /// Verify the event's integrity hash matches its content.
    pub fn verify_integrity(&self) -> bool {
        self.kind == self.payload.kind()
            && self.integrity_hash == Self::compute_integrity(self.seq, &self.payload)
    }

    fn compute_integrity(seq: u64, payload: &EventPayload) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"alms-event-v1:");
        hasher.update(&seq.to_le_bytes());
        if let Ok(payload_bytes) = bincode::serialize(payload) {
            hasher.update(&payload_bytes);
        }
        *hasher.finalize().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(amount: Amount) -> EventPayload {
        EventPayload::Donation {
            donor: AccountId::from_public_key(&[42u8; 32]),
            amount,
        }
    }

    #[test]
    fn event_integrity_roundtrip() {
        let event = LedgerEvent::new(1, donation(100));
        assert!(event.verify_integrity());
    }

    #[test]
    fn tampered_event_fails_verification() {
        let mut event = LedgerEvent::new(1, donation(100));
        event.payload = donation(999);
        assert!(!event.verify_integrity());
    }

    #[test]
    fn event_id_is_deterministic() {
        let e1 = LedgerEvent::new(7, donation(5));
        let e2 = LedgerEvent::new(7, donation(5));
        assert_eq!(e1.id, e2.id);
    }

    #[test]
    fn seq_distinguishes_equal_payloads() {
        let e1 = LedgerEvent::new(1, donation(5));
        let e2 = LedgerEvent::new(2, donation(5));
        assert_ne!(e1.id, e2.id);
    }

    #[test]
    fn kind_follows_payload() {
        let donor = AccountId::from_public_key(&[1; 32]);
        let token = TokenId::derive(&donor, "MTK");
        let event = LedgerEvent::new(
            1,
            EventPayload::TokenDonation {
                donor,
                token,
                amount: 10,
            },
        );
        assert_eq!(event.kind, EventKind::TokenDonationReceived);
        assert_eq!(event.payload.donor(), Some(&donor));
    }

    #[test]
    fn ownership_payload_has_no_donor() {
        let payload = EventPayload::OwnershipTransfer {
            previous_owner: AccountId::from_public_key(&[1; 32]),
            new_owner: AccountId::from_public_key(&[2; 32]),
        };
        assert_eq!(payload.kind(), EventKind::OwnershipTransferred);
        assert!(payload.donor().is_none());
    }

    #[test]
    fn event_kind_display() {
        assert_eq!(format!("{}", EventKind::DonationReceived), "DonationReceived");
        assert_eq!(
            format!("{}", EventKind::TokenDonationReceived),
            "TokenDonationReceived"
        );
    }

    #[test]
    fn event_id_display() {
        let id = EventId::from_hash([0xab; 32]);
        assert_eq!(format!("{id}"), "evt:abababab");
    }

    #[test]
    fn serde_roundtrip() {
        let event = LedgerEvent::new(3, donation(77));
        let bytes = bincode::serialize(&event).unwrap();
        let decoded: LedgerEvent = bincode::deserialize(&bytes).unwrap();
        assert_eq!(event, decoded);
        assert!(decoded.verify_integrity());
    }
}

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identity of a contributor or owner.
///
/// An `AccountId` is a 20-byte identifier derived deterministically from an
/// account's public key using BLAKE3 (domain-separated, truncated). The same
/// key always produces the same identity. AccountIds are equality-comparable
/// and totally ordered, so enumeration output is reproducible.
///
/// The all-zero identity is reserved as the null account: it can never be
/// produced by key derivation and is rejected wherever an owner is required.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId {
    bytes: [u8; 20],
}

impl AccountId {
    /// Derive an `AccountId` from an ed25519 public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"alms-account-v1:");
        hasher.update(public_key);
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest.as_bytes()[..20]);
        Self { bytes }
    }

    /// Create an ephemeral (random) `AccountId` for tests and demos.
    pub fn ephemeral() -> Self {
        let mut key = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut key);
        Self::from_public_key(&key)
    }

    /// The null account (all zero bytes).
    pub const fn zero() -> Self {
        Self { bytes: [0u8; 20] }
    }

    /// Returns `true` if this is the null account.
    pub fn is_zero(&self) -> bool {
        self.bytes == [0u8; 20]
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("acct:{}", hex::encode(&self.bytes[..4]))
    }

    /// Parse from a hex string (40 hex characters, optional `acct:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("acct:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self { bytes: arr })
    }

    /// Create from raw bytes. Use `from_public_key()` for production code.
    pub const fn from_raw(bytes: [u8; 20]) -> Self {
        Self { bytes }
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.short_id())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let id1 = AccountId::from_public_key(&[42u8; 32]);
        let id2 = AccountId::from_public_key(&[42u8; 32]);
        assert_eq!(id1, id2);
    }

    #[test]
    fn different_keys_produce_different_ids() {
        let id1 = AccountId::from_public_key(&[1; 32]);
        let id2 = AccountId::from_public_key(&[2; 32]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn ephemeral_ids_are_unique() {
        let id1 = AccountId::ephemeral();
        let id2 = AccountId::ephemeral();
        assert_ne!(id1, id2);
    }

    #[test]
    fn derived_ids_are_never_null() {
        let id = AccountId::from_public_key(&[0; 32]);
        assert!(!id.is_zero());
        assert!(AccountId::zero().is_zero());
    }

    #[test]
    fn short_id_format() {
        let id = AccountId::from_public_key(&[0; 32]);
        let short = id.short_id();
        assert!(short.starts_with("acct:"));
        assert_eq!(short.len(), 13); // "acct:" + 8 hex chars
    }

    #[test]
    fn hex_roundtrip() {
        let id = AccountId::from_public_key(&[99; 32]);
        let parsed = AccountId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let id = AccountId::from_public_key(&[99; 32]);
        let prefixed = format!("acct:{}", id.to_hex());
        let parsed = AccountId::from_hex(&prefixed).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = AccountId::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 20,
                actual: 2
            }
        );
    }

    #[test]
    fn serde_roundtrip() {
        let id = AccountId::from_public_key(&[10; 32]);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let id1 = AccountId::from_raw([0; 20]);
        let id2 = AccountId::from_raw([1; 20]);
        assert!(id1 < id2);
    }
}

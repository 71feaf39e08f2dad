use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::error::TypeError;

/// Identifier for an externally defined fungible token.
///
/// A `TokenId` is a 20-byte identifier derived from the issuing account and
/// the token's symbol. The ledger never validates that a `TokenId` refers to
/// a real, transferable token — that responsibility belongs to the
/// settlement layer. Any well-formed identifier is accepted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId {
    bytes: [u8; 20],
}

impl TokenId {
    /// Derive a `TokenId` from its issuer and symbol.
    pub fn derive(issuer: &AccountId, symbol: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"alms-token-v1:");
        hasher.update(issuer.as_bytes());
        hasher.update(b":");
        hasher.update(symbol.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest.as_bytes()[..20]);
        Self { bytes }
    }

    /// Create an ephemeral (random) `TokenId` for tests and demos.
    pub fn ephemeral() -> Self {
        Self::derive(&AccountId::ephemeral(), "ephemeral")
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
        format!("tok:{}", hex::encode(&self.bytes[..4]))
    }

    /// Parse from a hex string (40 hex characters, optional `tok:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("tok:").unwrap_or(s);
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

    /// Create from raw bytes. Use `derive()` for production code.
    pub const fn from_raw(bytes: [u8; 20]) -> Self {
        Self { bytes }
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.short_id())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let issuer = AccountId::from_public_key(&[7; 32]);
        let id1 = TokenId::derive(&issuer, "MTK");
        let id2 = TokenId::derive(&issuer, "MTK");
        assert_eq!(id1, id2);
    }

    #[test]
    fn symbol_distinguishes_tokens() {
        let issuer = AccountId::from_public_key(&[7; 32]);
        let mtk = TokenId::derive(&issuer, "MTK");
        let oth = TokenId::derive(&issuer, "OTH");
        assert_ne!(mtk, oth);
    }

    #[test]
    fn issuer_distinguishes_tokens() {
        let a = TokenId::derive(&AccountId::from_public_key(&[1; 32]), "MTK");
        let b = TokenId::derive(&AccountId::from_public_key(&[2; 32]), "MTK");
        assert_ne!(a, b);
    }

    #[test]
    fn hex_roundtrip() {
        let id = TokenId::derive(&AccountId::from_public_key(&[3; 32]), "MTK");
        let parsed = TokenId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn short_id_format() {
        let id = TokenId::from_raw([0xab; 20]);
        assert_eq!(id.short_id(), "tok:abababab");
    }

    #[test]
    fn serde_roundtrip() {
        let id = TokenId::derive(&AccountId::from_public_key(&[9; 32]), "MTK");
        let json = serde_json::to_string(&id).unwrap();
        let parsed: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}

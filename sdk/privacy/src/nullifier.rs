//! Nullifiers
//!
//! A nullifier is the unique tag published when a commitment is spent:
//!
//! ```text
//! value = SHA-256(commitment.value || spender_private_key)
//! ```
//!
//! Only the holder of the private key can compute it, and the same spend
//! attempt always yields the same value, which is what makes double-spend
//! detection possible. Once recorded, a nullifier is never deleted.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::commitment::Commitment;

/// A spent-commitment tag (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nullifier {
    /// Nullifier digest. Must never repeat.
    #[serde(with = "hex")]
    pub value: [u8; 32],
    /// Digest of the commitment this nullifier consumes
    #[serde(with = "hex")]
    pub commitment: [u8; 32],
}

impl Nullifier {
    /// Hex form of the digest
    pub fn hex(&self) -> String {
        hex::encode(self.value)
    }
}

/// Nullifier derivation key (the spender's private key bytes)
#[derive(Clone)]
pub struct NullifierKey {
    key: [u8; 32],
}

impl NullifierKey {
    /// Create from raw private key bytes
    pub fn from_bytes(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Derive the nullifier consuming `commitment`.
    ///
    /// Pure computation: no ledger state is read or written and the spent
    /// check stays with the caller, so the nullifier can be known (e.g. for
    /// proof generation) before the spend is finalized.
    pub fn derive(&self, commitment: &Commitment) -> Nullifier {
        let mut hasher = Sha256::new();
        hasher.update(commitment.value);
        hasher.update(self.key);

        Nullifier {
            value: hasher.finalize().into(),
            commitment: commitment.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commitment(amount: u64, nonce: u8) -> Commitment {
        Commitment::create(amount, "recipient", Some([nonce; 32])).unwrap()
    }

    #[test]
    fn test_nullifier_deterministic() {
        let key = NullifierKey::from_bytes([1u8; 32]);
        let c = commitment(1000, 7);

        let n1 = key.derive(&c);
        let n2 = key.derive(&c);

        assert_eq!(n1, n2, "same inputs should produce same nullifier");
    }

    #[test]
    fn test_nullifier_unique_per_commitment() {
        let key = NullifierKey::from_bytes([1u8; 32]);

        let n1 = key.derive(&commitment(1000, 1));
        let n2 = key.derive(&commitment(1000, 2));

        assert_ne!(n1.value, n2.value, "different commitments should differ");
    }

    #[test]
    fn test_nullifier_requires_key() {
        let c = commitment(1000, 7);

        let n1 = NullifierKey::from_bytes([1u8; 32]).derive(&c);
        let n2 = NullifierKey::from_bytes([2u8; 32]).derive(&c);

        assert_ne!(n1.value, n2.value, "different keys should differ");
    }

    #[test]
    fn test_nullifier_references_commitment() {
        let c = commitment(1000, 7);
        let n = NullifierKey::from_bytes([1u8; 32]).derive(&c);

        assert_eq!(n.commitment, c.value);
    }
}

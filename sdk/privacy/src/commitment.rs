//! Amount Commitments
//!
//! A commitment binds an amount to a recipient behind a blinding nonce:
//!
//! ```text
//! value = SHA-256(recipient || amount_le || nonce)
//! ```
//!
//! Deterministic given its three inputs, so a verifier can recompute and
//! check it without trusting the prover. Simplified stand-in: production
//! replaces this with a hiding Pedersen commitment behind
//! [`ProofSystem::commit`](crate::proof::ProofSystem::commit).

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::PrivacyError;

/// A commitment to a hidden amount owned by a hidden recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Commitment digest. Primary key within the open set.
    #[serde(with = "hex")]
    pub value: [u8; 32],
    /// Committed amount in base units
    pub amount: u64,
    /// Blinding nonce
    #[serde(with = "hex")]
    pub nonce: [u8; 32],
}

impl Commitment {
    /// Compute a commitment for `amount` addressed to `recipient`.
    ///
    /// A missing nonce is drawn from the OS RNG. This is a pure computation:
    /// nothing tracks the result until the caller records it via
    /// [`ShieldedLedger::record_deposit`](crate::ledger::ShieldedLedger::record_deposit),
    /// which lets a proof be generated over the commitment before it is
    /// committed to.
    pub fn create(
        amount: u64,
        recipient: &str,
        nonce: Option<[u8; 32]>,
    ) -> Result<Self, PrivacyError> {
        if amount == 0 {
            return Err(PrivacyError::InvalidAmount);
        }

        let nonce = nonce.unwrap_or_else(random_nonce);

        let mut hasher = Sha256::new();
        hasher.update(recipient.as_bytes());
        hasher.update(amount.to_le_bytes());
        hasher.update(nonce);

        Ok(Self {
            value: hasher.finalize().into(),
            amount,
            nonce,
        })
    }

    /// Hex form of the digest (ledger key, log output)
    pub fn hex(&self) -> String {
        hex::encode(self.value)
    }
}

fn random_nonce() -> [u8; 32] {
    let mut nonce = [0u8; 32];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_deterministic() {
        let nonce = [42u8; 32];

        let c1 = Commitment::create(1000, "recipient", Some(nonce)).unwrap();
        let c2 = Commitment::create(1000, "recipient", Some(nonce)).unwrap();

        assert_eq!(c1.value, c2.value, "same inputs should produce same commitment");
    }

    #[test]
    fn test_commitment_hiding() {
        let c1 = Commitment::create(1000, "recipient", Some([1u8; 32])).unwrap();
        let c2 = Commitment::create(1000, "recipient", Some([2u8; 32])).unwrap();

        assert_ne!(
            c1.value, c2.value,
            "different nonces should produce different commitments"
        );
    }

    #[test]
    fn test_commitment_binding() {
        let nonce = [42u8; 32];

        let c1 = Commitment::create(1000, "recipient", Some(nonce)).unwrap();
        let c2 = Commitment::create(2000, "recipient", Some(nonce)).unwrap();
        let c3 = Commitment::create(1000, "someone-else", Some(nonce)).unwrap();

        assert_ne!(c1.value, c2.value, "different amounts should differ");
        assert_ne!(c1.value, c3.value, "different recipients should differ");
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = Commitment::create(0, "recipient", None).unwrap_err();
        assert_eq!(err, PrivacyError::InvalidAmount);
    }

    #[test]
    fn test_random_nonce_is_fresh() {
        let c1 = Commitment::create(1000, "recipient", None).unwrap();
        let c2 = Commitment::create(1000, "recipient", None).unwrap();

        assert_ne!(c1.nonce, c2.nonce);
        assert_ne!(c1.value, c2.value);
    }
}

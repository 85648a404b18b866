//! Ring Signatures, Stealth Addresses, RingCT Outputs
//!
//! Monero-style unlinkability helpers. No state machine and no invariants
//! beyond determinism; everything here is a hash stand-in produced through
//! the [`ProofSystem`](crate::proof::ProofSystem) capability so a real
//! MLSAG/RingCT backend can slot in later.

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::proof::{ProofSystem, RangeProof};

/// A ring signature: proves one of the ring members signed, without
/// revealing which
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingSignature {
    /// Per-signer tag; repeats if the same key signs twice
    #[serde(with = "hex")]
    pub key_image: [u8; 32],
    /// Challenge scalars, one per ring member
    pub c: Vec<[u8; 32]>,
    /// Response scalars, one per ring member
    pub r: Vec<[u8; 32]>,
    /// The public keys forming the ring
    pub ring: Vec<[u8; 32]>,
}

impl RingSignature {
    /// Number of ring members
    pub fn ring_size(&self) -> usize {
        self.ring.len()
    }
}

/// A one-time output address, unlinkable to the recipient's public address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StealthAddress {
    /// The one-time address: H(r || recipient_spend_pk)
    #[serde(with = "hex")]
    pub address: [u8; 32],
    /// The transaction public key `r` the recipient scans with
    #[serde(with = "hex")]
    pub tx_public_key: [u8; 32],
    /// Output index within the transaction
    pub output_index: u32,
}

impl StealthAddress {
    /// Generate a one-time address for `recipient_spend_pk` with a fresh
    /// scalar
    pub fn generate(recipient_spend_pk: &[u8; 32], output_index: u32) -> Self {
        let mut r = [0u8; 32];
        OsRng.fill_bytes(&mut r);
        Self::with_scalar(r, recipient_spend_pk, output_index)
    }

    /// Deterministic construction given the scalar; used for recovery and
    /// tests
    pub fn with_scalar(r: [u8; 32], recipient_spend_pk: &[u8; 32], output_index: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(r);
        hasher.update(recipient_spend_pk);

        Self {
            address: hasher.finalize().into(),
            tx_public_key: r,
            output_index,
        }
    }
}

/// A RingCT-style output hiding its amount behind a masked commitment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingCtOutput {
    /// Amount commitment from the proof system
    #[serde(with = "hex")]
    pub commitment: [u8; 32],
    /// Blinding mask (kept by the sender, shared with the recipient
    /// off-band)
    #[serde(with = "hex")]
    pub mask: [u8; 32],
    /// Proof that the hidden amount is in range
    pub range_proof: RangeProof,
}

impl RingCtOutput {
    /// Create an output hiding `amount` behind a fresh mask
    pub fn create(amount: u64, prover: &dyn ProofSystem) -> Self {
        let mut mask = [0u8; 32];
        OsRng.fill_bytes(&mut mask);

        Self {
            commitment: prover.commit(amount, &mask),
            range_proof: prover.prove_range(amount, &mask),
            mask,
        }
    }
}

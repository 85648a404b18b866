//! Proof System Capability
//!
//! The ledger and ring helpers reach proving through this trait so the
//! hash stand-ins can be swapped for a real scheme (Pedersen commitments,
//! MLSAG, Bulletproofs, Groth16) without touching the bookkeeping core.
//!
//! [`HashProofSystem`] is the default stand-in: it produces deterministic
//! digests where a real prover would produce proofs, the same way a mock
//! prover backs a dev deployment.

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::commitment::Commitment;
use crate::error::PrivacyError;
use crate::ring::RingSignature;

/// Statement for a minimum-balance proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceStatement {
    /// The threshold being proven, revealed as a public signal
    pub min_balance: u64,
}

/// Opaque proof handle returned by the oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceProof {
    /// Proof bytes (opaque to the ledger)
    pub proof: Vec<u8>,
    /// Public signals; the actual balance is never among them
    pub public_signals: Vec<u64>,
}

/// Per-bit range proof stand-in for a 64-bit amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeProof {
    /// One digest per bit of the amount
    pub bits: Vec<[u8; 32]>,
}

/// Capability interface between the bookkeeping core and the proving scheme
pub trait ProofSystem {
    /// Amount commitment over a blinding mask
    fn commit(&self, amount: u64, blinding: &[u8; 32]) -> [u8; 32];

    /// Prove `amount` lies in the 64-bit range without revealing it
    fn prove_range(&self, amount: u64, blinding: &[u8; 32]) -> RangeProof;

    /// Sign `message` as one anonymous member of `ring`.
    ///
    /// Fails with [`PrivacyError::InvalidRingIndex`] when `real_index` does
    /// not select a ring member.
    fn ring_sign(
        &self,
        message: &[u8],
        real_index: usize,
        private_key: &[u8; 32],
        ring: &[[u8; 32]],
    ) -> Result<RingSignature, PrivacyError>;

    /// Check a ring signature against its ring
    fn verify_ring(&self, message: &[u8], signature: &RingSignature) -> bool;

    /// Prove `statement` over the open-commitment witness
    fn prove(&self, statement: &BalanceStatement, witness: &[Commitment]) -> BalanceProof;
}

/// Hash-based stand-in prover.
///
/// In production this slot is filled by a real proving backend:
/// 1. Pedersen commitments for [`commit`](ProofSystem::commit)
/// 2. Bulletproofs for [`prove_range`](ProofSystem::prove_range)
/// 3. MLSAG for [`ring_sign`](ProofSystem::ring_sign)
/// 4. A zk-SNARK circuit for [`prove`](ProofSystem::prove)
#[derive(Debug, Default)]
pub struct HashProofSystem;

impl HashProofSystem {
    pub fn new() -> Self {
        Self
    }
}

/// Stand-in proofs are padded to the size of a real Groth16 proof
const PROOF_LEN: usize = 256;

impl ProofSystem for HashProofSystem {
    fn commit(&self, amount: u64, blinding: &[u8; 32]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(amount.to_le_bytes());
        hasher.update(blinding);
        hasher.finalize().into()
    }

    fn prove_range(&self, amount: u64, _blinding: &[u8; 32]) -> RangeProof {
        let bits = (0..64)
            .map(|i| {
                let mut salt = [0u8; 32];
                OsRng.fill_bytes(&mut salt);

                let mut hasher = Sha256::new();
                hasher.update([((amount >> i) & 1) as u8]);
                hasher.update(salt);
                hasher.finalize().into()
            })
            .collect();

        RangeProof { bits }
    }

    fn ring_sign(
        &self,
        message: &[u8],
        real_index: usize,
        private_key: &[u8; 32],
        ring: &[[u8; 32]],
    ) -> Result<RingSignature, PrivacyError> {
        if real_index >= ring.len() {
            return Err(PrivacyError::InvalidRingIndex {
                index: real_index,
                ring_size: ring.len(),
            });
        }

        // Key image: the per-key tag that links two signatures by the same
        // signer without revealing which ring member signed.
        let mut hasher = Sha256::new();
        hasher.update(private_key);
        hasher.update(ring[real_index]);
        let key_image: [u8; 32] = hasher.finalize().into();

        let mut c: Vec<[u8; 32]> = Vec::with_capacity(ring.len());
        let mut r: Vec<[u8; 32]> = Vec::with_capacity(ring.len());
        for _ in 0..ring.len() {
            let mut ci = [0u8; 32];
            let mut ri = [0u8; 32];
            OsRng.fill_bytes(&mut ci);
            OsRng.fill_bytes(&mut ri);
            c.push(ci);
            r.push(ri);
        }

        // Bind the challenge chain to the message so verification has
        // something to recompute.
        c[0] = challenge_seed(message, &key_image);

        Ok(RingSignature {
            key_image,
            c,
            r,
            ring: ring.to_vec(),
        })
    }

    fn verify_ring(&self, message: &[u8], signature: &RingSignature) -> bool {
        if signature.ring.is_empty()
            || signature.c.len() != signature.ring.len()
            || signature.r.len() != signature.ring.len()
        {
            return false;
        }

        signature.c[0] == challenge_seed(message, &signature.key_image)
    }

    fn prove(&self, statement: &BalanceStatement, witness: &[Commitment]) -> BalanceProof {
        let mut hasher = Sha256::new();
        hasher.update(statement.min_balance.to_le_bytes());
        for commitment in witness {
            hasher.update(commitment.value);
        }

        let digest: [u8; 32] = hasher.finalize().into();
        let mut proof = Vec::with_capacity(PROOF_LEN);
        proof.extend_from_slice(&digest);
        proof.resize(PROOF_LEN, 0);

        BalanceProof {
            proof,
            public_signals: vec![statement.min_balance],
        }
    }
}

fn challenge_seed(message: &[u8], key_image: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(message);
    hasher.update(key_image);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_deterministic() {
        let prover = HashProofSystem::new();

        assert_eq!(prover.commit(1000, &[1u8; 32]), prover.commit(1000, &[1u8; 32]));
        assert_ne!(prover.commit(1000, &[1u8; 32]), prover.commit(1000, &[2u8; 32]));
        assert_ne!(prover.commit(1000, &[1u8; 32]), prover.commit(2000, &[1u8; 32]));
    }

    #[test]
    fn test_range_proof_covers_all_bits() {
        let prover = HashProofSystem::new();
        let proof = prover.prove_range(u64::MAX, &[1u8; 32]);
        assert_eq!(proof.bits.len(), 64);
    }

    #[test]
    fn test_ring_sign_and_verify() {
        let prover = HashProofSystem::new();
        let ring = vec![[1u8; 32], [2u8; 32], [3u8; 32]];

        let sig = prover.ring_sign(b"tx data", 1, &[9u8; 32], &ring).unwrap();
        assert!(prover.verify_ring(b"tx data", &sig));
        assert!(!prover.verify_ring(b"other data", &sig));
    }

    #[test]
    fn test_ring_sign_rejects_out_of_range_index() {
        let prover = HashProofSystem::new();
        let ring = vec![[1u8; 32], [2u8; 32]];

        let err = prover.ring_sign(b"tx data", 2, &[9u8; 32], &ring).unwrap_err();
        assert_eq!(
            err,
            PrivacyError::InvalidRingIndex {
                index: 2,
                ring_size: 2
            }
        );
    }

    #[test]
    fn test_key_image_is_stable_per_signer() {
        let prover = HashProofSystem::new();
        let ring = vec![[1u8; 32], [2u8; 32]];

        let s1 = prover.ring_sign(b"a", 0, &[9u8; 32], &ring).unwrap();
        let s2 = prover.ring_sign(b"b", 0, &[9u8; 32], &ring).unwrap();

        // Same signer, same ring slot: the key image links the two spends.
        assert_eq!(s1.key_image, s2.key_image);
    }

    #[test]
    fn test_balance_proof_shape() {
        let prover = HashProofSystem::new();
        let witness = vec![Commitment::create(1000, "recipient", Some([1u8; 32])).unwrap()];

        let proof = prover.prove(&BalanceStatement { min_balance: 500 }, &witness);

        assert_eq!(proof.proof.len(), PROOF_LEN);
        assert_eq!(proof.public_signals, vec![500]);
    }
}

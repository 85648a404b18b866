//! Shielded Ledger
//!
//! Tracks unspent commitments and spent nullifiers, enforces at-most-once
//! spend, and answers balance queries without revealing which commitment
//! backs them.
//!
//! An open commitment is exactly one that has not been nullified: no digest
//! ever sits in both the open set and the redeemed side of the nullifier
//! set. The nullifier set is append-only; a deployment that persists ledger
//! state must keep it durable, since losing it reintroduces double-spend
//! risk.

use std::collections::{HashMap, HashSet};

use crate::commitment::Commitment;
use crate::error::PrivacyError;
use crate::nullifier::{Nullifier, NullifierKey};
use crate::proof::{BalanceProof, BalanceStatement, ProofSystem};

/// Receipt for a consumed commitment
#[derive(Debug, Clone)]
pub struct SpendReceipt {
    /// The nullifier recorded for this spend
    pub nullifier: Nullifier,
    /// The commitment that was consumed
    pub commitment: Commitment,
}

/// In-memory shielded balance ledger.
///
/// The open set and the nullifier set form one unit of mutual exclusion:
/// every mutating operation takes `&mut self` and runs to completion, so a
/// withdrawal can never observe a half-applied spend. A wrapper sharing the
/// ledger across tasks must hold a single lock across the whole call.
#[derive(Debug, Default)]
pub struct ShieldedLedger {
    /// Open (unspent) commitments keyed by digest
    open: HashMap<[u8; 32], Commitment>,
    /// Insertion order of open commitments; first-fit withdrawal scans this
    order: Vec<[u8; 32]>,
    /// Spent nullifier digests. Append-only, never pruned.
    spent: HashSet<[u8; 32]>,
}

impl ShieldedLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly computed commitment as open.
    ///
    /// Fails with [`PrivacyError::DuplicateCommitment`] if the digest is
    /// already open, so a deposit cannot be double-recorded.
    pub fn record_deposit(&mut self, commitment: Commitment) -> Result<(), PrivacyError> {
        if self.open.contains_key(&commitment.value) {
            return Err(PrivacyError::DuplicateCommitment);
        }

        self.order.push(commitment.value);
        self.open.insert(commitment.value, commitment);
        Ok(())
    }

    /// Spend the first open commitment that covers `amount`.
    ///
    /// Selection is first-fit in insertion order, not best-fit; there is no
    /// fallback to a later commitment once one matches. No change output is
    /// created, so a commitment larger than `amount` forfeits the remainder
    /// when spent. Splitting into spend + change commitments is an open
    /// product decision, not an oversight.
    pub fn withdraw(
        &mut self,
        amount: u64,
        key: &NullifierKey,
    ) -> Result<SpendReceipt, PrivacyError> {
        if amount == 0 {
            return Err(PrivacyError::InvalidAmount);
        }

        let value = self
            .order
            .iter()
            .copied()
            .find(|v| self.open[v].amount >= amount)
            .ok_or(PrivacyError::InsufficientBalance { requested: amount })?;

        let nullifier = key.derive(&self.open[&value]);
        if self.spent.contains(&nullifier.value) {
            return Err(PrivacyError::AlreadySpent);
        }

        self.spent.insert(nullifier.value);
        self.order.retain(|v| *v != value);
        let commitment = self
            .open
            .remove(&value)
            .expect("commitment was selected from the open set");

        Ok(SpendReceipt {
            nullifier,
            commitment,
        })
    }

    /// Sum of all open commitment amounts
    pub fn total_balance(&self) -> u64 {
        self.open
            .values()
            .fold(0u64, |acc, c| acc.saturating_add(c.amount))
    }

    /// Prove `total_balance() >= min_balance` via the proof oracle.
    ///
    /// The witness handed to the prover is the full open-commitment set;
    /// only the opaque proof leaves this call.
    pub fn prove_minimum_balance(
        &self,
        min_balance: u64,
        prover: &dyn ProofSystem,
    ) -> Result<BalanceProof, PrivacyError> {
        if self.total_balance() < min_balance {
            return Err(PrivacyError::InsufficientBalance {
                requested: min_balance,
            });
        }

        let witness: Vec<Commitment> = self.order.iter().map(|v| self.open[v].clone()).collect();
        Ok(prover.prove(&BalanceStatement { min_balance }, &witness))
    }

    /// Check whether a nullifier has already been recorded
    pub fn is_spent(&self, nullifier: &Nullifier) -> bool {
        self.spent.contains(&nullifier.value)
    }

    /// Check whether a commitment digest is currently open
    pub fn contains(&self, value: &[u8; 32]) -> bool {
        self.open.contains_key(value)
    }

    /// Number of open commitments
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Number of recorded nullifiers
    pub fn spent_count(&self) -> usize {
        self.spent.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::HashProofSystem;

    fn key() -> NullifierKey {
        NullifierKey::from_bytes([9u8; 32])
    }

    fn commitment(amount: u64, nonce: u8) -> Commitment {
        Commitment::create(amount, "recipient", Some([nonce; 32])).unwrap()
    }

    #[test]
    fn test_record_deposit_increases_balance() {
        let mut ledger = ShieldedLedger::new();

        ledger.record_deposit(commitment(1000, 1)).unwrap();
        assert_eq!(ledger.total_balance(), 1000);

        ledger.record_deposit(commitment(500, 2)).unwrap();
        assert_eq!(ledger.total_balance(), 1500);
        assert_eq!(ledger.open_count(), 2);
    }

    #[test]
    fn test_duplicate_deposit_rejected() {
        let mut ledger = ShieldedLedger::new();
        let c = commitment(1000, 1);

        ledger.record_deposit(c.clone()).unwrap();
        let err = ledger.record_deposit(c).unwrap_err();

        assert_eq!(err, PrivacyError::DuplicateCommitment);
        assert_eq!(ledger.open_count(), 1);
    }

    #[test]
    fn test_withdraw_first_fit_in_insertion_order() {
        let mut ledger = ShieldedLedger::new();
        let big = commitment(1_000_000_000, 1);
        let small = commitment(500_000_000, 2);

        ledger.record_deposit(big.clone()).unwrap();
        ledger.record_deposit(small.clone()).unwrap();

        // The earlier 1G commitment covers the request and is consumed,
        // even though the 500M one matches exactly.
        let receipt = ledger.withdraw(500_000_000, &key()).unwrap();
        assert_eq!(receipt.commitment.value, big.value);
        assert_eq!(ledger.total_balance(), 500_000_000);
    }

    #[test]
    fn test_withdraw_forfeits_remainder() {
        let mut ledger = ShieldedLedger::new();
        let c = commitment(1000, 1);

        ledger.record_deposit(c.clone()).unwrap();
        let receipt = ledger.withdraw(300, &key()).unwrap();

        // Balance drops by the consumed commitment's amount, not the
        // requested amount: no change output exists.
        assert_eq!(receipt.commitment.amount, 1000);
        assert_eq!(ledger.total_balance(), 0);
    }

    #[test]
    fn test_withdraw_needs_single_covering_commitment() {
        let mut ledger = ShieldedLedger::new();
        ledger.record_deposit(commitment(600, 1)).unwrap();
        ledger.record_deposit(commitment(600, 2)).unwrap();

        // Aggregate balance (1200) covers the request but no single
        // commitment does.
        let err = ledger.withdraw(1000, &key()).unwrap_err();
        assert_eq!(err, PrivacyError::InsufficientBalance { requested: 1000 });
        assert_eq!(ledger.open_count(), 2);
    }

    #[test]
    fn test_withdraw_zero_amount_rejected() {
        let mut ledger = ShieldedLedger::new();
        ledger.record_deposit(commitment(1000, 1)).unwrap();

        assert_eq!(
            ledger.withdraw(0, &key()).unwrap_err(),
            PrivacyError::InvalidAmount
        );
    }

    #[test]
    fn test_double_spend_rejected() {
        let mut ledger = ShieldedLedger::new();
        let c = commitment(1000, 1);

        ledger.record_deposit(c.clone()).unwrap();
        let receipt = ledger.withdraw(1000, &key()).unwrap();
        assert!(ledger.is_spent(&receipt.nullifier));

        // Re-recording the same commitment succeeds (it is no longer open),
        // but withdrawing it derives the same nullifier and must fail.
        ledger.record_deposit(c).unwrap();
        let err = ledger.withdraw(1000, &key()).unwrap_err();
        assert_eq!(err, PrivacyError::AlreadySpent);

        // The failed withdrawal left the commitment open and recorded
        // nothing new.
        assert_eq!(ledger.open_count(), 1);
        assert_eq!(ledger.spent_count(), 1);
    }

    #[test]
    fn test_nullifiers_are_never_pruned() {
        let mut ledger = ShieldedLedger::new();

        for nonce in 1..=3u8 {
            ledger.record_deposit(commitment(100, nonce)).unwrap();
            ledger.withdraw(100, &key()).unwrap();
        }

        assert_eq!(ledger.open_count(), 0);
        assert_eq!(ledger.spent_count(), 3);
    }

    #[test]
    fn test_prove_minimum_balance_boundary() {
        let mut ledger = ShieldedLedger::new();
        ledger.record_deposit(commitment(1000, 1)).unwrap();
        ledger.record_deposit(commitment(500, 2)).unwrap();

        let prover = HashProofSystem::new();

        // Succeeds exactly at the total.
        let proof = ledger.prove_minimum_balance(1500, &prover).unwrap();
        assert_eq!(proof.public_signals, vec![1500]);

        // Fails exactly one past it.
        let err = ledger.prove_minimum_balance(1501, &prover).unwrap_err();
        assert_eq!(err, PrivacyError::InsufficientBalance { requested: 1501 });
    }

    #[test]
    fn test_deposit_withdraw_scenario() {
        let mut ledger = ShieldedLedger::new();
        ledger.record_deposit(commitment(1_000_000_000, 1)).unwrap();
        ledger.record_deposit(commitment(500_000_000, 2)).unwrap();
        assert_eq!(ledger.total_balance(), 1_500_000_000);

        ledger.withdraw(500_000_000, &key()).unwrap();
        assert_eq!(ledger.total_balance(), 500_000_000);

        let err = ledger.withdraw(2_000_000_000, &key()).unwrap_err();
        assert_eq!(
            err,
            PrivacyError::InsufficientBalance {
                requested: 2_000_000_000
            }
        );
    }
}

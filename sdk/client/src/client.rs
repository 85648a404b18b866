//! Ghost Client
//!
//! Composes an identity, the shielded ledger, a proof backend and a
//! submitter into the SDK surface: deposit, withdraw, private transfer,
//! balance query and balance proof.
//!
//! All mutating operations take `&mut self`, so ledger state can never be
//! touched while a previous mutation is in flight. Submission happens only
//! after the ledger transition committed locally.

use anyhow::{Context, Result};

use ghost_keys::KeyBundle;
use ghost_privacy::{
    BalanceProof, Commitment, HashProofSystem, NullifierKey, ProofSystem, ShieldedLedger,
    SpendReceipt,
};

use crate::submit::Submitter;
use crate::wire::{Instruction, SignedEnvelope};

/// Outcome of a deposit
#[derive(Debug, Clone)]
pub struct DepositOutcome {
    /// The commitment now open in the ledger
    pub commitment: Commitment,
    /// Transaction signature from the submitter
    pub signature: String,
}

/// Outcome of a withdrawal or private transfer
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The spend receipt: recorded nullifier plus consumed commitment
    pub receipt: SpendReceipt,
    /// Transaction signature from the submitter
    pub signature: String,
}

/// Ghost SDK client for private transactions
pub struct GhostClient<S: Submitter> {
    keys: KeyBundle,
    ledger: ShieldedLedger,
    prover: Box<dyn ProofSystem + Send + Sync>,
    submitter: S,
}

impl<S: Submitter> GhostClient<S> {
    /// Create a client with the default hash stand-in prover
    pub fn new(keys: KeyBundle, submitter: S) -> Self {
        Self {
            keys,
            ledger: ShieldedLedger::new(),
            prover: Box::new(HashProofSystem::new()),
            submitter,
        }
    }

    /// Swap in a different proof backend
    pub fn with_prover(mut self, prover: Box<dyn ProofSystem + Send + Sync>) -> Self {
        self.prover = prover;
        self
    }

    /// The hex identifier other parties address commitments to
    pub fn identifier(&self) -> String {
        self.keys.identifier()
    }

    /// The client's identity keys
    pub fn keys(&self) -> &KeyBundle {
        &self.keys
    }

    /// Read-only view of the ledger
    pub fn ledger(&self) -> &ShieldedLedger {
        &self.ledger
    }

    /// The submission backend (mock submitters expose their traffic here)
    pub fn submitter_mut(&mut self) -> &mut S {
        &mut self.submitter
    }

    /// Deposit into the privacy pool.
    ///
    /// Computes a commitment addressed to our own identifier, records it
    /// open, then submits the signed deposit instruction.
    pub async fn deposit(&mut self, amount: u64) -> Result<DepositOutcome> {
        let commitment = Commitment::create(amount, &self.identifier(), None)?;
        self.ledger.record_deposit(commitment.clone())?;

        let envelope = self.envelope(&Instruction::Deposit {
            commitment: commitment.value,
        })?;
        let signature = self
            .submitter
            .submit(&envelope)
            .await
            .context("deposit submission failed")?;

        log::info!(
            "deposited {} behind commitment {}",
            amount,
            &commitment.hex()[..16]
        );

        Ok(DepositOutcome {
            commitment,
            signature,
        })
    }

    /// Withdraw from the privacy pool.
    ///
    /// Ledger errors surface verbatim; a failed withdrawal is never retried
    /// against a different commitment.
    pub async fn withdraw(&mut self, amount: u64, recipient: &str) -> Result<TransferOutcome> {
        self.transfer(amount, recipient, None).await
    }

    /// Private transfer with an optional memo.
    ///
    /// Delegates to [`withdraw`](Self::withdraw). The memo travels opaque
    /// and unencrypted at this layer; encrypting it for the recipient is an
    /// outer collaborator's job.
    pub async fn private_transfer(
        &mut self,
        recipient: &str,
        amount: u64,
        memo: Option<&str>,
    ) -> Result<TransferOutcome> {
        self.transfer(amount, recipient, memo).await
    }

    /// Total private balance across open commitments
    pub fn private_balance(&self) -> u64 {
        self.ledger.total_balance()
    }

    /// Prove the private balance meets `min_balance` without revealing it
    pub fn prove_minimum_balance(&self, min_balance: u64) -> Result<BalanceProof> {
        let proof = self
            .ledger
            .prove_minimum_balance(min_balance, self.prover.as_ref())?;

        log::debug!("generated balance proof for threshold {}", min_balance);
        Ok(proof)
    }

    async fn transfer(
        &mut self,
        amount: u64,
        recipient: &str,
        memo: Option<&str>,
    ) -> Result<TransferOutcome> {
        let key = NullifierKey::from_bytes(self.keys.spend_secret_bytes());
        let receipt = self.ledger.withdraw(amount, &key)?;

        let envelope = self.envelope(&Instruction::Withdraw {
            nullifier: receipt.nullifier.value,
            recipient: recipient.as_bytes().to_vec(),
            memo: memo.map(|m| m.as_bytes().to_vec()).unwrap_or_default(),
        })?;
        let signature = self
            .submitter
            .submit(&envelope)
            .await
            .context("withdrawal submission failed")?;

        log::info!(
            "spent commitment {} via nullifier {}",
            &receipt.commitment.hex()[..16],
            &receipt.nullifier.hex()[..16]
        );

        Ok(TransferOutcome { receipt, signature })
    }

    fn envelope(&self, instruction: &Instruction) -> Result<SignedEnvelope> {
        let payload =
            wincode::serialize(instruction).context("instruction serialization failed")?;
        let signature = self.keys.sign(&payload).to_vec();

        Ok(SignedEnvelope {
            payload,
            signature,
            signer_pubkey: self.keys.spend_public(),
        })
    }
}

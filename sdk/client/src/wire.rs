//! Wire Types
//!
//! What the submitter carries: a wincode-serialized instruction wrapped in
//! a detached ed25519 signature. The chain side reconstructs and verifies
//! the payload against `signer_pubkey`.

use serde::{Deserialize, Serialize};
use wincode::{SchemaRead, SchemaWrite};

/// A Ghost program instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SchemaRead, SchemaWrite)]
pub enum Instruction {
    /// Add a commitment to the privacy pool
    Deposit {
        /// Commitment digest; the amount stays hidden
        commitment: [u8; 32],
    },
    /// Spend a commitment by publishing its nullifier
    Withdraw {
        /// Nullifier digest recorded on-chain
        nullifier: [u8; 32],
        /// Recipient identifier bytes
        recipient: Vec<u8>,
        /// Opaque memo; empty when absent. Unencrypted at this layer.
        memo: Vec<u8>,
    },
}

/// The authenticated wrapper around a serialized instruction
#[derive(Debug, Clone, Serialize, Deserialize, SchemaRead, SchemaWrite)]
pub struct SignedEnvelope {
    /// The wincode-serialized [`Instruction`]
    pub payload: Vec<u8>,
    /// Ed25519 signature over `payload`
    pub signature: Vec<u8>,
    /// Raw public key of the signer
    pub signer_pubkey: [u8; 32],
}

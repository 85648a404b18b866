//! Ghost Privacy SDK
//!
//! Commitment/nullifier bookkeeping for shielded transfers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Shielded Ledger                            │
//! │  ┌──────────────────┐              ┌─────────────────────────┐  │
//! │  │ Open Commitments │   withdraw   │   Spent Nullifiers      │  │
//! │  │ (unspent value)  │ ───────────▶ │   (append-only set)     │  │
//! │  └──────────────────┘              └─────────────────────────┘  │
//! │         ▲                                                       │
//! │         │ record_deposit                                        │
//! │  ┌──────────────────┐                                           │
//! │  │   Commitment     │  = H(recipient || amount || nonce)        │
//! │  └──────────────────┘                                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every digest in this crate is a SHA-256 stand-in for the real
//! construction (Pedersen commitments, MLSAG ring signatures, Bulletproof
//! range proofs). The stand-ins live behind the [`ProofSystem`] capability
//! so the ledger bookkeeping survives the swap to a real scheme unchanged.

pub mod commitment;
pub mod error;
pub mod ledger;
pub mod nullifier;
pub mod proof;
pub mod ring;

pub use commitment::Commitment;
pub use error::PrivacyError;
pub use ledger::{ShieldedLedger, SpendReceipt};
pub use nullifier::{Nullifier, NullifierKey};
pub use proof::{BalanceProof, BalanceStatement, HashProofSystem, ProofSystem, RangeProof};
pub use ring::{RingCtOutput, RingSignature, StealthAddress};

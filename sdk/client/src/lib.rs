//! Ghost Client
//!
//! Thin async client tying the shielded ledger to an identity and a
//! submission endpoint.
//!
//! # Example
//!
//! ```no_run
//! use ghost_client::{GhostClient, MockSubmitter};
//! use ghost_keys::KeyBundle;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut ghost = GhostClient::new(KeyBundle::random(), MockSubmitter::new());
//!
//! // Deposit
//! ghost.deposit(1_000_000_000).await?;
//!
//! // Private transfer
//! ghost
//!     .private_transfer("TARGET_ADDRESS", 500_000_000, Some("Coffee"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod submit;
mod wire;

pub use client::{DepositOutcome, GhostClient, TransferOutcome};
pub use submit::{MockSubmitter, Submitter, UdpSubmitter};
pub use wire::{Instruction, SignedEnvelope};

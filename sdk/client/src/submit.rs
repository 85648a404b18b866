//! Transaction Submission
//!
//! The chain is an external collaborator: the client only needs something
//! that accepts a signed envelope and returns a transaction signature.
//! Submission failures are opaque network errors; any retry policy lives in
//! the implementation, never in the ledger.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::net::UdpSocket;

use crate::wire::SignedEnvelope;

/// Capability to hand a signed envelope to the chain
pub trait Submitter {
    /// Submit an envelope, returning the transaction signature
    fn submit(
        &mut self,
        envelope: &SignedEnvelope,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Fire-and-forget UDP submission, one envelope per datagram
pub struct UdpSubmitter {
    socket: UdpSocket,
}

impl UdpSubmitter {
    /// Bind a local socket and point it at the submission endpoint
    pub async fn connect(addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .context("Failed to bind UDP socket")?;
        socket
            .connect(addr)
            .await
            .context("Failed to connect to submission endpoint")?;
        Ok(Self { socket })
    }
}

impl Submitter for UdpSubmitter {
    async fn submit(&mut self, envelope: &SignedEnvelope) -> Result<String> {
        let frame = wincode::serialize(envelope).context("Envelope serialization failed")?;
        self.socket.send(&frame).await?;

        // No acknowledgement over UDP: the returned signature is the frame
        // digest, which indexers echo back once the envelope lands.
        Ok(hex::encode(Sha256::digest(&frame)))
    }
}

/// Records envelopes instead of sending them.
///
/// Backs dev mode and tests the same way a mock prover backs proving.
#[derive(Debug, Default)]
pub struct MockSubmitter {
    /// Every envelope submitted, in order
    pub submitted: Vec<SignedEnvelope>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Submitter for MockSubmitter {
    async fn submit(&mut self, envelope: &SignedEnvelope) -> Result<String> {
        self.submitted.push(envelope.clone());
        Ok(format!("mock_tx_{}", self.submitted.len()))
    }
}

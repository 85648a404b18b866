//! Ghost Keys
//!
//! Dual-key identity in the Monero mold: a spend key authorizes spending,
//! and a view key (derived one-way from the spend key) grants read-only
//! access. The public halves form the address.
//!
//! ```text
//! spend_sk ──┬──▶ spend_pk ─┐
//!            │              ├──▶ Address = tag || spend_pk || view_pk || checksum
//!            └──▶ view_sk ──▶ view_pk ─┘
//!                 (SHA-256("view_key" || spend_sk))
//! ```
//!
//! All derivations are deterministic; there is no other invariant here.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Network tag prepended to mainnet addresses
pub const MAINNET_TAG: u8 = 0x12;

/// Length of a decoded address: tag + two keys + checksum
const ADDRESS_LEN: usize = 1 + 32 + 32 + 4;

/// Address codec errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("address must decode to {ADDRESS_LEN} bytes, got {0}")]
    InvalidLength(usize),

    #[error("address is not valid hex")]
    InvalidHex,

    #[error("address checksum mismatch")]
    InvalidChecksum,
}

/// A user's dual-key identity.
/// NEVER expose this struct's internals.
pub struct KeyBundle {
    spend: SigningKey,
    view: SigningKey,
}

impl KeyBundle {
    /// Generates a fresh random identity
    pub fn random() -> Self {
        let spend = SigningKey::generate(&mut OsRng);
        let view = derive_view_key(&spend);
        Self { spend, view }
    }

    /// Reconstructs an identity from a backup seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"spend");
        hasher.update(seed);
        let spend_bytes: [u8; 32] = hasher.finalize().into();

        let spend = SigningKey::from_bytes(&spend_bytes);
        let view = derive_view_key(&spend);
        Self { spend, view }
    }

    /// Export a backup seed
    pub fn export_seed(&self) -> [u8; 32] {
        Sha256::digest(self.spend.to_bytes()).into()
    }

    /// Public spend key (safe to share)
    pub fn spend_public(&self) -> [u8; 32] {
        self.spend.verifying_key().to_bytes()
    }

    /// Public view key (safe to share)
    pub fn view_public(&self) -> [u8; 32] {
        self.view.verifying_key().to_bytes()
    }

    /// Raw spend secret. Feeds nullifier derivation; handle these bytes
    /// like the key itself.
    pub fn spend_secret_bytes(&self) -> [u8; 32] {
        self.spend.to_bytes()
    }

    /// The hex identifier other parties address commitments to
    pub fn identifier(&self) -> String {
        hex::encode(self.spend_public())
    }

    /// Sign a message with the spend key
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.spend.sign(message).to_bytes()
    }

    /// Primary mainnet address for this identity
    pub fn primary_address(&self) -> Address {
        Address {
            tag: MAINNET_TAG,
            spend_pk: self.spend_public(),
            view_pk: self.view_public(),
        }
    }
}

/// view_sk = SHA-256("view_key" || spend_sk), one-way by construction
fn derive_view_key(spend: &SigningKey) -> SigningKey {
    let mut hasher = Sha256::new();
    hasher.update(b"view_key");
    hasher.update(spend.to_bytes());
    let view_bytes: [u8; 32] = hasher.finalize().into();
    SigningKey::from_bytes(&view_bytes)
}

/// A public address: network tag, both public keys, 4-byte checksum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Network tag byte
    pub tag: u8,
    /// Public spend key
    #[serde(with = "hex")]
    pub spend_pk: [u8; 32],
    /// Public view key
    #[serde(with = "hex")]
    pub view_pk: [u8; 32],
}

impl Address {
    /// Encode as a hex string with trailing checksum
    pub fn encode(&self) -> String {
        let mut data = Vec::with_capacity(ADDRESS_LEN);
        data.push(self.tag);
        data.extend_from_slice(&self.spend_pk);
        data.extend_from_slice(&self.view_pk);
        data.extend_from_slice(&checksum(self.tag, &self.spend_pk, &self.view_pk));
        hex::encode(data)
    }

    /// Decode and verify an encoded address
    pub fn decode(encoded: &str) -> Result<Self, KeyError> {
        let data = hex::decode(encoded).map_err(|_| KeyError::InvalidHex)?;
        if data.len() != ADDRESS_LEN {
            return Err(KeyError::InvalidLength(data.len()));
        }

        let tag = data[0];
        let mut spend_pk = [0u8; 32];
        let mut view_pk = [0u8; 32];
        spend_pk.copy_from_slice(&data[1..33]);
        view_pk.copy_from_slice(&data[33..65]);

        if data[65..69] != checksum(tag, &spend_pk, &view_pk) {
            return Err(KeyError::InvalidChecksum);
        }

        Ok(Self {
            tag,
            spend_pk,
            view_pk,
        })
    }
}

/// First 4 bytes of SHA-256(tag || spend_pk || view_pk)
fn checksum(tag: u8, spend_pk: &[u8; 32], view_pk: &[u8; 32]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    hasher.update([tag]);
    hasher.update(spend_pk);
    hasher.update(view_pk);
    let digest = hasher.finalize();

    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Verifier, VerifyingKey};

    #[test]
    fn test_seed_derivation_deterministic() {
        let b1 = KeyBundle::from_seed(&[7u8; 32]);
        let b2 = KeyBundle::from_seed(&[7u8; 32]);

        assert_eq!(b1.spend_public(), b2.spend_public());
        assert_eq!(b1.view_public(), b2.view_public());
    }

    #[test]
    fn test_view_key_differs_from_spend_key() {
        let bundle = KeyBundle::from_seed(&[7u8; 32]);
        assert_ne!(bundle.spend_public(), bundle.view_public());
    }

    #[test]
    fn test_random_bundles_differ() {
        let b1 = KeyBundle::random();
        let b2 = KeyBundle::random();
        assert_ne!(b1.spend_public(), b2.spend_public());
    }

    #[test]
    fn test_signature_verifies_under_spend_key() {
        let bundle = KeyBundle::from_seed(&[7u8; 32]);
        let sig = bundle.sign(b"payload");

        let vk = VerifyingKey::from_bytes(&bundle.spend_public()).unwrap();
        let sig = ed25519_dalek::Signature::from_bytes(&sig);
        assert!(vk.verify(b"payload", &sig).is_ok());
    }

    #[test]
    fn test_address_round_trip() {
        let bundle = KeyBundle::from_seed(&[7u8; 32]);
        let address = bundle.primary_address();

        let decoded = Address::decode(&address.encode()).unwrap();
        assert_eq!(decoded, address);
        assert_eq!(decoded.tag, MAINNET_TAG);
    }

    #[test]
    fn test_address_checksum_detects_tampering() {
        let bundle = KeyBundle::from_seed(&[7u8; 32]);
        let mut encoded = bundle.primary_address().encode();

        // Flip one nibble of the spend key portion.
        let flipped = if encoded.as_bytes()[4] == b'0' { "1" } else { "0" };
        encoded.replace_range(4..5, flipped);

        assert_eq!(
            Address::decode(&encoded).unwrap_err(),
            KeyError::InvalidChecksum
        );
    }

    #[test]
    fn test_address_rejects_bad_input() {
        assert_eq!(
            Address::decode("not hex!").unwrap_err(),
            KeyError::InvalidHex
        );
        assert_eq!(
            Address::decode("abcd").unwrap_err(),
            KeyError::InvalidLength(2)
        );
    }
}

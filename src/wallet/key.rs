//! Private key material and signing.
//!
//! # Security
//! - Key bytes are never logged; `Debug` is redacted
//! - Signing goes through alloy's local signer (RFC 6979, low-s)

use alloy::primitives::B256;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use k256::ecdsa::SigningKey;
use std::fmt;

use crate::wallet::types::{DerivationError, DerivationResult};

/// Trailing byte marking a private key whose public key is compressed.
pub const COMPRESSED_MARKER: u8 = 0x01;

const SECRET_LEN: usize = 32;

/// A secp256k1 private key plus its public-key encoding flag.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: [u8; SECRET_LEN],
    compressed: bool,
}

/// A recoverable ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub recovery_id: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl RecoverableSignature {
    /// `recovery_id || r || s`, the layout committed to in transactions.
    pub fn to_vrs(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = self.recovery_id;
        out[1..33].copy_from_slice(&self.r);
        out[33..].copy_from_slice(&self.s);
        out
    }

    /// `r || s || recovery_id`, the layout used for signed messages.
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.recovery_id;
        out
    }
}

impl PrivateKey {
    /// Interpret raw key bytes.
    ///
    /// 32 bytes select an uncompressed public key; 33 bytes must end with
    /// [`COMPRESSED_MARKER`] and select a compressed one.
    pub fn from_bytes(bytes: &[u8]) -> DerivationResult<Self> {
        let compressed = match bytes.len() {
            SECRET_LEN => false,
            33 => {
                let marker = bytes[SECRET_LEN];
                if marker != COMPRESSED_MARKER {
                    return Err(DerivationError::CompressionMarker(marker));
                }
                true
            }
            other => return Err(DerivationError::KeyLength(other)),
        };

        let mut secret = [0u8; SECRET_LEN];
        secret.copy_from_slice(&bytes[..SECRET_LEN]);
        Ok(Self { secret, compressed })
    }

    /// Parse a hex-encoded key (with or without 0x prefix).
    pub fn from_hex(key_hex: &str) -> DerivationResult<Self> {
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        let bytes = hex::decode(key_hex).map_err(|e| DerivationError::Hex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Raw bytes including the compression marker when compressed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.secret.to_vec();
        if self.compressed {
            bytes.push(COMPRESSED_MARKER);
        }
        bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// SEC1-encoded public key, compressed or not according to the marker.
    pub fn public_key(&self) -> DerivationResult<Vec<u8>> {
        let signing_key = SigningKey::from_slice(&self.secret)
            .map_err(|e| DerivationError::InvalidKey(e.to_string()))?;
        Ok(signing_key
            .verifying_key()
            .to_encoded_point(self.compressed)
            .as_bytes()
            .to_vec())
    }

    /// Sign a 32-byte digest as-is, returning a recoverable signature.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> DerivationResult<RecoverableSignature> {
        let signer = PrivateKeySigner::from_slice(&self.secret)
            .map_err(|e| DerivationError::InvalidKey(e.to_string()))?;
        let signature = signer
            .sign_hash_sync(&B256::from(*digest))
            .map_err(|e| DerivationError::Signing(e.to_string()))?;

        Ok(RecoverableSignature {
            recovery_id: signature.v() as u8,
            r: signature.r().to_be_bytes::<32>(),
            s: signature.s().to_be_bytes::<32>(),
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("secret", &"<redacted>")
            .field("compressed", &self.compressed)
            .finish()
    }
}

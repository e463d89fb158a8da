//! Signed-message support.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::wallet::account::Credential;
use crate::wallet::address::StacksAddress;
use crate::wallet::types::DerivationResult;

/// Prefix mixed into every message digest so signatures cannot double as transactions.
pub const MESSAGE_PREFIX: &[u8] = b"\x17Stacks Signed Message:\n";

/// Bitcoin-style compact size encoding.
fn encode_varint(value: u64) -> Vec<u8> {
    match value {
        0..=0xfc => vec![value as u8],
        0xfd..=0xffff => {
            let mut out = vec![0xfd];
            out.extend_from_slice(&(value as u16).to_le_bytes());
            out
        }
        0x1_0000..=0xffff_ffff => {
            let mut out = vec![0xfe];
            out.extend_from_slice(&(value as u32).to_le_bytes());
            out
        }
        _ => {
            let mut out = vec![0xff];
            out.extend_from_slice(&value.to_le_bytes());
            out
        }
    }
}

/// Digest signed for a plain-text message.
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(MESSAGE_PREFIX);
    hasher.update(encode_varint(message.len() as u64));
    hasher.update(message);
    hasher.finalize().into()
}

/// Result of signing a message.
#[derive(Debug, Clone, Serialize)]
pub struct SignedMessage {
    pub message: String,
    pub hash: String,
    /// Hex `r || s || v`.
    pub signature: String,
    pub public_key: String,
    pub address: StacksAddress,
}

/// Sign `message` with the credential's key.
pub fn sign_message(credential: &Credential, message: &str) -> DerivationResult<SignedMessage> {
    let digest = hash_message(message.as_bytes());
    let signature = credential.private_key().sign_digest(&digest)?;

    Ok(SignedMessage {
        message: message.to_string(),
        hash: hex::encode(digest),
        signature: hex::encode(signature.to_rsv()),
        public_key: hex::encode(credential.public_key()),
        address: *credential.address(),
    })
}

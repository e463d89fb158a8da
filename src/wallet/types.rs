//! Network selector and derivation error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address version byte for mainnet single-sig (P2PKH) addresses (`SP...`).
pub const MAINNET_SINGLESIG_VERSION: u8 = 22;
/// Address version byte for mainnet multisig (P2SH) addresses (`SM...`).
pub const MAINNET_MULTISIG_VERSION: u8 = 20;
/// Address version byte for testnet single-sig (P2PKH) addresses (`ST...`).
pub const TESTNET_SINGLESIG_VERSION: u8 = 26;
/// Address version byte for testnet multisig (P2SH) addresses (`SN...`).
pub const TESTNET_MULTISIG_VERSION: u8 = 21;

/// Network the credentials and calls target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    /// Version byte used for single-sig addresses on this network.
    pub fn singlesig_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_SINGLESIG_VERSION,
            Network::Testnet => TESTNET_SINGLESIG_VERSION,
        }
    }

    /// Version byte used for multisig addresses on this network.
    pub fn multisig_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_MULTISIG_VERSION,
            Network::Testnet => TESTNET_MULTISIG_VERSION,
        }
    }

    /// Network an address version byte belongs to, if it is a known one.
    pub fn from_address_version(version: u8) -> Option<Self> {
        match version {
            MAINNET_SINGLESIG_VERSION | MAINNET_MULTISIG_VERSION => Some(Network::Mainnet),
            TESTNET_SINGLESIG_VERSION | TESTNET_MULTISIG_VERSION => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Transaction version byte.
    pub fn transaction_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x80,
        }
    }

    /// Chain ID committed to by signed transactions.
    pub fn chain_id(self) -> u32 {
        match self {
            Network::Mainnet => 0x0000_0001,
            Network::Testnet => 0x8000_0000,
        }
    }

    /// Public node API used when no URL is configured.
    pub fn default_api_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.hiro.so",
            Network::Testnet => "https://api.testnet.hiro.so",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(format!("unknown network '{}', expected mainnet or testnet", other)),
        }
    }
}

/// Errors raised while turning a seed phrase into key material.
#[derive(Debug, Error)]
pub enum DerivationError {
    /// The seed phrase was rejected by the derivation backend.
    #[error("Invalid seed phrase: {0}")]
    Mnemonic(String),

    /// Private key bytes had an unsupported length.
    #[error("Invalid private key length {0}, expected 32 or 33 bytes")]
    KeyLength(usize),

    /// A 33-byte private key did not end with the compression marker.
    #[error("Invalid compression marker 0x{0:02x}, expected 0x01")]
    CompressionMarker(u8),

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Hex-encoded key could not be decoded.
    #[error("Invalid private key hex: {0}")]
    Hex(String),

    /// Signing with the derived key failed.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for derivation operations.
pub type DerivationResult<T> = Result<T, DerivationError>;

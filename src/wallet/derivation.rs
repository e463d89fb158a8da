//! Hierarchical key derivation from a seed phrase.

use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::MnemonicBuilder;
use std::fmt;

use crate::wallet::key::COMPRESSED_MARKER;
use crate::wallet::types::{DerivationError, DerivationResult};

/// BIP-44 prefix for account keys; the account index is the final element.
pub const STX_DERIVATION_PATH_PREFIX: &str = "m/44'/5757'/0'/0/";

/// Source of raw per-account private key bytes.
pub trait KeyDeriver {
    /// Derive the raw private key bytes for one account.
    fn derive_account_key(&self, index: u32) -> DerivationResult<Vec<u8>>;
}

/// Derives account keys from a BIP-39 mnemonic with an empty passphrase.
pub struct MnemonicDeriver {
    phrase: String,
}

impl MnemonicDeriver {
    /// Whitespace is normalised; the phrase itself is checked on first use.
    pub fn new(phrase: &str) -> DerivationResult<Self> {
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        if phrase.is_empty() {
            return Err(DerivationError::Mnemonic("seed phrase is empty".to_string()));
        }
        Ok(Self { phrase })
    }

    /// Full derivation path for an account.
    pub fn path(index: u32) -> String {
        format!("{}{}", STX_DERIVATION_PATH_PREFIX, index)
    }
}

impl KeyDeriver for MnemonicDeriver {
    fn derive_account_key(&self, index: u32) -> DerivationResult<Vec<u8>> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(self.phrase.as_str())
            .derivation_path(Self::path(index))
            .map_err(|e| DerivationError::Mnemonic(e.to_string()))?
            .build()
            .map_err(|e| DerivationError::Mnemonic(e.to_string()))?;

        let mut key = signer.to_bytes().to_vec();
        key.push(COMPRESSED_MARKER);
        Ok(key)
    }
}

impl fmt::Debug for MnemonicDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicDeriver")
            .field("phrase", &"<redacted>")
            .finish()
    }
}

//! Cumulative account derivation and credentials.
//!
//! Accounts are generated one at a time starting from index 0. Reaching
//! account `n` always replays every account before it, mirroring how the
//! hierarchical wallet advances.

use serde::Serialize;

use crate::config::schema::WalletConfig;
use crate::config::ConfigError;
use crate::error::Error;
use crate::wallet::address::StacksAddress;
use crate::wallet::derivation::{KeyDeriver, MnemonicDeriver};
use crate::wallet::key::PrivateKey;
use crate::wallet::types::{DerivationResult, Network};

/// One generated account.
#[derive(Debug, Clone)]
pub struct Account {
    index: u32,
    private_key: PrivateKey,
}

impl Account {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

/// Hierarchical wallet holding every account generated so far.
#[derive(Debug)]
pub struct Wallet<D = MnemonicDeriver> {
    deriver: D,
    accounts: Vec<Account>,
}

impl Wallet<MnemonicDeriver> {
    /// Open a wallet over a seed phrase with an empty passphrase.
    pub fn from_mnemonic(phrase: &str) -> DerivationResult<Self> {
        Ok(Self::new(MnemonicDeriver::new(phrase)?))
    }
}

impl<D: KeyDeriver> Wallet<D> {
    pub fn new(deriver: D) -> Self {
        Self {
            deriver,
            accounts: Vec::new(),
        }
    }

    /// Advance the wallet by exactly one account.
    pub fn generate_new_account(&mut self) -> DerivationResult<&Account> {
        let index = self.accounts.len() as u32;
        let raw = self.deriver.derive_account_key(index)?;
        let private_key = PrivateKey::from_bytes(&raw)?;

        tracing::debug!(index, "Derived account");
        self.accounts.push(Account { index, private_key });
        Ok(&self.accounts[index as usize])
    }

    /// Generate accounts until `index` exists and return it.
    pub fn derive_up_to(&mut self, index: u32) -> DerivationResult<&Account> {
        while self.accounts.len() <= index as usize {
            self.generate_new_account()?;
        }
        Ok(&self.accounts[index as usize])
    }

    /// Accounts generated so far, in index order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Credential for `index` on `network`, deriving up to it if needed.
    pub fn credential(&mut self, index: u32, network: Network) -> DerivationResult<Credential> {
        let account = self.derive_up_to(index)?;
        Credential::new(index, network, account.private_key().clone())
    }
}

/// Address and signing key for one account on one network.
#[derive(Debug, Clone)]
pub struct Credential {
    index: u32,
    network: Network,
    address: StacksAddress,
    public_key: Vec<u8>,
    private_key: PrivateKey,
}

impl Credential {
    pub fn new(index: u32, network: Network, private_key: PrivateKey) -> DerivationResult<Self> {
        let public_key = private_key.public_key()?;
        let address = StacksAddress::from_public_key(network, &public_key);
        Ok(Self {
            index,
            network,
            address,
            public_key,
            private_key,
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn address(&self) -> &StacksAddress {
        &self.address
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Public, non-secret view of the credential.
    pub fn summary(&self) -> CredentialSummary {
        CredentialSummary {
            index: self.index,
            network: self.network,
            address: self.address,
            public_key: hex::encode(&self.public_key),
        }
    }
}

/// What may be printed about a credential.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialSummary {
    pub index: u32,
    pub network: Network,
    pub address: StacksAddress,
    pub public_key: String,
}

/// Derive the configured account's credential.
///
/// Fails with a configuration error when the seed phrase or account index
/// is absent, and with a derivation error when the key material is bad.
pub fn derive_credential(wallet: &WalletConfig, network: Network) -> Result<Credential, Error> {
    let phrase = wallet
        .mnemonic
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or(ConfigError::Missing("MNEMONIC"))?;
    let index = wallet.account_index.ok_or(ConfigError::Missing("ACCOUNT_INDEX"))?;

    let credential = Wallet::from_mnemonic(phrase)?.credential(index, network)?;

    tracing::info!(
        index,
        network = %network,
        address = %credential.address(),
        "Credential derived"
    );
    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::types::DerivationError;
    use std::cell::RefCell;

    const DEVNET_MNEMONIC: &str = "twice kind fence tip hidden tilt action fragile skin nothing glory cousin green tomorrow spring wrist shed math olympic multiply hip blue scout claw";

    /// Records every index it is asked for.
    struct CountingDeriver {
        calls: RefCell<Vec<u32>>,
    }

    impl CountingDeriver {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl KeyDeriver for CountingDeriver {
        fn derive_account_key(&self, index: u32) -> DerivationResult<Vec<u8>> {
            self.calls.borrow_mut().push(index);
            let mut key = vec![index as u8 + 1; 32];
            key.push(0x01);
            Ok(key)
        }
    }

    struct MalformedDeriver(Vec<u8>);

    impl KeyDeriver for MalformedDeriver {
        fn derive_account_key(&self, _index: u32) -> DerivationResult<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_derivation_is_cumulative() {
        let mut wallet = Wallet::new(CountingDeriver::new());
        wallet.derive_up_to(4).unwrap();
        assert_eq!(*wallet.deriver.calls.borrow(), vec![0, 1, 2, 3, 4]);
        assert_eq!(wallet.accounts().len(), 5);

        // already derived, nothing replayed
        wallet.derive_up_to(2).unwrap();
        assert_eq!(wallet.deriver.calls.borrow().len(), 5);

        wallet.derive_up_to(6).unwrap();
        assert_eq!(*wallet.deriver.calls.borrow(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_account_zero_takes_one_step() {
        let mut wallet = Wallet::new(CountingDeriver::new());
        let account = wallet.derive_up_to(0).unwrap();
        assert_eq!(account.index(), 0);
        assert_eq!(*wallet.deriver.calls.borrow(), vec![0]);
    }

    #[test]
    fn test_malformed_key_material() {
        let mut wallet = Wallet::new(MalformedDeriver(vec![1u8; 31]));
        assert!(matches!(
            wallet.derive_up_to(0),
            Err(DerivationError::KeyLength(31))
        ));

        let mut bad_marker = vec![1u8; 32];
        bad_marker.push(0x00);
        let mut wallet = Wallet::new(MalformedDeriver(bad_marker));
        assert!(matches!(
            wallet.generate_new_account(),
            Err(DerivationError::CompressionMarker(0x00))
        ));
        assert!(wallet.accounts().is_empty());
    }

    #[test]
    fn test_devnet_mnemonic_account_zero() {
        let mut wallet = Wallet::from_mnemonic(DEVNET_MNEMONIC).unwrap();
        let credential = wallet.credential(0, Network::Testnet).unwrap();
        assert_eq!(
            credential.address().to_string(),
            "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
        );
        assert_eq!(
            credential.private_key().to_hex(),
            "753b7cc01a1a2e86221266a154af739463fce51219d97e4f856cd7200c3bd2a601"
        );
    }

    #[test]
    fn test_devnet_mnemonic_account_one() {
        let mut wallet = Wallet::from_mnemonic(DEVNET_MNEMONIC).unwrap();
        let credential = wallet.credential(1, Network::Testnet).unwrap();
        assert_eq!(
            credential.address().to_string(),
            "ST2ST2H80NP5C9SPR4ENJ1Z9CDM9PKAJVPYWPQZ50"
        );
        assert_eq!(wallet.accounts().len(), 2);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let config = WalletConfig {
            mnemonic: Some(DEVNET_MNEMONIC.to_string()),
            account_index: Some(3),
        };
        for network in [Network::Mainnet, Network::Testnet] {
            let first = derive_credential(&config, network).unwrap();
            let second = derive_credential(&config, network).unwrap();
            assert_eq!(first.address(), second.address());
            assert_eq!(first.private_key(), second.private_key());
            assert_eq!(first.address().network(), Some(network));
        }
    }

    #[test]
    fn test_missing_configuration() {
        let config = WalletConfig {
            mnemonic: None,
            account_index: Some(0),
        };
        assert!(matches!(
            derive_credential(&config, Network::Testnet),
            Err(Error::Configuration(ConfigError::Missing("MNEMONIC")))
        ));

        let config = WalletConfig {
            mnemonic: Some(DEVNET_MNEMONIC.to_string()),
            account_index: None,
        };
        assert!(matches!(
            derive_credential(&config, Network::Testnet),
            Err(Error::Configuration(ConfigError::Missing("ACCOUNT_INDEX")))
        ));
    }

    #[test]
    fn test_summary_hides_private_key() {
        let mut wallet = Wallet::from_mnemonic(DEVNET_MNEMONIC).unwrap();
        let credential = wallet.credential(0, Network::Testnet).unwrap();
        let json = serde_json::to_string(&credential.summary()).unwrap();
        assert!(json.contains("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"));
        assert!(!json.contains("753b7cc0"));
    }
}

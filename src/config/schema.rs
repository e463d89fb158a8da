//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file;
//! environment variables are layered on top by the loader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::transaction::PostConditionMode;
use crate::wallet::Network;

/// Root configuration, built once at start-up and passed by reference.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Network selector (mainnet or testnet).
    pub network: Network,

    /// Seed phrase and account selection.
    pub wallet: WalletConfig,

    /// Node API endpoint.
    pub node: NodeConfig,

    /// Defaults for broadcast transactions.
    pub transaction: TransactionConfig,

    /// Third-party HTTP APIs by name.
    pub apis: BTreeMap<String, ApiConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet configuration.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// BIP-39 seed phrase.
    pub mnemonic: Option<String>,

    /// Account index to derive.
    pub account_index: Option<u32>,
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("account_index", &self.account_index)
            .finish()
    }
}

/// Node API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL; the network's public API when unset.
    pub api_url: Option<String>,

    /// API key sent as `x-api-key`.
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            request_timeout_secs: 30,
        }
    }
}

impl NodeConfig {
    /// Configured URL, or the network default.
    pub fn resolved_url(&self, network: Network) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| network.default_api_url().to_string())
    }
}

/// Transaction defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Fee in micro-STX when none is given on the command line.
    pub default_fee: u64,

    /// Post-condition mode when none is given on the command line.
    pub post_condition_mode: PostConditionMode,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            default_fee: 10_000,
            post_condition_mode: PostConditionMode::Deny,
        }
    }
}

/// A third-party JSON API (market data, DEX quotes).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL, e.g. "https://api.example.com".
    pub host: String,

    /// Optional API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Header carrying the API key.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

impl ApiConfig {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            api_key: None,
            api_key_header: default_api_key_header(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.node.request_timeout_secs, 30);
        assert_eq!(
            config.node.resolved_url(Network::Mainnet),
            "https://api.hiro.so"
        );
        assert_eq!(config.transaction.post_condition_mode, PostConditionMode::Deny);
        assert!(config.apis.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            network = "mainnet"

            [wallet]
            account_index = 2

            [node]
            api_url = "http://localhost:3999"

            [apis.prices]
            host = "https://prices.example.com"
            api_key = "k"
            "#,
        )
        .unwrap();

        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.wallet.account_index, Some(2));
        assert_eq!(config.node.resolved_url(Network::Mainnet), "http://localhost:3999");
        assert_eq!(config.apis["prices"].api_key_header, "x-api-key");
        assert_eq!(config.node.request_timeout_secs, 30);
    }

    #[test]
    fn test_wallet_debug_redacts_mnemonic() {
        let wallet = WalletConfig {
            mnemonic: Some("secret words".to_string()),
            account_index: Some(0),
        };
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains("secret"));
    }
}

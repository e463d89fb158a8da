//! `balance`: STX balance and next nonce of an address.

use clap::Args;

use crate::commands::{emit, invoker};
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::OutputSink;
use crate::validation::validate_address;
use crate::wallet::{derive_credential, StacksAddress};

pub const EXAMPLE: &str = "Example:\n  stx-agent balance ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Address to query (defaults to the configured account)
    pub address: Option<String>,
}

/// The address must belong to the configured network.
pub(crate) fn target_address(args: &BalanceArgs, config: &AppConfig) -> Result<StacksAddress> {
    match &args.address {
        Some(raw) => Ok(validate_address(raw, Some(config.network))?),
        None => Ok(*derive_credential(&config.wallet, config.network)?.address()),
    }
}

pub async fn run<S: OutputSink>(
    args: BalanceArgs,
    config: &AppConfig,
    sink: &mut S,
) -> Result<bool> {
    let address = target_address(&args, config)?;
    let envelope = invoker(config)?.account(&address).await;
    emit(sink, envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::validation::ValidationError;

    #[test]
    fn test_network_must_match() {
        let args = BalanceArgs {
            address: Some("SP000000000000000000002Q6VF78".to_string()),
        };
        let err = target_address(&args, &AppConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_defaults_to_configured_account() {
        let config = crate::commands::test_support::config_with_wallet(0);
        let address = target_address(&BalanceArgs { address: None }, &config).unwrap();
        assert_eq!(address.to_string(), "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
    }
}

//! One subcommand per task.
//!
//! # Flow
//! ```text
//! arguments → validation → credential (if needed) → invoker → envelope → sink
//! ```
//!
//! Every command returns whether the emitted envelope reports success.
//! Configuration, validation and derivation failures are returned as
//! [`crate::Error`] before any request is made.

pub mod address;
pub mod approved_asset;
pub mod balance;
pub mod call;
pub mod fetch;
pub mod quote;
pub mod read_only;
pub mod sign_message;
pub mod validate;

use clap::Subcommand;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ApiConfig, AppConfig, ConfigError};
use crate::error::Result;
use crate::invoker::{OutputSink, RemoteInvoker, ResultEnvelope};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the address and public key of the configured account
    #[command(after_help = address::EXAMPLE)]
    Address(address::AddressArgs),

    /// Check a standard or contract principal
    #[command(after_help = validate::EXAMPLE)]
    Validate(validate::ValidateArgs),

    /// Call a read-only contract function
    #[command(after_help = read_only::EXAMPLE)]
    ReadOnly(read_only::ReadOnlyArgs),

    /// Check whether an agent account approves an asset contract
    #[command(after_help = approved_asset::EXAMPLE)]
    ApprovedAsset(approved_asset::ApprovedAssetArgs),

    /// Sign and broadcast a contract call
    #[command(after_help = call::EXAMPLE)]
    Call(call::CallArgs),

    /// Sign a message with the configured account
    #[command(after_help = sign_message::EXAMPLE)]
    SignMessage(sign_message::SignMessageArgs),

    /// Show the STX balance and next nonce of an address
    #[command(after_help = balance::EXAMPLE)]
    Balance(balance::BalanceArgs),

    /// GET a path from a configured data API
    #[command(after_help = fetch::EXAMPLE)]
    Fetch(fetch::FetchArgs),

    /// Request a swap quote from a configured DEX API
    #[command(after_help = quote::EXAMPLE)]
    Quote(quote::QuoteArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Address(_) => "address",
            Command::Validate(_) => "validate",
            Command::ReadOnly(_) => "read-only",
            Command::ApprovedAsset(_) => "approved-asset",
            Command::Call(_) => "call",
            Command::SignMessage(_) => "sign-message",
            Command::Balance(_) => "balance",
            Command::Fetch(_) => "fetch",
            Command::Quote(_) => "quote",
        }
    }

    /// Run the command inside a span carrying a fresh invocation id.
    pub async fn run<S: OutputSink>(self, config: &AppConfig, sink: &mut S) -> Result<bool> {
        let span = tracing::info_span!(
            "command",
            command = self.name(),
            invocation_id = %Uuid::new_v4()
        );

        async move {
            tracing::debug!(network = %config.network, "Command started");
            match self {
                Command::Address(args) => address::run(args, config, sink),
                Command::Validate(args) => validate::run(args, config, sink),
                Command::ReadOnly(args) => read_only::run(args, config, sink).await,
                Command::ApprovedAsset(args) => approved_asset::run(args, config, sink).await,
                Command::Call(args) => call::run(args, config, sink).await,
                Command::SignMessage(args) => sign_message::run(args, config, sink),
                Command::Balance(args) => balance::run(args, config, sink).await,
                Command::Fetch(args) => fetch::run(args, config, sink).await,
                Command::Quote(args) => quote::run(args, config, sink).await,
            }
        }
        .instrument(span)
        .await
    }
}

/// Usage example for a subcommand name, as printed after argument errors.
pub fn example(name: &str) -> Option<&'static str> {
    let example = match name {
        "address" => address::EXAMPLE,
        "validate" => validate::EXAMPLE,
        "read-only" => read_only::EXAMPLE,
        "approved-asset" => approved_asset::EXAMPLE,
        "call" => call::EXAMPLE,
        "sign-message" => sign_message::EXAMPLE,
        "balance" => balance::EXAMPLE,
        "fetch" => fetch::EXAMPLE,
        "quote" => quote::EXAMPLE,
        _ => return None,
    };
    Some(example)
}

/// Hand the envelope to the sink and report its outcome.
pub(crate) fn emit<T: Serialize, S: OutputSink>(
    sink: &mut S,
    envelope: ResultEnvelope<T>,
) -> Result<bool> {
    sink.send(&envelope)?;
    Ok(envelope.success)
}

pub(crate) fn invoker(config: &AppConfig) -> Result<RemoteInvoker> {
    Ok(RemoteInvoker::from_config(config)?)
}

/// Look up a third-party API by case-insensitive name.
pub(crate) fn api<'a>(config: &'a AppConfig, name: &str) -> Result<&'a ApiConfig> {
    let key = name.trim().to_ascii_lowercase();
    Ok(config
        .apis
        .get(&key)
        .ok_or(ConfigError::UnknownApi(key))?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::AppConfig;
    use crate::invoker::JsonSink;

    pub const DEVNET_MNEMONIC: &str = "twice kind fence tip hidden tilt action fragile skin nothing glory cousin green tomorrow spring wrist shed math olympic multiply hip blue scout claw";

    pub fn config_with_wallet(index: u32) -> AppConfig {
        let mut config = AppConfig::default();
        config.wallet.mnemonic = Some(DEVNET_MNEMONIC.to_string());
        config.wallet.account_index = Some(index);
        config
    }

    pub fn output(sink: JsonSink<Vec<u8>>) -> serde_json::Value {
        let bytes = sink.into_inner();
        serde_json::from_slice(&bytes).unwrap()
    }
}

//! `address`: derive the configured account and print its public identity.

use clap::Args;

use crate::commands::emit;
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::{OutputSink, ResultEnvelope};
use crate::wallet::derive_credential;

pub const EXAMPLE: &str = "Example:\n  MNEMONIC=\"twice kind ...\" stx-agent address --account-index 0";

#[derive(Debug, Args)]
pub struct AddressArgs {}

pub fn run<S: OutputSink>(_args: AddressArgs, config: &AppConfig, sink: &mut S) -> Result<bool> {
    let credential = derive_credential(&config.wallet, config.network)?;
    emit(
        sink,
        ResultEnvelope::ok("address derived", credential.summary()),
    )
}

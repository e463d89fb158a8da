//! `approved-asset`: ask an agent account contract whether it accepts an asset.

use clap::Args;

use crate::clarity::ClarityValue;
use crate::commands::read_only::resolve_sender;
use crate::commands::{emit, invoker};
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::{OutputSink, ReadOnlyCall};
use crate::validation::{validate_contract_principal, Principal};

pub const APPROVED_ASSET_FUNCTION: &str = "is-approved-asset";

pub const EXAMPLE: &str = "Example:\n  stx-agent approved-asset ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-agent-account-test ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.sbtc-token";

#[derive(Debug, Args)]
pub struct ApprovedAssetArgs {
    /// Agent account contract, `<address>.<contract-name>`
    pub agent_account: String,

    /// Asset contract, `<address>.<contract-name>`
    pub asset_contract: String,

    /// Address the call is evaluated as
    #[arg(long)]
    pub sender: Option<String>,
}

/// Build the read-only call without issuing it.
pub(crate) fn approved_asset_call(
    args: &ApprovedAssetArgs,
    config: &AppConfig,
) -> Result<ReadOnlyCall> {
    let contract = validate_contract_principal(&args.agent_account)?;
    let asset = validate_contract_principal(&args.asset_contract)?;
    let sender = resolve_sender(args.sender.as_deref(), config, &contract)?;

    Ok(ReadOnlyCall {
        contract,
        function: APPROVED_ASSET_FUNCTION.to_string(),
        arguments: vec![ClarityValue::Principal(Principal::Contract(asset))],
        sender,
    })
}

pub async fn run<S: OutputSink>(
    args: ApprovedAssetArgs,
    config: &AppConfig,
    sink: &mut S,
) -> Result<bool> {
    let call = approved_asset_call(&args, config)?;
    tracing::info!(
        agent_account = %call.contract,
        asset = %args.asset_contract.trim(),
        "Checking approved asset"
    );
    let envelope = invoker(config)?.read_only(&call).await;
    emit(sink, envelope)
}

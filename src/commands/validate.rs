//! `validate`: check a principal without touching the network.

use clap::Args;
use serde::Serialize;

use crate::commands::emit;
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::{ErrorKind, OutputSink, ResultEnvelope};
use crate::validation::{validate_principal, Principal};
use crate::wallet::{Network, StacksAddress};

pub const EXAMPLE: &str =
    "Example:\n  stx-agent validate ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-agent-account-test";

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Standard address or `<address>.<contract-name>`
    pub principal: String,
}

#[derive(Debug, Serialize)]
pub struct PrincipalReport {
    pub principal: Principal,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub address: StacksAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    /// False when the address belongs to a different network than configured.
    pub matches_network: bool,
}

impl PrincipalReport {
    fn new(principal: Principal, configured: Network) -> Self {
        let (kind, address, contract_name) = match &principal {
            Principal::Standard(address) => ("standard", *address, None),
            Principal::Contract(contract) => {
                ("contract", contract.address, Some(contract.name.clone()))
            }
        };
        let network = address.network();
        Self {
            principal,
            kind,
            address,
            contract_name,
            network,
            matches_network: network == Some(configured),
        }
    }
}

/// Unlike the other commands, a rejected principal is reported through the
/// envelope since it is this command's result.
pub fn run<S: OutputSink>(args: ValidateArgs, config: &AppConfig, sink: &mut S) -> Result<bool> {
    let envelope = match validate_principal(&args.principal) {
        Ok(principal) => ResultEnvelope::ok(
            "principal is valid",
            PrincipalReport::new(principal, config.network),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "Principal rejected");
            ResultEnvelope::failure("principal is invalid", ErrorKind::Validation, e.to_string())
        }
    };
    emit(sink, envelope)
}

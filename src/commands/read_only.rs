//! `read-only`: call a read-only contract function.

use clap::Args;

use crate::clarity::parse_arguments;
use crate::commands::{emit, invoker};
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::{OutputSink, ReadOnlyCall};
use crate::validation::{
    validate_address, validate_contract_principal, validate_function_name, ContractPrincipal,
};
use crate::wallet::{derive_credential, StacksAddress};

pub const EXAMPLE: &str = "Example:\n  stx-agent read-only SP000000000000000000002Q6VF78.pox-4 get-stacker-info \"'SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7\"";

#[derive(Debug, Args)]
pub struct ReadOnlyArgs {
    /// Contract principal, `<address>.<contract-name>`
    pub contract: String,

    /// Function name
    pub function: String,

    /// Clarity literals: u1, -5, true, none, 0xbeef, "ascii", u"utf8", 'SP...
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Address the call is evaluated as
    #[arg(long)]
    pub sender: Option<String>,
}

/// Pick the sender: explicit flag, then the configured account, then the
/// contract's own address.
///
/// The configured account is used only when both phrase and index are set;
/// a partial wallet section does not block a read.
pub(crate) fn resolve_sender(
    explicit: Option<&str>,
    config: &AppConfig,
    contract: &ContractPrincipal,
) -> Result<StacksAddress> {
    if let Some(raw) = explicit {
        return Ok(validate_address(raw, None)?);
    }
    if config.wallet.mnemonic.is_some() && config.wallet.account_index.is_some() {
        return Ok(*derive_credential(&config.wallet, config.network)?.address());
    }
    Ok(contract.address)
}

pub async fn run<S: OutputSink>(
    args: ReadOnlyArgs,
    config: &AppConfig,
    sink: &mut S,
) -> Result<bool> {
    let contract = validate_contract_principal(&args.contract)?;
    let function = validate_function_name(&args.function)?.to_string();
    let arguments = parse_arguments(&args.args)?;
    let sender = resolve_sender(args.sender.as_deref(), config, &contract)?;

    let call = ReadOnlyCall {
        contract,
        function,
        arguments,
        sender,
    };
    let envelope = invoker(config)?.read_only(&call).await;
    emit(sink, envelope)
}

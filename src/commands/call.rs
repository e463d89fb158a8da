//! `call`: sign a contract call and broadcast it.

use clap::Args;
use serde::Serialize;

use crate::clarity::parse_arguments;
use crate::commands::{emit, invoker};
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::{OutputSink, ResultEnvelope};
use crate::transaction::{make_contract_call, ContractCall, PostConditionMode, TxOptions};
use crate::validation::{validate_contract_principal, ContractPrincipal};
use crate::wallet::{derive_credential, StacksAddress};

pub const EXAMPLE: &str = "Example:\n  stx-agent call ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.counter increment u1 --fee 2000";

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Contract principal, `<address>.<contract-name>`
    pub contract: String,

    /// Function name
    pub function: String,

    /// Clarity literals: u1, -5, true, none, 0xbeef, "ascii", u"utf8", 'SP...
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Fee in micro-STX (defaults to the configured fee)
    #[arg(long)]
    pub fee: Option<u64>,

    /// Nonce (looked up from the node when omitted)
    #[arg(long)]
    pub nonce: Option<u64>,

    /// Allow transfers not covered by post-conditions
    #[arg(long)]
    pub allow_post_conditions: bool,
}

/// What was submitted.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedCall {
    pub txid: String,
    pub sender: StacksAddress,
    pub contract: ContractPrincipal,
    pub function: String,
    pub nonce: u64,
    pub fee: u64,
}

fn post_condition_mode(args: &CallArgs, config: &AppConfig) -> PostConditionMode {
    if args.allow_post_conditions {
        PostConditionMode::Allow
    } else {
        config.transaction.post_condition_mode
    }
}

pub async fn run<S: OutputSink>(args: CallArgs, config: &AppConfig, sink: &mut S) -> Result<bool> {
    let contract = validate_contract_principal(&args.contract)?;
    let arguments = parse_arguments(&args.args)?;
    let call = ContractCall::new(contract.clone(), &args.function, arguments)?;
    let credential = derive_credential(&config.wallet, config.network)?;
    let invoker = invoker(config)?;

    let nonce = match args.nonce {
        Some(nonce) => nonce,
        None => match invoker.try_account(credential.address()).await {
            Ok(account) => account.nonce,
            Err(e) => {
                tracing::warn!(error = %e, "Nonce lookup failed");
                return emit(
                    sink,
                    ResultEnvelope::<SubmittedCall>::from_error("nonce lookup failed", &e),
                );
            }
        },
    };

    let options = TxOptions {
        fee: args.fee.unwrap_or(config.transaction.default_fee),
        nonce,
        post_condition_mode: post_condition_mode(&args, config),
    };
    let signed = make_contract_call(call, &credential, options)?;

    tracing::info!(
        contract = %contract,
        function = %args.function,
        nonce,
        fee = options.fee,
        "Submitting contract call"
    );

    let envelope = invoker.broadcast(&signed).await.map(|receipt| SubmittedCall {
        txid: receipt.txid,
        sender: *credential.address(),
        contract,
        function: args.function,
        nonce,
        fee: options.fee,
    });
    emit(sink, envelope)
}

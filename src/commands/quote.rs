//! `quote`: request a swap quote from a configured DEX or price API.

use clap::Args;

use crate::commands::{api, emit, invoker};
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::OutputSink;
use crate::validation::{parse_amount, validate_symbol};

const QUOTE_PATH: &str = "/quote";

pub const EXAMPLE: &str =
    "Example:\n  DEX_API_HOST=https://dex.example.com stx-agent quote dex STX sBTC 1000000";

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// API name, configured via `<NAME>_API_HOST`
    pub api: String,

    /// Token to sell
    pub from: String,

    /// Token to buy
    pub to: String,

    /// Amount to sell, in the token's base units
    pub amount: String,
}

/// Validated query parameters, in request order.
pub(crate) fn quote_query(args: &QuoteArgs) -> Result<Vec<(&'static str, String)>> {
    let from = validate_symbol(&args.from)?;
    let to = validate_symbol(&args.to)?;
    let amount = parse_amount(&args.amount)?;
    Ok(vec![
        ("from", from),
        ("to", to),
        ("amount", amount.to_string()),
    ])
}

pub async fn run<S: OutputSink>(args: QuoteArgs, config: &AppConfig, sink: &mut S) -> Result<bool> {
    let query = quote_query(&args)?;
    let api = api(config, &args.api)?;

    let envelope = invoker(config)?
        .get_json::<serde_json::Value>(api, QUOTE_PATH, &query)
        .await;
    emit(sink, envelope)
}

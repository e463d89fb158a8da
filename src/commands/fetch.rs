//! `fetch`: GET a path from a configured third-party API.

use clap::Args;

use crate::commands::{api, emit, invoker};
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::OutputSink;
use crate::validation::ValidationError;

pub const EXAMPLE: &str =
    "Example:\n  PRICES_API_HOST=https://api.example.com stx-agent fetch prices /v1/tickers --query symbol=STX";

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// API name, configured via `<NAME>_API_HOST`
    pub api: String,

    /// Path below the API host
    pub path: String,

    /// Query parameters as key=value
    #[arg(long = "query", value_parser = parse_query_pair)]
    pub query: Vec<(String, String)>,
}

fn parse_query_pair(raw: &str) -> std::result::Result<(String, String), ValidationError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ValidationError::InvalidArgument {
            input: raw.to_string(),
            reason: "expected key=value".to_string(),
        }),
    }
}

pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

pub async fn run<S: OutputSink>(args: FetchArgs, config: &AppConfig, sink: &mut S) -> Result<bool> {
    let api = api(config, &args.api)?;
    let path = normalize_path(&args.path);
    let query: Vec<(&str, String)> = args
        .query
        .iter()
        .map(|(key, value)| (key.as_str(), value.clone()))
        .collect();

    let envelope = invoker(config)?
        .get_json::<serde_json::Value>(api, &path, &query)
        .await;
    emit(sink, envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        assert_eq!(
            parse_query_pair("symbol=STX").unwrap(),
            ("symbol".to_string(), "STX".to_string())
        );
        assert_eq!(parse_query_pair("a=b=c").unwrap().1, "b=c");
        assert!(parse_query_pair("novalue").is_err());
        assert!(parse_query_pair("=x").is_err());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("v1/tickers"), "/v1/tickers");
        assert_eq!(normalize_path("/v1/tickers"), "/v1/tickers");
    }
}

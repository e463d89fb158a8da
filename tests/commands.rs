//! End-to-end command tests against a mock node.

use clap::Parser;

use stx_agent_tools::commands::Command;
use stx_agent_tools::config::{ApiConfig, AppConfig};
use stx_agent_tools::invoker::JsonSink;
use stx_agent_tools::Error;

mod common;

const AGENT_ACCOUNT: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-agent-account-test";
const ASSET: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.sbtc-token";
const DEVNET_MNEMONIC: &str = "twice kind fence tip hidden tilt action fragile skin nothing glory cousin green tomorrow spring wrist shed math olympic multiply hip blue scout claw";

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("stx-agent").chain(args.iter().copied());
    TestCli::try_parse_from(argv).unwrap().command
}

async fn run(args: &[&str], config: &AppConfig) -> (Result<bool, Error>, Vec<u8>) {
    let mut sink = JsonSink::new(Vec::new());
    let result = parse(args).run(config, &mut sink).await;
    (result, sink.into_inner())
}

fn with_wallet(mut config: AppConfig, index: u32) -> AppConfig {
    config.wallet.mnemonic = Some(DEVNET_MNEMONIC.to_string());
    config.wallet.account_index = Some(index);
    config
}

#[tokio::test]
async fn test_approved_asset_true() {
    let backend = common::start_mock_backend(200, r#"{"okay":true,"result":"0x03"}"#).await;

    let (result, out) = run(&["approved-asset", AGENT_ACCOUNT, ASSET], &backend.config()).await;
    assert!(result.unwrap());

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"], true);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].path,
        "/v2/contracts/call-read/ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM/aibtc-agent-account-test/is-approved-asset"
    );
    let arguments = requests[0].json()["arguments"].clone();
    assert_eq!(arguments.as_array().unwrap().len(), 1);
    assert!(arguments[0].as_str().unwrap().starts_with("0x06"));
}

#[tokio::test]
async fn test_invalid_principal_never_reaches_the_node() {
    let backend = common::start_mock_backend(200, r#"{"okay":true,"result":"0x03"}"#).await;

    let (result, out) = run(
        &["approved-asset", "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM", ASSET],
        &backend.config(),
    )
    .await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(out.is_empty());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_node_failure_is_reported_not_raised() {
    let backend = common::start_mock_backend(500, "Internal Server Error").await;

    let (result, out) = run(
        &["read-only", AGENT_ACCOUNT, "get-owner"],
        &backend.config(),
    )
    .await;
    assert!(!result.unwrap());

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["kind"], "remote");
    assert!(value.get("data").is_none());
}

#[tokio::test]
async fn test_read_only_uses_configured_account_as_sender() {
    let backend = common::start_mock_backend(200, r#"{"okay":true,"result":"0x09"}"#).await;
    let config = with_wallet(backend.config(), 1);

    let (result, out) = run(&["read-only", AGENT_ACCOUNT, "get-owner", "u1", "-5"], &config).await;
    assert!(result.unwrap());

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(value["data"].is_null());

    let body = backend.requests()[0].json();
    assert_eq!(body["sender"], "ST2ST2H80NP5C9SPR4ENJ1Z9CDM9PKAJVPYWPQZ50");
    assert_eq!(body["arguments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_phrase_without_index_does_not_block_reads() {
    let backend = common::start_mock_backend(200, r#"{"okay":true,"result":"0x03"}"#).await;
    let mut config = backend.config();
    config.wallet.mnemonic = Some(DEVNET_MNEMONIC.to_string());

    let (result, _) = run(&["approved-asset", AGENT_ACCOUNT, ASSET], &config).await;
    assert!(result.unwrap());
    assert_eq!(
        backend.requests()[0].json()["sender"],
        "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
    );
}

#[tokio::test]
async fn test_call_looks_up_nonce_then_broadcasts() {
    let backend = common::start_programmable_backend(|request| async move {
        if request.path.starts_with("/v2/accounts/") {
            (200, r#"{"balance":"0x0","nonce":4}"#.to_string())
        } else {
            // reported as returned by the node
            (200, "\"0xabcdef\"".to_string())
        }
    })
    .await;
    let config = with_wallet(backend.config(), 0);

    let (result, out) = run(
        &["call", AGENT_ACCOUNT, "deposit-stx", "u1000", "--fee", "500"],
        &config,
    )
    .await;
    assert!(result.unwrap());

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["data"]["txid"], "0xabcdef");
    assert_eq!(value["data"]["nonce"], 4);
    assert_eq!(value["data"]["fee"], 500);
    assert_eq!(value["data"]["sender"], "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].path, "/v2/transactions");
    // testnet version byte
    assert_eq!(requests[1].body[0], 0x80);
}

#[tokio::test]
async fn test_call_with_explicit_nonce_skips_lookup() {
    let backend = common::start_mock_backend(200, "\"0x01\"").await;
    let config = with_wallet(backend.config(), 0);

    let (result, _) = run(
        &["call", AGENT_ACCOUNT, "deposit-stx", "--nonce", "9", "--allow-post-conditions"],
        &config,
    )
    .await;
    assert!(result.unwrap());
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v2/transactions");
}

#[tokio::test]
async fn test_balance() {
    let backend = common::start_mock_backend(200, r#"{"balance":"0x64","nonce":0}"#).await;

    let (result, out) = run(
        &["balance", "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"],
        &backend.config(),
    )
    .await;
    assert!(result.unwrap());
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["data"]["balance"], "100");
}

#[tokio::test]
async fn test_quote_against_named_api() {
    let backend = common::start_mock_backend(200, r#"{"amountOut":"42"}"#).await;
    let mut config = backend.config();
    config.apis.insert("dex".to_string(), ApiConfig::new(&backend.url()));

    let (result, out) = run(&["quote", "DEX", "STX", "sBTC", "1000"], &config).await;
    assert!(result.unwrap());

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["data"]["amountOut"], "42");
    assert_eq!(
        backend.requests()[0].path,
        "/quote?from=STX&to=sBTC&amount=1000"
    );
}

#[tokio::test]
async fn test_fetch_unknown_api_is_configuration_error() {
    let (result, out) = run(&["fetch", "prices", "/v1/tickers"], &AppConfig::default()).await;
    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(out.is_empty());
}

#[test]
fn test_missing_arguments_are_usage_errors() {
    let argv = ["stx-agent", "approved-asset", AGENT_ACCOUNT];
    let err = TestCli::try_parse_from(argv).err().unwrap();
    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

//! Request and response schemas for remote endpoints.

use serde::{Deserialize, Serialize};

use crate::clarity::ClarityValue;
use crate::validation::ContractPrincipal;
use crate::wallet::StacksAddress;

/// Parameters of a read-only contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyCall {
    pub contract: ContractPrincipal,
    pub function: String,
    pub arguments: Vec<ClarityValue>,
    pub sender: StacksAddress,
}

/// Body of `POST /v2/contracts/call-read/...`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadOnlyRequest {
    pub sender: String,
    pub arguments: Vec<String>,
}

/// Response of `POST /v2/contracts/call-read/...`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadOnlyResponse {
    pub okay: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
}

/// Body returned by `POST /v2/transactions` when a transaction is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastRejection {
    pub error: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
}

/// Successful broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastReceipt {
    pub txid: String,
}

/// Response of `GET /v2/accounts/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    /// Hex-encoded u128, `0x`-prefixed.
    pub balance: String,
    pub nonce: u64,
}

/// Decoded account state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub address: StacksAddress,
    /// Balance in micro-STX, as a decimal string.
    pub balance: String,
    pub nonce: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_response_schema() {
        let ok: ReadOnlyResponse =
            serde_json::from_str(r#"{"okay":true,"result":"0x03"}"#).unwrap();
        assert!(ok.okay);
        assert_eq!(ok.result.as_deref(), Some("0x03"));

        let failed: ReadOnlyResponse =
            serde_json::from_str(r#"{"okay":false,"cause":"NoSuchContract"}"#).unwrap();
        assert_eq!(failed.cause.as_deref(), Some("NoSuchContract"));

        assert!(serde_json::from_str::<ReadOnlyResponse>(r#"{"result":"0x03"}"#).is_err());
    }

    #[test]
    fn test_rejection_schema() {
        let rejection: BroadcastRejection = serde_json::from_str(
            r#"{"error":"transaction rejected","reason":"BadNonce","txid":"ab"}"#,
        )
        .unwrap();
        assert_eq!(rejection.reason.as_deref(), Some("BadNonce"));
    }
}

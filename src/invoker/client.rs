//! Node and third-party HTTP client.
//!
//! # Responsibilities
//! - Read-only contract calls against the node
//! - Raw transaction broadcast
//! - Account lookups and plain JSON GETs
//! - Fold every transport, status and decode failure into an envelope
//!
//! Each operation is attempted exactly once.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::clarity::{self, ClarityValue};
use crate::config::{ApiConfig, AppConfig, ConfigError};
use crate::invoker::envelope::ResultEnvelope;
use crate::invoker::types::{
    AccountInfo, AccountResponse, BroadcastReceipt, BroadcastRejection, ReadOnlyCall,
    ReadOnlyRequest, ReadOnlyResponse,
};
use crate::invoker::InvokeError;
use crate::transaction::SignedTransaction;
use crate::wallet::StacksAddress;

const NODE_API_KEY_HEADER: &str = "x-api-key";

/// Envelope message for a read-only call whose result is `(err ...)`.
pub const READ_ONLY_ERR_MESSAGE: &str = "read-only call returned an err response";

/// Issues single remote operations and normalizes their outcome.
#[derive(Clone)]
pub struct RemoteInvoker {
    client: Client,
    node_url: Url,
    node_api_key: Option<String>,
}

impl RemoteInvoker {
    /// Create an invoker for a node base URL.
    pub fn new(
        node_url: &str,
        node_api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let node_url = Url::parse(node_url).map_err(|e| ConfigError::InvalidValue {
            key: "node.api_url".to_string(),
            reason: format!("'{}': {}", node_url, e),
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "node.request_timeout_secs".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            node_url,
            node_api_key,
        })
    }

    /// Create an invoker from the application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.node.resolved_url(config.network),
            config.node.api_key.clone(),
            Duration::from_secs(config.node.request_timeout_secs),
        )
    }

    fn node_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.node_url.as_str().trim_end_matches('/'), path)
    }

    fn node_request(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.node_api_key {
            Some(key) => request.header(NODE_API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), InvokeError> {
        let response = request
            .send()
            .await
            .map_err(|e| InvokeError::Remote(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InvokeError::Remote(format!("failed to read response body: {}", e)))?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok((status, body))
    }

    /// Call a read-only function and decode its Clarity result.
    pub async fn try_read_only(&self, call: &ReadOnlyCall) -> Result<ClarityValue, InvokeError> {
        let url = self.node_endpoint(&format!(
            "/v2/contracts/call-read/{}/{}/{}",
            call.contract.address, call.contract.name, call.function
        ));
        let body = ReadOnlyRequest {
            sender: call.sender.to_string(),
            arguments: call.arguments.iter().map(clarity::to_hex).collect(),
        };

        tracing::debug!(
            contract = %call.contract,
            function = %call.function,
            args = body.arguments.len(),
            "Read-only call"
        );

        let (status, text) = self
            .send(self.node_request(self.client.post(url).json(&body)))
            .await?;
        if !status.is_success() {
            return Err(InvokeError::status(status, &text));
        }

        let response: ReadOnlyResponse =
            serde_json::from_str(&text).map_err(|e| InvokeError::Decode(e.to_string()))?;
        if !response.okay {
            return Err(InvokeError::Rejected(
                response.cause.unwrap_or_else(|| "no cause given".to_string()),
            ));
        }

        let result = response
            .result
            .ok_or_else(|| InvokeError::Decode("okay response without result".to_string()))?;
        clarity::from_hex(&result).map_err(|e| InvokeError::Decode(e.to_string()))
    }

    /// Read-only call, normalized into an envelope whose data is the JSON projection.
    ///
    /// An `(err ...)` result is still a successful call; the message says so
    /// because the projection unwraps it.
    pub async fn read_only(&self, call: &ReadOnlyCall) -> ResultEnvelope<serde_json::Value> {
        match self.try_read_only(call).await {
            Ok(value) if value.is_err_response() => {
                tracing::info!(function = %call.function, "Read-only call returned an err response");
                ResultEnvelope::ok(READ_ONLY_ERR_MESSAGE, value.to_json())
            }
            result => ResultEnvelope::from_result("read-only call", result.map(|v| v.to_json())),
        }
    }

    /// Broadcast a signed transaction and return the txid the node reports.
    pub async fn try_broadcast(
        &self,
        tx: &SignedTransaction,
    ) -> Result<BroadcastReceipt, InvokeError> {
        let request = self
            .client
            .post(self.node_endpoint("/v2/transactions"))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(tx.bytes.clone());

        tracing::info!(txid = %tx.txid_hex(), size = tx.bytes.len(), "Broadcasting transaction");

        let (status, text) = self.send(self.node_request(request)).await?;
        if !status.is_success() {
            return Err(match serde_json::from_str::<BroadcastRejection>(&text) {
                Ok(rejection) => InvokeError::Rejected(match rejection.reason {
                    Some(reason) => format!("{}: {}", rejection.error, reason),
                    None => rejection.error,
                }),
                Err(_) => InvokeError::status(status, &text),
            });
        }

        let txid: String =
            serde_json::from_str(&text).map_err(|e| InvokeError::Decode(e.to_string()))?;
        let txid = txid.trim_start_matches("0x").to_ascii_lowercase();
        if txid != tx.txid_hex() {
            tracing::warn!(expected = %tx.txid_hex(), returned = %txid, "Node reported a different txid");
        }

        Ok(BroadcastReceipt {
            txid: format!("0x{}", txid),
        })
    }

    /// Broadcast, normalized into an envelope.
    pub async fn broadcast(&self, tx: &SignedTransaction) -> ResultEnvelope<BroadcastReceipt> {
        ResultEnvelope::from_result("broadcast", self.try_broadcast(tx).await)
    }

    /// Fetch balance and next nonce for an address.
    pub async fn try_account(&self, address: &StacksAddress) -> Result<AccountInfo, InvokeError> {
        let url = self.node_endpoint(&format!("/v2/accounts/{}?proof=0", address));
        let (status, text) = self.send(self.node_request(self.client.get(url))).await?;
        if !status.is_success() {
            return Err(InvokeError::status(status, &text));
        }

        let response: AccountResponse =
            serde_json::from_str(&text).map_err(|e| InvokeError::Decode(e.to_string()))?;
        let balance = u128::from_str_radix(response.balance.trim_start_matches("0x"), 16)
            .map_err(|e| InvokeError::Decode(format!("balance '{}': {}", response.balance, e)))?;

        Ok(AccountInfo {
            address: *address,
            balance: balance.to_string(),
            nonce: response.nonce,
        })
    }

    /// Account lookup, normalized into an envelope.
    pub async fn account(&self, address: &StacksAddress) -> ResultEnvelope<AccountInfo> {
        ResultEnvelope::from_result("account lookup", self.try_account(address).await)
    }

    /// GET `path` from a third-party API and decode it into `T`.
    pub async fn try_get_json<T: DeserializeOwned>(
        &self,
        api: &ApiConfig,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, InvokeError> {
        let url = format!("{}{}", api.host.trim_end_matches('/'), path);
        tracing::debug!(url = %url, "API request");

        let mut request = self.client.get(url).query(query);
        if let Some(key) = &api.api_key {
            request = request.header(api.api_key_header.as_str(), key.as_str());
        }

        let (status, text) = self.send(request).await?;
        if !status.is_success() {
            return Err(InvokeError::status(status, &text));
        }
        serde_json::from_str(&text).map_err(|e| InvokeError::Decode(e.to_string()))
    }

    /// Third-party GET, normalized into an envelope.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        api: &ApiConfig,
        path: &str,
        query: &[(&str, String)],
    ) -> ResultEnvelope<T> {
        ResultEnvelope::from_result("API request", self.try_get_json(api, path, query).await)
    }
}

impl std::fmt::Debug for RemoteInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteInvoker")
            .field("node_url", &self.node_url.as_str())
            .field("has_api_key", &self.node_api_key.is_some())
            .finish()
    }
}

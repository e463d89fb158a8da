//! Remote invocation subsystem.
//!
//! # Data Flow
//! ```text
//! validated parameters (contract, function, args, sender / signed tx / API path)
//!     → client.rs (exactly one HTTP request, no retry)
//!     → types.rs (response schema)
//!     → envelope.rs (ResultEnvelope, success or failure)
//!     → sink.rs (JSON to stdout)
//! ```
//!
//! # Design Decisions
//! - Transport, status and decode errors never escape the invoker
//! - Responses are decoded against explicit schemas; mismatches fail closed

pub mod client;
pub mod envelope;
pub mod sink;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::{RemoteInvoker, READ_ONLY_ERR_MESSAGE};
pub use envelope::{ErrorDetails, ErrorKind, ResultEnvelope};
pub use sink::{JsonSink, OutputSink};
pub use types::{AccountInfo, BroadcastReceipt, ReadOnlyCall};

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Failures of a single remote operation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Connection, timeout or other transport failure.
    #[error("Request failed: {0}")]
    Remote(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The node answered but refused the call or transaction.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Response did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl InvokeError {
    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        InvokeError::Status {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InvokeError::Decode(_) => ErrorKind::Decode,
            InvokeError::Remote(_) | InvokeError::Status { .. } | InvokeError::Rejected(_) => {
                ErrorKind::Remote
            }
        }
    }
}

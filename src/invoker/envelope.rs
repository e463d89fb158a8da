//! Uniform result envelope.

use serde::Serialize;

use crate::invoker::InvokeError;

/// Broad category of a failure, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Configuration,
    Validation,
    Derivation,
    Remote,
    Decode,
}

/// Failure details carried by an unsuccessful envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetails {
    pub kind: ErrorKind,
    pub detail: String,
}

/// Outcome of one remote operation.
///
/// Exactly one of `data` / `error` is populated, according to `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

impl<T> ResultEnvelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(ErrorDetails {
                kind,
                detail: detail.into(),
            }),
        }
    }

    /// Envelope for an invoker failure.
    pub fn from_error(message: impl Into<String>, error: &InvokeError) -> Self {
        Self::failure(message, error.kind(), error.to_string())
    }

    /// Convert an operation result, logging failures.
    pub fn from_result(operation: &str, result: Result<T, InvokeError>) -> Self {
        match result {
            Ok(data) => Self::ok(format!("{} succeeded", operation), data),
            Err(e) => {
                tracing::warn!(operation, error = %e, "Remote operation failed");
                Self::from_error(format!("{} failed", operation), &e)
            }
        }
    }

    /// Transform the payload of a successful envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

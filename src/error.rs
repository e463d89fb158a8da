//! Crate-level error.
//!
//! Everything here aborts a command before or instead of a remote call.
//! Remote failures never reach this type; the invoker turns them into
//! failure envelopes.

use thiserror::Error;

use crate::config::ConfigError;
use crate::transaction::TransactionError;
use crate::validation::ValidationError;
use crate::wallet::DerivationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Derivation error: {0}")]
    Derivation(#[from] DerivationError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

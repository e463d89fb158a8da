//! Input validation for user-supplied identifiers.
//!
//! # Responsibilities
//! - Contract principals (`<address>.<contract-name>`)
//! - Plain c32check addresses, optionally pinned to a network
//! - Amounts and token symbols passed to data-API commands
//!
//! # Design Decisions
//! - Pure functions, no network access
//! - Every rejection names the violated rule
//! - Runs before credentials are derived or any request is issued

pub mod principal;

use thiserror::Error;

use crate::wallet::Network;

pub use principal::{
    is_valid_address, is_valid_contract_principal, parse_amount, validate_address,
    validate_contract_principal, validate_function_name, validate_principal, validate_symbol, ContractPrincipal,
    Principal, CONTRACT_SEPARATOR,
};

/// Rules a user-supplied identifier can violate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Contract principal '{0}' is missing the '.' separator")]
    MissingSeparator(String),

    #[error("Contract principal '{0}' has an empty contract name")]
    EmptyContractName(String),

    #[error("Invalid contract name '{name}': {reason}")]
    InvalidContractName { name: String, reason: &'static str },

    #[error("Address '{0}' must start with 'S'")]
    InvalidPrefix(String),

    #[error("Invalid c32 character '{0}'")]
    InvalidCharacter(char),

    #[error("Address '{0}' failed checksum validation")]
    BadChecksum(String),

    #[error("Address payload is {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unknown address version {0}")]
    UnknownVersion(u8),

    #[error("Address belongs to {actual}, expected {expected}")]
    NetworkMismatch { expected: Network, actual: Network },

    #[error("Invalid amount '{0}': expected a positive integer")]
    InvalidAmount(String),

    #[error("Invalid token symbol '{0}'")]
    InvalidSymbol(String),

    #[error("Invalid function name '{0}'")]
    InvalidFunctionName(String),

    #[error("Invalid argument '{input}': {reason}")]
    InvalidArgument { input: String, reason: String },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

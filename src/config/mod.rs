//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment / .env overrides (NETWORK, MNEMONIC, ACCOUNT_INDEX, ...)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → passed by reference to every command
//! ```
//!
//! # Design Decisions
//! - Built once per process; no ambient global state
//! - All fields have defaults to allow an empty config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, load_config_with, load_dotenv, ConfigError};
pub use schema::{ApiConfig, AppConfig, NodeConfig, ObservabilityConfig, TransactionConfig, WalletConfig};

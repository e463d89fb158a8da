//! Account derivation subsystem.
//!
//! # Data Flow
//! ```text
//! seed phrase + account index + network (from AppConfig)
//!     → derivation.rs (BIP-39/BIP-32 per-account keys)
//!     → account.rs (cumulative Wallet, Credential)
//!     → key.rs (key bytes, public key, signing)
//!     → address.rs (c32check address)
//! ```
//!
//! # Security Constraints
//! - Seed phrases come only from configuration, never from arguments
//! - Never log private keys or seed phrases
//! - Credentials live for one process and are never persisted

pub mod account;
pub mod address;
pub mod derivation;
pub mod key;
pub mod message;
pub mod types;

pub use account::{derive_credential, Account, Credential, CredentialSummary, Wallet};
pub use address::StacksAddress;
pub use derivation::{KeyDeriver, MnemonicDeriver};
pub use key::{PrivateKey, RecoverableSignature};
pub use message::{sign_message, SignedMessage};
pub use types::{DerivationError, DerivationResult, Network};

//! Contract-call transactions.
//!
//! # Data Flow
//! ```text
//! ContractCall + Credential + TxOptions (fee, nonce, post-condition mode)
//!     → builder.rs (unsigned tx, sighash, signature)
//!     → SignedTransaction (bytes + txid)
//!     → invoker (broadcast)
//! ```
//!
//! Only standard single-signature origins are supported.

pub mod builder;
pub mod types;

pub use builder::{make_contract_call, sign_transaction, unsigned_contract_call, TxOptions};
pub use types::{
    AnchorMode, ContractCall, PostConditionMode, SignedTransaction, Transaction, TransactionError,
};

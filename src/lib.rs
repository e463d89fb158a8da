//! Stacks agent tools library.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI arguments ──▶ validation ──▶ wallet (credential) ──▶ transaction
//!                         │                                     │
//!                         ▼                                     ▼
//!                      clarity ─────────────────────────▶   invoker ──▶ node / data APIs
//!                                                               │
//!                                                               ▼
//!                                                     ResultEnvelope ──▶ OutputSink
//!
//!   config (file + env, built once)   observability (tracing to stderr)
//! ```

// Core subsystems
pub mod clarity;
pub mod invoker;
pub mod transaction;
pub mod validation;
pub mod wallet;

// Commands and entry points
pub mod commands;
pub mod error;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::AppConfig;
pub use error::Error;
pub use invoker::{RemoteInvoker, ResultEnvelope};
pub use wallet::{Credential, Network};

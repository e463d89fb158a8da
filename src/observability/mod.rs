//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, wallet, invoker, commands
//!     → tracing events with structured fields
//!     → logging.rs (fmt subscriber on stderr)
//! ```
//!
//! Each command runs inside a span carrying a per-invocation UUID so the
//! log lines of one run can be correlated.

pub mod logging;

pub use logging::init;

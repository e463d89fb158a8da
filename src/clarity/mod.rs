//! Clarity values: model, binary codec, CLI literals.
//!
//! # Data Flow
//! ```text
//! CLI literal ("u100", "'SP...")
//!     → parse.rs → ClarityValue → codec.rs (hex arguments for the node)
//!
//! node result ("0x03")
//!     → codec.rs → ClarityValue → value.rs (JSON projection for output)
//! ```

pub mod codec;
pub mod parse;
pub mod value;

pub use codec::{deserialize, from_hex, serialize, to_hex, CodecError};
pub use parse::{parse_arguments, parse_literal};
pub use value::ClarityValue;

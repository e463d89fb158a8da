//! Clarity value model and its JSON projection.

use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::fmt;

use crate::validation::Principal;

/// A Clarity value as passed to or returned from a contract function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Bool(bool),
    Buffer(Vec<u8>),
    StringAscii(String),
    StringUtf8(String),
    Principal(Principal),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(BTreeMap<String, ClarityValue>),
}

impl ClarityValue {
    pub fn some(inner: ClarityValue) -> Self {
        ClarityValue::OptionalSome(Box::new(inner))
    }

    pub fn ok(inner: ClarityValue) -> Self {
        ClarityValue::ResponseOk(Box::new(inner))
    }

    pub fn err(inner: ClarityValue) -> Self {
        ClarityValue::ResponseErr(Box::new(inner))
    }

    /// True for `(err ...)` responses.
    pub fn is_err_response(&self) -> bool {
        matches!(self, ClarityValue::ResponseErr(_))
    }

    /// JSON projection for output.
    ///
    /// Integers become decimal strings so 128-bit values survive JSON
    /// consumers; optionals and responses are unwrapped.
    pub fn to_json(&self) -> Json {
        match self {
            ClarityValue::Int(v) => Json::String(v.to_string()),
            ClarityValue::UInt(v) => Json::String(v.to_string()),
            ClarityValue::Bool(b) => Json::Bool(*b),
            ClarityValue::Buffer(bytes) => Json::String(format!("0x{}", hex::encode(bytes))),
            ClarityValue::StringAscii(s) | ClarityValue::StringUtf8(s) => Json::String(s.clone()),
            ClarityValue::Principal(p) => Json::String(p.to_string()),
            ClarityValue::OptionalNone => Json::Null,
            ClarityValue::OptionalSome(inner)
            | ClarityValue::ResponseOk(inner)
            | ClarityValue::ResponseErr(inner) => inner.to_json(),
            ClarityValue::List(items) => Json::Array(items.iter().map(|v| v.to_json()).collect()),
            ClarityValue::Tuple(fields) => {
                let map: Map<String, Json> = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                Json::Object(map)
            }
        }
    }
}

impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClarityValue::Int(v) => write!(f, "{}", v),
            ClarityValue::UInt(v) => write!(f, "u{}", v),
            ClarityValue::Bool(b) => write!(f, "{}", b),
            ClarityValue::Buffer(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            ClarityValue::StringAscii(s) => write!(f, "{:?}", s),
            ClarityValue::StringUtf8(s) => write!(f, "u{:?}", s),
            ClarityValue::Principal(p) => write!(f, "'{}", p),
            ClarityValue::OptionalNone => write!(f, "none"),
            ClarityValue::OptionalSome(inner) => write!(f, "(some {})", inner),
            ClarityValue::ResponseOk(inner) => write!(f, "(ok {})", inner),
            ClarityValue::ResponseErr(inner) => write!(f, "(err {})", inner),
            ClarityValue::List(items) => {
                write!(f, "(list")?;
                for item in items {
                    write!(f, " {}", item)?;
                }
                write!(f, ")")
            }
            ClarityValue::Tuple(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

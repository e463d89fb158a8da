//! Consensus binary serialization of Clarity values.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::clarity::value::ClarityValue;
use crate::validation::principal::check_contract_name;
use crate::validation::{ContractPrincipal, Principal};
use crate::wallet::StacksAddress;

const TYPE_INT: u8 = 0x00;
const TYPE_UINT: u8 = 0x01;
const TYPE_BUFFER: u8 = 0x02;
const TYPE_TRUE: u8 = 0x03;
const TYPE_FALSE: u8 = 0x04;
const TYPE_STANDARD_PRINCIPAL: u8 = 0x05;
const TYPE_CONTRACT_PRINCIPAL: u8 = 0x06;
const TYPE_RESPONSE_OK: u8 = 0x07;
const TYPE_RESPONSE_ERR: u8 = 0x08;
const TYPE_NONE: u8 = 0x09;
const TYPE_SOME: u8 = 0x0a;
const TYPE_LIST: u8 = 0x0b;
const TYPE_TUPLE: u8 = 0x0c;
const TYPE_STRING_ASCII: u8 = 0x0d;
const TYPE_STRING_UTF8: u8 = 0x0e;

const MAX_DEPTH: usize = 64;

/// Errors decoding serialized Clarity values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),

    #[error("Unknown type tag 0x{0:02x}")]
    UnknownTypeTag(u8),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("Invalid UTF-8 in string value")]
    InvalidUtf8,

    #[error("Non-ASCII byte in string-ascii value")]
    InvalidAscii,

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Nesting deeper than {0}")]
    DepthExceeded(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

/// Serialize a value to its consensus bytes.
pub fn serialize(value: &ClarityValue) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(value, &mut out);
    out
}

/// `0x`-prefixed hex of the consensus bytes, as node APIs expect.
pub fn to_hex(value: &ClarityValue) -> String {
    format!("0x{}", hex::encode(serialize(value)))
}

fn write_address(address: &StacksAddress, out: &mut Vec<u8>) {
    out.push(address.version());
    out.extend_from_slice(address.hash160());
}

fn write_len_prefixed(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn write_value(value: &ClarityValue, out: &mut Vec<u8>) {
    match value {
        ClarityValue::Int(v) => {
            out.push(TYPE_INT);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ClarityValue::UInt(v) => {
            out.push(TYPE_UINT);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ClarityValue::Bool(true) => out.push(TYPE_TRUE),
        ClarityValue::Bool(false) => out.push(TYPE_FALSE),
        ClarityValue::Buffer(bytes) => {
            out.push(TYPE_BUFFER);
            write_len_prefixed(bytes, out);
        }
        ClarityValue::StringAscii(s) => {
            out.push(TYPE_STRING_ASCII);
            write_len_prefixed(s.as_bytes(), out);
        }
        ClarityValue::StringUtf8(s) => {
            out.push(TYPE_STRING_UTF8);
            write_len_prefixed(s.as_bytes(), out);
        }
        ClarityValue::Principal(Principal::Standard(address)) => {
            out.push(TYPE_STANDARD_PRINCIPAL);
            write_address(address, out);
        }
        ClarityValue::Principal(Principal::Contract(contract)) => {
            out.push(TYPE_CONTRACT_PRINCIPAL);
            write_address(&contract.address, out);
            out.push(contract.name.len() as u8);
            out.extend_from_slice(contract.name.as_bytes());
        }
        ClarityValue::OptionalNone => out.push(TYPE_NONE),
        ClarityValue::OptionalSome(inner) => {
            out.push(TYPE_SOME);
            write_value(inner, out);
        }
        ClarityValue::ResponseOk(inner) => {
            out.push(TYPE_RESPONSE_OK);
            write_value(inner, out);
        }
        ClarityValue::ResponseErr(inner) => {
            out.push(TYPE_RESPONSE_ERR);
            write_value(inner, out);
        }
        ClarityValue::List(items) => {
            out.push(TYPE_LIST);
            out.extend_from_slice(&(items.len() as u32).to_be_bytes());
            for item in items {
                write_value(item, out);
            }
        }
        ClarityValue::Tuple(fields) => {
            out.push(TYPE_TUPLE);
            out.extend_from_slice(&(fields.len() as u32).to_be_bytes());
            // BTreeMap iterates keys in lexicographic order
            for (name, field) in fields {
                out.push(name.len() as u8);
                out.extend_from_slice(name.as_bytes());
                write_value(field, out);
            }
        }
    }
}

/// Decode exactly one value; trailing bytes are an error.
pub fn deserialize(bytes: &[u8]) -> Result<ClarityValue, CodecError> {
    let mut reader = Reader { bytes, pos: 0 };
    let value = reader.read_value(0)?;
    let remaining = bytes.len() - reader.pos;
    if remaining > 0 {
        return Err(CodecError::TrailingBytes(remaining));
    }
    Ok(value)
}

/// Decode a hex string, with or without `0x`.
pub fn from_hex(input: &str) -> Result<ClarityValue, CodecError> {
    let input = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(input).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
    deserialize(&bytes)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(CodecError::UnexpectedEnd(self.bytes.len()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_16(&mut self) -> Result<[u8; 16], CodecError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.take(16)?);
        Ok(buf)
    }

    fn read_address(&mut self) -> Result<StacksAddress, CodecError> {
        let version = self.read_u8()?;
        let mut hash = [0u8; 20];
        hash.copy_from_slice(self.take(20)?);
        Ok(StacksAddress::new(version, hash))
    }

    fn read_name(&mut self) -> Result<String, CodecError> {
        let len = self.read_u8()? as usize;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    fn read_value(&mut self, depth: usize) -> Result<ClarityValue, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::DepthExceeded(MAX_DEPTH));
        }

        let tag = self.read_u8()?;
        let value = match tag {
            TYPE_INT => ClarityValue::Int(i128::from_be_bytes(self.read_16()?)),
            TYPE_UINT => ClarityValue::UInt(u128::from_be_bytes(self.read_16()?)),
            TYPE_TRUE => ClarityValue::Bool(true),
            TYPE_FALSE => ClarityValue::Bool(false),
            TYPE_BUFFER => {
                let len = self.read_u32()? as usize;
                ClarityValue::Buffer(self.take(len)?.to_vec())
            }
            TYPE_STRING_ASCII => {
                let len = self.read_u32()? as usize;
                let raw = self.take(len)?;
                if !raw.is_ascii() {
                    return Err(CodecError::InvalidAscii);
                }
                ClarityValue::StringAscii(String::from_utf8_lossy(raw).into_owned())
            }
            TYPE_STRING_UTF8 => {
                let len = self.read_u32()? as usize;
                let raw = self.take(len)?;
                let s = std::str::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)?;
                ClarityValue::StringUtf8(s.to_string())
            }
            TYPE_STANDARD_PRINCIPAL => {
                ClarityValue::Principal(Principal::Standard(self.read_address()?))
            }
            TYPE_CONTRACT_PRINCIPAL => {
                let address = self.read_address()?;
                let name = self.read_name()?;
                check_contract_name(&name).map_err(|e| CodecError::InvalidName(e.to_string()))?;
                ClarityValue::Principal(Principal::Contract(ContractPrincipal { address, name }))
            }
            TYPE_RESPONSE_OK => ClarityValue::ok(self.read_value(depth + 1)?),
            TYPE_RESPONSE_ERR => ClarityValue::err(self.read_value(depth + 1)?),
            TYPE_NONE => ClarityValue::OptionalNone,
            TYPE_SOME => ClarityValue::some(self.read_value(depth + 1)?),
            TYPE_LIST => {
                let count = self.read_u32()? as usize;
                // each element is at least one byte
                let mut items = Vec::with_capacity(count.min(self.bytes.len() - self.pos));
                for _ in 0..count {
                    items.push(self.read_value(depth + 1)?);
                }
                ClarityValue::List(items)
            }
            TYPE_TUPLE => {
                let count = self.read_u32()? as usize;
                let mut fields = BTreeMap::new();
                for _ in 0..count {
                    let name = self.read_name()?;
                    if name.is_empty() {
                        return Err(CodecError::InvalidName("empty tuple key".to_string()));
                    }
                    let field = self.read_value(depth + 1)?;
                    fields.insert(name, field);
                }
                ClarityValue::Tuple(fields)
            }
            other => return Err(CodecError::UnknownTypeTag(other)),
        };
        Ok(value)
    }
}

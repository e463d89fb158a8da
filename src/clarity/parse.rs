//! Parsing of Clarity literals supplied on the command line.
//!
//! Supported forms:
//! - `u123` uint, `123` / `-5` int
//! - `true`, `false`, `none`
//! - `0xdeadbeef` buffer
//! - `"text"` string-ascii, `u"text"` string-utf8
//! - `'SP...` standard principal, `'SP....name` contract principal
//! - `(some <literal>)`

use crate::clarity::value::ClarityValue;
use crate::validation::{validate_principal, ValidationError, ValidationResult};

fn invalid(input: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidArgument {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_quoted(input: &str, body: &str) -> ValidationResult<String> {
    let inner = body
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| invalid(input, "unterminated string"))?;
    Ok(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
}

/// Parse a single literal.
pub fn parse_literal(raw: &str) -> ValidationResult<ClarityValue> {
    let input = raw.trim();

    match input {
        "" => return Err(invalid(raw, "empty argument")),
        "true" => return Ok(ClarityValue::Bool(true)),
        "false" => return Ok(ClarityValue::Bool(false)),
        "none" => return Ok(ClarityValue::OptionalNone),
        _ => {}
    }

    if let Some(inner) = input
        .strip_prefix("(some ")
        .and_then(|s| s.strip_suffix(')'))
    {
        return parse_literal(inner).map(ClarityValue::some);
    }

    if let Some(principal) = input.strip_prefix('\'') {
        return validate_principal(principal).map(ClarityValue::Principal);
    }

    if let Some(hex_body) = input.strip_prefix("0x") {
        return hex::decode(hex_body)
            .map(ClarityValue::Buffer)
            .map_err(|e| invalid(raw, format!("bad buffer hex: {}", e)));
    }

    if input.starts_with('"') {
        let text = parse_quoted(raw, input)?;
        if !text.is_ascii() {
            return Err(invalid(raw, "string-ascii must be ASCII; use u\"...\" for UTF-8"));
        }
        return Ok(ClarityValue::StringAscii(text));
    }

    if let Some(body) = input.strip_prefix('u') {
        if body.starts_with('"') {
            return parse_quoted(raw, body).map(ClarityValue::StringUtf8);
        }
        return body
            .parse::<u128>()
            .map(ClarityValue::UInt)
            .map_err(|_| invalid(raw, "expected an unsigned integer after 'u'"));
    }

    input
        .parse::<i128>()
        .map(ClarityValue::Int)
        .map_err(|_| invalid(raw, "unrecognized literal"))
}

/// Parse every argument, failing on the first bad one.
pub fn parse_arguments<S: AsRef<str>>(raw: &[S]) -> ValidationResult<Vec<ClarityValue>> {
    raw.iter().map(|arg| parse_literal(arg.as_ref())).collect()
}

//! Principal, amount and symbol validation.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation::{ValidationError, ValidationResult};
use crate::wallet::{Network, StacksAddress};

/// Separator between the address and contract-name components.
pub const CONTRACT_SEPARATOR: char = '.';

const MAX_CONTRACT_NAME_LEN: usize = 128;
const MAX_SYMBOL_LEN: usize = 12;
const FUNCTION_NAME_PUNCTUATION: &str = "-_!?+<>=/*";

/// A deployed contract: `<address>.<contract-name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractPrincipal {
    pub address: StacksAddress,
    pub name: String,
}

impl fmt::Display for ContractPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.address, CONTRACT_SEPARATOR, self.name)
    }
}

impl FromStr for ContractPrincipal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_contract_principal(s)
    }
}

impl Serialize for ContractPrincipal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Either a plain account address or a contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Principal {
    Standard(StacksAddress),
    Contract(ContractPrincipal),
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Standard(address) => write!(f, "{}", address),
            Principal::Contract(contract) => write!(f, "{}", contract),
        }
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check a contract name: letter first, then letters, digits, `-` or `_`.
pub(crate) fn check_contract_name(name: &str) -> ValidationResult<()> {
    let invalid = |reason| ValidationError::InvalidContractName {
        name: name.to_string(),
        reason,
    };

    if name.len() > MAX_CONTRACT_NAME_LEN {
        return Err(invalid("longer than 128 characters"));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with a letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid("only letters, digits, '-' and '_' are allowed"));
    }
    Ok(())
}

/// Validate a plain address, optionally pinning it to a network.
pub fn validate_address(raw: &str, expected: Option<Network>) -> ValidationResult<StacksAddress> {
    let address = StacksAddress::parse(raw.trim())?;
    if let (Some(expected), Some(actual)) = (expected, address.network()) {
        if expected != actual {
            return Err(ValidationError::NetworkMismatch { expected, actual });
        }
    }
    Ok(address)
}

/// Validate `<address>.<contract-name>`.
pub fn validate_contract_principal(raw: &str) -> ValidationResult<ContractPrincipal> {
    let raw = raw.trim();
    let (address, name) = raw
        .split_once(CONTRACT_SEPARATOR)
        .ok_or_else(|| ValidationError::MissingSeparator(raw.to_string()))?;

    if name.is_empty() {
        return Err(ValidationError::EmptyContractName(raw.to_string()));
    }

    let address = StacksAddress::parse(address)?;
    check_contract_name(name)?;

    Ok(ContractPrincipal {
        address,
        name: name.to_string(),
    })
}

/// Validate either principal form, deciding on the presence of the separator.
pub fn validate_principal(raw: &str) -> ValidationResult<Principal> {
    if raw.contains(CONTRACT_SEPARATOR) {
        validate_contract_principal(raw).map(Principal::Contract)
    } else {
        validate_address(raw, None).map(Principal::Standard)
    }
}

/// Validate a contract function name such as `get-balance` or `transfer?`.
pub fn validate_function_name(raw: &str) -> ValidationResult<&str> {
    let valid = !raw.is_empty()
        && raw.len() <= MAX_CONTRACT_NAME_LEN
        && raw.starts_with(|c: char| c.is_ascii_alphabetic())
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || FUNCTION_NAME_PUNCTUATION.contains(c));
    if !valid {
        return Err(ValidationError::InvalidFunctionName(raw.to_string()));
    }
    Ok(raw)
}

pub fn is_valid_contract_principal(raw: &str) -> bool {
    validate_contract_principal(raw).is_ok()
}

pub fn is_valid_address(raw: &str) -> bool {
    validate_address(raw, None).is_ok()
}

/// Parse a positive integer amount in base units.
pub fn parse_amount(raw: &str) -> ValidationResult<u128> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    match trimmed.parse::<u128>() {
        Ok(0) | Err(_) => Err(ValidationError::InvalidAmount(raw.to_string())),
        Ok(amount) => Ok(amount),
    }
}

/// Validate a token ticker such as `STX` or `sBTC`.
pub fn validate_symbol(raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_SYMBOL_LEN
        || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ValidationError::InvalidSymbol(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT_ACCOUNT: &str =
        "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-agent-account-test";

    #[test]
    fn test_valid_contract_principal() {
        let principal = validate_contract_principal(AGENT_ACCOUNT).unwrap();
        assert_eq!(principal.name, "aibtc-agent-account-test");
        assert_eq!(
            principal.address.to_string(),
            "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
        );
        assert_eq!(principal.to_string(), AGENT_ACCOUNT);
        assert!(is_valid_contract_principal(AGENT_ACCOUNT));
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            validate_contract_principal("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            Err(ValidationError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_empty_name() {
        assert!(matches!(
            validate_contract_principal("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM."),
            Err(ValidationError::EmptyContractName(_))
        ));
    }

    #[test]
    fn test_bad_checksum_in_principal() {
        assert!(matches!(
            validate_contract_principal("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGN.token"),
            Err(ValidationError::BadChecksum(_))
        ));
    }

    #[test]
    fn test_malformed_names() {
        for name in ["1token", "to ken", "tok.en"] {
            let raw = format!("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.{}", name);
            assert!(
                matches!(
                    validate_contract_principal(&raw),
                    Err(ValidationError::InvalidContractName { .. })
                ),
                "{} should be rejected",
                raw
            );
        }
        let long = format!("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.{}", "a".repeat(129));
        assert!(!is_valid_contract_principal(&long));
    }

    #[test]
    fn test_network_pinning() {
        let raw = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
        assert!(validate_address(raw, Some(Network::Testnet)).is_ok());
        assert!(matches!(
            validate_address(raw, Some(Network::Mainnet)),
            Err(ValidationError::NetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_principal_dispatch() {
        assert!(matches!(
            validate_principal(AGENT_ACCOUNT),
            Ok(Principal::Contract(_))
        ));
        assert!(matches!(
            validate_principal("SP000000000000000000002Q6VF78"),
            Ok(Principal::Standard(_))
        ));
        assert!(!is_valid_address("not-an-address"));
    }

    #[test]
    fn test_amounts() {
        assert_eq!(parse_amount("1000").unwrap(), 1000);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(validate_symbol(" sBTC ").unwrap(), "sBTC");
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("S-T-X").is_err());
        assert!(validate_symbol("ABCDEFGHIJKLM").is_err());
    }

    #[test]
    fn test_function_names() {
        assert_eq!(validate_function_name("is-approved-asset").unwrap(), "is-approved-asset");
        assert!(validate_function_name("transfer?").is_ok());
        assert!(validate_function_name("").is_err());
        assert!(validate_function_name("get balance").is_err());
        assert!(matches!(
            validate_function_name("-start"),
            Err(ValidationError::InvalidFunctionName(_))
        ));
    }
}

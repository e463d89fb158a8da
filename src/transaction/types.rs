//! Transaction wire types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::clarity::{self, ClarityValue};
use crate::validation::{validate_function_name, ContractPrincipal, ValidationError};
use crate::wallet::DerivationError;

pub const AUTH_STANDARD: u8 = 0x04;
pub const HASH_MODE_P2PKH: u8 = 0x00;
pub const PAYLOAD_CONTRACT_CALL: u8 = 0x02;
pub const KEY_ENCODING_COMPRESSED: u8 = 0x00;
pub const KEY_ENCODING_UNCOMPRESSED: u8 = 0x01;

/// Errors building or signing a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Signing key error: {0}")]
    Key(#[from] DerivationError),
}

/// Where the transaction may be mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorMode {
    OnChainOnly = 0x01,
    OffChainOnly = 0x02,
    #[default]
    Any = 0x03,
}

/// Whether transfers not covered by post-conditions abort the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostConditionMode {
    Allow = 0x01,
    #[default]
    Deny = 0x02,
}

impl FromStr for PostConditionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(PostConditionMode::Allow),
            "deny" => Ok(PostConditionMode::Deny),
            other => Err(format!("unknown post-condition mode '{}'", other)),
        }
    }
}

/// Contract function invocation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract: ContractPrincipal,
    pub function: String,
    pub arguments: Vec<ClarityValue>,
}

impl ContractCall {
    pub fn new(
        contract: ContractPrincipal,
        function: &str,
        arguments: Vec<ClarityValue>,
    ) -> Result<Self, TransactionError> {
        validate_function_name(function)?;
        Ok(Self {
            contract,
            function: function.to_string(),
            arguments,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.push(PAYLOAD_CONTRACT_CALL);
        out.push(self.contract.address.version());
        out.extend_from_slice(self.contract.address.hash160());
        out.push(self.contract.name.len() as u8);
        out.extend_from_slice(self.contract.name.as_bytes());
        out.push(self.function.len() as u8);
        out.extend_from_slice(self.function.as_bytes());
        out.extend_from_slice(&(self.arguments.len() as u32).to_be_bytes());
        for argument in &self.arguments {
            out.extend_from_slice(&clarity::serialize(argument));
        }
    }
}

/// Standard single-signature P2PKH spending condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSigSpendingCondition {
    pub signer: [u8; 20],
    pub nonce: u64,
    pub fee: u64,
    pub key_encoding: u8,
    pub signature: [u8; 65],
}

impl SingleSigSpendingCondition {
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.push(HASH_MODE_P2PKH);
        out.extend_from_slice(&self.signer);
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.fee.to_be_bytes());
        out.push(self.key_encoding);
        out.extend_from_slice(&self.signature);
    }

    /// Copy with nonce, fee and signature zeroed, as committed to by the initial sighash.
    pub(crate) fn cleared(&self) -> Self {
        Self {
            nonce: 0,
            fee: 0,
            signature: [0u8; 65],
            ..self.clone()
        }
    }
}

/// An unsigned or signed contract-call transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u8,
    pub chain_id: u32,
    pub auth: SingleSigSpendingCondition,
    pub anchor_mode: AnchorMode,
    pub post_condition_mode: PostConditionMode,
    pub payload: ContractCall,
}

impl Transaction {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(256);
        out.push(self.version);
        out.extend_from_slice(&self.chain_id.to_be_bytes());
        out.push(AUTH_STANDARD);
        self.auth.write(&mut out);
        out.push(self.anchor_mode as u8);
        out.push(self.post_condition_mode as u8);
        // no post-conditions
        out.extend_from_slice(&0u32.to_be_bytes());
        self.payload.write(&mut out);
        out
    }
}

/// A signed, serialized transaction ready to broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub bytes: Vec<u8>,
    pub txid: [u8; 32],
}

impl SignedTransaction {
    pub fn txid_hex(&self) -> String {
        hex::encode(self.txid)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_contract_principal;

    fn contract() -> ContractPrincipal {
        validate_contract_principal("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.counter").unwrap()
    }

    #[test]
    fn test_function_name_rules() {
        assert!(ContractCall::new(contract(), "get-count", vec![]).is_ok());
        assert!(ContractCall::new(contract(), "is-ok?", vec![]).is_ok());
        assert!(ContractCall::new(contract(), "", vec![]).is_err());
        assert!(ContractCall::new(contract(), "bad name", vec![]).is_err());
    }

    #[test]
    fn test_payload_layout() {
        let call = ContractCall::new(contract(), "inc", vec![ClarityValue::UInt(1)]).unwrap();
        let mut out = Vec::new();
        call.write(&mut out);
        assert_eq!(out[0], PAYLOAD_CONTRACT_CALL);
        assert_eq!(out[1], 26);
        assert_eq!(out[22], 7);
        assert_eq!(&out[23..30], b"counter");
        assert_eq!(out[30], 3);
        assert_eq!(&out[31..34], b"inc");
        assert_eq!(&out[34..38], &[0, 0, 0, 1]);
        assert_eq!(out.len(), 38 + 17);
    }

    #[test]
    fn test_post_condition_mode_parse() {
        assert_eq!("ALLOW".parse::<PostConditionMode>().unwrap(), PostConditionMode::Allow);
        assert!("maybe".parse::<PostConditionMode>().is_err());
    }
}

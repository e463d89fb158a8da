//! c32check address encoding.
//!
//! An address is a version byte plus the hash160 of a public key. It is
//! rendered as `S`, the c32 digit of the version, then the c32 encoding of
//! `hash160 || checksum`, where the checksum is the first four bytes of
//! double-SHA-256 over `version || hash160`.

use bitcoin_hashes::{hash160, sha256d, Hash};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;
use crate::wallet::types::Network;

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const CHECKSUM_LEN: usize = 4;
const HASH160_LEN: usize = 20;

fn c32_digit(c: char) -> Option<u8> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'I' | 'L' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|&b| b as char == normalized)
        .map(|p| p as u8)
}

/// Encode bytes as c32, keeping one leading `0` per leading zero byte.
pub fn c32_encode(input: &[u8]) -> String {
    let mut result = Vec::with_capacity(input.len() * 8 / 5 + 1);
    let mut carry: u8 = 0;
    let mut carry_bits: u8 = 0;

    for &byte in input.iter().rev() {
        let low_bits_to_take = 5 - carry_bits;
        let low_bits = byte & ((1 << low_bits_to_take) - 1);
        result.push(C32_ALPHABET[((low_bits << carry_bits) + carry) as usize]);

        carry_bits = 8 + carry_bits - 5;
        carry = byte >> (8 - carry_bits);

        if carry_bits >= 5 {
            result.push(C32_ALPHABET[(carry & 0x1f) as usize]);
            carry_bits -= 5;
            carry >>= 5;
        }
    }

    if carry_bits > 0 {
        result.push(C32_ALPHABET[carry as usize]);
    }

    while result.last() == Some(&C32_ALPHABET[0]) {
        result.pop();
    }
    for _ in input.iter().take_while(|&&b| b == 0) {
        result.push(C32_ALPHABET[0]);
    }

    result.reverse();
    result.into_iter().map(char::from).collect()
}

/// Decode a c32 string. Accepts lowercase and the `O`/`I`/`L` aliases.
pub fn c32_decode(input: &str) -> Result<Vec<u8>, ValidationError> {
    let digits = input
        .chars()
        .rev()
        .map(|c| c32_digit(c).ok_or(ValidationError::InvalidCharacter(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    let mut result = Vec::with_capacity(digits.len() * 5 / 8 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u16 = 0;

    for &digit in &digits {
        carry += (digit as u16) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            result.push((carry & 0xff) as u8);
            carry_bits -= 8;
            carry >>= 8;
        }
    }
    if carry_bits > 0 {
        result.push(carry as u8);
    }

    while result.last() == Some(&0) {
        result.pop();
    }
    for _ in digits.iter().rev().take_while(|&&d| d == 0) {
        result.push(0);
    }

    result.reverse();
    Ok(result)
}

fn checksum(version: u8, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut preimage = Vec::with_capacity(data.len() + 1);
    preimage.push(version);
    preimage.extend_from_slice(data);
    let digest = sha256d::Hash::hash(&preimage).to_byte_array();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// c32check-encode `data` under a version byte (without the leading `S`).
pub fn c32check_encode(version: u8, data: &[u8]) -> String {
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum(version, data));
    format!(
        "{}{}",
        C32_ALPHABET[(version & 0x1f) as usize] as char,
        c32_encode(&payload)
    )
}

/// Decode a c32check string (without the leading `S`) into version and data.
pub fn c32check_decode(input: &str) -> Result<(u8, Vec<u8>), ValidationError> {
    let mut chars = input.chars();
    let version_char = chars
        .next()
        .ok_or(ValidationError::InvalidLength { expected: HASH160_LEN + CHECKSUM_LEN, actual: 0 })?;
    let version = c32_digit(version_char).ok_or(ValidationError::InvalidCharacter(version_char))?;

    let payload = c32_decode(chars.as_str())?;
    if payload.len() < CHECKSUM_LEN {
        return Err(ValidationError::InvalidLength {
            expected: HASH160_LEN + CHECKSUM_LEN,
            actual: payload.len(),
        });
    }

    let (data, expected) = payload.split_at(payload.len() - CHECKSUM_LEN);
    if checksum(version, data) != expected {
        return Err(ValidationError::BadChecksum(format!("S{}", input)));
    }
    Ok((version, data.to_vec()))
}

/// A single-key or multisig account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StacksAddress {
    version: u8,
    hash160: [u8; HASH160_LEN],
}

impl StacksAddress {
    pub fn new(version: u8, hash160: [u8; HASH160_LEN]) -> Self {
        Self { version, hash160 }
    }

    /// Single-sig address owning `public_key` (33-byte compressed or 65-byte uncompressed SEC1).
    pub fn from_public_key(network: Network, public_key: &[u8]) -> Self {
        let hash = hash160::Hash::hash(public_key).to_byte_array();
        Self::new(network.singlesig_version(), hash)
    }

    /// Parse and checksum-validate an address string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let body = input
            .strip_prefix('S')
            .or_else(|| input.strip_prefix('s'))
            .ok_or_else(|| ValidationError::InvalidPrefix(input.to_string()))?;

        let (version, data) = c32check_decode(body).map_err(|e| match e {
            ValidationError::BadChecksum(_) => ValidationError::BadChecksum(input.to_string()),
            other => other,
        })?;

        if data.len() != HASH160_LEN {
            return Err(ValidationError::InvalidLength {
                expected: HASH160_LEN,
                actual: data.len(),
            });
        }
        if Network::from_address_version(version).is_none() {
            return Err(ValidationError::UnknownVersion(version));
        }

        let mut hash160 = [0u8; HASH160_LEN];
        hash160.copy_from_slice(&data);
        Ok(Self { version, hash160 })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash160(&self) -> &[u8; HASH160_LEN] {
        &self.hash160
    }

    /// Network implied by the version byte.
    pub fn network(&self) -> Option<Network> {
        Network::from_address_version(self.version)
    }
}

impl fmt::Display for StacksAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", c32check_encode(self.version, &self.hash160))
    }
}

impl FromStr for StacksAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for StacksAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVNET_DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const DEVNET_DEPLOYER_HASH: &str = "6d78de7b0625dfbfc16c3a8a5735f6dc3dc3f2ce";

    #[test]
    fn test_parse_known_address() {
        let address = StacksAddress::parse(DEVNET_DEPLOYER).unwrap();
        assert_eq!(address.version(), 26);
        assert_eq!(hex::encode(address.hash160()), DEVNET_DEPLOYER_HASH);
        assert_eq!(address.network(), Some(Network::Testnet));
        assert_eq!(address.to_string(), DEVNET_DEPLOYER);
    }

    #[test]
    fn test_same_hash_on_mainnet() {
        let address = StacksAddress::parse(DEVNET_DEPLOYER).unwrap();
        let mainnet = StacksAddress::new(22, *address.hash160());
        assert_eq!(mainnet.to_string(), "SP1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRCBGD7R");
    }

    #[test]
    fn test_zero_hash_keeps_leading_zeros() {
        let address = StacksAddress::new(22, [0u8; 20]);
        assert_eq!(address.to_string(), "SP000000000000000000002Q6VF78");
        assert_eq!(StacksAddress::parse("SP000000000000000000002Q6VF78").unwrap(), address);
    }

    #[test]
    fn test_lowercase_is_accepted() {
        let address = StacksAddress::parse(&DEVNET_DEPLOYER.to_lowercase()).unwrap();
        assert_eq!(address.to_string(), DEVNET_DEPLOYER);
    }

    #[test]
    fn test_bad_checksum() {
        // last character altered
        let tampered = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGN";
        assert!(matches!(
            StacksAddress::parse(tampered),
            Err(ValidationError::BadChecksum(_))
        ));
    }

    #[test]
    fn test_invalid_character_and_prefix() {
        assert!(matches!(
            StacksAddress::parse("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZG!"),
            Err(ValidationError::InvalidCharacter('!'))
        ));
        assert!(matches!(
            StacksAddress::parse("XT1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            Err(ValidationError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_c32_round_trip() {
        let data = [0u8, 0, 1, 2, 3, 0xff, 0x80];
        assert_eq!(c32_decode(&c32_encode(&data)).unwrap(), data);
        assert_eq!(c32_encode(&[]), "");
    }
}

//! Building and signing contract-call transactions.
//!
//! # Signing
//! ```text
//! initial sighash = sha512/256(tx with nonce, fee, signature cleared)
//! presign sighash = sha512/256(initial || auth type || fee || nonce)
//! signature       = recovery id || r || s over the presign sighash
//! txid            = sha512/256(signed tx)
//! ```

use sha2::{Digest, Sha512_256};

use crate::transaction::types::{
    AnchorMode, ContractCall, PostConditionMode, SignedTransaction, SingleSigSpendingCondition,
    Transaction, TransactionError, AUTH_STANDARD, KEY_ENCODING_COMPRESSED,
    KEY_ENCODING_UNCOMPRESSED,
};
use crate::wallet::Credential;

/// Fee and ordering parameters for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    pub fee: u64,
    pub nonce: u64,
    pub post_condition_mode: PostConditionMode,
}

fn sha512_256(data: &[u8]) -> [u8; 32] {
    Sha512_256::digest(data).into()
}

fn presign_sighash(initial: &[u8; 32], fee: u64, nonce: u64) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(32 + 1 + 8 + 8);
    preimage.extend_from_slice(initial);
    preimage.push(AUTH_STANDARD);
    preimage.extend_from_slice(&fee.to_be_bytes());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    sha512_256(&preimage)
}

/// Build an unsigned transaction for `call` originating from `credential`.
pub fn unsigned_contract_call(
    call: ContractCall,
    credential: &Credential,
    options: TxOptions,
) -> Transaction {
    let network = credential.network();
    let key_encoding = if credential.private_key().is_compressed() {
        KEY_ENCODING_COMPRESSED
    } else {
        KEY_ENCODING_UNCOMPRESSED
    };

    Transaction {
        version: network.transaction_version(),
        chain_id: network.chain_id(),
        auth: SingleSigSpendingCondition {
            signer: *credential.address().hash160(),
            nonce: options.nonce,
            fee: options.fee,
            key_encoding,
            signature: [0u8; 65],
        },
        anchor_mode: AnchorMode::Any,
        post_condition_mode: options.post_condition_mode,
        payload: call,
    }
}

/// Sign the origin of a single-sig transaction in place.
pub fn sign_transaction(
    tx: &mut Transaction,
    credential: &Credential,
) -> Result<SignedTransaction, TransactionError> {
    let initial = {
        let mut cleared = tx.clone();
        cleared.auth = tx.auth.cleared();
        sha512_256(&cleared.serialize())
    };
    let presign = presign_sighash(&initial, tx.auth.fee, tx.auth.nonce);
    let signature = credential.private_key().sign_digest(&presign)?;
    tx.auth.signature = signature.to_vrs();

    let bytes = tx.serialize();
    let txid = sha512_256(&bytes);

    tracing::debug!(
        txid = %hex::encode(txid),
        nonce = tx.auth.nonce,
        fee = tx.auth.fee,
        size = bytes.len(),
        "Transaction signed"
    );
    Ok(SignedTransaction { bytes, txid })
}

/// Build and sign a contract call in one step.
pub fn make_contract_call(
    call: ContractCall,
    credential: &Credential,
    options: TxOptions,
) -> Result<SignedTransaction, TransactionError> {
    let mut tx = unsigned_contract_call(call, credential, options);
    sign_transaction(&mut tx, credential)
}

//! Transaction hash chain.
//!
//! ```text
//! header_hash      = sha256(H)
//! body_hash        = sha256(B)                                  most kinds
//!                  = merkle_combine(sha256(B'), entry_hash)     writeData, writeDataTo
//! transaction_hash = sha256(header_hash ‖ body_hash)
//! ```
//!
//! `B'` is the body encoded with its data entry removed. The entry is hashed
//! on its own by [`DataEntry::hash`](super::DataEntry::hash). Both `H` and
//! `B` must be the final, post-padding encodings.

use serde::{Deserialize, Serialize};

use crate::codec::{BodyEncoder, CodecError};
use crate::crypto::{merkle_combine, sha256, sha256_multi, Hash32};

use super::body::TransactionBody;

/// The three hashes of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHashes {
    #[serde(with = "crate::serde_hex::hash32")]
    pub header: Hash32,
    #[serde(with = "crate::serde_hex::hash32")]
    pub body: Hash32,
    #[serde(with = "crate::serde_hex::hash32")]
    pub transaction: Hash32,
}

/// Body hash of `body`, whose full encoding is `encoded`.
pub fn body_hash<E>(encoder: &E, body: &TransactionBody, encoded: &[u8]) -> Result<Hash32, CodecError>
where
    E: BodyEncoder + ?Sized,
{
    if !body.transaction_type().is_data_write() {
        return Ok(sha256(encoded));
    }

    let without_entry = encoder.encode_body(&body.without_entry())?;
    // A missing entry contributes the zero hash.
    let entry_hash = body.data_entry().map(|e| e.hash()).unwrap_or_default();
    Ok(merkle_combine(&sha256(&without_entry), &entry_hash))
}

pub fn transaction_hash(header_hash: &Hash32, body_hash: &Hash32) -> Hash32 {
    sha256_multi(&[header_hash.as_slice(), body_hash.as_slice()])
}

/// Hashes for an encoded header and a body with its final encoding.
pub fn compute_hashes<E>(
    encoder: &E,
    header_bytes: &[u8],
    body: &TransactionBody,
    body_bytes: &[u8],
) -> Result<TransactionHashes, CodecError>
where
    E: BodyEncoder + ?Sized,
{
    let header = sha256(header_bytes);
    let body = body_hash(encoder, body, body_bytes)?;
    Ok(TransactionHashes {
        header,
        body,
        transaction: transaction_hash(&header, &body),
    })
}

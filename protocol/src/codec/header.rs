//! Transaction header encoding: `{1=principal, 2=initiator, 3=memo}`.
//!
//! The initiator is a raw 32-byte hash with no length prefix.

use super::field::{FieldReader, FieldWriter};
use super::CodecError;
use crate::crypto::Hash32;
use crate::transaction::TransactionHeader;

pub fn encode_header(principal: &str, initiator: &Hash32, memo: Option<&str>) -> Vec<u8> {
    let mut w = FieldWriter::new();
    w.string(1, principal)
        .hash(2, initiator)
        .opt_string(3, memo);
    w.into_bytes()
}

/// Reads a header back. Fields the encoder never writes are rejected as
/// trailing data.
pub fn decode_header(bytes: &[u8]) -> Result<TransactionHeader, CodecError> {
    let mut r = FieldReader::new(bytes);
    let principal = r.string(1)?.unwrap_or_default();
    let initiator = r.hash(2)?.unwrap_or_default();
    let memo = r.string(3)?;
    r.finish()?;
    Ok(TransactionHeader {
        principal,
        initiator,
        memo,
    })
}

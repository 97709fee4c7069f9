//! Key-page operation encoders.
//!
//! Every operation is `{1=operation number, ...}`:
//!
//! ```text
//! update               1  {2=old entry, 3=new entry}
//! remove               2  {2=entry}
//! add                  3  {2=entry}
//! setThreshold         4  {2=threshold}
//! updateAllowed        5  {2=allow..., 3=deny...}
//! setRejectThreshold   6  {2=threshold}
//! setResponseThreshold 7  {2=threshold}
//! ```
//!
//! Entries are nested key specs `{1=key hash, 2=delegate}`. Operations 5–7
//! are only known to the extended encoder, which always writes their
//! threshold field. A threshold omitted from JSON defaults to 1.

use super::field::FieldWriter;
use super::CodecError;
use crate::transaction::{KeyPageOperation, KeySpec};

/// `{1=key hash, 2=delegate}`; empty when both are unset.
pub fn encode_key_spec(spec: &KeySpec) -> Vec<u8> {
    let mut w = FieldWriter::new();
    w.bytes(1, &spec.key_hash).string(2, &spec.delegate);
    w.into_bytes()
}

/// Operations 1–4.
pub fn encode_base_operation(op: &KeyPageOperation) -> Result<Vec<u8>, CodecError> {
    let mut w = FieldWriter::new();
    w.uvarint(1, op.number());
    match op {
        KeyPageOperation::Update {
            old_entry,
            new_entry,
        } => {
            w.bytes(2, &encode_key_spec(old_entry))
                .bytes(3, &encode_key_spec(new_entry));
        }
        KeyPageOperation::Remove { entry } | KeyPageOperation::Add { entry } => {
            w.bytes(2, &encode_key_spec(entry));
        }
        KeyPageOperation::SetThreshold { threshold } => {
            w.uvarint(2, *threshold);
        }
        KeyPageOperation::UpdateAllowed { .. }
        | KeyPageOperation::SetRejectThreshold { .. }
        | KeyPageOperation::SetResponseThreshold { .. } => {
            return Err(CodecError::UnsupportedBodyKind(format!(
                "key page operation {}",
                op.name()
            )));
        }
    }
    Ok(w.into_bytes())
}

/// Operations 5–7, or `None` for anything the base encoder handles.
pub fn encode_extended_operation(op: &KeyPageOperation) -> Option<Vec<u8>> {
    let mut w = FieldWriter::new();
    w.uvarint(1, op.number());
    match op {
        KeyPageOperation::UpdateAllowed { allow, deny } => {
            w.repeated_uvarint(2, allow.iter().map(|t| t.number()))
                .repeated_uvarint(3, deny.iter().map(|t| t.number()));
        }
        KeyPageOperation::SetRejectThreshold { threshold }
        | KeyPageOperation::SetResponseThreshold { threshold } => {
            // Written even when zero: an explicit 0 is a distinct request.
            w.required_uvarint(2, *threshold);
        }
        _ => return None,
    }
    Some(w.into_bytes())
}

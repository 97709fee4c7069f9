//! Body encoding capability and the base encoder.
//!
//! [`BodyEncoder`] is the seam: anything that can turn a payload and a
//! key-page operation into canonical bytes. [`BaseEncoder`] covers the body
//! kinds every client has always supported and reports the rest as
//! [`CodecError::UnsupportedBodyKind`]. The extended encoder wraps a base
//! encoder and fills those gaps by explicit delegation.

use super::field::FieldWriter;
use super::key_page::{encode_base_operation, encode_key_spec};
use super::CodecError;
use crate::transaction::{
    KeyPageOperation, Payload, TokenRecipient, TransactionBody, TransactionType, UpdateKeyPage,
};

/// Converts typed bodies into the remote node's binary form.
pub trait BodyEncoder {
    /// Encoded fields of `payload`, without any epilogue.
    fn encode_payload(&self, payload: &Payload) -> Result<Vec<u8>, CodecError>;

    /// Encoded fields of a single key-page operation.
    fn encode_key_page_operation(&self, op: &KeyPageOperation) -> Result<Vec<u8>, CodecError>;

    /// Full body encoding: payload fields followed by the epilogue, if any.
    fn encode_body(&self, body: &TransactionBody) -> Result<Vec<u8>, CodecError> {
        let mut out = self.encode_payload(&body.payload)?;
        if let Some(epilogue) = &body.epilogue {
            out.extend_from_slice(epilogue);
        }
        Ok(out)
    }
}

/// Encoder for the base set of body kinds and key-page operations
/// 1 through 4.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseEncoder;

impl BaseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl BodyEncoder for BaseEncoder {
    fn encode_payload(&self, payload: &Payload) -> Result<Vec<u8>, CodecError> {
        let kind = payload.transaction_type();
        let mut w = FieldWriter::new();
        w.uvarint(1, kind.number());

        match payload {
            Payload::CreateIdentity(body) => {
                w.string(2, &body.url)
                    .bytes(3, &body.key_hash)
                    .string(4, &body.key_book_url)
                    .repeated_string(5, &body.authorities);
            }
            Payload::CreateTokenAccount(body) => {
                w.string(2, &body.url)
                    .string(3, &body.token_url)
                    .repeated_string(4, &body.authorities);
            }
            Payload::SendTokens(body) | Payload::IssueTokens(body) => {
                for recipient in &body.to {
                    w.bytes(4, &encode_token_recipient(recipient));
                }
            }
            Payload::CreateDataAccount(body) => {
                w.string(2, &body.url).repeated_string(3, &body.authorities);
            }
            Payload::WriteData(body) => {
                if let Some(entry) = &body.entry {
                    w.bytes(2, &entry.encode());
                }
                w.boolean(3, body.scratch).boolean(4, body.write_to_state);
            }
            Payload::AcmeFaucet(body) => {
                w.string(2, &body.url);
            }
            Payload::CreateToken(body) => {
                w.string(2, &body.url)
                    .string(4, &body.symbol)
                    .uvarint(5, body.precision)
                    .string(6, &body.properties)
                    .big_uint(7, body.supply_limit.0)
                    .repeated_string(9, &body.authorities);
            }
            Payload::BurnTokens(body) => {
                w.big_uint(2, body.amount.0);
            }
            Payload::CreateLiteTokenAccount => {}
            Payload::CreateKeyPage(body) => {
                for key in &body.keys {
                    w.bytes(2, &encode_key_spec(key));
                }
            }
            Payload::CreateKeyBook(body) => {
                w.string(2, &body.url)
                    .bytes(3, &body.public_key_hash)
                    .repeated_string(4, &body.authorities);
            }
            Payload::AddCredits(body) => {
                w.string(2, &body.recipient)
                    .big_uint(3, body.amount.0)
                    .uvarint(4, body.oracle);
            }
            Payload::UpdateKeyPage(body) => {
                return encode_update_key_page(body, |op| self.encode_key_page_operation(op));
            }
            Payload::UpdateKey(body) => {
                w.bytes(2, &body.new_key_hash);
            }
            Payload::WriteDataTo(_)
            | Payload::LockAccount(_)
            | Payload::BurnCredits(_)
            | Payload::TransferCredits(_)
            | Payload::UpdateAccountAuth(_) => {
                return Err(CodecError::UnsupportedBodyKind(kind.name().to_string()));
            }
        }

        Ok(w.into_bytes())
    }

    fn encode_key_page_operation(&self, op: &KeyPageOperation) -> Result<Vec<u8>, CodecError> {
        encode_base_operation(op)
    }
}

/// `updateKeyPage`: `{1=15, 2=operation...}`, each operation encoded by
/// `encode_op`. Shared so that an outer encoder's operation support applies
/// inside the body, not only to standalone operations.
pub(crate) fn encode_update_key_page<F>(
    body: &UpdateKeyPage,
    mut encode_op: F,
) -> Result<Vec<u8>, CodecError>
where
    F: FnMut(&KeyPageOperation) -> Result<Vec<u8>, CodecError>,
{
    let mut w = FieldWriter::new();
    w.uvarint(1, TransactionType::UpdateKeyPage.number());
    for op in &body.operation {
        w.bytes(2, &encode_op(op)?);
    }
    Ok(w.into_bytes())
}

fn encode_token_recipient(recipient: &TokenRecipient) -> Vec<u8> {
    let mut w = FieldWriter::new();
    w.string(1, &recipient.url).big_uint(2, recipient.amount.0);
    w.into_bytes()
}

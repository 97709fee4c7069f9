//! Extended body encoder.
//!
//! Adds the body kinds and key-page operations the base encoder lacks:
//!
//! ```text
//! writeDataTo        6   {2=recipient, 3=entry}
//! lockAccount        16  {2=height}
//! burnCredits        17  {2=amount}
//! transferCredits    18  {2=recipient...}   recipient = {1=url, 2=amount}
//! updateAccountAuth  21  {2=operation...}   operation = {1=type, 2=authority}
//! ```
//!
//! Everything else is handed to the wrapped encoder unchanged, except that
//! `updateKeyPage` is re-encoded here so its operations go through
//! [`ExtendedEncoder::encode_key_page_operation`].

use super::body::{encode_update_key_page, BaseEncoder, BodyEncoder};
use super::field::FieldWriter;
use super::key_page::encode_extended_operation;
use super::CodecError;
use crate::transaction::{KeyPageOperation, Payload};

/// Wraps an inner encoder and covers the kinds it does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedEncoder<B = BaseEncoder> {
    inner: B,
}

impl ExtendedEncoder<BaseEncoder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: BodyEncoder> ExtendedEncoder<B> {
    pub fn wrap(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: BodyEncoder> BodyEncoder for ExtendedEncoder<B> {
    fn encode_payload(&self, payload: &Payload) -> Result<Vec<u8>, CodecError> {
        let mut w = FieldWriter::new();
        w.uvarint(1, payload.transaction_type().number());

        match payload {
            Payload::WriteDataTo(body) => {
                w.string(2, &body.recipient);
                if let Some(entry) = &body.entry {
                    w.bytes(3, &entry.encode());
                }
            }
            Payload::LockAccount(body) => {
                w.uvarint(2, body.height);
            }
            Payload::BurnCredits(body) => {
                w.uvarint(2, body.amount);
            }
            Payload::TransferCredits(body) => {
                for recipient in &body.to {
                    let mut nested = FieldWriter::new();
                    nested.string(1, &recipient.url).uvarint(2, recipient.amount);
                    w.bytes(2, &nested.into_bytes());
                }
            }
            Payload::UpdateAccountAuth(body) => {
                for op in &body.operations {
                    let mut nested = FieldWriter::new();
                    nested.uvarint(1, op.kind.number()).string(2, &op.authority);
                    w.bytes(2, &nested.into_bytes());
                }
            }
            Payload::UpdateKeyPage(body) => {
                return encode_update_key_page(body, |op| self.encode_key_page_operation(op));
            }
            other => return self.inner.encode_payload(other),
        }

        Ok(w.into_bytes())
    }

    fn encode_key_page_operation(&self, op: &KeyPageOperation) -> Result<Vec<u8>, CodecError> {
        match encode_extended_operation(op) {
            Some(bytes) => Ok(bytes),
            None => self.inner.encode_key_page_operation(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FieldReader;
    use crate::transaction::{
        AccountAuthOperation, AccountAuthOperationType, BurnCredits, CreditRecipient, DataEntry,
        KeySpec, LockAccount, TransactionBody, TransferCredits, UpdateAccountAuth, UpdateKeyPage,
        WriteDataTo,
    };

    fn encode(payload: Payload) -> Vec<u8> {
        ExtendedEncoder::new()
            .encode_body(&TransactionBody::new(payload))
            .unwrap()
    }

    #[test]
    fn test_burn_credits() {
        assert_eq!(
            encode(Payload::BurnCredits(BurnCredits { amount: 17 })),
            vec![0x01, 0x11, 0x02, 0x11]
        );
        assert_eq!(
            encode(Payload::BurnCredits(BurnCredits { amount: 0 })),
            vec![0x01, 0x11]
        );
    }

    #[test]
    fn test_lock_account_height() {
        assert_eq!(
            encode(Payload::LockAccount(LockAccount { height: 300 })),
            vec![0x01, 0x10, 0x02, 0xac, 0x02]
        );
    }

    #[test]
    fn test_transfer_credits_zero_amount_elided_in_nested() {
        let bytes = encode(Payload::TransferCredits(TransferCredits {
            to: vec![
                CreditRecipient {
                    url: "acc://a".into(),
                    amount: 5,
                },
                CreditRecipient {
                    url: "acc://b".into(),
                    amount: 0,
                },
            ],
        }));
        let mut expected = vec![0x01, 0x12, 0x02, 0x0b, 0x01, 0x07];
        expected.extend_from_slice(b"acc://a");
        expected.extend_from_slice(&[0x02, 0x05, 0x02, 0x09, 0x01, 0x07]);
        expected.extend_from_slice(b"acc://b");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_transfer_credits_skips_empty_recipient() {
        let bytes = encode(Payload::TransferCredits(TransferCredits {
            to: vec![CreditRecipient::default()],
        }));
        assert_eq!(bytes, vec![0x01, 0x12]);
    }

    #[test]
    fn test_update_account_auth_add_alias() {
        let bytes = encode(Payload::UpdateAccountAuth(UpdateAccountAuth {
            operations: vec![AccountAuthOperation {
                kind: AccountAuthOperationType::AddAuthority,
                authority: "acc://x/book".into(),
            }],
        }));
        let mut expected = vec![0x01, 0x15, 0x02, 0x10, 0x01, 0x03, 0x02, 0x0c];
        expected.extend_from_slice(b"acc://x/book");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_write_data_to_layout() {
        let bytes = encode(Payload::WriteDataTo(WriteDataTo {
            recipient: "acc://l".into(),
            entry: Some(DataEntry::double_hash_from_strings(&["z"])),
        }));
        let mut expected = vec![0x01, 0x06, 0x02, 0x07];
        expected.extend_from_slice(b"acc://l");
        expected.extend_from_slice(&[0x03, 0x05, 0x01, 0x03, 0x02, 0x01, b'z']);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_delegates_base_kinds() {
        let body = TransactionBody::new(Payload::CreateLiteTokenAccount);
        assert_eq!(
            ExtendedEncoder::new().encode_body(&body).unwrap(),
            BaseEncoder.encode_body(&body).unwrap()
        );
    }

    #[test]
    fn test_extended_operations_inside_update_key_page() {
        let body = TransactionBody::new(Payload::UpdateKeyPage(UpdateKeyPage {
            operation: vec![
                KeyPageOperation::Add {
                    entry: KeySpec::from_key_hash(vec![0xab]),
                },
                KeyPageOperation::SetRejectThreshold { threshold: 2 },
            ],
        }));
        assert!(BaseEncoder.encode_body(&body).is_err());
        assert_eq!(
            ExtendedEncoder::new().encode_body(&body).unwrap(),
            vec![
                0x01, 0x0f, // updateKeyPage
                0x02, 0x07, 0x01, 0x03, 0x02, 0x03, 0x01, 0x01, 0xab, // add
                0x02, 0x04, 0x01, 0x06, 0x02, 0x02, // setRejectThreshold
            ]
        );
    }

    #[test]
    fn test_wrapped_extended_is_idempotent() {
        let twice = ExtendedEncoder::wrap(ExtendedEncoder::new());
        let body = TransactionBody::new(Payload::BurnCredits(BurnCredits { amount: 1 }));
        assert_eq!(
            twice.encode_body(&body).unwrap(),
            ExtendedEncoder::new().encode_body(&body).unwrap()
        );
    }

    // -----------------------------------------------------------------------
    // Decoding back to field values
    // -----------------------------------------------------------------------

    #[test]
    fn test_decode_burn_credits_and_lock_account() {
        let bytes = encode(Payload::BurnCredits(BurnCredits { amount: 17 }));
        let mut r = FieldReader::new(&bytes);
        assert_eq!(r.uvarint(1).unwrap(), Some(17));
        assert_eq!(r.uvarint(2).unwrap(), Some(17));
        r.finish().unwrap();

        let bytes = encode(Payload::LockAccount(LockAccount { height: 300 }));
        let mut r = FieldReader::new(&bytes);
        assert_eq!(r.uvarint(1).unwrap(), Some(16));
        assert_eq!(r.uvarint(2).unwrap(), Some(300));
        r.finish().unwrap();
    }

    #[test]
    fn test_decode_transfer_credits_recipients() {
        let bytes = encode(Payload::TransferCredits(TransferCredits {
            to: vec![
                CreditRecipient {
                    url: "acc://a".into(),
                    amount: 5,
                },
                CreditRecipient {
                    url: "acc://b".into(),
                    amount: 0,
                },
            ],
        }));
        let mut r = FieldReader::new(&bytes);
        assert_eq!(r.uvarint(1).unwrap(), Some(18));
        let recipients = r.repeated_bytes(2).unwrap();
        r.finish().unwrap();
        assert_eq!(recipients.len(), 2);

        let decoded: Vec<(Option<String>, Option<u64>)> = recipients
            .iter()
            .map(|raw| {
                let mut nested = FieldReader::new(raw);
                let url = nested.string(1).unwrap();
                let amount = nested.uvarint(2).unwrap();
                nested.finish().unwrap();
                (url, amount)
            })
            .collect();
        assert_eq!(
            decoded,
            vec![
                (Some("acc://a".to_string()), Some(5)),
                (Some("acc://b".to_string()), None),
            ]
        );
    }

    #[test]
    fn test_decode_update_account_auth_operations() {
        let bytes = encode(Payload::UpdateAccountAuth(UpdateAccountAuth {
            operations: vec![
                AccountAuthOperation {
                    kind: AccountAuthOperationType::AddAuthority,
                    authority: "acc://x/book".into(),
                },
                AccountAuthOperation {
                    kind: AccountAuthOperationType::Disable,
                    authority: "acc://y/book".into(),
                },
            ],
        }));
        let mut r = FieldReader::new(&bytes);
        assert_eq!(r.uvarint(1).unwrap(), Some(21));
        let ops = r.repeated_bytes(2).unwrap();
        r.finish().unwrap();

        let decoded: Vec<(u64, String)> = ops
            .iter()
            .map(|raw| {
                let mut nested = FieldReader::new(raw);
                let kind = nested.uvarint(1).unwrap().unwrap();
                let authority = nested.string(2).unwrap().unwrap();
                nested.finish().unwrap();
                (kind, authority)
            })
            .collect();
        assert_eq!(
            decoded,
            vec![(3, "acc://x/book".to_string()), (2, "acc://y/book".to_string())]
        );
    }

    #[test]
    fn test_decode_write_data_to_with_epilogue() {
        let body = TransactionBody::new(Payload::WriteDataTo(WriteDataTo {
            recipient: "acc://l".into(),
            entry: Some(DataEntry::double_hash_from_strings(&["z", ""])),
        }))
        .with_epilogue(vec![0x00]);
        let bytes = ExtendedEncoder::new().encode_body(&body).unwrap();

        let mut r = FieldReader::new(&bytes);
        assert_eq!(r.uvarint(1).unwrap(), Some(6));
        assert_eq!(r.string(2).unwrap().as_deref(), Some("acc://l"));
        let entry = r.bytes(3).unwrap().unwrap();
        assert_eq!(r.remaining(), &[0x00]);

        let mut nested = FieldReader::new(entry);
        assert_eq!(nested.uvarint(1).unwrap(), Some(3));
        assert_eq!(
            nested.repeated_bytes(2).unwrap(),
            vec![b"z".as_slice(), b"".as_slice()]
        );
        nested.finish().unwrap();
    }
}

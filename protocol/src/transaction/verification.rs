//! Envelope verification.
//!
//! Recomputes everything a signer derived and checks it against what the
//! envelope claims. The checks are ordered from cheapest to most expensive:
//! structure first, then hashing, then signature verification.

use thiserror::Error;

use crate::codec::{BodyEncoder, CodecError};
use crate::config::FORBIDDEN_BODY_LENGTH;
use crate::crypto::{verify, SignatureError};

use super::envelope::Envelope;
use super::hash_chain::{compute_hashes, TransactionHashes};
use super::signing::signing_preimage;

/// Errors that can occur during envelope verification.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("envelope must carry exactly one transaction, found {0}")]
    TransactionCount(usize),

    #[error("envelope carries no signatures")]
    MissingSignature,

    /// No signature's metadata hashes to the header's initiator.
    #[error("initiator mismatch: header has {expected}")]
    InitiatorMismatch { expected: String },

    #[error("body encodes to exactly 64 bytes and would be rejected")]
    ForbiddenBodyLength,

    #[error("signature {index} ({signer}): {source}")]
    Signature {
        index: usize,
        signer: String,
        #[source]
        source: SignatureError,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Verify every signature in `envelope` and return the transaction hashes.
pub fn verify_envelope<E>(encoder: &E, envelope: &Envelope) -> Result<TransactionHashes, VerificationError>
where
    E: BodyEncoder + ?Sized,
{
    let [transaction] = envelope.transaction.as_slice() else {
        return Err(VerificationError::TransactionCount(envelope.transaction.len()));
    };
    if envelope.signatures.is_empty() {
        return Err(VerificationError::MissingSignature);
    }

    let header = &transaction.header;
    let initiators: Vec<_> = envelope
        .signatures
        .iter()
        .map(|s| s.metadata().initiator())
        .collect();
    if !initiators.contains(&header.initiator) {
        return Err(VerificationError::InitiatorMismatch {
            expected: hex::encode(header.initiator),
        });
    }

    let body_bytes = encoder.encode_body(&transaction.body)?;
    if body_bytes.len() == FORBIDDEN_BODY_LENGTH {
        return Err(VerificationError::ForbiddenBodyLength);
    }
    let hashes = compute_hashes(encoder, &header.encode(), &transaction.body, &body_bytes)?;

    for (index, (record, initiator)) in envelope.signatures.iter().zip(&initiators).enumerate() {
        let preimage = signing_preimage(initiator, &hashes.transaction);
        verify(record.algorithm, &record.public_key, &preimage, &record.signature).map_err(
            |source| VerificationError::Signature {
                index,
                signer: record.signer.clone(),
                source,
            },
        )?;
    }

    Ok(hashes)
}

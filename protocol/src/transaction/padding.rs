//! Guard against 64-byte body encodings.
//!
//! The remote node refuses bodies that encode to exactly two hash lengths.
//! Before anything is hashed the body is encoded once; if it hits that
//! length, a single `0x00` epilogue byte is attached and the body is encoded
//! again. Everything downstream sees only the padded form.

use tracing::debug;

use crate::codec::{BodyEncoder, CodecError};
use crate::config::{FORBIDDEN_BODY_LENGTH, PADDING_BYTE};

use super::body::TransactionBody;

/// A body that is safe to hash, with its final encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBody {
    pub body: TransactionBody,
    pub encoded: Vec<u8>,
    pub padded: bool,
}

/// Encode `body`, padding it when the encoding is exactly 64 bytes.
///
/// An existing epilogue is kept and the padding byte is appended after it,
/// so the padded encoding always starts with the unpadded one.
pub fn apply_padding<E>(encoder: &E, mut body: TransactionBody) -> Result<PaddedBody, CodecError>
where
    E: BodyEncoder + ?Sized,
{
    let trial = encoder.encode_body(&body)?;
    if trial.len() != FORBIDDEN_BODY_LENGTH {
        return Ok(PaddedBody {
            body,
            encoded: trial,
            padded: false,
        });
    }

    body.epilogue
        .get_or_insert_with(Vec::new)
        .push(PADDING_BYTE);
    let encoded = encoder.encode_body(&body)?;
    debug!(
        kind = %body.transaction_type(),
        length = encoded.len(),
        "padded 64-byte body with epilogue"
    );
    Ok(PaddedBody {
        body,
        encoded,
        padded: true,
    })
}

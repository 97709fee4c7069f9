//! # Binary Codec
//!
//! Byte-exact encoders for transaction bodies, headers and key-page
//! operations. The output must match the remote node's own marshalling
//! bit for bit: a single differing byte changes the body hash, which
//! changes the signing preimage, which gets the signature rejected.
//!
//! ```text
//! field.rs    — tagged varint / string / bytes / hash fields, plus a reader
//! body.rs     — BodyEncoder capability and the base (delegate) encoder
//! extended.rs — encoder for the kinds the base encoder lacks
//! key_page.rs — key-page operation encoders
//! header.rs   — transaction header encoder
//! ```

pub mod body;
pub mod extended;
pub mod field;
pub mod header;
pub mod key_page;

use thiserror::Error;

pub use body::{BaseEncoder, BodyEncoder};
pub use extended::ExtendedEncoder;
pub use field::{encode_bytes, encode_string, encode_uvarint, FieldReader, FieldWriter};
pub use header::{decode_header, encode_header};

/// Errors raised while encoding or decoding.
///
/// Neither variant is retried or papered over: falling back to some other
/// encoding would yield a signature the remote verifier rejects with no
/// indication why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No encoder in the chain knows how to encode this body kind.
    #[error("unsupported body kind: {0}")]
    UnsupportedBodyKind(String),

    /// A value lies outside its field's domain.
    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: String, reason: String },
}

impl CodecError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

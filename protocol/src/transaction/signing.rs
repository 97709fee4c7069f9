//! Transaction signing.
//!
//! The signing procedure, for every algorithm:
//!
//! 1. Pad the body if it encodes to exactly 64 bytes.
//! 2. Encode the signature metadata `{1=type, 2=public key, 4=signer,
//!    5=signer version, 6=timestamp}`. Field 3 (the signature) is never
//!    present: metadata is hashed before the signature exists.
//! 3. `initiator = sha256(metadata)`.
//! 4. Encode the header `{principal, initiator, memo}`.
//! 5. Run the hash chain to get the transaction hash.
//! 6. `preimage = sha256(initiator ‖ transaction_hash)`, and sign it.
//!
//! Ed25519 keys take the native path, which signs with `ed25519-dalek`
//! directly under the fixed Ed25519 tag. RCD1, BTC and ETH take the
//! parameterised path; the metadata layout is identical and only the type
//! tag, public-key form and signature format differ.

use chrono::Utc;
use ed25519_dalek::Signer as _;
use thiserror::Error;
use tracing::debug;

use crate::codec::{BodyEncoder, CodecError, ExtendedEncoder, FieldReader, FieldWriter};
use crate::crypto::{sha256, sha256_multi, Algorithm, Hash32, KeyError, KeyPair};

use super::body::TransactionBody;
use super::envelope::{Envelope, SignatureRecord, Transaction};
use super::hash_chain::{compute_hashes, TransactionHashes};
use super::header::TransactionHeader;
use super::padding::{apply_padding, PaddedBody};

/// Errors that can occur while producing a signed envelope.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<KeyError> for SigningError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::SigningFailed(reason) => Self::SigningFailed(reason),
            other => Self::SigningFailed(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// SignatureMetadata
// ---------------------------------------------------------------------------

/// Everything a signature commits to except the signature itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMetadata {
    pub algorithm: Algorithm,
    pub public_key: Vec<u8>,
    pub signer: String,
    pub signer_version: u64,
    pub timestamp: u64,
}

impl SignatureMetadata {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = FieldWriter::new();
        w.uvarint(1, self.algorithm.signature_type())
            .bytes(2, &self.public_key)
            .required_string(4, &self.signer)
            .uvarint(5, self.signer_version)
            .uvarint(6, self.timestamp);
        w.into_bytes()
    }

    pub fn initiator(&self) -> Hash32 {
        sha256(&self.encode())
    }

    /// Reads metadata back, rejecting encodings that carry a signature.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = FieldReader::new(bytes);
        let tag = r.uvarint(1)?.unwrap_or_default();
        let algorithm = Algorithm::from_signature_type(tag)
            .ok_or_else(|| CodecError::malformed("type", format!("unknown signature type {tag}")))?;
        let public_key = r.bytes(2)?.map(<[u8]>::to_vec).unwrap_or_default();
        if r.peek_field() == Some(3) {
            return Err(CodecError::malformed(
                "signature",
                "metadata must not include the signature",
            ));
        }
        let signer = r.string(4)?.unwrap_or_default();
        let signer_version = r.uvarint(5)?.unwrap_or_default();
        let timestamp = r.uvarint(6)?.unwrap_or_default();
        r.finish()?;
        Ok(Self {
            algorithm,
            public_key,
            signer,
            signer_version,
            timestamp,
        })
    }
}

/// `sha256(initiator ‖ transaction_hash)`: the bytes every algorithm signs.
pub fn signing_preimage(initiator: &Hash32, transaction_hash: &Hash32) -> Hash32 {
    sha256_multi(&[initiator.as_slice(), transaction_hash.as_slice()])
}

/// Current time in microseconds since the Unix epoch.
pub fn now_micros() -> u64 {
    u64::try_from(Utc::now().timestamp_micros()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// SigningRequest
// ---------------------------------------------------------------------------

/// What to sign and on whose behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pub principal: String,
    pub signer: String,
    pub signer_version: u64,
    pub body: TransactionBody,
    pub memo: Option<String>,
    /// Defaults to the current time when `None`.
    pub timestamp: Option<u64>,
}

impl SigningRequest {
    pub fn new(
        principal: impl Into<String>,
        signer: impl Into<String>,
        body: impl Into<TransactionBody>,
    ) -> Self {
        Self {
            principal: principal.into(),
            signer: signer.into(),
            signer_version: 1,
            body: body.into(),
            memo: None,
            timestamp: None,
        }
    }

    pub fn signer_version(mut self, version: u64) -> Self {
        self.signer_version = version;
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn timestamp(mut self, micros: u64) -> Self {
        self.timestamp = Some(micros);
        self
    }
}

/// A signed envelope plus the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub envelope: Envelope,
    pub hashes: TransactionHashes,
    pub initiator: Hash32,
    /// Final body encoding, padding included.
    pub body_bytes: Vec<u8>,
    pub padded: bool,
}

// ---------------------------------------------------------------------------
// TransactionSigner
// ---------------------------------------------------------------------------

/// Signs requests using the body encoder `E`.
#[derive(Debug, Clone, Default)]
pub struct TransactionSigner<E = ExtendedEncoder> {
    encoder: E,
}

impl TransactionSigner<ExtendedEncoder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: BodyEncoder> TransactionSigner<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Sign `request` with `key` and assemble the envelope.
    pub fn sign(
        &self,
        key: &KeyPair,
        request: SigningRequest,
    ) -> Result<SignedTransaction, SigningError> {
        let SigningRequest {
            principal,
            signer,
            signer_version,
            body,
            memo,
            timestamp,
        } = request;

        // Padding comes first so every later step sees the final body.
        let padded = apply_padding(&self.encoder, body)?;
        let timestamp = timestamp.unwrap_or_else(now_micros);
        let header = |initiator| TransactionHeader::new(principal, initiator, memo);

        match key {
            KeyPair::Ed25519(signing_key) => {
                debug!(signer = %signer, "signing on native ed25519 path");
                let metadata = SignatureMetadata {
                    algorithm: Algorithm::Ed25519,
                    public_key: signing_key.verifying_key().to_bytes().to_vec(),
                    signer,
                    signer_version,
                    timestamp,
                };
                self.finish(metadata, header, padded, |preimage| {
                    Ok(signing_key.sign(preimage).to_bytes().to_vec())
                })
            }
            other => {
                debug!(
                    signer = %signer,
                    algorithm = %other.algorithm(),
                    "signing on parameterised path"
                );
                let metadata = SignatureMetadata {
                    algorithm: other.algorithm(),
                    public_key: other.public_key_bytes(),
                    signer,
                    signer_version,
                    timestamp,
                };
                self.finish(metadata, header, padded, |preimage| {
                    other.sign(preimage).map_err(SigningError::from)
                })
            }
        }
    }

    fn finish<H, S>(
        &self,
        metadata: SignatureMetadata,
        header: H,
        padded: PaddedBody,
        sign: S,
    ) -> Result<SignedTransaction, SigningError>
    where
        H: FnOnce(Hash32) -> TransactionHeader,
        S: FnOnce(&Hash32) -> Result<Vec<u8>, SigningError>,
    {
        let initiator = metadata.initiator();
        let header = header(initiator);
        let hashes = compute_hashes(&self.encoder, &header.encode(), &padded.body, &padded.encoded)?;
        let preimage = signing_preimage(&initiator, &hashes.transaction);
        let signature = sign(&preimage)?;

        debug!(
            transaction_hash = %hex::encode(hashes.transaction),
            kind = %padded.body.transaction_type(),
            "transaction signed"
        );

        Ok(SignedTransaction {
            envelope: Envelope::new(
                Transaction {
                    header,
                    body: padded.body,
                },
                SignatureRecord::new(metadata, signature),
            ),
            hashes,
            initiator,
            body_bytes: padded.encoded,
            padded: padded.padded,
        })
    }
}

/// Sign with the default (extended) encoder.
pub fn sign_transaction(
    key: &KeyPair,
    request: SigningRequest,
) -> Result<SignedTransaction, SigningError> {
    TransactionSigner::new().sign(key, request)
}

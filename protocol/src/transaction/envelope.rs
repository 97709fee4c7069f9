//! Signed envelopes: the unit handed to whatever submits transactions.
//!
//! ```json
//! {
//!   "transaction": [{"header": {...}, "body": {...}}],
//!   "signatures":  [{"type": "eth", "publicKey": "..", "signature": "..",
//!                    "signer": "acc://..", "signerVersion": 1, "timestamp": 1700000000000000}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::body::TransactionBody;
use super::header::TransactionHeader;
use super::signing::SignatureMetadata;
use crate::crypto::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub body: TransactionBody,
}

/// A signature together with the metadata it commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    #[serde(rename = "type")]
    pub algorithm: Algorithm,
    #[serde(with = "crate::serde_hex::bytes")]
    pub public_key: Vec<u8>,
    #[serde(with = "crate::serde_hex::bytes")]
    pub signature: Vec<u8>,
    pub signer: String,
    #[serde(default)]
    pub signer_version: u64,
    #[serde(default)]
    pub timestamp: u64,
}

impl SignatureRecord {
    pub fn new(metadata: SignatureMetadata, signature: Vec<u8>) -> Self {
        Self {
            algorithm: metadata.algorithm,
            public_key: metadata.public_key,
            signature,
            signer: metadata.signer,
            signer_version: metadata.signer_version,
            timestamp: metadata.timestamp,
        }
    }

    /// The metadata this signature was made over.
    pub fn metadata(&self) -> SignatureMetadata {
        SignatureMetadata {
            algorithm: self.algorithm,
            public_key: self.public_key.clone(),
            signer: self.signer.clone(),
            signer_version: self.signer_version,
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub transaction: Vec<Transaction>,
    pub signatures: Vec<SignatureRecord>,
}

impl Envelope {
    pub fn new(transaction: Transaction, signature: SignatureRecord) -> Self {
        Self {
            transaction: vec![transaction],
            signatures: vec![signature],
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

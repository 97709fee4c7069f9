//! # Key Management
//!
//! Signing keys for the four signature algorithms the ledger accepts.
//!
//! | algorithm | curve     | public key          | key hash                         |
//! |-----------|-----------|---------------------|----------------------------------|
//! | ed25519   | Ed25519   | 32 bytes            | `sha256(pk)`                     |
//! | rcd1      | Ed25519   | 32 bytes            | `sha256(sha256(0x01 ‖ pk))`      |
//! | btc       | secp256k1 | 33 bytes compressed | `ripemd160(sha256(pk))`          |
//! | eth       | secp256k1 | 65 bytes            | `keccak256(pk[1..])[12..]`       |
//!
//! [`KeyPair`] is a closed union: every algorithm carries its own key type,
//! and everything that differs between algorithms is an exhaustive `match`.
//!
//! ## Security considerations
//!
//! - Secret keys are never logged. `Debug` prints the algorithm and public
//!   key only.
//! - Key generation uses `OsRng`.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::Signer as _;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use rand::rngs::OsRng;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use thiserror::Error;

use super::hash::{sha256, Hash32};
use crate::config::{
    RCD1_PREFIX, SIGNATURE_TYPE_BTC, SIGNATURE_TYPE_ED25519, SIGNATURE_TYPE_ETH,
    SIGNATURE_TYPE_RCD1,
};
use crate::identity::LiteIdentity;

/// Errors that can occur during key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes for {0}")]
    InvalidSecretKey(Algorithm),

    #[error("unsupported signature algorithm '{0}' (expected one of ed25519, rcd1, btc, eth)")]
    UnsupportedAlgorithm(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Signature algorithm. The discriminant doubles as the wire tag written
/// into field 1 of the signature metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Ed25519,
    Rcd1,
    Btc,
    Eth,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Ed25519,
        Algorithm::Rcd1,
        Algorithm::Btc,
        Algorithm::Eth,
    ];

    /// Signature type tag on the wire.
    pub fn signature_type(self) -> u64 {
        match self {
            Self::Ed25519 => SIGNATURE_TYPE_ED25519,
            Self::Rcd1 => SIGNATURE_TYPE_RCD1,
            Self::Btc => SIGNATURE_TYPE_BTC,
            Self::Eth => SIGNATURE_TYPE_ETH,
        }
    }

    /// Inverse of [`Algorithm::signature_type`].
    pub fn from_signature_type(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.signature_type() == tag)
    }

    /// Lowercase name used in JSON envelopes.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Rcd1 => "rcd1",
            Self::Btc => "btc",
            Self::Eth => "eth",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| KeyError::UnsupportedAlgorithm(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// A signing key for one of the four algorithms.
///
/// RCD1 reuses an Ed25519 key; only its key hash and wire tag differ.
/// BTC and ETH share a secp256k1 key but differ in public-key form,
/// key hash and signature layout.
#[derive(Clone)]
pub enum KeyPair {
    Ed25519(ed25519_dalek::SigningKey),
    Rcd1(ed25519_dalek::SigningKey),
    Btc(k256::ecdsa::SigningKey),
    Eth(k256::ecdsa::SigningKey),
}

impl KeyPair {
    /// Generate a fresh key using the OS cryptographic RNG.
    pub fn generate(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Ed25519 => Self::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng)),
            Algorithm::Rcd1 => Self::Rcd1(ed25519_dalek::SigningKey::generate(&mut OsRng)),
            Algorithm::Btc => Self::Btc(k256::ecdsa::SigningKey::random(&mut OsRng)),
            Algorithm::Eth => Self::Eth(k256::ecdsa::SigningKey::random(&mut OsRng)),
        }
    }

    /// Rebuild a key from its 32-byte secret.
    ///
    /// Any 32 bytes form a valid Ed25519 seed; for secp256k1 the bytes must
    /// be a non-zero scalar below the curve order.
    pub fn from_secret_bytes(algorithm: Algorithm, secret: &[u8]) -> Result<Self, KeyError> {
        match algorithm {
            Algorithm::Ed25519 | Algorithm::Rcd1 => {
                let seed: [u8; 32] = secret
                    .try_into()
                    .map_err(|_| KeyError::InvalidSecretKey(algorithm))?;
                let key = ed25519_dalek::SigningKey::from_bytes(&seed);
                Ok(if algorithm == Algorithm::Ed25519 {
                    Self::Ed25519(key)
                } else {
                    Self::Rcd1(key)
                })
            }
            Algorithm::Btc | Algorithm::Eth => {
                let key = k256::ecdsa::SigningKey::from_slice(secret)
                    .map_err(|_| KeyError::InvalidSecretKey(algorithm))?;
                Ok(if algorithm == Algorithm::Btc {
                    Self::Btc(key)
                } else {
                    Self::Eth(key)
                })
            }
        }
    }

    /// Rebuild a key from a hex-encoded 32-byte secret.
    pub fn from_hex(algorithm: Algorithm, hex_str: &str) -> Result<Self, KeyError> {
        let bytes =
            hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey(algorithm))?;
        Self::from_secret_bytes(algorithm, &bytes)
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Rcd1(_) => Algorithm::Rcd1,
            Self::Btc(_) => Algorithm::Btc,
            Self::Eth(_) => Algorithm::Eth,
        }
    }

    /// Raw public key bytes as they appear in signature metadata.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(sk) | Self::Rcd1(sk) => sk.verifying_key().to_bytes().to_vec(),
            Self::Btc(sk) => sk.verifying_key().to_encoded_point(true).as_bytes().to_vec(),
            Self::Eth(sk) => sk.verifying_key().to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Exports the raw 32-byte secret. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        match self {
            Self::Ed25519(sk) | Self::Rcd1(sk) => sk.to_bytes(),
            Self::Btc(sk) | Self::Eth(sk) => {
                let mut out = [0u8; 32];
                out.copy_from_slice(&sk.to_bytes());
                out
            }
        }
    }

    /// Algorithm-specific hash of the public key. 32 bytes for the Ed25519
    /// variants, 20 bytes for the secp256k1 ones.
    pub fn key_hash(&self) -> Vec<u8> {
        key_hash(self.algorithm(), &self.public_key_bytes())
    }

    /// Lite identity derived from [`KeyPair::key_hash`].
    pub fn lite_identity(&self) -> LiteIdentity {
        LiteIdentity::from_key_hash(&self.key_hash())
    }

    /// Sign a 32-byte preimage.
    ///
    /// Ed25519 and RCD1 return the 64-byte signature, BTC returns a DER
    /// encoded ECDSA signature and ETH returns `r ‖ s ‖ v` (65 bytes).
    pub fn sign(&self, preimage: &Hash32) -> Result<Vec<u8>, KeyError> {
        match self {
            Self::Ed25519(sk) | Self::Rcd1(sk) => Ok(sk.sign(preimage).to_bytes().to_vec()),
            Self::Btc(sk) => {
                let sig: k256::ecdsa::Signature = sk
                    .sign_prehash(preimage)
                    .map_err(|e| KeyError::SigningFailed(e.to_string()))?;
                Ok(sig.to_der().as_bytes().to_vec())
            }
            Self::Eth(sk) => {
                let (sig, recovery_id) = sk
                    .sign_prehash_recoverable(preimage)
                    .map_err(|e| KeyError::SigningFailed(e.to_string()))?;
                let mut out = sig.to_bytes().to_vec();
                out.push(recovery_id.to_byte());
                Ok(out)
            }
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm())
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish()
    }
}

/// Hash of a raw public key under the given algorithm's rules.
pub fn key_hash(algorithm: Algorithm, public_key: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Ed25519 => sha256(public_key).to_vec(),
        Algorithm::Rcd1 => {
            let mut rcd = Vec::with_capacity(public_key.len() + 1);
            rcd.push(RCD1_PREFIX);
            rcd.extend_from_slice(public_key);
            sha256(&sha256(&rcd)).to_vec()
        }
        Algorithm::Btc => Ripemd160::digest(Sha256::digest(public_key)).to_vec(),
        Algorithm::Eth => {
            let body = public_key.get(1..).unwrap_or_default();
            Keccak256::digest(body)[12..].to_vec()
        }
    }
}

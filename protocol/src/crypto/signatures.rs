//! # Signature Verification
//!
//! Checks a signature over a 32-byte preimage for any of the four supported
//! algorithms. Signing itself lives on [`KeyPair::sign`](super::KeyPair::sign);
//! this is the other half, used when an envelope is read back.
//!
//! ## Strictness
//!
//! Ed25519 and RCD1 use `ed25519-dalek`'s strict verification. ETH
//! signatures must also carry a recovery byte that recovers the same public
//! key the envelope names.

use ed25519_dalek::{Signature as EdSignature, VerifyingKey as EdVerifyingKey};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature as EcSignature, VerifyingKey as EcVerifyingKey};
use thiserror::Error;

use super::hash::Hash32;
use super::keys::Algorithm;

/// Errors during signature verification.
///
/// Intentionally coarse: a malformed key and a bad signature both mean the
/// envelope is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid {0} public key")]
    InvalidPublicKey(Algorithm),

    #[error("malformed {0} signature")]
    InvalidSignatureBytes(Algorithm),

    #[error("signature verification failed")]
    VerificationFailed,
}

/// Verify `signature` over `preimage` with the given public key.
pub fn verify(
    algorithm: Algorithm,
    public_key: &[u8],
    preimage: &Hash32,
    signature: &[u8],
) -> Result<(), SignatureError> {
    match algorithm {
        Algorithm::Ed25519 | Algorithm::Rcd1 => {
            verify_ed25519(algorithm, public_key, preimage, signature)
        }
        Algorithm::Btc => {
            let key = secp256k1_key(algorithm, public_key)?;
            let sig = EcSignature::from_der(signature)
                .map_err(|_| SignatureError::InvalidSignatureBytes(algorithm))?;
            key.verify_prehash(preimage, &sig)
                .map_err(|_| SignatureError::VerificationFailed)
        }
        Algorithm::Eth => {
            let key = secp256k1_key(algorithm, public_key)?;
            if signature.len() != 65 {
                return Err(SignatureError::InvalidSignatureBytes(algorithm));
            }
            let sig = EcSignature::from_slice(&signature[..64])
                .map_err(|_| SignatureError::InvalidSignatureBytes(algorithm))?;
            let recovery_id = RecoveryId::from_byte(signature[64])
                .ok_or(SignatureError::InvalidSignatureBytes(algorithm))?;
            key.verify_prehash(preimage, &sig)
                .map_err(|_| SignatureError::VerificationFailed)?;
            let recovered = EcVerifyingKey::recover_from_prehash(preimage, &sig, recovery_id)
                .map_err(|_| SignatureError::VerificationFailed)?;
            if recovered != key {
                return Err(SignatureError::VerificationFailed);
            }
            Ok(())
        }
    }
}

fn verify_ed25519(
    algorithm: Algorithm,
    public_key: &[u8],
    preimage: &Hash32,
    signature: &[u8],
) -> Result<(), SignatureError> {
    let key_bytes: [u8; 32] = public_key
        .try_into()
        .map_err(|_| SignatureError::InvalidPublicKey(algorithm))?;
    let key = EdVerifyingKey::from_bytes(&key_bytes)
        .map_err(|_| SignatureError::InvalidPublicKey(algorithm))?;
    let sig = EdSignature::from_slice(signature)
        .map_err(|_| SignatureError::InvalidSignatureBytes(algorithm))?;
    key.verify_strict(preimage, &sig)
        .map_err(|_| SignatureError::VerificationFailed)
}

fn secp256k1_key(algorithm: Algorithm, public_key: &[u8]) -> Result<EcVerifyingKey, SignatureError> {
    EcVerifyingKey::from_sec1_bytes(public_key).map_err(|_| SignatureError::InvalidPublicKey(algorithm))
}

//! # Lite Accounts
//!
//! A lite identity is an account whose URL is derived from a key hash, so it
//! exists before any transaction creates it:
//!
//! ```text
//! key_hash[..20]                  -> 40 hex chars
//! sha256(those 40 hex chars)[28..] -> 8 hex checksum chars
//! acc://{key hex}{checksum hex}
//! ```
//!
//! Its ACME token account lives at `{lite identity}/ACME`.
//!
//! Lite data accounts are derived from a data entry's external ids instead
//! of a key; see [`lite_data_account_url`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::{
    HASH_LENGTH, LITE_CHECKSUM_LENGTH, LITE_KEY_HASH_LENGTH, LITE_TOKEN_SUFFIX, URL_SCHEME,
};
use crate::crypto::{sha256, sha256_multi};

/// Errors that can occur when parsing a lite identity URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiteIdentityError {
    #[error("missing 'acc://' scheme")]
    MissingScheme,

    #[error("invalid lite identity length: expected {expected} hex chars, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("lite identity is not valid hex")]
    InvalidHex,

    #[error("lite identity checksum mismatch")]
    ChecksumMismatch,
}

/// A lite identity: the first 20 bytes of a key hash plus a 4-byte checksum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteIdentity {
    key_hash: [u8; LITE_KEY_HASH_LENGTH],
}

impl LiteIdentity {
    /// Derive from an algorithm-specific key hash. Only the first 20 bytes
    /// are used; every supported algorithm yields at least that many.
    pub fn from_key_hash(key_hash: &[u8]) -> Self {
        let mut truncated = [0u8; LITE_KEY_HASH_LENGTH];
        for (dst, src) in truncated.iter_mut().zip(key_hash) {
            *dst = *src;
        }
        Self {
            key_hash: truncated,
        }
    }

    pub fn key_hash(&self) -> &[u8; LITE_KEY_HASH_LENGTH] {
        &self.key_hash
    }

    fn checksum(key_hex: &str) -> [u8; LITE_CHECKSUM_LENGTH] {
        let digest = sha256(key_hex.as_bytes());
        let mut out = [0u8; LITE_CHECKSUM_LENGTH];
        out.copy_from_slice(&digest[HASH_LENGTH - LITE_CHECKSUM_LENGTH..]);
        out
    }

    /// Full `acc://` URL of the identity.
    pub fn url(&self) -> String {
        self.to_string()
    }

    /// URL of the identity's ACME token account.
    pub fn token_account(&self) -> String {
        format!("{self}/{LITE_TOKEN_SUFFIX}")
    }
}

impl fmt::Display for LiteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_hex = hex::encode(self.key_hash);
        let checksum = hex::encode(Self::checksum(&key_hex));
        write!(f, "{URL_SCHEME}{key_hex}{checksum}")
    }
}

impl FromStr for LiteIdentity {
    type Err = LiteIdentityError;

    /// Parses `acc://<48 hex chars>`, optionally followed by a path such as
    /// `/ACME`, and validates the checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(URL_SCHEME)
            .ok_or(LiteIdentityError::MissingScheme)?;
        let authority = rest.split('/').next().unwrap_or_default();

        let expected = (LITE_KEY_HASH_LENGTH + LITE_CHECKSUM_LENGTH) * 2;
        if authority.len() != expected {
            return Err(LiteIdentityError::InvalidLength {
                expected,
                got: authority.len(),
            });
        }

        let (key_hex, checksum_hex) = authority.split_at(LITE_KEY_HASH_LENGTH * 2);
        let key_bytes = hex::decode(key_hex).map_err(|_| LiteIdentityError::InvalidHex)?;
        let checksum = hex::decode(checksum_hex).map_err(|_| LiteIdentityError::InvalidHex)?;

        // Checksum is over the lowercase hex form.
        if checksum != Self::checksum(&key_hex.to_ascii_lowercase()) {
            return Err(LiteIdentityError::ChecksumMismatch);
        }
        Ok(Self::from_key_hash(&key_bytes))
    }
}

impl Serialize for LiteIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LiteIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// URL of the lite data account addressed by a data entry's external ids.
///
/// The first item is the entry content and does not contribute; every
/// following item is hashed and the concatenation of those hashes is hashed
/// again.
pub fn lite_data_account_url<B: AsRef<[u8]>>(data: &[B]) -> String {
    let item_hashes: Vec<_> = data.iter().skip(1).map(|d| sha256(d.as_ref())).collect();
    let parts: Vec<&[u8]> = item_hashes.iter().map(|h| h.as_slice()).collect();
    format!("{URL_SCHEME}{}", hex::encode(sha256_multi(&parts)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_format() {
        let id = LiteIdentity::from_key_hash(&[0xab; 32]);
        let url = id.url();
        assert!(url.starts_with("acc://"));
        assert_eq!(url.len(), "acc://".len() + 48);
        assert!(url["acc://".len()..].starts_with(&"ab".repeat(20)));
    }

    #[test]
    fn test_checksum_is_tail_of_hex_digest() {
        let id = LiteIdentity::from_key_hash(&[0x01; 20]);
        let key_hex = "01".repeat(20);
        let digest = sha256(key_hex.as_bytes());
        let expected = format!("acc://{key_hex}{}", hex::encode(&digest[28..]));
        assert_eq!(id.to_string(), expected);
    }

    #[test]
    fn test_token_account_suffix() {
        let id = LiteIdentity::from_key_hash(&[0x42; 20]);
        assert_eq!(id.token_account(), format!("{id}/ACME"));
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = LiteIdentity::from_key_hash(&sha256(b"some key"));
        let parsed: LiteIdentity = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        let from_token: LiteIdentity = id.token_account().parse().unwrap();
        assert_eq!(from_token, id);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "http://abc".parse::<LiteIdentity>(),
            Err(LiteIdentityError::MissingScheme)
        );
        assert!(matches!(
            "acc://abcd".parse::<LiteIdentity>(),
            Err(LiteIdentityError::InvalidLength { .. })
        ));

        let mut url = LiteIdentity::from_key_hash(&[0x10; 20]).to_string();
        let last = url.pop().unwrap();
        url.push(if last == '0' { '1' } else { '0' });
        assert_eq!(url.parse::<LiteIdentity>(), Err(LiteIdentityError::ChecksumMismatch));
    }

    #[test]
    fn test_serde_as_string() {
        let id = LiteIdentity::from_key_hash(&[0x07; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: LiteIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_lite_data_account_ignores_first_item() {
        let a = lite_data_account_url(&[b"content one".as_slice(), b"id"]);
        let b = lite_data_account_url(&[b"content two".as_slice(), b"id"]);
        assert_eq!(a, b);

        let expected = sha256(&sha256(b"id"));
        assert_eq!(a, format!("acc://{}", hex::encode(expected)));
    }

    #[test]
    fn test_lite_data_account_depends_on_ids() {
        let a = lite_data_account_url(&[b"x".as_slice(), b"id1", b"id2"]);
        let b = lite_data_account_url(&[b"x".as_slice(), b"id2", b"id1"]);
        assert_ne!(a, b);
    }
}

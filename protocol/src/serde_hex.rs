//! Serde adapters for byte fields.
//!
//! The reference JSON encodes every byte string as lowercase hex. These
//! helpers are used with `#[serde(with = "...")]`.

use serde::{Deserialize, Deserializer, Serializer};

fn decode<E: serde::de::Error>(s: &str) -> Result<Vec<u8>, E> {
    hex::decode(s).map_err(|e| E::custom(format!("invalid hex: {e}")))
}

/// `Vec<u8>` as a hex string.
pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        decode(&s)
    }
}

/// `Option<Vec<u8>>` as an optional hex string.
pub mod opt_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&hex::encode(v)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(s) => decode(&s).map(Some),
            None => Ok(None),
        }
    }
}

/// `Vec<Vec<u8>>` as a list of hex strings.
pub mod bytes_list {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(value: &[Vec<u8>], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&hex::encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|s| decode(s))
            .collect()
    }
}

/// `[u8; 32]` as a 64-character hex string.
pub mod hash32 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let raw = decode::<D::Error>(&String::deserialize(d)?)?;
        raw.as_slice().try_into().map_err(|_| {
            <D::Error as serde::de::Error>::custom(format!("expected 32 bytes, got {}", raw.len()))
        })
    }
}

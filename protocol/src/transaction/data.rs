//! Data entries carried by `writeData` and `writeDataTo`.
//!
//! An entry is an ordered list of byte strings. The first item is the
//! content; the rest act as external ids. The entry is hashed on its own,
//! independently of the body encoding, and that hash is folded into the body
//! hash as the right-hand Merkle leaf.

use serde::{Deserialize, Serialize};

use crate::codec::FieldWriter;
use crate::config::{DATA_ENTRY_ACCUMULATE, DATA_ENTRY_DOUBLE_HASH};
use crate::crypto::{merkle_hash, sha256, Hash32};

/// How an entry's hash is derived from its items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataEntryKind {
    /// Merkle root of the item hashes.
    Accumulate,
    /// SHA-256 of the Merkle root of the item hashes.
    #[default]
    DoubleHash,
}

impl DataEntryKind {
    pub fn tag(self) -> u64 {
        match self {
            Self::Accumulate => DATA_ENTRY_ACCUMULATE,
            Self::DoubleHash => DATA_ENTRY_DOUBLE_HASH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    #[serde(rename = "type", default)]
    pub kind: DataEntryKind,
    #[serde(with = "crate::serde_hex::bytes_list", default)]
    pub data: Vec<Vec<u8>>,
}

impl DataEntry {
    pub fn new(kind: DataEntryKind, data: Vec<Vec<u8>>) -> Self {
        Self { kind, data }
    }

    /// A `doubleHash` entry from UTF-8 strings.
    pub fn double_hash_from_strings<S: AsRef<str>>(items: &[S]) -> Self {
        Self::new(
            DataEntryKind::DoubleHash,
            items.iter().map(|s| s.as_ref().as_bytes().to_vec()).collect(),
        )
    }

    /// `{1=tag, 2=item...}`. Every item is written, empty ones included,
    /// since item positions feed the Merkle hash.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = FieldWriter::new();
        w.uvarint(1, self.kind.tag());
        w.repeated_bytes(2, &self.data);
        w.into_bytes()
    }

    pub fn hash(&self) -> Hash32 {
        let leaves: Vec<Hash32> = self.data.iter().map(|item| sha256(item)).collect();
        let root = merkle_hash(&leaves);
        match self.kind {
            DataEntryKind::Accumulate => root,
            DataEntryKind::DoubleHash => sha256(&root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::merkle_combine;

    #[test]
    fn test_encode_layout() {
        let entry = DataEntry::new(DataEntryKind::DoubleHash, vec![b"hi".to_vec(), vec![]]);
        assert_eq!(entry.encode(), vec![0x01, 0x03, 0x02, 0x02, b'h', b'i', 0x02, 0x00]);
    }

    #[test]
    fn test_accumulate_hash_is_merkle_root() {
        let entry = DataEntry::new(
            DataEntryKind::Accumulate,
            vec![b"content".to_vec(), b"id".to_vec()],
        );
        let expected = merkle_combine(&sha256(b"content"), &sha256(b"id"));
        assert_eq!(entry.hash(), expected);
    }

    #[test]
    fn test_double_hash_wraps_root() {
        let entry = DataEntry::double_hash_from_strings(&["hello"]);
        assert_eq!(entry.hash(), sha256(&sha256(b"hello")));
    }

    #[test]
    fn test_empty_entry_hash() {
        let accumulate = DataEntry::new(DataEntryKind::Accumulate, vec![]);
        assert_eq!(accumulate.hash(), [0u8; 32]);
        let double = DataEntry::default();
        assert_eq!(double.hash(), sha256(&[0u8; 32]));
    }

    #[test]
    fn test_json_shape() {
        let entry = DataEntry::double_hash_from_strings(&["ab"]);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"type": "doubleHash", "data": ["6162"]}));

        let back: DataEntry =
            serde_json::from_str(r#"{"type":"accumulate","data":["00ff"]}"#).unwrap();
        assert_eq!(back.kind, DataEntryKind::Accumulate);
        assert_eq!(back.data, vec![vec![0x00, 0xff]]);
    }
}

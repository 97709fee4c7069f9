//! Key-page operations carried by `updateKeyPage`, and the key spec shared
//! with `createKeyPage`.

use serde::{Deserialize, Serialize};

use super::types::TransactionType;

/// A key entry on a key page: a key hash, a delegate key book, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySpec {
    #[serde(
        with = "crate::serde_hex::bytes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub key_hash: Vec<u8>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub delegate: String,
}

impl KeySpec {
    pub fn from_key_hash(key_hash: impl Into<Vec<u8>>) -> Self {
        Self {
            key_hash: key_hash.into(),
            delegate: String::new(),
        }
    }

    pub fn from_delegate(delegate: impl Into<String>) -> Self {
        Self {
            key_hash: Vec::new(),
            delegate: delegate.into(),
        }
    }
}

/// Threshold used when an operation's JSON omits it.
fn default_threshold() -> u64 {
    1
}

/// One instruction inside an `updateKeyPage` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum KeyPageOperation {
    #[serde(rename_all = "camelCase")]
    Update {
        #[serde(alias = "entry", default)]
        old_entry: KeySpec,
        #[serde(default)]
        new_entry: KeySpec,
    },
    Remove {
        #[serde(default)]
        entry: KeySpec,
    },
    Add {
        #[serde(default)]
        entry: KeySpec,
    },
    SetThreshold {
        #[serde(default = "default_threshold")]
        threshold: u64,
    },
    UpdateAllowed {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allow: Vec<TransactionType>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deny: Vec<TransactionType>,
    },
    SetRejectThreshold {
        #[serde(default = "default_threshold")]
        threshold: u64,
    },
    SetResponseThreshold {
        #[serde(default = "default_threshold")]
        threshold: u64,
    },
}

impl KeyPageOperation {
    /// Wire value of the operation, written as field 1 of its encoding.
    pub fn number(&self) -> u64 {
        match self {
            Self::Update { .. } => 1,
            Self::Remove { .. } => 2,
            Self::Add { .. } => 3,
            Self::SetThreshold { .. } => 4,
            Self::UpdateAllowed { .. } => 5,
            Self::SetRejectThreshold { .. } => 6,
            Self::SetResponseThreshold { .. } => 7,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Update { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::Add { .. } => "add",
            Self::SetThreshold { .. } => "setThreshold",
            Self::UpdateAllowed { .. } => "updateAllowed",
            Self::SetRejectThreshold { .. } => "setRejectThreshold",
            Self::SetResponseThreshold { .. } => "setResponseThreshold",
        }
    }
}

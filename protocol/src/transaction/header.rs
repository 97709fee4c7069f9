//! Transaction header: who the transaction is for and who initiated it.

use serde::{Deserialize, Serialize};

use crate::codec::encode_header;
use crate::crypto::Hash32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub principal: String,
    #[serde(with = "crate::serde_hex::hash32")]
    pub initiator: Hash32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl TransactionHeader {
    pub fn new(principal: impl Into<String>, initiator: Hash32, memo: Option<String>) -> Self {
        Self {
            principal: principal.into(),
            initiator,
            memo: memo.filter(|m| !m.is_empty()),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_header(&self.principal, &self.initiator, self.memo.as_deref())
    }
}

//! Typed transaction bodies.
//!
//! [`Payload`] is the tagged variant over every supported transaction kind.
//! [`TransactionBody`] pairs it with an optional epilogue: raw bytes appended
//! after the encoded fields, covered by the body hash but carrying no
//! semantic fields.
//!
//! The JSON shape follows the remote node's: a camelCase `type` tag,
//! camelCase fields, hex byte strings, decimal-string token amounts and the
//! epilogue under `$epilogue`.

use serde::{Deserialize, Serialize};

use super::data::DataEntry;
use super::key_page::{KeyPageOperation, KeySpec};
use super::types::{AccountAuthOperationType, TokenAmount, TransactionType};
use crate::config::CREDIT_PRECISION;
use crate::crypto::sha256;
use crate::identity::lite_data_account_url;

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

/// Recipient of `sendTokens` / `issueTokens`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecipient {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub amount: TokenAmount,
}

/// Recipient of `transferCredits`. The amount is in credit units
/// (hundredths of a credit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRecipient {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub amount: u64,
}

impl CreditRecipient {
    /// Recipient of `credits` whole credits.
    pub fn from_credits(url: impl Into<String>, credits: u64) -> Self {
        Self {
            url: url.into(),
            amount: credits.saturating_mul(CREDIT_PRECISION),
        }
    }
}

/// One operation of `updateAccountAuth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAuthOperation {
    #[serde(rename = "type")]
    pub kind: AccountAuthOperationType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub authority: String,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdentity {
    pub url: String,
    #[serde(
        with = "crate::serde_hex::bytes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub key_hash: Vec<u8>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_book_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenAccount {
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<String>,
}

/// Shared by `sendTokens` and `issueTokens`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    #[serde(default)]
    pub to: Vec<TokenRecipient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDataAccount {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<DataEntry>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub scratch: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub write_to_state: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteDataTo {
    #[serde(default)]
    pub recipient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<DataEntry>,
}

impl WriteDataTo {
    /// Write UTF-8 `entries` to the lite data account they address.
    ///
    /// The entries become a `doubleHash` entry. With fewer than two items
    /// there would be no external id, so `sha256(public_key)` is appended,
    /// making the account unique to the signer.
    pub fn for_lite_account<S: AsRef<str>>(entries: &[S], public_key: &[u8]) -> Self {
        let mut entry = DataEntry::double_hash_from_strings(entries);
        if entry.data.len() < 2 {
            entry.data.push(sha256(public_key).to_vec());
        }
        Self {
            recipient: lite_data_account_url(&entry.data),
            entry: Some(entry),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcmeFaucet {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToken {
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub symbol: String,
    #[serde(default)]
    pub precision: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub properties: String,
    #[serde(default, skip_serializing_if = "TokenAmount::is_zero")]
    pub supply_limit: TokenAmount,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnTokens {
    #[serde(default)]
    pub amount: TokenAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKeyPage {
    #[serde(default)]
    pub keys: Vec<KeySpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyBook {
    pub url: String,
    #[serde(
        with = "crate::serde_hex::bytes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub public_key_hash: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCredits {
    pub recipient: String,
    #[serde(default)]
    pub amount: TokenAmount,
    #[serde(default)]
    pub oracle: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateKeyPage {
    #[serde(default, alias = "operations")]
    pub operation: Vec<KeyPageOperation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockAccount {
    #[serde(default)]
    pub height: u64,
}

/// Credits to burn, in credit units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnCredits {
    #[serde(default)]
    pub amount: u64,
}

impl BurnCredits {
    pub fn from_credits(credits: u64) -> Self {
        Self {
            amount: credits.saturating_mul(CREDIT_PRECISION),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCredits {
    #[serde(default)]
    pub to: Vec<CreditRecipient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAccountAuth {
    #[serde(default)]
    pub operations: Vec<AccountAuthOperation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKey {
    #[serde(with = "crate::serde_hex::bytes", default)]
    pub new_key_hash: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The semantic content of a body, one variant per transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Payload {
    CreateIdentity(CreateIdentity),
    CreateTokenAccount(CreateTokenAccount),
    SendTokens(TokenTransfer),
    CreateDataAccount(CreateDataAccount),
    WriteData(WriteData),
    WriteDataTo(WriteDataTo),
    AcmeFaucet(AcmeFaucet),
    CreateToken(CreateToken),
    IssueTokens(TokenTransfer),
    BurnTokens(BurnTokens),
    CreateLiteTokenAccount,
    CreateKeyPage(CreateKeyPage),
    CreateKeyBook(CreateKeyBook),
    AddCredits(AddCredits),
    UpdateKeyPage(UpdateKeyPage),
    LockAccount(LockAccount),
    BurnCredits(BurnCredits),
    TransferCredits(TransferCredits),
    UpdateAccountAuth(UpdateAccountAuth),
    UpdateKey(UpdateKey),
}

impl Payload {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::CreateIdentity(_) => TransactionType::CreateIdentity,
            Self::CreateTokenAccount(_) => TransactionType::CreateTokenAccount,
            Self::SendTokens(_) => TransactionType::SendTokens,
            Self::CreateDataAccount(_) => TransactionType::CreateDataAccount,
            Self::WriteData(_) => TransactionType::WriteData,
            Self::WriteDataTo(_) => TransactionType::WriteDataTo,
            Self::AcmeFaucet(_) => TransactionType::AcmeFaucet,
            Self::CreateToken(_) => TransactionType::CreateToken,
            Self::IssueTokens(_) => TransactionType::IssueTokens,
            Self::BurnTokens(_) => TransactionType::BurnTokens,
            Self::CreateLiteTokenAccount => TransactionType::CreateLiteTokenAccount,
            Self::CreateKeyPage(_) => TransactionType::CreateKeyPage,
            Self::CreateKeyBook(_) => TransactionType::CreateKeyBook,
            Self::AddCredits(_) => TransactionType::AddCredits,
            Self::UpdateKeyPage(_) => TransactionType::UpdateKeyPage,
            Self::LockAccount(_) => TransactionType::LockAccount,
            Self::BurnCredits(_) => TransactionType::BurnCredits,
            Self::TransferCredits(_) => TransactionType::TransferCredits,
            Self::UpdateAccountAuth(_) => TransactionType::UpdateAccountAuth,
            Self::UpdateKey(_) => TransactionType::UpdateKey,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// A payload plus its optional epilogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    #[serde(flatten)]
    pub payload: Payload,
    #[serde(
        rename = "$epilogue",
        with = "crate::serde_hex::opt_bytes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub epilogue: Option<Vec<u8>>,
}

impl TransactionBody {
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            epilogue: None,
        }
    }

    pub fn with_epilogue(mut self, epilogue: Vec<u8>) -> Self {
        self.epilogue = Some(epilogue);
        self
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.payload.transaction_type()
    }

    /// The data entry of a data-write body, if it carries one.
    pub fn data_entry(&self) -> Option<&DataEntry> {
        match &self.payload {
            Payload::WriteData(body) => body.entry.as_ref(),
            Payload::WriteDataTo(body) => body.entry.as_ref(),
            _ => None,
        }
    }

    /// A copy with the data entry removed. The epilogue is kept, so the
    /// left Merkle leaf of a padded data-write covers it.
    pub fn without_entry(&self) -> Self {
        let mut stripped = self.clone();
        match &mut stripped.payload {
            Payload::WriteData(body) => body.entry = None,
            Payload::WriteDataTo(body) => body.entry = None,
            _ => {}
        }
        stripped
    }
}

impl From<Payload> for TransactionBody {
    fn from(payload: Payload) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::DataEntryKind;

    #[test]
    fn test_body_json_roundtrip_with_epilogue() {
        let body = TransactionBody::new(Payload::BurnCredits(BurnCredits { amount: 17 }))
            .with_epilogue(vec![0x00]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "burnCredits", "amount": 17, "$epilogue": "00"})
        );
        let back: TransactionBody = serde_json::from_value(json).unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn test_body_json_parses_reference_shapes() {
        let body: TransactionBody = serde_json::from_str(
            r#"{"type":"sendTokens","to":[{"url":"acc://bob.acme/tokens","amount":"1000"}]}"#,
        )
        .unwrap();
        let Payload::SendTokens(send) = &body.payload else {
            panic!("wrong variant: {:?}", body.payload);
        };
        assert_eq!(send.to[0].amount, TokenAmount(1000));
        assert_eq!(body.epilogue, None);

        let lite: TransactionBody =
            serde_json::from_str(r#"{"type":"createLiteTokenAccount"}"#).unwrap();
        assert_eq!(lite.transaction_type(), TransactionType::CreateLiteTokenAccount);

        let ops: TransactionBody = serde_json::from_str(
            r#"{"type":"updateKeyPage","operations":[{"type":"setThreshold","threshold":2}]}"#,
        )
        .unwrap();
        assert_eq!(ops.transaction_type(), TransactionType::UpdateKeyPage);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<TransactionBody>(r#"{"type":"mintNft"}"#).is_err());
    }

    #[test]
    fn test_without_entry_keeps_epilogue() {
        let body = TransactionBody::new(Payload::WriteDataTo(WriteDataTo {
            recipient: "acc://abc".into(),
            entry: Some(DataEntry::double_hash_from_strings(&["x"])),
        }))
        .with_epilogue(vec![0x00]);
        let stripped = body.without_entry();
        assert!(stripped.data_entry().is_none());
        assert_eq!(stripped.epilogue, Some(vec![0x00]));
        assert!(body.data_entry().is_some());
    }

    #[test]
    fn test_credit_precision_helpers() {
        assert_eq!(BurnCredits::from_credits(3).amount, 300);
        let r = CreditRecipient::from_credits("acc://alice.acme/page", 5);
        assert_eq!(r.amount, 500);
    }

    #[test]
    fn test_write_data_to_for_lite_account_appends_key_hash() {
        let public_key = [9u8; 32];
        let body = WriteDataTo::for_lite_account(&["hello"], &public_key);
        let entry = body.entry.as_ref().unwrap();
        assert_eq!(entry.kind, DataEntryKind::DoubleHash);
        assert_eq!(entry.data, vec![b"hello".to_vec(), sha256(&public_key).to_vec()]);
        assert_eq!(body.recipient, lite_data_account_url(&entry.data));
    }

    #[test]
    fn test_write_data_to_keeps_caller_ids() {
        let body = WriteDataTo::for_lite_account(&["content", "id-1"], &[1u8; 32]);
        let entry = body.entry.unwrap();
        assert_eq!(entry.data.len(), 2);
        assert_eq!(entry.data[1], b"id-1".to_vec());
    }
}

//! Core type definitions shared by transaction bodies.
//!
//! These types form the vocabulary of every body: which kind of transaction
//! it is, how token amounts are written, and the operation enums nested
//! inside `updateAccountAuth`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::CodecError;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents. The number is
/// written as field 1 of every body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    CreateIdentity,
    CreateTokenAccount,
    SendTokens,
    CreateDataAccount,
    WriteData,
    WriteDataTo,
    AcmeFaucet,
    CreateToken,
    IssueTokens,
    BurnTokens,
    CreateLiteTokenAccount,
    CreateKeyPage,
    CreateKeyBook,
    AddCredits,
    UpdateKeyPage,
    LockAccount,
    BurnCredits,
    TransferCredits,
    UpdateAccountAuth,
    UpdateKey,
}

impl TransactionType {
    pub const ALL: [TransactionType; 20] = [
        Self::CreateIdentity,
        Self::CreateTokenAccount,
        Self::SendTokens,
        Self::CreateDataAccount,
        Self::WriteData,
        Self::WriteDataTo,
        Self::AcmeFaucet,
        Self::CreateToken,
        Self::IssueTokens,
        Self::BurnTokens,
        Self::CreateLiteTokenAccount,
        Self::CreateKeyPage,
        Self::CreateKeyBook,
        Self::AddCredits,
        Self::UpdateKeyPage,
        Self::LockAccount,
        Self::BurnCredits,
        Self::TransferCredits,
        Self::UpdateAccountAuth,
        Self::UpdateKey,
    ];

    /// Wire value of the type. Note the gap: 19 and 20 are not user
    /// transactions.
    pub fn number(self) -> u64 {
        match self {
            Self::CreateIdentity => 1,
            Self::CreateTokenAccount => 2,
            Self::SendTokens => 3,
            Self::CreateDataAccount => 4,
            Self::WriteData => 5,
            Self::WriteDataTo => 6,
            Self::AcmeFaucet => 7,
            Self::CreateToken => 8,
            Self::IssueTokens => 9,
            Self::BurnTokens => 10,
            Self::CreateLiteTokenAccount => 11,
            Self::CreateKeyPage => 12,
            Self::CreateKeyBook => 13,
            Self::AddCredits => 14,
            Self::UpdateKeyPage => 15,
            Self::LockAccount => 16,
            Self::BurnCredits => 17,
            Self::TransferCredits => 18,
            Self::UpdateAccountAuth => 21,
            Self::UpdateKey => 22,
        }
    }

    pub fn from_number(n: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.number() == n)
    }

    /// camelCase name as used in JSON bodies.
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateIdentity => "createIdentity",
            Self::CreateTokenAccount => "createTokenAccount",
            Self::SendTokens => "sendTokens",
            Self::CreateDataAccount => "createDataAccount",
            Self::WriteData => "writeData",
            Self::WriteDataTo => "writeDataTo",
            Self::AcmeFaucet => "acmeFaucet",
            Self::CreateToken => "createToken",
            Self::IssueTokens => "issueTokens",
            Self::BurnTokens => "burnTokens",
            Self::CreateLiteTokenAccount => "createLiteTokenAccount",
            Self::CreateKeyPage => "createKeyPage",
            Self::CreateKeyBook => "createKeyBook",
            Self::AddCredits => "addCredits",
            Self::UpdateKeyPage => "updateKeyPage",
            Self::LockAccount => "lockAccount",
            Self::BurnCredits => "burnCredits",
            Self::TransferCredits => "transferCredits",
            Self::UpdateAccountAuth => "updateAccountAuth",
            Self::UpdateKey => "updateKey",
        }
    }

    /// Whether the body hash is the two-leaf Merkle form over the entry.
    pub fn is_data_write(self) -> bool {
        matches!(self, Self::WriteData | Self::WriteDataTo)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransactionType {
    type Err = CodecError;

    /// Accepts the camelCase name (case-insensitively, so `WriteData` from
    /// builder output also parses) or the decimal wire number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u64>() {
            return Self::from_number(n)
                .ok_or_else(|| CodecError::malformed("type", format!("unknown transaction type {n}")));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::malformed("type", format!("unknown transaction type '{s}'")))
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeVisitor;

        impl Visitor<'_> for TypeVisitor {
            type Value = TransactionType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a transaction type name or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                TransactionType::from_number(v)
                    .ok_or_else(|| E::custom(format!("unknown transaction type {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("unknown transaction type {v}")))
                    .and_then(|n| self.visit_u64(n))
            }
        }

        deserializer.deserialize_any(TypeVisitor)
    }
}

// ---------------------------------------------------------------------------
// TokenAmount
// ---------------------------------------------------------------------------

/// Arbitrary-precision token amount in base units.
///
/// On the wire this is a big integer (minimal big-endian bytes); in JSON it
/// is a decimal string, though plain numbers are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(pub u128);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(u128::from(v))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAmount {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| CodecError::malformed("amount", format!("'{s}' is not an unsigned integer")))
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or decimal string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(TokenAmount::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(TokenAmount::from)
                    .map_err(|_| E::custom(format!("negative amount {v}")))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

// ---------------------------------------------------------------------------
// AccountAuthOperationType
// ---------------------------------------------------------------------------

/// Operation kind inside an `updateAccountAuth` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountAuthOperationType {
    Enable,
    Disable,
    #[serde(alias = "add")]
    AddAuthority,
    #[serde(alias = "remove")]
    RemoveAuthority,
}

impl AccountAuthOperationType {
    pub fn number(self) -> u64 {
        match self {
            Self::Enable => 1,
            Self::Disable => 2,
            Self::AddAuthority => 3,
            Self::RemoveAuthority => 4,
        }
    }
}

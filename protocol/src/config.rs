//! # Protocol Configuration & Constants
//!
//! Every magic number the encoder, hasher and signer depend on lives here.
//! All of them are fixed by the remote ledger's wire protocol, so changing
//! one is not a tuning decision: it produces hashes the network rejects.

// ---------------------------------------------------------------------------
// Wire Format
// ---------------------------------------------------------------------------

/// Highest field number the binary encoding allows inside one structure.
/// Field numbers are written as a single-byte varint, so 1..=32 is the
/// whole namespace.
pub const MAX_FIELD_NUMBER: u32 = 32;

/// Hash output length in bytes. Every digest in the chain is SHA-256.
pub const HASH_LENGTH: usize = 32;

/// Body encodings of exactly this length are rejected by the remote node,
/// which cannot tell them apart from a concatenated pair of hashes.
pub const FORBIDDEN_BODY_LENGTH: usize = 64;

/// Single epilogue byte appended to bodies that would otherwise be
/// [`FORBIDDEN_BODY_LENGTH`] bytes long.
pub const PADDING_BYTE: u8 = 0x00;

/// Longest varint the decoder accepts. A `u64` never needs more than ten
/// 7-bit groups.
pub const MAX_VARINT_LENGTH: usize = 10;

// ---------------------------------------------------------------------------
// Accounts & URLs
// ---------------------------------------------------------------------------

/// Scheme prefix of every account URL.
pub const URL_SCHEME: &str = "acc://";

/// Token path appended to a lite identity to name its token account.
pub const LITE_TOKEN_SUFFIX: &str = "ACME";

/// Number of key-hash bytes that make up a lite identity.
pub const LITE_KEY_HASH_LENGTH: usize = 20;

/// Number of trailing checksum bytes in a lite identity.
pub const LITE_CHECKSUM_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// Credit amounts on the wire are expressed in hundredths of a credit.
pub const CREDIT_PRECISION: u64 = 100;

// ---------------------------------------------------------------------------
// Signature Types
// ---------------------------------------------------------------------------

/// Signature type tag for plain Ed25519 signatures.
pub const SIGNATURE_TYPE_ED25519: u64 = 2;

/// Signature type tag for Factom-style RCD1 (Ed25519 key, RCD hash).
pub const SIGNATURE_TYPE_RCD1: u64 = 3;

/// Signature type tag for Bitcoin-style secp256k1 signatures.
pub const SIGNATURE_TYPE_BTC: u64 = 8;

/// Signature type tag for Ethereum-style secp256k1 signatures.
pub const SIGNATURE_TYPE_ETH: u64 = 10;

/// RCD type byte prepended to the public key before double hashing.
pub const RCD1_PREFIX: u8 = 0x01;

// ---------------------------------------------------------------------------
// Data Entries
// ---------------------------------------------------------------------------

/// Data entry tag for entries whose hash is the plain Merkle root.
pub const DATA_ENTRY_ACCUMULATE: u64 = 2;

/// Data entry tag for entries whose hash is SHA-256 of the Merkle root.
pub const DATA_ENTRY_DOUBLE_HASH: u64 = 3;

//! # Identity Module
//!
//! Account URLs derived from key material rather than created on chain.
//!
//! - **Lite identity**: `acc://` + first 20 bytes of the key hash + a 4-byte
//!   checksum, in hex. What a fresh key can receive tokens at.
//! - **Lite token account**: the identity's `/ACME` sub-account.
//! - **Lite data account**: addressed by the hash of a data entry's
//!   external ids, used by `writeDataTo`.
//!
//! The key hash itself is algorithm specific and comes from
//! [`KeyPair::key_hash`](crate::crypto::KeyPair::key_hash).

pub mod lite;

pub use lite::{lite_data_account_url, LiteIdentity, LiteIdentityError};

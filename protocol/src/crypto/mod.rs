//! # Cryptographic Primitives
//!
//! Hashing, keys and signature checks for the transaction hash chain.
//!
//! - **SHA-256** for every digest in the chain, plus the Merkle folding used
//!   for data entries and data-write body hashes.
//! - **Ed25519** for the native signing path and for RCD1.
//! - **secp256k1** (via `k256`) for BTC and ETH style signatures.
//!
//! Everything here is a thin, typed wrapper around audited implementations.
//! Nothing is hand-rolled.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{merkle_combine, merkle_hash, sha256, sha256_multi, Hash32};
pub use keys::{key_hash, Algorithm, KeyError, KeyPair};
pub use signatures::{verify, SignatureError};

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Accu Protocol — Core Library
//!
//! Byte-exact transaction encoding and signing for an Accumulate-style
//! ledger. The remote node hashes and verifies the binary encoding of every
//! transaction, so a client that disagrees on a single byte produces a
//! signature the node rejects. This crate is the part that has to agree.
//!
//! ## Architecture
//!
//! - **codec** — Tagged-field writer and reader, the base and extended body
//!   encoders, key-page operations and the header encoder.
//! - **crypto** — SHA-256, Merkle folding, keys and signatures for
//!   ed25519, rcd1, btc and eth.
//! - **identity** — Lite identity, lite token and lite data account URLs.
//! - **transaction** — Typed bodies, padding guard, hash chain, signing and
//!   envelope verification.
//! - **config** — Wire-protocol constants.
//!
//! ## Example
//!
//! ```
//! use accu_protocol::crypto::{Algorithm, KeyPair};
//! use accu_protocol::transaction::{
//!     sign_transaction, verify_envelope, BurnCredits, Payload, SigningRequest,
//! };
//! use accu_protocol::codec::ExtendedEncoder;
//!
//! let key = KeyPair::generate(Algorithm::Eth);
//! let request = SigningRequest::new(
//!     "acc://alice.acme",
//!     "acc://alice.acme/book/1",
//!     Payload::BurnCredits(BurnCredits::from_credits(3)),
//! );
//! let signed = sign_transaction(&key, request).unwrap();
//! let hashes = verify_envelope(&ExtendedEncoder::new(), &signed.envelope).unwrap();
//! assert_eq!(hashes.transaction, signed.hashes.transaction);
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Fail loudly. An encoding we are unsure of is an error, never a guess.
//! 2. No unsafe code, no global state, no I/O.
//! 3. Every wire layout has a test pinned to exact bytes.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod serde_hex;
pub mod transaction;

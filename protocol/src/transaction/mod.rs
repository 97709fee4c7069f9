//! # Transaction Module
//!
//! Typed bodies, the hash chain, padding, signing and verification for
//! ledger transactions. The output of this module is a signed [`Envelope`];
//! delivering it is somebody else's job.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — TransactionType, TokenAmount, account-auth operation kinds
//! data.rs         — data entries and their independent hashing
//! key_page.rs     — key specs and key-page operations
//! body.rs         — Payload (one variant per kind) and TransactionBody
//! header.rs       — TransactionHeader
//! padding.rs      — 64-byte body guard
//! hash_chain.rs   — header, body and transaction hashes
//! signing.rs      — signature metadata, initiator, preimage, TransactionSigner
//! envelope.rs     — Envelope and SignatureRecord (JSON shape of the node)
//! verification.rs — recompute and check an envelope
//! ```
//!
//! ## Signing flow
//!
//! 1. **Pad** — [`apply_padding`] fixes up 64-byte encodings.
//! 2. **Initiate** — metadata is encoded and hashed into the initiator.
//! 3. **Hash** — [`compute_hashes`] derives the transaction hash.
//! 4. **Sign** — the key signs `sha256(initiator ‖ transaction_hash)`.
//! 5. **Assemble** — header, body and signature go into an [`Envelope`].
//!
//! ## Design Decisions
//!
//! - Amounts are integers in base units; no floating point anywhere.
//! - Zero values are never encoded. An absent field and a zero field hash
//!   the same on the node, so they must encode the same here.
//! - The encoder is a type parameter, not a global: the base encoder and the
//!   extended one are both plain values and can be swapped per signer.

pub mod body;
pub mod data;
pub mod envelope;
pub mod hash_chain;
pub mod header;
pub mod key_page;
pub mod padding;
pub mod signing;
pub mod types;
pub mod verification;

pub use body::{
    AccountAuthOperation, AcmeFaucet, AddCredits, BurnCredits, BurnTokens, CreateDataAccount,
    CreateIdentity, CreateKeyBook, CreateKeyPage, CreateToken, CreateTokenAccount,
    CreditRecipient, LockAccount, Payload, TokenRecipient, TokenTransfer, TransactionBody,
    TransferCredits, UpdateAccountAuth, UpdateKey, UpdateKeyPage, WriteData, WriteDataTo,
};
pub use data::{DataEntry, DataEntryKind};
pub use envelope::{Envelope, SignatureRecord, Transaction};
pub use hash_chain::{body_hash, compute_hashes, transaction_hash, TransactionHashes};
pub use header::TransactionHeader;
pub use key_page::{KeyPageOperation, KeySpec};
pub use padding::{apply_padding, PaddedBody};
pub use signing::{
    now_micros, sign_transaction, signing_preimage, SignatureMetadata, SignedTransaction,
    SigningError, SigningRequest, TransactionSigner,
};
pub use types::{AccountAuthOperationType, TokenAmount, TransactionType};
pub use verification::{verify_envelope, VerificationError};

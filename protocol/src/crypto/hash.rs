//! # Hashing Utilities
//!
//! Every digest in the transaction hash chain is SHA-256. That is not our
//! choice: the remote node hashes with SHA-256, so we do too.
//!
//! ## Merkle hashing
//!
//! The node folds lists of hashes with a Merkle mountain range rather than
//! a balanced binary tree. Leaves are appended one at a time; whenever two
//! subtrees of equal height meet they are combined into their parent. The
//! resulting root (the "anchor") folds the remaining subtree roots from the
//! lowest to the highest. For exactly two leaves this degenerates to
//! `sha256(left || right)`, which is the only shape the body hash needs; data
//! entries with many items exercise the general case.

use sha2::{Digest, Sha256};

use crate::config::HASH_LENGTH;

/// A 32-byte digest.
pub type Hash32 = [u8; HASH_LENGTH];

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use accu_protocol::crypto::sha256;
///
/// let hash = sha256(b"");
/// assert_eq!(
///     hex::encode(hash),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn sha256(data: &[u8]) -> Hash32 {
    Sha256::digest(data).into()
}

/// Hash multiple byte slices as if they were concatenated, without
/// allocating the concatenation.
pub fn sha256_multi(parts: &[&[u8]]) -> Hash32 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Parent of two Merkle nodes: `sha256(left || right)`.
pub fn merkle_combine(left: &Hash32, right: &Hash32) -> Hash32 {
    sha256_multi(&[left.as_slice(), right.as_slice()])
}

/// Merkle mountain range root over `leaves`, in order.
///
/// A single leaf is its own root. An empty list yields all zeros, the
/// "empty tree" sentinel.
pub fn merkle_hash(leaves: &[Hash32]) -> Hash32 {
    // pending[i] holds the root of a complete subtree of 2^i leaves.
    let mut pending: Vec<Option<Hash32>> = Vec::new();

    for leaf in leaves {
        let mut carry = *leaf;
        let mut placed = false;
        for slot in pending.iter_mut() {
            match slot.take() {
                None => {
                    *slot = Some(carry);
                    placed = true;
                    break;
                }
                Some(left) => carry = merkle_combine(&left, &carry),
            }
        }
        if !placed {
            pending.push(Some(carry));
        }
    }

    let mut anchor: Option<Hash32> = None;
    for root in pending.iter().flatten() {
        anchor = Some(match anchor {
            None => *root,
            Some(lower) => merkle_combine(root, &lower),
        });
    }
    anchor.unwrap_or([0u8; HASH_LENGTH])
}

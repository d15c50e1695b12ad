//! # Hashing Utilities
//!
//! SHA-256 helpers and the entry digest ("HashEngine").
//!
//! ## Canonical preimage
//!
//! An entry's digest covers, in this exact order:
//!
//! ```text
//! index || timestamp || payload || prev_digest || nonce
//! ```
//!
//! Integers are rendered in decimal, the remaining fields are taken as
//! their UTF-8 text. There are no separators. The 32-byte SHA-256 output
//! is hex encoded (lowercase, 64 characters), and that string is what
//! entries store and what the difficulty predicate inspects.

use sha2::{Digest, Sha256};

/// Length in characters of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use proofchain::crypto::sha256;
///
/// let hash = sha256(b"proofchain");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA-256 of `data`, hex encoded.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Compute the digest of an entry from its committed fields.
///
/// Deterministic and side-effect free. The miner and the validator both
/// call this, so an entry produced by mining always re-validates.
///
/// # Example
///
/// ```
/// use proofchain::crypto::entry_digest;
///
/// let a = entry_digest(1, "2026-01-01T00:00:00+00:00", 42, "", "0");
/// let b = entry_digest(1, "2026-01-01T00:00:00+00:00", 42, "", "0");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn entry_digest(
    index: u64,
    timestamp: &str,
    payload: i64,
    prev_digest: &str,
    nonce: &str,
) -> String {
    // Feed the hasher field by field instead of building the record string.
    // The byte stream is identical to the concatenation.
    let mut hasher = Sha256::new();
    hasher.update(index.to_string().as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(payload.to_string().as_bytes());
    hasher.update(prev_digest.as_bytes());
    hasher.update(nonce.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true if `digest` starts with at least `difficulty` `'0'`
/// characters.
///
/// A difficulty of zero is satisfied by any digest, including an empty one.
pub fn has_leading_zeros(digest: &str, difficulty: u32) -> bool {
    let required = difficulty as usize;
    digest.len() >= required && digest.bytes().take(required).all(|b| b == b'0')
}

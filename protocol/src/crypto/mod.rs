//! # Cryptographic Primitives
//!
//! Everything the chain needs from cryptography is a single hash function:
//! SHA-256, hex encoded. Entries commit to their predecessor through it and
//! proof-of-work is measured against its output.
//!
//! Mining and validation both go through [`entry_digest`]. There is exactly
//! one canonical preimage layout, and it lives in `hash.rs`.

pub mod hash;

pub use hash::{entry_digest, has_leading_zeros, sha256, sha256_hex};

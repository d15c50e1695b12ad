//! Error types for the chain.
//!
//! Every failure is recoverable from the caller's point of view: a rejected
//! candidate is dropped, a stopped search returns control, and a bad
//! configuration is reported before anything runs.

use thiserror::Error;

/// Why a candidate entry was refused by the validator.
///
/// Checks run in a fixed order and the first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The candidate does not sit directly after the predecessor.
    #[error("index mismatch: expected {expected}, got {got}")]
    IndexMismatch {
        /// `predecessor.index + 1`.
        expected: u64,
        /// The candidate's index.
        got: u64,
    },

    /// The predecessor already sits at the last representable index.
    #[error("index space exhausted after {predecessor}")]
    IndexExhausted {
        /// The predecessor's index.
        predecessor: u64,
    },

    /// The candidate does not commit to the predecessor's digest.
    #[error("prev digest mismatch: expected {expected}, got {got}")]
    LinkMismatch {
        /// The predecessor's digest.
        expected: String,
        /// The candidate's `prev_digest`.
        got: String,
    },

    /// The stored digest is not the digest of the entry's fields.
    #[error("digest mismatch at index {index}: stored {stored}, computed {computed}")]
    DigestMismatch {
        /// Index of the offending entry.
        index: u64,
        /// Digest carried by the entry.
        stored: String,
        /// Digest recomputed from the entry's fields.
        computed: String,
    },

    /// The candidate claims less work than the chain demands.
    #[error("difficulty below required at index {index}: required {required}, got {got}")]
    DifficultyBelowRequired {
        /// Index of the offending entry.
        index: u64,
        /// Difficulty carried by the predecessor.
        required: u32,
        /// Difficulty the candidate claims.
        got: u32,
    },

    /// The digest is consistent but does not satisfy the entry's difficulty.
    #[error("insufficient work at index {index}: digest {digest} lacks {difficulty} leading zeros")]
    InsufficientWork {
        /// Index of the offending entry.
        index: u64,
        /// The entry's digest.
        digest: String,
        /// Difficulty the entry claims.
        difficulty: u32,
    },

    /// The root of a sequence is not a well-formed genesis entry.
    #[error("malformed genesis: {0}")]
    MalformedGenesis(String),
}

/// Why the nonce search stopped without producing an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    /// The cancel flag was raised mid-search.
    #[error("mining cancelled after {attempts} attempts")]
    Cancelled {
        /// Nonces tried before stopping.
        attempts: u64,
    },

    /// The configured attempt ceiling was reached.
    #[error("no satisfying nonce within {attempts} attempts")]
    AttemptsExhausted {
        /// Nonces tried, equal to the ceiling.
        attempts: u64,
    },

    /// The difficulty cannot be met by any digest.
    #[error("difficulty {difficulty} exceeds maximum {max}")]
    DifficultyTooHigh {
        /// Requested difficulty.
        difficulty: u32,
        /// Largest satisfiable difficulty.
        max: u32,
    },
}

/// Errors from the mine-then-append pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductionError {
    /// The search stopped before a candidate was found.
    #[error("mining failed: {0}")]
    Mining(#[from] MiningError),

    /// The mined candidate was refused by the store.
    #[error("append rejected: {0}")]
    Rejected(#[from] RejectReason),
}

/// Invalid runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Difficulty is larger than a digest is long.
    #[error("difficulty {difficulty} exceeds maximum {max}")]
    DifficultyTooHigh {
        /// Requested difficulty.
        difficulty: u32,
        /// Largest satisfiable difficulty.
        max: u32,
    },

    /// An attempt ceiling of zero could never mine anything.
    #[error("attempt ceiling must be at least 1")]
    ZeroAttemptCeiling,
}

//! # Entry Validation
//!
//! Structural and cryptographic checks between consecutive entries.
//!
//! [`validate`] runs five checks against a candidate and its predecessor,
//! stopping at the first failure:
//!
//! 1. **Index** - `candidate.index == predecessor.index + 1`.
//! 2. **Linkage** - `candidate.prev_digest == predecessor.digest`.
//! 3. **Digest** - the stored digest equals the recomputed one.
//! 4. **Floor** - `candidate.difficulty >= predecessor.difficulty`.
//! 5. **Work** - the digest carries `candidate.difficulty` leading zeros.
//!
//! Check 3 only proves the entry is internally consistent. Check 5 is the
//! one that requires work to have been done, and check 4 stops a candidate
//! from lowering the bar it is measured against. Genesis carries the
//! configured difficulty, so the floor holds from the root onward.

use crate::crypto::hash::has_leading_zeros;
use crate::error::RejectReason;
use crate::storage::entry::Entry;

/// Check `candidate` as the direct successor of `predecessor`.
pub fn validate(candidate: &Entry, predecessor: &Entry) -> Result<(), RejectReason> {
    let expected = predecessor
        .index
        .checked_add(1)
        .ok_or(RejectReason::IndexExhausted {
            predecessor: predecessor.index,
        })?;
    if candidate.index != expected {
        return Err(RejectReason::IndexMismatch {
            expected,
            got: candidate.index,
        });
    }

    if candidate.prev_digest != predecessor.digest {
        return Err(RejectReason::LinkMismatch {
            expected: predecessor.digest.clone(),
            got: candidate.prev_digest.clone(),
        });
    }

    verify_digest(candidate)?;

    if candidate.difficulty < predecessor.difficulty {
        return Err(RejectReason::DifficultyBelowRequired {
            index: candidate.index,
            required: predecessor.difficulty,
            got: candidate.difficulty,
        });
    }

    if !has_leading_zeros(&candidate.digest, candidate.difficulty) {
        return Err(RejectReason::InsufficientWork {
            index: candidate.index,
            digest: candidate.digest.clone(),
            difficulty: candidate.difficulty,
        });
    }

    Ok(())
}

/// Boolean form of [`validate`].
pub fn is_valid(candidate: &Entry, predecessor: &Entry) -> bool {
    validate(candidate, predecessor).is_ok()
}

/// Check that a sequence is rooted at a well-formed genesis.
///
/// Genesis is not mined, so only its shape and digest are checked.
pub fn validate_genesis(genesis: &Entry) -> Result<(), RejectReason> {
    if genesis.index != 0 {
        return Err(RejectReason::MalformedGenesis(format!(
            "index is {}, expected 0",
            genesis.index
        )));
    }
    if !genesis.is_genesis() {
        return Err(RejectReason::MalformedGenesis(
            "prev digest must be empty".to_string(),
        ));
    }
    verify_digest(genesis)
}

/// Re-check every invariant over a full sequence.
///
/// An empty slice is rejected: an initialized chain always has genesis.
pub fn verify_chain(entries: &[Entry]) -> Result<(), RejectReason> {
    let genesis = entries
        .first()
        .ok_or_else(|| RejectReason::MalformedGenesis("chain is empty".to_string()))?;
    validate_genesis(genesis)?;

    for pair in entries.windows(2) {
        validate(&pair[1], &pair[0])?;
    }
    Ok(())
}

fn verify_digest(entry: &Entry) -> Result<(), RejectReason> {
    let computed = entry.compute_digest();
    if entry.digest != computed {
        return Err(RejectReason::DigestMismatch {
            index: entry.index,
            stored: entry.digest.clone(),
            computed,
        });
    }
    Ok(())
}

//! # Chain Store
//!
//! The single owner of the accepted entry sequence.
//!
//! ## Locking
//!
//! One `parking_lot::RwLock` covers the whole sequence, and it covers reads
//! as well as writes. [`ChainStore::append`] validates against the tail and
//! pushes under the write lock, so two appends racing on the same tail
//! cannot both succeed: the loser sees the winner as its predecessor and
//! fails the index check. Every read takes the read lock and returns owned
//! clones, so callers never hold a reference across a mutation and never
//! observe a half-applied append.
//!
//! The sequence is never empty. The only constructors take (or build) a
//! genesis entry, and the genesis difficulty becomes the store's required
//! difficulty. The validator refuses any entry claiming less than its
//! predecessor, so nothing below that value is ever admitted.

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::RejectReason;
use crate::storage::entry::Entry;
use crate::validation::{validate, validate_genesis, verify_chain};

/// Append-only, hash-linked sequence of entries.
pub struct ChainStore {
    entries: RwLock<Vec<Entry>>,
    difficulty: u32,
}

impl fmt::Debug for ChainStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("ChainStore")
            .field("len", &entries.len())
            .field("difficulty", &self.difficulty)
            .field("tail", &entries.last().map(|e| e.digest.as_str()))
            .finish()
    }
}

impl ChainStore {
    /// Creates a store seeded with a freshly built genesis entry.
    pub fn initialize(difficulty: u32) -> Self {
        let genesis = Entry::genesis(difficulty);
        debug!(digest = %genesis.digest, difficulty, "genesis entry created");
        Self {
            difficulty: genesis.difficulty,
            entries: RwLock::new(vec![genesis]),
        }
    }

    /// Creates a store rooted at the given genesis entry.
    pub fn with_genesis(genesis: Entry) -> Result<Self, RejectReason> {
        validate_genesis(&genesis)?;
        Ok(Self {
            difficulty: genesis.difficulty,
            entries: RwLock::new(vec![genesis]),
        })
    }

    /// Minimum difficulty every appended entry must claim.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Validate `candidate` against the current tail and, if it passes,
    /// make it the new tail. Nothing is stored on rejection.
    pub fn append(&self, candidate: Entry) -> Result<(), RejectReason> {
        let mut entries = self.entries.write();
        let tail = entries
            .last()
            .ok_or_else(|| RejectReason::MalformedGenesis("chain is empty".to_string()))?;

        if let Err(reason) = validate(&candidate, tail) {
            warn!(
                index = candidate.index,
                tail = tail.index,
                %reason,
                "candidate rejected"
            );
            return Err(reason);
        }

        debug!(
            index = candidate.index,
            digest = %candidate.digest,
            "entry appended"
        );
        entries.push(candidate);
        Ok(())
    }

    /// A copy of the whole sequence at a single point in time.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.read().clone()
    }

    /// A copy of the most recently accepted entry.
    pub fn tail(&self) -> Entry {
        // The vector is seeded with genesis and only ever grows.
        self.entries.read().last().cloned().unwrap_or_else(|| {
            unreachable!("chain store always holds genesis")
        })
    }

    /// The entry at `index`, if the chain is that long.
    pub fn get(&self, index: u64) -> Option<Entry> {
        let entries = self.entries.read();
        usize::try_from(index)
            .ok()
            .and_then(|i| entries.get(i).cloned())
    }

    /// Number of entries, genesis included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Always false: an initialized store holds at least genesis.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Re-check every invariant over the stored sequence.
    pub fn verify(&self) -> Result<(), RejectReason> {
        verify_chain(&self.entries.read())
    }
}

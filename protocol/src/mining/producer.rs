//! # Entry Production Pipeline
//!
//! `EntryProducer` joins the miner and the chain store into the single
//! logical step "extend the current tail with this payload":
//!
//! ```text
//! 1. LOCK    - take the producer's mining mutex
//! 2. READ    - copy the current tail out of the store
//! 3. MINE    - nonce search, no store lock held
//! 4. APPEND  - store validates against its tail and commits
//! ```
//!
//! ## Thread Safety
//!
//! Producers are serialized on the mining mutex, so in normal operation the
//! tail read in step 2 is still the tail in step 4. Anything that appends to
//! the store without going through this producer can still move the tail;
//! the store then rejects the stale candidate and nothing is committed.
//! Readers only ever touch the store's read lock, so a long search never
//! blocks them.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::ProductionError;
use crate::mining::cancel::CancelFlag;
use crate::mining::miner::Miner;
use crate::storage::chain::ChainStore;
use crate::storage::entry::Entry;

/// A committed entry together with what it cost to mine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedEntry {
    /// The entry now at the tail of the chain.
    pub entry: Entry,
    /// Nonces hashed to find it.
    pub attempts: u64,
    /// Wall time spent in the nonce search.
    pub elapsed: Duration,
}

/// Serialized mine-then-append over a shared [`ChainStore`].
#[derive(Debug)]
pub struct EntryProducer {
    store: Arc<ChainStore>,
    miner: Miner,
    mining_lock: Mutex<()>,
    cancel: CancelFlag,
}

impl EntryProducer {
    /// Creates a producer appending to `store` with `miner`.
    ///
    /// A miner set below the store's difficulty still runs, but every
    /// entry it finds is refused on append.
    pub fn new(store: Arc<ChainStore>, miner: Miner) -> Self {
        if miner.difficulty() < store.difficulty() {
            warn!(
                miner = miner.difficulty(),
                required = store.difficulty(),
                "miner difficulty below chain difficulty"
            );
        }
        Self {
            store,
            miner,
            mining_lock: Mutex::new(()),
            cancel: CancelFlag::new(),
        }
    }

    /// Mine an entry carrying `payload` on top of the current tail and
    /// commit it.
    ///
    /// Blocks the calling thread for the whole search. Run it off any
    /// async executor.
    pub fn produce(&self, payload: i64) -> Result<ProducedEntry, ProductionError> {
        let _guard = self.mining_lock.lock();

        let tail = self.store.tail();
        let mined = self
            .miner
            .mine_with_stats(&tail, payload, &self.cancel)
            .map_err(|e| {
                warn!(tail = tail.index, error = %e, "mining stopped");
                e
            })?;

        self.store.append(mined.entry.clone())?;

        info!(
            index = mined.entry.index,
            digest = %mined.entry.digest,
            attempts = mined.attempts,
            elapsed_ms = mined.elapsed.as_millis() as u64,
            "entry produced"
        );

        Ok(ProducedEntry {
            entry: mined.entry,
            attempts: mined.attempts,
            elapsed: mined.elapsed,
        })
    }

    /// Abort the in-flight search, and every later one.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// The flag [`EntryProducer::shutdown`] raises.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// The store this producer appends to.
    pub fn store(&self) -> &Arc<ChainStore> {
        &self.store
    }

    /// Difficulty new entries are mined at.
    pub fn difficulty(&self) -> u32 {
        self.miner.difficulty()
    }
}

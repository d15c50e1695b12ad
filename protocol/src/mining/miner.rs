//! # Nonce Search
//!
//! The miner builds a successor of a given predecessor and walks the nonce
//! space from [`INITIAL_NONCE`] upward until the entry digest carries the
//! required number of leading zeros.
//!
//! Each attempt renders the counter as lowercase hex into the entry's
//! `nonce` field and hashes the entry through
//! [`entry_digest`](crate::crypto::hash::entry_digest), the same function the
//! validator uses. Before every attempt the miner checks its cancel flag and
//! attempt ceiling; after every miss it hands control to its [`Pacing`]
//! policy.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::{ChainConfig, INITIAL_NONCE, MAX_DIFFICULTY};
use crate::crypto::hash::has_leading_zeros;
use crate::error::MiningError;
use crate::mining::cancel::CancelFlag;
use crate::mining::pacing::{self, NoPacing, Pacing};
use crate::storage::entry::Entry;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinerConfig {
    /// Leading zero characters required of every mined digest.
    pub difficulty: u32,
    /// Stop after this many attempts. `None` searches until success or
    /// cancellation.
    pub max_attempts: Option<u64>,
}

impl MinerConfig {
    /// Unbounded search at the given difficulty.
    pub fn with_difficulty(difficulty: u32) -> Self {
        Self {
            difficulty,
            max_attempts: None,
        }
    }
}

impl From<&ChainConfig> for MinerConfig {
    fn from(config: &ChainConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            max_attempts: config.max_attempts,
        }
    }
}

/// A successfully mined entry with its search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mined {
    /// The finished entry, digest set.
    pub entry: Entry,
    /// Nonces hashed, including the winning one.
    pub attempts: u64,
    /// Wall time spent searching.
    pub elapsed: Duration,
}

/// Proof-of-work miner.
#[derive(Debug)]
pub struct Miner {
    config: MinerConfig,
    pacing: Box<dyn Pacing>,
}

impl Miner {
    /// Creates a miner that searches without pacing.
    pub fn new(config: MinerConfig) -> Self {
        Self {
            config,
            pacing: Box::new(NoPacing),
        }
    }

    /// Creates a miner from the runtime chain configuration, including its
    /// pacing delay.
    pub fn from_chain_config(config: &ChainConfig) -> Self {
        Self {
            config: MinerConfig::from(config),
            pacing: pacing::for_delay(config.pacing),
        }
    }

    /// Replace the pacing policy.
    pub fn with_pacing(mut self, pacing: impl Pacing + 'static) -> Self {
        self.pacing = Box::new(pacing);
        self
    }

    /// Difficulty this miner targets.
    pub fn difficulty(&self) -> u32 {
        self.config.difficulty
    }

    /// Mine a successor of `predecessor` carrying `payload`.
    pub fn mine(
        &self,
        predecessor: &Entry,
        payload: i64,
        cancel: &CancelFlag,
    ) -> Result<Entry, MiningError> {
        self.mine_with_stats(predecessor, payload, cancel)
            .map(|mined| mined.entry)
    }

    /// Like [`Miner::mine`], also reporting attempts and elapsed time.
    pub fn mine_with_stats(
        &self,
        predecessor: &Entry,
        payload: i64,
        cancel: &CancelFlag,
    ) -> Result<Mined, MiningError> {
        let candidate = Entry::successor_of(predecessor, payload, self.config.difficulty);
        self.search(candidate, cancel)
    }

    /// Run the nonce search over a prepared candidate.
    ///
    /// Only `nonce` and `digest` are written; every other field is
    /// committed as given.
    pub fn search(&self, mut candidate: Entry, cancel: &CancelFlag) -> Result<Mined, MiningError> {
        let difficulty = candidate.difficulty;
        if difficulty > MAX_DIFFICULTY {
            return Err(MiningError::DifficultyTooHigh {
                difficulty,
                max: MAX_DIFFICULTY,
            });
        }

        let started = Instant::now();
        let mut nonce = INITIAL_NONCE;
        let mut attempts = 0u64;

        loop {
            if cancel.is_cancelled() {
                debug!(index = candidate.index, attempts, "mining cancelled");
                return Err(MiningError::Cancelled { attempts });
            }
            if let Some(max) = self.config.max_attempts {
                if attempts >= max {
                    debug!(index = candidate.index, attempts, "attempt ceiling reached");
                    return Err(MiningError::AttemptsExhausted { attempts });
                }
            }

            candidate.nonce = format!("{:x}", nonce);
            let digest = candidate.compute_digest();
            attempts += 1;

            if has_leading_zeros(&digest, difficulty) {
                let elapsed = started.elapsed();
                debug!(
                    index = candidate.index,
                    %digest,
                    nonce = %candidate.nonce,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "work done"
                );
                candidate.digest = digest;
                return Ok(Mined {
                    entry: candidate,
                    attempts,
                    elapsed,
                });
            }

            trace!(index = candidate.index, %digest, "do more work");
            self.pacing.pause(attempts);
            nonce += 1;
        }
    }
}

//! # Chain Configuration & Constants
//!
//! Every tunable of the chain lives here: the defaults the node falls back
//! to, the hard limits the miner enforces, and [`ChainConfig`], the runtime
//! bundle the node assembles from its CLI/environment.

use std::time::Duration;

use crate::crypto::hash::DIGEST_HEX_LEN;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Proof-of-Work
// ---------------------------------------------------------------------------

/// Leading zero hex characters required when nothing else is configured.
/// One character means roughly one in sixteen nonces succeeds.
pub const DEFAULT_DIFFICULTY: u32 = 1;

/// Upper bound for difficulty. A SHA-256 digest has 64 hex characters, so
/// anything above this can never be satisfied.
pub const MAX_DIFFICULTY: u32 = DIGEST_HEX_LEN as u32;

/// First nonce value tried by the miner.
pub const INITIAL_NONCE: u64 = 0;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Payload committed by the genesis entry.
pub const GENESIS_PAYLOAD: i64 = 0;

/// Predecessor digest sentinel carried by genesis.
pub const GENESIS_PREV_DIGEST: &str = "";

/// Nonce placeholder carried by genesis. Genesis is never mined.
pub const GENESIS_NONCE: &str = "";

// ---------------------------------------------------------------------------
// Service Boundary
// ---------------------------------------------------------------------------

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default Prometheus metrics port.
pub const DEFAULT_METRICS_PORT: u16 = 9090;

// ---------------------------------------------------------------------------
// ChainConfig
// ---------------------------------------------------------------------------

/// Runtime parameters for mining and appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Difficulty every newly mined entry is held to.
    pub difficulty: u32,

    /// Delay between failed mining attempts. `Duration::ZERO` disables
    /// pacing entirely.
    pub pacing: Duration,

    /// Give up after this many nonces. `None` searches without bound.
    pub max_attempts: Option<u64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            pacing: Duration::ZERO,
            max_attempts: None,
        }
    }
}

impl ChainConfig {
    /// Rejects configurations the miner could never satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(ConfigError::DifficultyTooHigh {
                difficulty: self.difficulty,
                max: MAX_DIFFICULTY,
            });
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::ZeroAttemptCeiling);
        }
        Ok(())
    }
}

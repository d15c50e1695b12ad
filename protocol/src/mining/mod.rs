//! # Proof-of-Work Mining
//!
//! Turns a payload into an entry the chain will accept.
//!
//! ## Architecture
//!
//! ```text
//! cancel.rs   - CancelFlag, a shared cooperative abort signal
//! pacing.rs   - Pacing policies applied between failed attempts
//! miner.rs    - Nonce search over a candidate successor
//! producer.rs - Serialized mine-then-append pipeline over a ChainStore
//! ```
//!
//! ## Liveness
//!
//! The nonce search has no natural upper bound. At low difficulty it ends
//! after a handful of attempts (about 16^d expected), but a high difficulty
//! can keep it running indefinitely. Callers that need to get control back
//! set an attempt ceiling in [`miner::MinerConfig`], raise a
//! [`cancel::CancelFlag`], or both.

pub mod cancel;
pub mod miner;
pub mod pacing;
pub mod producer;

pub use cancel::CancelFlag;
pub use miner::{Mined, Miner, MinerConfig};
pub use pacing::{FixedDelay, NoPacing, Pacing};
pub use producer::{EntryProducer, ProducedEntry};

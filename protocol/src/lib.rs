// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Proofchain Core Library
//!
//! A single-node, hash-linked append log where every new entry has to pay
//! for its place with proof-of-work. Each entry commits to its predecessor
//! by digest, and an entry is only accepted once a nonce search has found a
//! digest with enough leading zeros.
//!
//! ## Architecture
//!
//! - **crypto** - SHA-256 and the canonical entry digest.
//! - **storage** - `Entry` and `ChainStore`, the synchronized sequence.
//! - **validation** - Linkage, digest, and work checks between entries.
//! - **mining** - Nonce search, pacing, cancellation, and the producer
//!   that turns a payload into a committed entry.
//! - **config** - Defaults, limits, and `ChainConfig`.
//! - **error** - Rejection and failure types.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use proofchain::mining::{EntryProducer, Miner, MinerConfig};
//! use proofchain::storage::ChainStore;
//!
//! let store = Arc::new(ChainStore::initialize(1));
//! let producer = EntryProducer::new(Arc::clone(&store), Miner::new(MinerConfig::with_difficulty(1)));
//!
//! let produced = producer.produce(42).unwrap();
//! assert_eq!(produced.entry.index, 1);
//! assert_eq!(store.len(), 2);
//! assert!(store.verify().is_ok());
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod mining;
pub mod storage;
pub mod validation;

pub use config::ChainConfig;
pub use error::{ConfigError, MiningError, ProductionError, RejectReason};
pub use storage::{ChainStore, Entry};

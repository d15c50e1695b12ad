//! # Storage Module
//!
//! The in-memory home of the chain. Nothing here touches disk: the chain
//! lives for as long as the process does.
//!
//! ## Architecture
//!
//! ```text
//! entry.rs  - Entry structure, genesis construction, digest recomputation
//! chain.rs  - ChainStore: the synchronized, append-only sequence
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! genesis ──▶ ChainStore ◀── append(candidate) ◀── Miner
//!                 │
//!                 └──▶ snapshot() ──▶ readers
//! ```

pub mod chain;
pub mod entry;

pub use chain::ChainStore;
pub use entry::Entry;

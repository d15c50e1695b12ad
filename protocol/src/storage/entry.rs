//! # Entry Structure
//!
//! An entry is the unit of the chain. It carries an opaque integer
//! payload, commits to its predecessor by digest, and records the nonce
//! that made its digest satisfy the difficulty it was mined under.
//!
//! ## Entry Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  Entry                                           │
//! │  ├── Index: u64          (0 for genesis)         │
//! │  ├── Timestamp: String   (RFC 3339, UTC)         │
//! │  ├── Data: i64           (payload)               │
//! │  ├── Hash: String        (hex SHA-256, 64 chars) │
//! │  ├── PrevHash: String    ("" for genesis)        │
//! │  ├── Difficulty: u32                             │
//! │  └── Nonce: String       (hex attempt counter)   │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The JSON field names and their order above are part of the external
//! interface. `Hash` is excluded from its own preimage; see
//! [`crate::crypto::hash::entry_digest`] for the layout.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{GENESIS_NONCE, GENESIS_PAYLOAD, GENESIS_PREV_DIGEST};
use crate::crypto::hash::{entry_digest, has_leading_zeros};

/// One element of the append-only chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Position in the chain. Strictly one more than the predecessor's.
    #[serde(rename = "Index")]
    pub index: u64,
    /// Creation time, captured when the entry was built.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// Opaque application value.
    #[serde(rename = "Data")]
    pub payload: i64,
    /// Digest of every other committed field.
    #[serde(rename = "Hash")]
    pub digest: String,
    /// Digest of the predecessor. Empty for genesis.
    #[serde(rename = "PrevHash")]
    pub prev_digest: String,
    /// Leading zero characters the digest had to carry when mined.
    #[serde(rename = "Difficulty")]
    pub difficulty: u32,
    /// Value varied by the miner until the digest met `difficulty`.
    #[serde(rename = "Nonce")]
    pub nonce: String,
}

impl Entry {
    /// Construct the genesis entry, stamped with the current time.
    ///
    /// Genesis is hashed but not mined: its nonce is the placeholder and
    /// `difficulty` only records the chain's setting at startup.
    pub fn genesis(difficulty: u32) -> Self {
        Self::genesis_at(now_timestamp(), difficulty)
    }

    /// Construct the genesis entry with an explicit timestamp.
    pub fn genesis_at(timestamp: String, difficulty: u32) -> Self {
        let mut entry = Entry {
            index: 0,
            timestamp,
            payload: GENESIS_PAYLOAD,
            digest: String::new(),
            prev_digest: GENESIS_PREV_DIGEST.to_string(),
            difficulty,
            nonce: GENESIS_NONCE.to_string(),
        };
        entry.digest = entry.compute_digest();
        entry
    }

    /// Build an unmined successor of `predecessor`.
    ///
    /// The returned entry has its linkage fields set and a fresh timestamp,
    /// but an empty nonce and digest. Only the miner should finish it.
    ///
    /// The index saturates at `u64::MAX`; the validator refuses a successor
    /// of that entry.
    pub fn successor_of(predecessor: &Entry, payload: i64, difficulty: u32) -> Self {
        Entry {
            index: predecessor.index.saturating_add(1),
            timestamp: now_timestamp(),
            payload,
            digest: String::new(),
            prev_digest: predecessor.digest.clone(),
            difficulty,
            nonce: String::new(),
        }
    }

    /// Recompute the digest from the committed fields.
    ///
    /// Never trusts `self.digest`; use this to verify it.
    pub fn compute_digest(&self) -> String {
        entry_digest(
            self.index,
            &self.timestamp,
            self.payload,
            &self.prev_digest,
            &self.nonce,
        )
    }

    /// Whether the stored digest satisfies the stored difficulty.
    pub fn meets_difficulty(&self) -> bool {
        has_leading_zeros(&self.digest, self.difficulty)
    }

    /// Whether this entry has the shape of a chain root.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.prev_digest == GENESIS_PREV_DIGEST
    }
}

/// Current UTC time in the format entries carry.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-10-19T12:00:00.000000000Z";

    #[test]
    fn genesis_entry_properties() {
        let genesis = Entry::genesis(3);
        assert_eq!(genesis.index, 0);
        assert!(genesis.prev_digest.is_empty());
        assert_eq!(genesis.payload, GENESIS_PAYLOAD);
        assert_eq!(genesis.difficulty, 3);
        assert!(genesis.nonce.is_empty());
        assert!(genesis.is_genesis());
    }

    #[test]
    fn genesis_digest_covers_its_fields() {
        let genesis = Entry::genesis_at(TS.to_string(), 1);
        assert_eq!(genesis.digest, genesis.compute_digest());
        assert_eq!(genesis.digest.len(), 64);
    }

    #[test]
    fn genesis_with_same_timestamp_is_deterministic() {
        let g1 = Entry::genesis_at(TS.to_string(), 1);
        let g2 = Entry::genesis_at(TS.to_string(), 1);
        assert_eq!(g1, g2);
    }

    #[test]
    fn successor_links_to_predecessor() {
        let genesis = Entry::genesis_at(TS.to_string(), 1);
        let next = Entry::successor_of(&genesis, 42, 2);

        assert_eq!(next.index, 1);
        assert_eq!(next.prev_digest, genesis.digest);
        assert_eq!(next.payload, 42);
        assert_eq!(next.difficulty, 2);
        assert!(next.nonce.is_empty());
        assert!(next.digest.is_empty());
        assert!(!next.is_genesis());
    }

    #[test]
    fn successor_index_saturates() {
        let mut last = Entry::genesis_at(TS.to_string(), 1);
        last.index = u64::MAX;
        assert_eq!(Entry::successor_of(&last, 0, 1).index, u64::MAX);
    }

    #[test]
    fn tampered_payload_changes_digest() {
        let genesis = Entry::genesis_at(TS.to_string(), 1);
        let mut tampered = genesis.clone();
        tampered.payload += 1;
        assert_ne!(tampered.compute_digest(), genesis.digest);
    }

    #[test]
    fn meets_difficulty_reads_stored_digest() {
        let mut entry = Entry::genesis_at(TS.to_string(), 2);
        entry.digest = "00ff".to_string();
        assert!(entry.meets_difficulty());
        entry.digest = "0fff".to_string();
        assert!(!entry.meets_difficulty());
    }

    #[test]
    fn json_field_names_and_order() {
        let genesis = Entry::genesis_at(TS.to_string(), 1);
        let json = serde_json::to_string(&genesis).expect("serialize");

        let keys = [
            "\"Index\"",
            "\"Timestamp\"",
            "\"Data\"",
            "\"Hash\"",
            "\"PrevHash\"",
            "\"Difficulty\"",
            "\"Nonce\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(k).unwrap_or_else(|| panic!("missing {k}")))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "fields out of order: {json}"
        );
    }

    #[test]
    fn entry_serialization_roundtrip() {
        let genesis = Entry::genesis_at(TS.to_string(), 1);
        let json = serde_json::to_string(&genesis).expect("serialize");
        let recovered: Entry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(genesis, recovered);
    }
}

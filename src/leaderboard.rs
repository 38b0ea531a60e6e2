//! Top-5 best-score ranking across runs and players.
//!
//! Each name holds at most one entry (its best score). Entries are ordered by
//! score descending, ties broken by name ignoring case, so the board is a pure
//! function of the multiset of recorded runs.

use crate::constants::{LEADERBOARD_KEY, LEADERBOARD_SIZE, RECORD_VERSION};
use crate::error::StoreError;
use crate::store::{load_json_or_default, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// On-disk form of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LeaderboardRecord {
    version: u32,
    entries: Vec<LeaderboardEntry>,
}

/// Everything we know how to read back.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLeaderboard {
    Versioned(LeaderboardRecord),
    /// Bare array written before records carried a version.
    Legacy(Vec<LeaderboardEntry>),
}

/// Score descending, then name ignoring case. Names differing only in case
/// fall back to the exact string so the order stays total.
fn rank_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Ordered, truncated best-score list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from arbitrary entries, enforcing one entry per name,
    /// ordering and the size cap.
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut board = Self::new();
        for entry in entries {
            board.merge(entry.name, entry.score);
        }
        board.normalize();
        board
    }

    /// Read the persisted board. Missing or unreadable data yields an empty board.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json_or_default::<Option<StoredLeaderboard>>(store, LEADERBOARD_KEY) {
            Some(StoredLeaderboard::Versioned(record)) => {
                if record.version > RECORD_VERSION {
                    tracing::warn!(
                        "Leaderboard record version {} is newer than supported {}, reading anyway",
                        record.version,
                        RECORD_VERSION
                    );
                }
                Self::from_entries(record.entries)
            }
            Some(StoredLeaderboard::Legacy(entries)) => {
                tracing::info!("Migrating unversioned leaderboard ({} entries)", entries.len());
                Self::from_entries(entries)
            }
            None => Self::new(),
        }
    }

    /// Persist the board, overwriting prior contents.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let record = LeaderboardRecord {
            version: RECORD_VERSION,
            entries: self.entries.clone(),
        };
        save_json(store, LEADERBOARD_KEY, &record)
    }

    /// Apply one finished run in memory. Returns the name's 1-based rank
    /// afterwards, or `None` if it did not make the board.
    pub fn record(&mut self, name: &str, score: u32) -> Option<usize> {
        self.merge(name.to_string(), score);
        self.normalize();
        self.rank_of(name)
    }

    /// Apply a finished run and persist the result. A failed write is logged;
    /// the in-memory board stays authoritative.
    pub fn record_run(
        &mut self,
        store: &mut dyn KeyValueStore,
        name: &str,
        score: u32,
    ) -> Option<usize> {
        let rank = self.record(name, score);
        if let Err(e) = self.save(store) {
            tracing::warn!("Failed to persist leaderboard: {}", e);
        }
        rank
    }

    /// Drop every entry and delete the persisted record.
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        self.entries.clear();
        store.remove(LEADERBOARD_KEY)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| i + 1)
    }

    pub fn best_score(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    fn merge(&mut self, name: String, score: u32) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.score = existing.score.max(score),
            None => self.entries.push(LeaderboardEntry { name, score }),
        }
    }

    fn normalize(&mut self) {
        self.entries.sort_by(rank_order);
        self.entries.truncate(LEADERBOARD_SIZE);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Champions table recording the best finished sessions.
//!
//! The table is kept sorted by descending score and bounded in size. The game
//! core never writes to it; the outer layer asks [`ChampionsTable::is_new_record`]
//! once a session ends and collects a name when it returns `true`.

use log::info;
use thiserror::Error;

/// Number of entries kept unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 10;

/// Failures raised while recording a champion.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChampionsError {
    /// Champion names must contain at least one visible character.
    #[error("champion name must not be empty")]
    EmptyName,
    /// A table must be able to hold at least one entry.
    #[error("champions table capacity must be positive")]
    ZeroCapacity,
}

/// A single recorded result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Champion {
    /// Name entered for the result.
    pub name: String,
    /// Game score of the session.
    pub score: u32,
}

/// Bounded, descending table of champions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChampionsTable {
    capacity: usize,
    entries: Vec<Champion>,
}

impl Default for ChampionsTable {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            entries: Vec::new(),
        }
    }
}

impl ChampionsTable {
    /// Creates an empty table holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self, ChampionsError> {
        if capacity == 0 {
            return Err(ChampionsError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        })
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries ordered from best to worst.
    #[must_use]
    pub fn entries(&self) -> &[Champion] {
        &self.entries
    }

    /// Reports whether nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest recorded score, zero for an empty table.
    ///
    /// Suitable as the `best_score` seed of a new game.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    /// Reports whether `score` would earn a place in the table.
    ///
    /// Zero scores never qualify. A full table only accepts scores strictly
    /// above its last entry.
    #[must_use]
    pub fn is_new_record(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < self.capacity {
            return true;
        }
        self.entries.last().map_or(true, |last| score > last.score)
    }

    /// Records `score` under `name`.
    ///
    /// Returns the one-based rank achieved, or `None` when the score does not
    /// qualify. Equal scores rank below the results recorded before them.
    pub fn add_result(&mut self, score: u32, name: &str) -> Result<Option<usize>, ChampionsError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChampionsError::EmptyName);
        }
        if !self.is_new_record(score) {
            return Ok(None);
        }

        let index = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            Champion {
                name: name.to_owned(),
                score,
            },
        );
        self.entries.truncate(self.capacity);

        info!("{name} entered the champions table at rank {}", index + 1);
        Ok(Some(index + 1))
    }
}

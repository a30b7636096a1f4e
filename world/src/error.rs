//! Error types raised by the authoritative level state.

use pacman_core::Point;
use thiserror::Error;

/// Failures raised while constructing or mutating level state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// An argument was outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A grid mutation targeted a cell outside the grid.
    #[error("cell ({}, {}) is outside the grid", .0.x(), .0.y())]
    OutOfBounds(Point),
}

/// A level source could not be turned into a playable level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid level source: {reason}")]
pub struct InvalidLevelSource {
    reason: String,
}

impl InvalidLevelSource {
    /// Creates an error carrying a human readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Explanation of what was wrong with the source.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<std::io::Error> for InvalidLevelSource {
    fn from(error: std::io::Error) -> Self {
        Self::new(format!("could not read level source: {error}"))
    }
}

impl From<toml::de::Error> for InvalidLevelSource {
    fn from(error: toml::de::Error) -> Self {
        Self::new(format!("could not parse level document: {}", error.message()))
    }
}

impl From<WorldError> for InvalidLevelSource {
    fn from(error: WorldError) -> Self {
        Self::new(error.to_string())
    }
}

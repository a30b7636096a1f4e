//! Failures surfaced at the game boundary.

use std::io;

use pacman_world::{InvalidLevelSource, WorldError};
use thiserror::Error;

/// Errors raised while starting a game, loading levels or ticking.
///
/// A failed load never disturbs the level or the scores that were in place
/// before the call.
#[derive(Debug, Error)]
pub enum GameError {
    /// The level source is empty or could not be enumerated.
    #[error("no playable levels in {location}")]
    InvalidLevelDirectory {
        /// Human readable location of the source.
        location: String,
        /// Enumeration failure, absent when the source was simply empty.
        #[source]
        source: Option<io::Error>,
    },
    /// A level could not be read or parsed.
    #[error("cannot play level {identifier}")]
    CannotPlayGame {
        /// Identifier of the offending level.
        identifier: String,
        /// Loader failure.
        #[source]
        source: InvalidLevelSource,
    },
    /// The operation needs a game that was started with `new_game`.
    #[error("no game is in progress")]
    NoLevel,
    /// The level rejected a mutation while ticking.
    #[error(transparent)]
    Simulation(#[from] WorldError),
}

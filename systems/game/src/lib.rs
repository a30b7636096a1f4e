#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game orchestration for the PacMan simulation.
//!
//! The [`Game`] state machine enumerates level sources, loads one level at a
//! time, keeps the cumulative score bookkeeping and turns the level's terminal
//! events into wins and losses. [`Session`] pairs a shared game with a
//! [`TickClock`] so the simulation can run on its own thread while input
//! arrives through a [`DirectionIntent`].

mod clock;
mod error;
mod game;
mod intent;
mod session;
mod source;

pub use clock::TickClock;
pub use error::GameError;
pub use game::{Game, GamePhase};
pub use intent::DirectionIntent;
pub use session::Session;
pub use source::{DirectorySource, LevelSource, MemorySource};

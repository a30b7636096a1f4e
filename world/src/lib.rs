#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for the PacMan simulation.
//!
//! A [`Level`] owns its [`Grid`], its [`Player`] and every [`Hostile`]. Ticking
//! a level advances those entities, mutates the grid as the player consumes
//! tiles, and records each observable change as a
//! [`pacman_core::Event`] for the caller and for the level's observers.

mod error;
mod grid;
mod hostile;
mod level;
mod loader;
mod movement;
mod player;

pub use error::{InvalidLevelSource, WorldError};
pub use grid::Grid;
pub use hostile::{Hostile, Patroller};
pub use level::Level;
pub use loader::{LevelLoader, TomlLevelLoader};
pub use movement::{Motion, Mover};
pub use player::{Player, START_FACING};

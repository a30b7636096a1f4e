//! Hostile entities sharing the player's tick and position contract.

use std::fmt;

use pacman_core::{Direction, Point};

use crate::{movement::Motion, Grid, Mover, WorldError};

/// Entity that roams the grid and kills the player on contact.
///
/// Hostiles never mutate the grid; they only read it to decide where to go.
pub trait Hostile: fmt::Debug + Send {
    /// Cell currently occupied.
    fn position(&self) -> Point;

    /// Advances the hostile by one tick and reports the resulting motion.
    fn tick(&mut self, grid: &Grid) -> Motion;

    /// Sends the hostile back to where it started.
    fn respawn(&mut self);
}

/// Deterministic hostile that walks straight and turns clockwise when blocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patroller {
    mover: Mover,
    start_position: Point,
    start_facing: Direction,
}

impl Patroller {
    /// Creates a patroller at `start_position` heading `facing`.
    pub fn new(start_position: Point, facing: Direction, speed: u32) -> Result<Self, WorldError> {
        Ok(Self {
            mover: Mover::new(start_position, facing, speed)?,
            start_position,
            start_facing: facing,
        })
    }

    /// Direction the patroller is heading.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.mover.facing()
    }
}

impl Hostile for Patroller {
    fn position(&self) -> Point {
        self.mover.position()
    }

    fn tick(&mut self, grid: &Grid) -> Motion {
        let facing = self.mover.facing();
        let motion = self.mover.request_move(facing, grid);
        if motion == Motion::Blocked {
            let _ = self.mover.face(facing.clockwise());
        }
        motion
    }

    fn respawn(&mut self) {
        self.mover.teleport(self.start_position);
        let _ = self.mover.face(self.start_facing);
    }
}

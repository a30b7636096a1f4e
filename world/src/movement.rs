//! Tick-based cell-to-cell movement shared by every entity.

use pacman_core::{Direction, Point};

use crate::{Grid, WorldError};

/// Outcome of a single [`Mover::request_move`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Neither the requested nor the facing cell is passable; nothing changed.
    Blocked,
    /// A transition is in flight and advanced to `sub_tick`.
    InTransit {
        /// Current progress toward the target, in `1..speed`.
        sub_tick: u32,
        /// Cell the entity will occupy on arrival.
        target: Point,
    },
    /// The transition completed and the entity now occupies `position`.
    Arrived {
        /// Cell the entity arrived on.
        position: Point,
    },
}

/// Generic mover that crosses one cell every `speed` ticks.
///
/// The mover is idle while `sub_tick` is zero. Position only ever changes at
/// arrival, the in-between progress is exposed through [`Mover::sub_tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mover {
    position: Point,
    facing: Direction,
    speed: u32,
    sub_tick: u32,
    target: Option<Point>,
}

impl Mover {
    /// Creates an idle mover at `position`.
    ///
    /// Fails with [`WorldError::InvalidArgument`] when `speed` is zero.
    pub fn new(position: Point, facing: Direction, speed: u32) -> Result<Self, WorldError> {
        if speed == 0 {
            return Err(WorldError::InvalidArgument(
                "movement speed must be positive".into(),
            ));
        }
        Ok(Self {
            position,
            facing,
            speed,
            sub_tick: 0,
            target: None,
        })
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Direction of the last started move.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Ticks needed to cross one cell.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Progress of the in-flight transition; zero while idle.
    #[must_use]
    pub const fn sub_tick(&self) -> u32 {
        self.sub_tick
    }

    /// Destination of the in-flight transition.
    #[must_use]
    pub const fn target(&self) -> Option<Point> {
        self.target
    }

    /// Reports whether the mover may start a new transition.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.sub_tick == 0
    }

    /// Advances the mover by one tick toward `direction`.
    ///
    /// An in-flight transition keeps going regardless of `direction`. An idle
    /// mover turns toward `direction` when that cell is passable, otherwise
    /// keeps its current facing when that cell is passable, otherwise stays
    /// put.
    pub fn request_move(&mut self, direction: Direction, grid: &Grid) -> Motion {
        let target = match self.target {
            Some(target) => target,
            None => {
                let turned = self.position.neighbor(direction);
                let straight = self.position.neighbor(self.facing);
                let target = if grid.get(turned).is_passable() {
                    self.facing = direction;
                    turned
                } else if grid.get(straight).is_passable() {
                    straight
                } else {
                    return Motion::Blocked;
                };
                self.target = Some(target);
                target
            }
        };

        self.sub_tick += 1;
        if self.sub_tick >= self.speed {
            self.position = target;
            self.stop();
            Motion::Arrived { position: target }
        } else {
            Motion::InTransit {
                sub_tick: self.sub_tick,
                target,
            }
        }
    }

    /// Turns an idle mover in place. Returns `false` while a move is in flight.
    pub fn face(&mut self, direction: Direction) -> bool {
        if self.is_idle() {
            self.facing = direction;
            true
        } else {
            false
        }
    }

    /// Cancels any in-flight transition.
    pub fn stop(&mut self) {
        self.sub_tick = 0;
        self.target = None;
    }

    /// Moves instantly to `position`, cancelling any in-flight transition.
    pub fn teleport(&mut self, position: Point) {
        self.stop();
        self.position = position;
    }
}

//! Player controller: movement plus score, lives and consumption.

use log::{debug, trace};
use pacman_core::{Direction, Event, PlayerState, Point, Tile, MAX_LIVES};

use crate::{movement::Motion, Grid, Mover, WorldError};

/// Facing every player starts a level with.
pub const START_FACING: Direction = Direction::Left;

/// The player-controlled entity of a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    mover: Mover,
    start_position: Point,
    score: u32,
    lives: u8,
    energized: u32,
}

impl Player {
    /// Creates a player at its respawn anchor with a full set of lives.
    pub fn new(start_position: Point, speed: u32) -> Result<Self, WorldError> {
        Ok(Self {
            mover: Mover::new(start_position, START_FACING, speed)?,
            start_position,
            score: 0,
            lives: MAX_LIVES,
            energized: 0,
        })
    }

    /// Underlying mover.
    #[must_use]
    pub const fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.mover.position()
    }

    /// Direction of the last started move.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.mover.facing()
    }

    /// Respawn anchor.
    #[must_use]
    pub const fn start_position(&self) -> Point {
        self.start_position
    }

    /// Points accumulated on this level.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Lives left.
    #[must_use]
    pub const fn lives(&self) -> u8 {
        self.lives
    }

    /// Remaining energized ticks.
    #[must_use]
    pub const fn energized(&self) -> u32 {
        self.energized
    }

    /// Reports whether an energizer effect is active.
    #[must_use]
    pub const fn is_energized(&self) -> bool {
        self.energized > 0
    }

    /// Captures the state carried by player notifications.
    #[must_use]
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            position: self.mover.position(),
            facing: self.mover.facing(),
            sub_tick: self.mover.sub_tick(),
            speed: self.mover.speed(),
            lives: self.lives,
            score: self.score,
            energized: self.energized,
        }
    }

    /// Advances the player one tick toward `direction`.
    ///
    /// On arrival the tile underneath is consumed and replaced by floor before
    /// the arrival itself is announced.
    pub fn tick(
        &mut self,
        direction: Direction,
        grid: &mut Grid,
        out_events: &mut Vec<Event>,
    ) -> Result<Motion, WorldError> {
        self.energized = self.energized.saturating_sub(1);

        let motion = self.mover.request_move(direction, grid);
        if let Motion::Arrived { position } = motion {
            trace!("player arrived at ({}, {})", position.x(), position.y());
            let tile = grid.get(position);
            if tile.is_consumable() {
                self.consume(tile, out_events)?;
                let _ = grid.set(position, Tile::Floor, out_events)?;
            }
            out_events.push(Event::PlayerChanged {
                state: self.snapshot(),
            });
        }
        Ok(motion)
    }

    /// Credits the cost of a consumable tile.
    ///
    /// Fails with [`WorldError::InvalidArgument`] for any other tile.
    pub fn consume(&mut self, tile: Tile, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let cost = tile.cost().ok_or_else(|| {
            WorldError::InvalidArgument(format!("{tile:?} cannot be consumed"))
        })?;
        self.score = self.score.saturating_add(cost);
        if let Some(duration) = tile.effect_duration() {
            self.energized = self.energized.max(duration);
        }
        out_events.push(Event::PlayerChanged {
            state: self.snapshot(),
        });
        Ok(())
    }

    /// Takes one life, stops the player and respawns it when lives remain.
    pub fn die(&mut self, out_events: &mut Vec<Event>) {
        self.lives = self.lives.saturating_sub(1);
        self.energized = 0;
        self.mover.stop();
        if self.lives > 0 {
            self.mover.teleport(self.start_position);
        }
        debug!("player died, {} lives left", self.lives);
        out_events.push(Event::PlayerDied {
            state: self.snapshot(),
        });
    }
}

//! A game paired with the clock that drives it.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use pacman_core::Direction;

use crate::{DirectionIntent, Game, GameError, LevelSource, TickClock};

/// Runs a [`Game`] on a [`TickClock`] thread.
///
/// Every operation that replaces or pauses the level stops the clock first,
/// so loading never overlaps a tick. Direction requests bypass the game lock
/// and land in the shared [`DirectionIntent`].
#[derive(Debug)]
pub struct Session {
    game: Arc<Mutex<Game>>,
    intent: DirectionIntent,
    clock: TickClock,
}

impl Session {
    /// Wraps `game` with a clock firing every `interval`.
    #[must_use]
    pub fn new(game: Game, interval: Duration) -> Self {
        let intent = game.intent();
        Self {
            game: Arc::new(Mutex::new(game)),
            intent,
            clock: TickClock::new(interval),
        }
    }

    /// Locks the game for inspection or direct manipulation.
    ///
    /// Holding the guard blocks the clock thread.
    pub fn game(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stops the clock and starts a fresh game over `source`.
    pub fn new_game(
        &mut self,
        best_score: u32,
        source: impl LevelSource + 'static,
    ) -> Result<(), GameError> {
        self.clock.stop();
        self.game().new_game(best_score, source)
    }

    /// Stops the clock and loads the next level.
    pub fn load_next_level(&mut self) -> Result<bool, GameError> {
        self.clock.stop();
        self.game().load_next_level()
    }

    /// Resumes the game and its clock. Returns whether the game is running.
    pub fn start(&mut self) -> bool {
        let running = self.game().start();
        if running {
            self.clock.start(Arc::clone(&self.game));
        }
        running
    }

    /// Stops the clock, waiting for an in-flight tick, then pauses the game.
    pub fn pause(&mut self) {
        self.clock.stop();
        self.game().pause();
    }

    /// Reports whether the clock is currently ticking the game.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.clock.is_running() && self.game().is_running()
    }

    /// Records `direction` as the latest intent without taking the game lock.
    pub fn request_direction(&self, direction: Direction) {
        self.intent.request(direction);
    }

    /// Interval between two ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.clock.interval()
    }
}

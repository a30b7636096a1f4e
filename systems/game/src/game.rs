//! Level progression, score bookkeeping and win/loss decisions.

use std::{fmt, sync::Arc};

use log::{debug, info, trace, warn};
use pacman_core::{Direction, Event, Observer, ObserverRegistry, SubscriptionId};
use pacman_world::{InvalidLevelSource, Level, LevelLoader, TomlLevelLoader};

use crate::{DirectionIntent, GameError, LevelSource};

/// Lifecycle of a [`Game`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// No game was started yet.
    Uninitialized,
    /// A level is being read and assembled.
    Loading,
    /// Ticks advance the current level.
    Running,
    /// A level is loaded but ticks are ignored.
    Paused,
    /// The current level was cleared and another one follows.
    LevelWon,
    /// The final level was cleared.
    GameWon,
    /// The player ran out of lives.
    GameOver,
}

impl GamePhase {
    /// Reports whether the phase ends the current level.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::LevelWon | Self::GameWon | Self::GameOver)
    }
}

/// Top-level orchestrator of a play session.
///
/// The game owns at most one [`Level`]. Observers registered on the game are
/// attached to every level it loads and also receive the game's own
/// notifications ([`Event::LevelLoaded`], [`Event::LevelFinished`] and
/// [`Event::ScoreChanged`]).
pub struct Game {
    loader: Box<dyn LevelLoader>,
    source: Option<Box<dyn LevelSource>>,
    identifiers: Vec<String>,
    index: Option<usize>,
    level: Option<Level>,
    observers: ObserverRegistry,
    intent: DirectionIntent,
    phase: GamePhase,
    best_score: u32,
    game_score: u32,
    level_score: u32,
    is_won: bool,
    is_finished: bool,
    ticks: u64,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("identifiers", &self.identifiers)
            .field("index", &self.index)
            .field("phase", &self.phase)
            .field("best_score", &self.best_score)
            .field("game_score", &self.game_score)
            .field("level_score", &self.level_score)
            .field("is_won", &self.is_won)
            .field("is_finished", &self.is_finished)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(TomlLevelLoader::new())
    }
}

impl Game {
    /// Creates an idle game that builds levels with `loader`.
    #[must_use]
    pub fn new(loader: impl LevelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            source: None,
            identifiers: Vec::new(),
            index: None,
            level: None,
            observers: ObserverRegistry::new(),
            intent: DirectionIntent::new(),
            phase: GamePhase::Uninitialized,
            best_score: 0,
            game_score: 0,
            level_score: 0,
            is_won: false,
            is_finished: false,
            ticks: 0,
        }
    }

    /// Starts a fresh session over `source`, loading its first level.
    ///
    /// `best_score` only ever raises the best score already known to the game.
    ///
    /// Fails with [`GameError::InvalidLevelDirectory`] when the source is
    /// empty or cannot be enumerated and with [`GameError::CannotPlayGame`]
    /// when the first level cannot be loaded. On failure the game keeps the
    /// session it had before the call.
    pub fn new_game(
        &mut self,
        best_score: u32,
        source: impl LevelSource + 'static,
    ) -> Result<(), GameError> {
        let location = source.location();
        let identifiers = match source.enumerate() {
            Ok(identifiers) if !identifiers.is_empty() => identifiers,
            Ok(_) => {
                return Err(GameError::InvalidLevelDirectory {
                    location,
                    source: None,
                })
            }
            Err(error) => {
                return Err(GameError::InvalidLevelDirectory {
                    location,
                    source: Some(error),
                })
            }
        };

        let previous = self.enter_loading();
        let level = match self.read_level(&source, &identifiers[0]) {
            Ok(level) => level,
            Err(error) => {
                self.phase = previous;
                return Err(error);
            }
        };

        info!(
            "new game over {location} with {} levels, best score {best_score}",
            identifiers.len()
        );
        self.source = Some(Box::new(source));
        self.identifiers = identifiers;
        self.best_score = self.best_score.max(best_score);
        self.game_score = 0;
        self.is_won = false;
        self.is_finished = false;
        self.ticks = 0;
        self.install_level(0, level);
        Ok(())
    }

    /// Replaces the current level with the next one.
    ///
    /// Returns `Ok(false)` without touching anything when the last level is
    /// already loaded or the session is finished. A load failure leaves the
    /// current level, the level index and the scores untouched.
    pub fn load_next_level(&mut self) -> Result<bool, GameError> {
        let index = self.index.ok_or(GameError::NoLevel)?;
        self.pause();
        if self.is_finished || !self.has_next_level() {
            return Ok(false);
        }

        let next = index + 1;
        let previous = self.enter_loading();
        let loaded = match &self.source {
            Some(source) => self.read_level(source.as_ref(), &self.identifiers[next]),
            None => Err(GameError::NoLevel),
        };
        match loaded {
            Ok(level) => {
                self.install_level(next, level);
                Ok(true)
            }
            Err(error) => {
                self.phase = previous;
                Err(error)
            }
        }
    }

    /// Lets ticks advance the level. Returns whether the game is running.
    ///
    /// Starting a running game does nothing; a game that has no level or whose
    /// level already ended stays where it is.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Paused => {
                debug!("game started");
                self.phase = GamePhase::Running;
                true
            }
            GamePhase::Running => true,
            phase => {
                warn!("cannot start a game in phase {phase:?}");
                false
            }
        }
    }

    /// Stops ticks from advancing the level. Pausing twice does nothing.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            debug!("game paused");
            self.phase = GamePhase::Paused;
        }
    }

    /// Advances the current level by one tick.
    ///
    /// The tick consumes the latest [`DirectionIntent`] and is ignored unless
    /// the game is running.
    pub fn tick(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Running {
            trace!("tick ignored in phase {:?}", self.phase);
            return Ok(());
        }
        let Some(level) = self.level.as_mut() else {
            return Err(GameError::NoLevel);
        };

        let mut events = Vec::new();
        level.tick(self.intent.current(), &mut events)?;
        self.ticks += 1;

        for event in &events {
            match event {
                Event::PlayerChanged { state } => self.record_score(state.score),
                Event::PlayerDied { state } => {
                    self.record_score(state.score);
                    if state.lives == 0 && self.phase == GamePhase::Running {
                        self.lose();
                    }
                }
                Event::GridCleared { .. } => {
                    if !self.is_finished && self.phase == GamePhase::Running {
                        self.win();
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Ends the current level as cleared.
    ///
    /// The whole game is won when no further level exists; otherwise the
    /// caller decides when to [`Game::load_next_level`].
    pub fn win(&mut self) {
        if self.level.is_none() {
            return;
        }
        if self.has_next_level() {
            info!("level {} cleared", self.level_number());
            self.phase = GamePhase::LevelWon;
        } else {
            info!("final level cleared with {} points", self.game_score);
            self.is_won = true;
            self.is_finished = true;
            self.phase = GamePhase::GameWon;
        }
        self.observers.publish(&Event::LevelFinished {
            won: true,
            finished: self.is_finished,
        });
    }

    /// Ends the session as lost.
    pub fn lose(&mut self) {
        if self.level.is_none() {
            return;
        }
        info!(
            "game over on level {} with {} points",
            self.level_number(),
            self.game_score
        );
        self.is_won = false;
        self.is_finished = true;
        self.phase = GamePhase::GameOver;
        self.observers.publish(&Event::LevelFinished {
            won: false,
            finished: true,
        });
    }

    /// Subscribes `observer` to the game and to every current and future level.
    pub fn register_observer(&mut self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = self.observers.subscribe(Arc::clone(&observer));
        if let Some(level) = self.level.as_mut() {
            level.attach_observer(id, observer);
        }
        id
    }

    /// Removes an observer from the game and the current level.
    pub fn unregister_observer(&mut self, id: SubscriptionId) -> bool {
        if let Some(level) = self.level.as_mut() {
            let _ = level.unregister_observer(id);
        }
        self.observers.unsubscribe(id)
    }

    /// Re-publishes the current player and score state to every observer.
    pub fn force_notify(&self) {
        if let Some(level) = &self.level {
            level.force_notify();
        }
        self.publish_scores();
    }

    /// Records `direction` as the latest intent.
    pub fn request_direction(&self, direction: Direction) {
        self.intent.request(direction);
    }

    /// Shared handle onto the direction intent consumed by ticks.
    #[must_use]
    pub fn intent(&self) -> DirectionIntent {
        self.intent.clone()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Reports whether ticks currently advance the level.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whether the final level was cleared.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.is_won
    }

    /// Whether the session is over, won or lost.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Best score known to the session.
    #[must_use]
    pub const fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Score accumulated across all levels of the session.
    #[must_use]
    pub const fn game_score(&self) -> u32 {
        self.game_score
    }

    /// Score of the current level.
    #[must_use]
    pub const fn level_score(&self) -> u32 {
        self.level_score
    }

    /// Ticks applied since the session started.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The level currently being played.
    #[must_use]
    pub const fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Zero-based index of the current level.
    #[must_use]
    pub const fn level_index(&self) -> Option<usize> {
        self.index
    }

    /// Number of levels in the session.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.identifiers.len()
    }

    /// Identifier of the current level.
    #[must_use]
    pub fn level_identifier(&self) -> Option<&str> {
        self.index
            .and_then(|index| self.identifiers.get(index))
            .map(String::as_str)
    }

    /// Reports whether another level follows the current one.
    #[must_use]
    pub fn has_next_level(&self) -> bool {
        self.index
            .is_some_and(|index| index + 1 < self.identifiers.len())
    }

    fn enter_loading(&mut self) -> GamePhase {
        std::mem::replace(&mut self.phase, GamePhase::Loading)
    }

    fn read_level(&self, source: &dyn LevelSource, identifier: &str) -> Result<Level, GameError> {
        debug!("loading level {identifier} from {}", source.location());
        let cannot_play = |error: InvalidLevelSource| GameError::CannotPlayGame {
            identifier: identifier.to_owned(),
            source: error,
        };
        let mut stream = source
            .open(identifier)
            .map_err(|error| cannot_play(error.into()))?;
        self.loader.load(&mut stream).map_err(cannot_play)
    }

    fn install_level(&mut self, index: usize, mut level: Level) {
        if let Some(mut previous) = self.level.take() {
            previous.dispose();
        }
        for (id, observer) in self.observers.iter() {
            level.attach_observer(id, Arc::clone(observer));
        }

        self.level = Some(level);
        self.index = Some(index);
        self.level_score = 0;
        self.phase = GamePhase::Paused;

        let identifier = self.identifiers[index].clone();
        info!("loaded level {} ({identifier})", index + 1);
        self.observers
            .publish(&Event::LevelLoaded { index, identifier });
        self.publish_scores();
    }

    fn record_score(&mut self, score: u32) {
        let delta = score.saturating_sub(self.level_score);
        if delta == 0 {
            return;
        }
        self.game_score = self.game_score.saturating_add(delta);
        self.level_score = score;
        if self.game_score > self.best_score {
            self.best_score = self.game_score;
        }
        trace!("score +{delta}, game {} level {score}", self.game_score);
        self.publish_scores();
    }

    fn publish_scores(&self) {
        self.observers.publish(&Event::ScoreChanged {
            game: self.game_score,
            level: self.level_score,
            best: self.best_score,
        });
    }

    fn level_number(&self) -> usize {
        self.index.map_or(0, |index| index + 1)
    }
}

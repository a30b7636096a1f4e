#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the PacMan simulation.
//!
//! This crate defines the value types and the notification surface that
//! connect the authoritative level state, the game orchestrator and any
//! presentation adapter. The world mutates tiles and entities, records every
//! observable change as an [`Event`], and the owning level fans those events
//! out to registered [`Observer`] values in registration order. Observers only
//! ever receive shared references, so they cannot re-enter the tick that
//! produced the notification.

mod observer;

use serde::{Deserialize, Serialize};

pub use observer::{Observer, ObserverRegistry, SubscriptionId};

/// Number of lives a player starts every session with.
pub const MAX_LIVES: u8 = 3;

/// Ticks the player needs to cross one cell unless a level overrides it.
pub const DEFAULT_PLAYER_SPEED: u32 = 10;

/// Ticks a hostile needs to cross one cell unless a level overrides it.
pub const DEFAULT_HOSTILE_SPEED: u32 = 12;

/// Interval between two simulation ticks in the reference configuration.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5;

/// Integer location on the tile grid.
///
/// Coordinates are signed so that neighbours of border cells can be expressed
/// and answered with the synthetic boundary wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point from column and row coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the point, growing to the right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the point, growing downwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the adjacent point one cell away in `direction`.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let delta = direction.delta();
        Self {
            x: self.x.wrapping_add(delta.x),
            y: self.y.wrapping_add(delta.y),
        }
    }
}

/// Cardinal directions an entity can face or move toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in clockwise order starting at [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset a single step in this direction applies to a [`Point`].
    #[must_use]
    pub const fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// Direction reached by a quarter turn to the right.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Parses a single-letter direction code (`U`, `D`, `L`, `R`, any case).
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable cell. Also used for every query outside the grid.
    Wall,
    /// Empty cell that entities can cross freely.
    Floor,
    /// Consumable worth `cost` points.
    Pellet {
        /// Points awarded when the player consumes the pellet.
        cost: u32,
    },
    /// Consumable that additionally energizes the player for a while.
    Energizer {
        /// Points awarded when the player consumes the energizer.
        cost: u32,
        /// Number of ticks the energized effect lasts.
        duration: u32,
    },
}

impl Tile {
    /// Reports whether entities may enter the tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Reports whether the tile belongs to the consumable family and counts
    /// toward the grid's remaining consumables.
    #[must_use]
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Pellet { .. } | Self::Energizer { .. })
    }

    /// Points awarded for consuming the tile, if it is consumable.
    #[must_use]
    pub const fn cost(self) -> Option<u32> {
        match self {
            Self::Pellet { cost } | Self::Energizer { cost, .. } => Some(cost),
            Self::Wall | Self::Floor => None,
        }
    }

    /// Energized ticks granted by the tile, if any.
    #[must_use]
    pub const fn effect_duration(self) -> Option<u32> {
        match self {
            Self::Energizer { duration, .. } => Some(duration),
            _ => None,
        }
    }
}

/// Immutable snapshot of the player carried by player notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cell currently occupied by the player.
    pub position: Point,
    /// Direction the player last moved toward.
    pub facing: Direction,
    /// Progress toward the next cell; zero while idle.
    pub sub_tick: u32,
    /// Ticks required to cross one cell.
    pub speed: u32,
    /// Lives left in the session.
    pub lives: u8,
    /// Points accumulated on the current level.
    pub score: u32,
    /// Remaining energized ticks.
    pub energized: u32,
}

/// Identifier a level assigns to a registered hostile entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostileId(u32);

impl HostileId {
    /// Creates a hostile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Notifications broadcast by the grid, the entities and the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A grid cell was replaced and consumables remain.
    GridChanged {
        /// Cell that was rewritten.
        position: Point,
        /// Tile now stored in the cell.
        tile: Tile,
        /// Consumables left on the grid after the mutation.
        remaining: u32,
    },
    /// The last consumable was removed from the grid.
    GridCleared {
        /// Cell whose mutation cleared the grid.
        position: Point,
    },
    /// The player moved, consumed something or otherwise changed.
    PlayerChanged {
        /// Player state after the change.
        state: PlayerState,
    },
    /// The player lost a life.
    PlayerDied {
        /// Player state after the death, including remaining lives.
        state: PlayerState,
    },
    /// A hostile arrived on a new cell.
    HostileMoved {
        /// Identifier of the hostile.
        hostile: HostileId,
        /// Cell the hostile arrived on.
        position: Point,
    },
    /// A hostile was sent back to its start cell.
    HostileReset {
        /// Identifier of the hostile.
        hostile: HostileId,
        /// Start cell the hostile now occupies.
        position: Point,
    },
    /// The game finished loading a level.
    LevelLoaded {
        /// Zero-based index of the level within the session.
        index: usize,
        /// Source identifier the level was loaded from.
        identifier: String,
    },
    /// The game stopped the current level.
    LevelFinished {
        /// Whether the level ended because the grid was cleared.
        won: bool,
        /// Whether the whole session is over.
        finished: bool,
    },
    /// The game's score bookkeeping changed.
    ScoreChanged {
        /// Score accumulated across all levels of the session.
        game: u32,
        /// Score of the current level.
        level: u32,
        /// Best score known to the session.
        best: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::{Direction, Point, PlayerState, Tile};

    #[test]
    fn neighbor_applies_direction_delta() {
        let origin = Point::new(3, 3);
        assert_eq!(origin.neighbor(Direction::Up), Point::new(3, 2));
        assert_eq!(origin.neighbor(Direction::Down), Point::new(3, 4));
        assert_eq!(origin.neighbor(Direction::Left), Point::new(2, 3));
        assert_eq!(origin.neighbor(Direction::Right), Point::new(4, 3));
    }

    #[test]
    fn neighbor_of_origin_can_be_negative() {
        assert_eq!(Point::new(0, 0).neighbor(Direction::Left), Point::new(-1, 0));
    }

    #[test]
    fn clockwise_cycles_through_all_directions() {
        for direction in Direction::ALL {
            let turned = direction.clockwise().clockwise().clockwise().clockwise();
            assert_eq!(turned, direction);
            assert_eq!(direction.clockwise().clockwise(), direction.opposite());
        }
    }

    #[test]
    fn direction_codes_parse_case_insensitively() {
        assert_eq!(Direction::from_code('u'), Some(Direction::Up));
        assert_eq!(Direction::from_code('R'), Some(Direction::Right));
        assert_eq!(Direction::from_code('x'), None);
    }

    #[test]
    fn only_pellets_and_energizers_are_consumable() {
        assert!(!Tile::Wall.is_consumable());
        assert!(!Tile::Floor.is_consumable());
        assert!(Tile::Pellet { cost: 10 }.is_consumable());
        assert!(Tile::Energizer {
            cost: 50,
            duration: 600
        }
        .is_consumable());
    }

    #[test]
    fn cost_is_reported_for_consumables_only() {
        assert_eq!(Tile::Pellet { cost: 10 }.cost(), Some(10));
        assert_eq!(
            Tile::Energizer {
                cost: 50,
                duration: 3
            }
            .cost(),
            Some(50)
        );
        assert_eq!(Tile::Floor.cost(), None);
        assert_eq!(Tile::Wall.cost(), None);
    }

    #[test]
    fn walls_are_the_only_impassable_tiles() {
        assert!(!Tile::Wall.is_passable());
        assert!(Tile::Floor.is_passable());
        assert!(Tile::Pellet { cost: 1 }.is_passable());
    }

    #[test]
    fn player_state_round_trips_through_bincode() {
        let state = PlayerState {
            position: Point::new(4, 7),
            facing: Direction::Left,
            sub_tick: 3,
            speed: 10,
            lives: 2,
            score: 120,
            energized: 0,
        };
        let bytes = bincode::serialize(&state).expect("serialize");
        let restored: PlayerState = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, state);
    }
}

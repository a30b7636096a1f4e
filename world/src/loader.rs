//! Turning level documents into playable levels.

use std::io::Read;

use log::debug;
use pacman_core::{Direction, Point, Tile, DEFAULT_HOSTILE_SPEED, DEFAULT_PLAYER_SPEED};
use serde::Deserialize;

use crate::{Grid, InvalidLevelSource, Level, Patroller, Player};

const WALL: char = '#';
const FLOOR: char = ' ';
const PELLET: char = '.';
const ENERGIZER: char = 'o';
const PLAYER: char = 'P';
const HOSTILE: char = 'G';

/// Builds a fully constructed [`Level`] from a byte stream.
pub trait LevelLoader: Send {
    /// Reads `source` to the end and assembles the level it describes.
    fn load(&self, source: &mut dyn Read) -> Result<Level, InvalidLevelSource>;
}

/// Loader for TOML level documents.
///
/// ```toml
/// name = "Warm-up"
/// player_speed = 10
/// map = """
/// #######
/// #P..oG#
/// #######
/// """
/// ```
///
/// `#` is a wall, a space is floor, `.` a pellet, `o` an energizer, `P` the
/// single player start and `G` a hostile start. Player and hostile starts are
/// floor cells. All map rows must have the same width.
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlLevelLoader;

impl TomlLevelLoader {
    /// Creates a loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a level document held in memory.
    pub fn parse(&self, document: &str) -> Result<Level, InvalidLevelSource> {
        let document: LevelDocument = toml::from_str(document)?;
        document.into_level()
    }
}

impl LevelLoader for TomlLevelLoader {
    fn load(&self, source: &mut dyn Read) -> Result<Level, InvalidLevelSource> {
        let mut document = String::new();
        let _ = source.read_to_string(&mut document)?;
        self.parse(&document)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelDocument {
    name: Option<String>,
    #[serde(default = "default_player_speed")]
    player_speed: u32,
    #[serde(default = "default_hostile_speed")]
    hostile_speed: u32,
    #[serde(default = "default_pellet_cost")]
    pellet_cost: u32,
    #[serde(default = "default_energizer_cost")]
    energizer_cost: u32,
    #[serde(default = "default_energizer_duration")]
    energizer_duration: u32,
    map: String,
}

fn default_player_speed() -> u32 {
    DEFAULT_PLAYER_SPEED
}

fn default_hostile_speed() -> u32 {
    DEFAULT_HOSTILE_SPEED
}

fn default_pellet_cost() -> u32 {
    10
}

fn default_energizer_cost() -> u32 {
    50
}

fn default_energizer_duration() -> u32 {
    600
}

impl LevelDocument {
    fn into_level(self) -> Result<Level, InvalidLevelSource> {
        let rows: Vec<&str> = self
            .map
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if rows.is_empty() || width == 0 {
            return Err(InvalidLevelSource::new("map is empty"));
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut player = None;
        let mut hostiles = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(InvalidLevelSource::new(format!(
                    "map row {} is {} cells wide, expected {width}",
                    y + 1,
                    row.chars().count()
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                let position = Point::new(x as i32, y as i32);
                let tile = match symbol {
                    WALL => Tile::Wall,
                    FLOOR => Tile::Floor,
                    PELLET => Tile::Pellet {
                        cost: self.pellet_cost,
                    },
                    ENERGIZER => Tile::Energizer {
                        cost: self.energizer_cost,
                        duration: self.energizer_duration,
                    },
                    PLAYER => {
                        if player.replace(position).is_some() {
                            return Err(InvalidLevelSource::new(
                                "map contains more than one player start",
                            ));
                        }
                        Tile::Floor
                    }
                    HOSTILE => {
                        hostiles.push(position);
                        Tile::Floor
                    }
                    other => {
                        return Err(InvalidLevelSource::new(format!(
                            "unknown map symbol '{other}' at ({x}, {y})"
                        )))
                    }
                };
                tiles.push(tile);
            }
        }

        let start = player.ok_or_else(|| InvalidLevelSource::new("map has no player start"))?;
        let grid = Grid::new(width as u32, rows.len() as u32, tiles)?;
        if grid.remaining_count() == 0 {
            return Err(InvalidLevelSource::new("map has nothing to consume"));
        }

        let mut level = Level::new(grid, Player::new(start, self.player_speed)?)?;
        for position in hostiles {
            let _ = level.add_hostile(Box::new(Patroller::new(
                position,
                Direction::Up,
                self.hostile_speed,
            )?))?;
        }
        if let Some(name) = self.name {
            level = level.with_name(name);
        }

        debug!(
            "parsed {}x{} level with {} consumables",
            level.grid().width(),
            level.grid().height(),
            level.grid().remaining_count()
        );
        Ok(level)
    }
}

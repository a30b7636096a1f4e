//! Dense tile map owned by a level.

use pacman_core::{Event, Point, Tile};

use crate::WorldError;

/// Rectangular tile map with an implicit wall border.
///
/// Tiles are stored row-major, so the cell at `(x, y)` lives at index
/// `y * width + x`. The number of consumables left is computed once at
/// construction and then maintained on every [`Grid::set`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    remaining: u32,
}

impl Grid {
    /// Builds a grid from row-major tiles.
    ///
    /// Fails with [`WorldError::InvalidArgument`] when either dimension is
    /// zero or when `tiles` does not hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, tiles: Vec<Tile>) -> Result<Self, WorldError> {
        if width == 0 {
            return Err(WorldError::InvalidArgument("grid width must be positive".into()));
        }
        if height == 0 {
            return Err(WorldError::InvalidArgument(
                "grid height must be positive".into(),
            ));
        }
        let expected = u64::from(width) * u64::from(height);
        if expected != tiles.len() as u64 {
            return Err(WorldError::InvalidArgument(format!(
                "grid of {width}x{height} needs {expected} tiles, got {}",
                tiles.len()
            )));
        }

        let remaining = count_consumables(&tiles);
        Ok(Self {
            width,
            height,
            tiles,
            remaining,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major view of every tile.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Consumables left on the grid.
    #[must_use]
    pub const fn remaining_count(&self) -> u32 {
        self.remaining
    }

    /// Reports whether `position` lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Point) -> bool {
        self.index(position).is_some()
    }

    /// Returns the tile at `position`; every cell outside the grid is a wall.
    #[must_use]
    pub fn get(&self, position: Point) -> Tile {
        self.index(position)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::Wall)
    }

    /// Replaces the tile at `position` and records the resulting notification.
    ///
    /// Pushes [`Event::GridCleared`] when this very mutation removed the last
    /// consumable, and [`Event::GridChanged`] otherwise, including rewrites of
    /// a grid that was already empty. Returns the tile that was replaced.
    pub fn set(
        &mut self,
        position: Point,
        tile: Tile,
        out_events: &mut Vec<Event>,
    ) -> Result<Tile, WorldError> {
        let index = self.index(position).ok_or(WorldError::OutOfBounds(position))?;
        let previous = std::mem::replace(&mut self.tiles[index], tile);

        let mut cleared = false;
        match (previous.is_consumable(), tile.is_consumable()) {
            (true, false) => {
                self.remaining -= 1;
                cleared = self.remaining == 0;
            }
            (false, true) => self.remaining += 1,
            _ => {}
        }

        if cleared {
            out_events.push(Event::GridCleared { position });
        } else {
            out_events.push(Event::GridChanged {
                position,
                tile,
                remaining: self.remaining,
            });
        }
        Ok(previous)
    }

    fn index(&self, position: Point) -> Option<usize> {
        let x = u32::try_from(position.x()).ok()?;
        let y = u32::try_from(position.y()).ok()?;
        if x < self.width && y < self.height {
            let width = usize::try_from(self.width).ok()?;
            Some(usize::try_from(y).ok()? * width + usize::try_from(x).ok()?)
        } else {
            None
        }
    }
}

fn count_consumables(tiles: &[Tile]) -> u32 {
    tiles.iter().filter(|tile| tile.is_consumable()).count() as u32
}

//! Latest direction requested by the input side.

use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use pacman_core::Direction;

/// Shared last-write-wins cell holding the most recently requested direction.
///
/// Clones share the same cell, so the input thread can keep one handle while
/// the tick thread reads through another. Requests are never queued: a tick
/// observes whatever was written last.
#[derive(Clone, Debug, Default)]
pub struct DirectionIntent {
    cell: Arc<AtomicU8>,
}

impl DirectionIntent {
    /// Creates an empty intent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending direction.
    pub fn request(&self, direction: Direction) {
        self.cell.store(encode(direction), Ordering::Release);
    }

    /// Direction most recently requested, if any.
    #[must_use]
    pub fn current(&self) -> Option<Direction> {
        decode(self.cell.load(Ordering::Acquire))
    }
}

const fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

const fn decode(value: u8) -> Option<Direction> {
    match value {
        1 => Some(Direction::Up),
        2 => Some(Direction::Down),
        3 => Some(Direction::Left),
        4 => Some(Direction::Right),
        _ => None,
    }
}

//! Scripted input that steers the player one step per arrival.

use std::sync::{Mutex, PoisonError};

use anyhow::{bail, Result};
use pacman_core::{Direction, Event, Observer, Point};
use pacman_system_game::DirectionIntent;

/// Parses a direction script such as `"RRDLU"`. Whitespace is ignored.
pub(crate) fn parse_script(text: &str) -> Result<Vec<Direction>> {
    let mut steps = Vec::new();
    for code in text.chars().filter(|code| !code.is_whitespace()) {
        match Direction::from_code(code) {
            Some(direction) => steps.push(direction),
            None => bail!("unknown direction '{code}' in move script, expected U, D, L or R"),
        }
    }
    Ok(steps)
}

/// Observer feeding the next scripted direction each time the player arrives
/// on a new cell.
#[derive(Debug)]
pub(crate) struct Pilot {
    intent: DirectionIntent,
    state: Mutex<PilotState>,
}

#[derive(Debug)]
struct PilotState {
    steps: Vec<Direction>,
    next: usize,
    last_position: Option<Point>,
}

impl Pilot {
    pub(crate) fn new(intent: DirectionIntent, steps: Vec<Direction>) -> Self {
        Self {
            intent,
            state: Mutex::new(PilotState {
                steps,
                next: 0,
                last_position: None,
            }),
        }
    }

    /// Requests the first scripted direction.
    pub(crate) fn engage(&self) {
        self.lock().advance(&self.intent);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PilotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PilotState {
    fn advance(&mut self, intent: &DirectionIntent) {
        if let Some(direction) = self.steps.get(self.next) {
            intent.request(*direction);
            self.next += 1;
        }
    }
}

impl Observer for Pilot {
    fn notify(&self, event: &Event) {
        let mut state = self.lock();
        match event {
            Event::PlayerChanged { state: player } => {
                if state.last_position != Some(player.position) {
                    state.last_position = Some(player.position);
                    state.advance(&self.intent);
                }
            }
            Event::PlayerDied { state: player } => state.last_position = Some(player.position),
            Event::LevelLoaded { .. } => state.last_position = None,
            _ => {}
        }
    }
}

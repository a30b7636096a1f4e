//! A single playable level: grid, player and hostiles.

use std::sync::Arc;

use log::{debug, trace, warn};
use pacman_core::{Direction, Event, HostileId, Observer, ObserverRegistry, Point, SubscriptionId};

use crate::{movement::Motion, Grid, Hostile, Player, WorldError};

/// Exclusive owner of one grid, one player and any number of hostiles.
///
/// Every notification produced while ticking is appended to the caller's
/// event buffer and delivered to the level's observers, in the order the
/// entities produced them.
#[derive(Debug)]
pub struct Level {
    name: Option<String>,
    grid: Grid,
    player: Player,
    hostiles: Vec<(HostileId, Box<dyn Hostile>)>,
    observers: ObserverRegistry,
    disposed: bool,
}

impl Level {
    /// Composes a level from a grid and a player standing on it.
    ///
    /// Fails with [`WorldError::InvalidArgument`] when the player's start cell
    /// is outside the grid or not passable.
    pub fn new(grid: Grid, player: Player) -> Result<Self, WorldError> {
        validate_spawn(&grid, player.start_position(), "player")?;
        Ok(Self {
            name: None,
            grid,
            player,
            hostiles: Vec::new(),
            observers: ObserverRegistry::new(),
            disposed: false,
        })
    }

    /// Attaches a display name to the level.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Registers a hostile; hostiles tick in registration order.
    pub fn add_hostile(&mut self, hostile: Box<dyn Hostile>) -> Result<HostileId, WorldError> {
        validate_spawn(&self.grid, hostile.position(), "hostile")?;
        let id = HostileId::new(self.hostiles.len() as u32);
        self.hostiles.push((id, hostile));
        Ok(id)
    }

    /// Display name, if the source provided one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The level's tile map.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The level's player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Identifier and position of every hostile, in tick order.
    pub fn hostiles(&self) -> impl Iterator<Item = (HostileId, Point)> + '_ {
        self.hostiles
            .iter()
            .map(|(id, hostile)| (*id, hostile.position()))
    }

    /// Reports whether [`Level::dispose`] was called.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of observers attached to the level.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Subscribes `observer` to every grid and entity notification.
    pub fn register_observer(&mut self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.attach_observer(id, observer);
        id
    }

    /// Subscribes `observer` under a handle allocated elsewhere.
    pub fn attach_observer(&mut self, id: SubscriptionId, observer: Arc<dyn Observer>) {
        if self.disposed {
            warn!("ignoring observer registration on a disposed level");
            return;
        }
        debug!("attaching observer {} to level", id.get());
        self.observers.attach(id, observer);
    }

    /// Removes the observer registered under `id`.
    pub fn unregister_observer(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Re-publishes the current player state so late observers can catch up.
    pub fn force_notify(&self) {
        self.observers.publish(&Event::PlayerChanged {
            state: self.player.snapshot(),
        });
    }

    /// Advances the player, then every hostile, by one tick.
    ///
    /// `direction` is the latest requested direction; `None` lets the player
    /// keep its facing. Contact between the player and a hostile is resolved
    /// after everything moved: sharing a cell or swapping cells counts. An
    /// energized player sends the hostile home, otherwise the player dies and
    /// every hostile respawns.
    ///
    /// The level must not be ticked after [`Level::dispose`].
    pub fn tick(
        &mut self,
        direction: Option<Direction>,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        debug_assert!(!self.disposed, "tick requested on a disposed level");

        let first = out_events.len();
        let player_from = self.player.position();
        let direction = direction.unwrap_or_else(|| self.player.facing());
        let _ = self.player.tick(direction, &mut self.grid, out_events)?;

        let mut hostiles_from = Vec::with_capacity(self.hostiles.len());
        for (id, hostile) in &mut self.hostiles {
            hostiles_from.push(hostile.position());
            if let Motion::Arrived { position } = hostile.tick(&self.grid) {
                out_events.push(Event::HostileMoved {
                    hostile: *id,
                    position,
                });
            }
        }

        self.resolve_contacts(player_from, &hostiles_from, out_events);

        for event in &out_events[first..] {
            trace!("level event {event:?}");
            self.observers.publish(event);
        }
        Ok(())
    }

    /// Detaches every observer and drops the hostiles. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!(
            "disposing level {}",
            self.name.as_deref().unwrap_or("<unnamed>")
        );
        self.observers.clear();
        self.hostiles.clear();
        self.disposed = true;
    }

    fn resolve_contacts(
        &mut self,
        player_from: Point,
        hostiles_from: &[Point],
        out_events: &mut Vec<Event>,
    ) {
        let player_to = self.player.position();
        let mut caught = false;

        for ((id, hostile), &hostile_from) in self.hostiles.iter_mut().zip(hostiles_from) {
            let hostile_to = hostile.position();
            let shared = hostile_to == player_to;
            let swapped = hostile_to == player_from && hostile_from == player_to;
            if !shared && !swapped {
                continue;
            }
            if self.player.is_energized() {
                hostile.respawn();
                out_events.push(Event::HostileReset {
                    hostile: *id,
                    position: hostile.position(),
                });
            } else {
                caught = true;
                break;
            }
        }

        if !caught {
            return;
        }

        self.player.die(out_events);
        for (id, hostile) in &mut self.hostiles {
            hostile.respawn();
            out_events.push(Event::HostileReset {
                hostile: *id,
                position: hostile.position(),
            });
        }
    }
}

fn validate_spawn(grid: &Grid, position: Point, what: &str) -> Result<(), WorldError> {
    if !grid.contains(position) {
        return Err(WorldError::InvalidArgument(format!(
            "{what} spawn ({}, {}) is outside the grid",
            position.x(),
            position.y()
        )));
    }
    if !grid.get(position).is_passable() {
        return Err(WorldError::InvalidArgument(format!(
            "{what} spawn ({}, {}) is a wall",
            position.x(),
            position.y()
        )));
    }
    Ok(())
}

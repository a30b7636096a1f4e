//! Fixed-interval driver that ticks a shared game on its own thread.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error};
use pacman_core::DEFAULT_TICK_INTERVAL_MS;

use crate::Game;

/// Periodic tick source for a [`Game`] shared behind a mutex.
///
/// The clock thread takes the game lock once per interval. It stops when
/// asked to, when the game leaves the running phase or when a tick fails.
/// [`TickClock::stop`] joins the thread, so once it returns no tick is in
/// flight.
#[derive(Debug)]
pub struct TickClock {
    interval: Duration,
    worker: Option<Worker>,
}

#[derive(Debug)]
struct Worker {
    halt: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_INTERVAL_MS))
    }
}

impl TickClock {
    /// Creates a stopped clock firing every `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            worker: None,
        }
    }

    /// Time between two ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Reports whether the clock thread is still ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    /// Starts ticking `game` on a fresh thread.
    ///
    /// A previous clock thread is stopped and joined first, including one that
    /// is about to exit on its own. The caller must not hold the game lock.
    pub fn start(&mut self, game: Arc<Mutex<Game>>) {
        self.stop();

        let halt = Arc::new(AtomicBool::new(false));
        let interval = self.interval;
        let flag = Arc::clone(&halt);
        let handle = thread::spawn(move || run(&game, &flag, interval));
        debug!("tick clock started at {interval:?}");
        self.worker = Some(Worker { halt, handle });
    }

    /// Stops the clock and waits for an in-flight tick to finish.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.halt.store(true, Ordering::Release);
        if worker.handle.join().is_err() {
            error!("tick clock thread panicked");
        }
        debug!("tick clock stopped");
    }
}

impl Drop for TickClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(game: &Mutex<Game>, halt: &AtomicBool, interval: Duration) {
    loop {
        thread::sleep(interval);
        if halt.load(Ordering::Acquire) {
            return;
        }
        let mut game = game.lock().unwrap_or_else(PoisonError::into_inner);
        if !game.is_running() {
            debug!("tick clock idle, game is {:?}", game.phase());
            return;
        }
        if let Err(failure) = game.tick() {
            error!("tick failed: {failure}");
            game.pause();
            return;
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner for the PacMan simulation.
//!
//! Plays every level of a directory on the tick clock, steering the player
//! with a scripted move string, and records the result in a champions table.

mod config;
mod pilot;

use std::{
    path::PathBuf,
    sync::{mpsc, Arc},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use pacman_core::{Direction, Event, Observer};
use pacman_system_champions::ChampionsTable;
use pacman_system_game::{DirectorySource, Game, Session};

use crate::{
    config::CliConfig,
    pilot::{parse_script, Pilot},
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Command-line arguments accepted by the runner.
#[derive(Debug, Parser)]
#[command(name = "pacman", version, about = "Plays PacMan levels headlessly")]
struct Args {
    /// Directory holding the level files, played in file name order.
    #[arg(long, default_value = "levels")]
    levels: PathBuf,
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Moves to play, one per cell reached, e.g. "RRDDL".
    #[arg(long, default_value = "")]
    moves: String,
    /// Best score carried over from previous sessions.
    #[arg(long)]
    best_score: Option<u32>,
    /// Name recorded in the champions table.
    #[arg(long)]
    name: Option<String>,
    /// Ticks after which the session is abandoned.
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Milliseconds between two ticks.
    #[arg(long)]
    interval_ms: Option<u64>,
}

/// State of the game once the runner stopped.
#[derive(Debug)]
struct Outcome {
    won: bool,
    finished: bool,
    game_score: u32,
    best_score: u32,
    level: usize,
    levels: usize,
    ticks: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let steps = parse_script(&args.moves)?;
    let mut champions = ChampionsTable::with_capacity(config.champions.capacity)
        .context("invalid champions configuration")?;

    let best_score = seed_best_score(config.session.best_score, &champions);
    let outcome = play(&args, &config, best_score, steps)?;
    report(&outcome);

    if outcome.finished && champions.is_new_record(outcome.game_score) {
        if let Some(rank) = champions.add_result(outcome.game_score, &config.session.player_name)? {
            println!("new champion at rank {rank}:");
            for (place, champion) in champions.entries().iter().enumerate() {
                println!("{:>3}. {:<16} {}", place + 1, champion.name, champion.score);
            }
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<CliConfig> {
    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(interval_ms) = args.interval_ms {
        config.clock.interval_ms = interval_ms;
    }
    if let Some(best_score) = args.best_score {
        config.session.best_score = best_score;
    }
    if let Some(name) = &args.name {
        config.session.player_name = name.clone();
    }
    if let Some(max_ticks) = args.max_ticks {
        config.session.max_ticks = max_ticks;
    }
    Ok(config)
}

/// Best score a new game starts from: the configured one or the table's best.
fn seed_best_score(configured: u32, champions: &ChampionsTable) -> u32 {
    configured.max(champions.best_score())
}

fn play(
    args: &Args,
    config: &CliConfig,
    best_score: u32,
    steps: Vec<Direction>,
) -> Result<Outcome> {
    let mut session = Session::new(Game::default(), config.interval());
    let pilot = Arc::new(Pilot::new(session.game().intent(), steps));
    let (sender, receiver) = mpsc::channel();
    let forwarder: Arc<dyn Observer> = Arc::new(move |event: &Event| {
        if matches!(event, Event::LevelLoaded { .. } | Event::LevelFinished { .. }) {
            let _ = sender.send(event.clone());
        }
    });
    {
        let mut game = session.game();
        let _ = game.register_observer(Arc::clone(&pilot) as Arc<dyn Observer>);
        let _ = game.register_observer(forwarder);
    }

    session
        .new_game(best_score, DirectorySource::new(&args.levels))
        .with_context(|| format!("cannot start a game from {}", args.levels.display()))?;
    pilot.engage();
    let _ = session.start();

    loop {
        match receiver.recv_timeout(POLL_INTERVAL) {
            Ok(Event::LevelLoaded { index, identifier }) => {
                info!("playing level {} ({identifier})", index + 1);
            }
            Ok(Event::LevelFinished {
                won: true,
                finished: false,
            }) => {
                if session.load_next_level()? {
                    let _ = session.start();
                }
            }
            Ok(Event::LevelFinished { .. }) => break,
            Ok(_) => {}
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if !session.is_running() && !session.game().phase().is_terminal() {
                    warn!("tick clock stopped unexpectedly");
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if session.game().ticks() >= config.session.max_ticks {
            session.pause();
            warn!("giving up after {} ticks", config.session.max_ticks);
            break;
        }
    }

    let game = session.game();
    Ok(Outcome {
        won: game.is_won(),
        finished: game.is_finished(),
        game_score: game.game_score(),
        best_score: game.best_score(),
        level: game.level_index().map_or(0, |index| index + 1),
        levels: game.level_count(),
        ticks: game.ticks(),
    })
}

fn report(outcome: &Outcome) {
    let verdict = match (outcome.finished, outcome.won) {
        (true, true) => "won",
        (true, false) => "lost",
        _ => "abandoned",
    };
    println!(
        "game {verdict} on level {}/{} after {} ticks: score {}, best {}",
        outcome.level, outcome.levels, outcome.ticks, outcome.game_score, outcome.best_score
    );
}

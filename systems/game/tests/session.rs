use std::{
    fs,
    thread,
    time::{Duration, Instant},
};

use pacman_core::Direction;
use pacman_system_game::{
    DirectorySource, Game, GameError, GamePhase, LevelSource, Session, TickClock,
};
use tempfile::TempDir;

const QUICK: &str = "player_speed = 2\nmap = \"#P..#\"";
const ENDLESS: &str = "player_speed = 1000000\nmap = \"#P.#\"";

fn level_dir(levels: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, document) in levels {
        fs::write(dir.path().join(name), document).expect("write level");
    }
    dir
}

fn wait_for(session: &Session, phase: GamePhase) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while session.game().phase() != phase {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {phase:?}, game is {:?}",
            session.game().phase()
        );
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn directory_source_lists_files_in_name_order() {
    let dir = level_dir(&[("02-second.toml", QUICK), ("01-first.toml", QUICK)]);
    fs::create_dir(dir.path().join("nested")).expect("nested dir");

    let source = DirectorySource::new(dir.path());

    assert_eq!(
        source.enumerate().expect("enumerate"),
        vec!["01-first.toml".to_owned(), "02-second.toml".to_owned()]
    );
}

#[test]
fn missing_directory_is_invalid() {
    let dir = level_dir(&[]);
    let mut game = Game::default();

    let error = game
        .new_game(0, DirectorySource::new(dir.path().join("absent")))
        .expect_err("missing directory");

    assert!(matches!(
        error,
        GameError::InvalidLevelDirectory {
            source: Some(_),
            ..
        }
    ));
}

#[test]
fn empty_directory_is_invalid() {
    let dir = level_dir(&[]);
    let mut game = Game::default();

    let error = game
        .new_game(0, DirectorySource::new(dir.path()))
        .expect_err("empty directory");

    assert!(matches!(
        error,
        GameError::InvalidLevelDirectory { source: None, .. }
    ));
}

#[test]
fn clock_plays_through_every_level() {
    let dir = level_dir(&[("01.toml", QUICK), ("02.toml", QUICK)]);
    let mut session = Session::new(Game::default(), Duration::from_millis(1));
    session
        .new_game(0, DirectorySource::new(dir.path()))
        .expect("new game");
    session.request_direction(Direction::Right);

    assert!(session.start());
    wait_for(&session, GamePhase::LevelWon);
    assert_eq!(session.game().game_score(), 20);

    assert!(session.load_next_level().expect("load"));
    assert!(session.start());
    wait_for(&session, GamePhase::GameWon);

    let game = session.game();
    assert!(game.is_won());
    assert!(game.is_finished());
    assert_eq!(game.game_score(), 40);
}

#[test]
fn clock_stops_by_itself_once_the_level_ends() {
    let dir = level_dir(&[("01.toml", QUICK)]);
    let mut session = Session::new(Game::default(), Duration::from_millis(1));
    session
        .new_game(0, DirectorySource::new(dir.path()))
        .expect("new game");
    session.request_direction(Direction::Right);
    assert!(session.start());
    wait_for(&session, GamePhase::GameWon);

    let deadline = Instant::now() + Duration::from_secs(5);
    while session.is_running() {
        assert!(Instant::now() < deadline, "clock kept running");
        thread::sleep(Duration::from_millis(1));
    }
    assert!(!session.start());
}

#[test]
fn pause_waits_for_the_clock() {
    let dir = level_dir(&[("01.toml", ENDLESS)]);
    let mut session = Session::new(Game::default(), Duration::from_millis(1));
    session
        .new_game(0, DirectorySource::new(dir.path()))
        .expect("new game");

    assert!(session.start());
    let deadline = Instant::now() + Duration::from_secs(5);
    while session.game().ticks() == 0 {
        assert!(Instant::now() < deadline, "clock never ticked");
        thread::sleep(Duration::from_millis(1));
    }

    session.pause();
    assert!(!session.is_running());
    assert_eq!(session.game().phase(), GamePhase::Paused);
    let ticks = session.game().ticks();
    thread::sleep(Duration::from_millis(20));
    assert_eq!(session.game().ticks(), ticks);

    session.pause();
    assert!(session.start());
    assert!(session.is_running());
}

#[test]
fn stopping_an_idle_clock_is_harmless() {
    let mut clock = TickClock::default();
    assert!(!clock.is_running());
    clock.stop();
    clock.stop();
    assert_eq!(clock.interval(), Duration::from_millis(5));
}

fn wait_for_ticks_beyond(session: &Session, ticks: u64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while session.game().ticks() <= ticks {
        assert!(Instant::now() < deadline, "clock stopped ticking");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn restarting_right_after_a_direct_pause_keeps_ticking() {
    let dir = level_dir(&[("01.toml", ENDLESS)]);
    let mut session = Session::new(Game::default(), Duration::from_millis(1));
    session
        .new_game(0, DirectorySource::new(dir.path()))
        .expect("new game");

    for _ in 0..20 {
        assert!(session.start());
        let ticks = session.game().ticks();
        wait_for_ticks_beyond(&session, ticks);

        session.game().pause();
        thread::sleep(Duration::from_millis(2));
    }

    assert!(session.start());
    let ticks = session.game().ticks();
    wait_for_ticks_beyond(&session, ticks);
    assert!(session.is_running());
}

use pacman_core::{Direction, Point, Tile};
use pacman_world::{Grid, Motion, Mover, WorldError};

/// Builds a grid from rows of `#` walls and `.` floor cells.
fn grid(rows: &[&str]) -> Grid {
    let width = rows[0].len() as u32;
    let tiles = rows
        .iter()
        .flat_map(|row| row.chars())
        .map(|symbol| if symbol == '#' { Tile::Wall } else { Tile::Floor })
        .collect();
    Grid::new(width, rows.len() as u32, tiles).expect("grid")
}

#[test]
fn zero_speed_is_rejected() {
    assert!(matches!(
        Mover::new(Point::new(0, 0), Direction::Left, 0),
        Err(WorldError::InvalidArgument(_))
    ));
}

#[test]
fn arrives_exactly_on_the_speed_th_request() {
    let grid = grid(&["...."]);
    let speed = 4;
    let mut mover = Mover::new(Point::new(0, 0), Direction::Right, speed).expect("mover");

    for expected in 1..speed {
        let motion = mover.request_move(Direction::Right, &grid);
        assert_eq!(
            motion,
            Motion::InTransit {
                sub_tick: expected,
                target: Point::new(1, 0),
            }
        );
        assert_eq!(mover.position(), Point::new(0, 0), "moved before arrival");
        assert_eq!(mover.sub_tick(), expected);
    }

    let motion = mover.request_move(Direction::Right, &grid);
    assert_eq!(
        motion,
        Motion::Arrived {
            position: Point::new(1, 0)
        }
    );
    assert_eq!(mover.position(), Point::new(1, 0));
    assert_eq!(mover.sub_tick(), 0);
    assert!(mover.is_idle());
}

#[test]
fn speed_one_arrives_on_the_first_request() {
    let grid = grid(&["..."]);
    let mut mover = Mover::new(Point::new(1, 0), Direction::Left, 1).expect("mover");

    assert_eq!(
        mover.request_move(Direction::Left, &grid),
        Motion::Arrived {
            position: Point::new(0, 0)
        }
    );
}

#[test]
fn turns_toward_a_passable_requested_direction() {
    let grid = grid(&[
        "#.#", //
        "..#", //
        "###",
    ]);
    let mut mover = Mover::new(Point::new(1, 1), Direction::Right, 3).expect("mover");

    let motion = mover.request_move(Direction::Up, &grid);

    assert_eq!(
        motion,
        Motion::InTransit {
            sub_tick: 1,
            target: Point::new(1, 0),
        }
    );
    assert_eq!(mover.facing(), Direction::Up);
}

#[test]
fn coasts_straight_when_the_requested_direction_is_blocked() {
    let grid = grid(&[
        "###", //
        "...", //
        "###",
    ]);
    let mut mover = Mover::new(Point::new(1, 1), Direction::Right, 2).expect("mover");

    let motion = mover.request_move(Direction::Up, &grid);

    assert_eq!(
        motion,
        Motion::InTransit {
            sub_tick: 1,
            target: Point::new(2, 1),
        }
    );
    assert_eq!(mover.facing(), Direction::Right);
}

#[test]
fn stays_idle_when_both_directions_are_blocked() {
    let grid = grid(&[
        "###", //
        "#..", //
        "###",
    ]);
    let mut mover = Mover::new(Point::new(1, 1), Direction::Up, 2).expect("mover");

    assert_eq!(mover.request_move(Direction::Left, &grid), Motion::Blocked);
    assert_eq!(mover.position(), Point::new(1, 1));
    assert_eq!(mover.sub_tick(), 0);
    assert_eq!(mover.facing(), Direction::Up);
}

#[test]
fn grid_border_blocks_movement() {
    let grid = grid(&[".."]);
    let mut mover = Mover::new(Point::new(0, 0), Direction::Left, 1).expect("mover");

    assert_eq!(mover.request_move(Direction::Up, &grid), Motion::Blocked);
}

#[test]
fn direction_changes_mid_transit_are_deferred() {
    let grid = grid(&[
        ".#.", //
        "...", //
        "...",
    ]);
    let mut mover = Mover::new(Point::new(1, 1), Direction::Right, 3).expect("mover");

    let _ = mover.request_move(Direction::Right, &grid);
    let motion = mover.request_move(Direction::Down, &grid);
    assert_eq!(
        motion,
        Motion::InTransit {
            sub_tick: 2,
            target: Point::new(2, 1),
        }
    );
    assert_eq!(
        mover.request_move(Direction::Left, &grid),
        Motion::Arrived {
            position: Point::new(2, 1)
        }
    );
    assert_eq!(mover.facing(), Direction::Right);

    let _ = mover.request_move(Direction::Down, &grid);
    assert_eq!(mover.facing(), Direction::Down);
    assert_eq!(mover.target(), Some(Point::new(2, 2)));
}

#[test]
fn teleport_cancels_the_transition() {
    let grid = grid(&["...."]);
    let mut mover = Mover::new(Point::new(1, 0), Direction::Right, 5).expect("mover");
    let _ = mover.request_move(Direction::Right, &grid);

    mover.teleport(Point::new(3, 0));

    assert_eq!(mover.position(), Point::new(3, 0));
    assert!(mover.is_idle());
    assert_eq!(mover.target(), None);
}

#[test]
fn face_only_turns_idle_movers() {
    let grid = grid(&["..."]);
    let mut mover = Mover::new(Point::new(0, 0), Direction::Right, 3).expect("mover");

    assert!(mover.face(Direction::Down));
    let _ = mover.request_move(Direction::Right, &grid);
    assert!(!mover.face(Direction::Up));
    assert_eq!(mover.facing(), Direction::Right);
}

use pacman_core::{Event, Point, Tile};
use pacman_world::{Grid, WorldError};
use proptest::prelude::*;

const PELLET: Tile = Tile::Pellet { cost: 10 };
const ENERGIZER: Tile = Tile::Energizer {
    cost: 50,
    duration: 20,
};

fn row(tiles: &[Tile]) -> Grid {
    Grid::new(tiles.len() as u32, 1, tiles.to_vec()).expect("grid")
}

#[test]
fn construction_counts_every_consumable() {
    let grid = row(&[Tile::Wall, PELLET, Tile::Floor, ENERGIZER, PELLET]);
    assert_eq!(grid.remaining_count(), 3);
}

#[test]
fn construction_rejects_mismatched_dimensions() {
    assert!(matches!(
        Grid::new(0, 3, Vec::new()),
        Err(WorldError::InvalidArgument(_))
    ));
    assert!(matches!(
        Grid::new(2, 0, Vec::new()),
        Err(WorldError::InvalidArgument(_))
    ));
    assert!(matches!(
        Grid::new(2, 2, vec![Tile::Floor; 3]),
        Err(WorldError::InvalidArgument(_))
    ));
}

#[test]
fn out_of_range_queries_return_walls() {
    let grid = row(&[Tile::Floor, Tile::Floor]);
    assert_eq!(grid.get(Point::new(-1, 0)), Tile::Wall);
    assert_eq!(grid.get(Point::new(0, -1)), Tile::Wall);
    assert_eq!(grid.get(Point::new(2, 0)), Tile::Wall);
    assert_eq!(grid.get(Point::new(0, 1)), Tile::Wall);
    assert_eq!(grid.get(Point::new(i32::MIN, i32::MAX)), Tile::Wall);
}

#[test]
fn set_outside_the_grid_fails() {
    let mut grid = row(&[PELLET]);
    let mut events = Vec::new();
    let target = Point::new(1, 0);
    assert_eq!(
        grid.set(target, Tile::Floor, &mut events),
        Err(WorldError::OutOfBounds(target))
    );
    assert_eq!(
        grid.set(Point::new(-1, 0), Tile::Floor, &mut events),
        Err(WorldError::OutOfBounds(Point::new(-1, 0)))
    );
    assert!(events.is_empty());
    assert_eq!(grid.remaining_count(), 1);
}

#[test]
fn replacing_a_consumable_emits_changed_while_some_remain() {
    let mut grid = row(&[PELLET, PELLET]);
    let mut events = Vec::new();

    let previous = grid
        .set(Point::new(0, 0), Tile::Floor, &mut events)
        .expect("set");

    assert_eq!(previous, PELLET);
    assert_eq!(grid.remaining_count(), 1);
    assert_eq!(
        events,
        vec![Event::GridChanged {
            position: Point::new(0, 0),
            tile: Tile::Floor,
            remaining: 1,
        }]
    );
}

#[test]
fn removing_the_last_consumable_emits_cleared_instead_of_changed() {
    let mut grid = row(&[Tile::Floor, ENERGIZER]);
    let mut events = Vec::new();

    let _ = grid
        .set(Point::new(1, 0), Tile::Floor, &mut events)
        .expect("set");

    assert_eq!(grid.remaining_count(), 0);
    assert_eq!(
        events,
        vec![Event::GridCleared {
            position: Point::new(1, 0),
        }]
    );
}

#[test]
fn adding_a_consumable_raises_the_count() {
    let mut grid = row(&[Tile::Floor, PELLET]);
    let mut events = Vec::new();

    let _ = grid.set(Point::new(0, 0), ENERGIZER, &mut events).expect("set");

    assert_eq!(grid.remaining_count(), 2);
    assert!(matches!(
        events.as_slice(),
        [Event::GridChanged { remaining: 2, .. }]
    ));
}

#[test]
fn swapping_consumables_keeps_the_count() {
    let mut grid = row(&[PELLET]);
    let mut events = Vec::new();

    let _ = grid.set(Point::new(0, 0), ENERGIZER, &mut events).expect("set");

    assert_eq!(grid.remaining_count(), 1);
    assert_eq!(grid.get(Point::new(0, 0)), ENERGIZER);
}

#[test]
fn rewriting_an_empty_grid_reports_a_change() {
    let mut grid = row(&[Tile::Floor, Tile::Floor]);
    let mut events = Vec::new();

    let _ = grid.set(Point::new(0, 0), Tile::Wall, &mut events).expect("set");

    assert!(matches!(
        events.as_slice(),
        [Event::GridChanged { remaining: 0, .. }]
    ));
}

fn any_tile() -> impl Strategy<Value = Tile> {
    prop_oneof![
        Just(Tile::Wall),
        Just(Tile::Floor),
        (1u32..100).prop_map(|cost| Tile::Pellet { cost }),
        (1u32..100, 1u32..50).prop_map(|(cost, duration)| Tile::Energizer { cost, duration }),
    ]
}

proptest! {
    #[test]
    fn remaining_count_tracks_actual_contents(
        width in 1u32..8,
        height in 1u32..8,
        seed in proptest::collection::vec(any_tile(), 64),
        edits in proptest::collection::vec((-2i32..10, -2i32..10, any_tile()), 0..64),
    ) {
        let len = (width * height) as usize;
        let tiles: Vec<Tile> = seed.into_iter().cycle().take(len).collect();
        let mut grid = Grid::new(width, height, tiles).expect("grid");
        let mut events = Vec::new();

        for (x, y, tile) in edits {
            let position = Point::new(x, y);
            let before = grid.remaining_count();
            match grid.set(position, tile, &mut events) {
                Ok(_) => prop_assert!(grid.contains(position)),
                Err(error) => {
                    prop_assert_eq!(error, WorldError::OutOfBounds(position));
                    prop_assert_eq!(grid.remaining_count(), before);
                }
            }
            let recount = grid.tiles().iter().filter(|tile| tile.is_consumable()).count() as u32;
            prop_assert_eq!(grid.remaining_count(), recount);
        }
    }

    #[test]
    fn get_is_total(x in any::<i32>(), y in any::<i32>()) {
        let grid = Grid::new(3, 3, vec![Tile::Floor; 9]).expect("grid");
        let tile = grid.get(Point::new(x, y));
        if grid.contains(Point::new(x, y)) {
            prop_assert_eq!(tile, Tile::Floor);
        } else {
            prop_assert_eq!(tile, Tile::Wall);
        }
    }
}

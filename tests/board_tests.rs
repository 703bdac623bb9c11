use broadside::{BoardError, Coordinate, Gameboard, HitError, HitOutcome, Orientation, Ship};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_fresh_board_miss() {
    let mut board = Gameboard::new();
    assert_eq!(board.receive_hit(Coordinate::new(3, 3)).unwrap(), HitOutcome::Miss);
    assert!(board.cell(Coordinate::new(3, 3)).unwrap().is_hit());
}

#[test]
fn test_two_cell_ship_hit_then_sunk() {
    let mut board = Gameboard::new();
    board.place_ship(3, Coordinate::new(0, 0), Orientation::Right).unwrap();
    assert_eq!(board.receive_hit(Coordinate::new(0, 0)).unwrap(), HitOutcome::Ship);
    assert_eq!(board.receive_hit(Coordinate::new(1, 0)).unwrap(), HitOutcome::Sunk);
    assert_eq!(
        board.ship_cells_of(Coordinate::new(1, 0)),
        Some(vec![Coordinate::new(0, 0), Coordinate::new(1, 0)])
    );
}

#[test]
fn test_repeated_shot_at_sunk_ship_still_reports_sunk() {
    // the ship refuses the second hit; the board absorbs it
    let mut board = Gameboard::new();
    board.place_ship(4, Coordinate::new(9, 9), Orientation::Up).unwrap();
    assert_eq!(board.receive_hit(Coordinate::new(9, 9)), Ok(HitOutcome::Sunk));
    assert_eq!(board.receive_hit(Coordinate::new(9, 9)), Ok(HitOutcome::Sunk));
    assert_eq!(board.ships()[4].hits(), &[Coordinate::new(9, 9)]);
}

#[test]
fn test_off_board_shot() {
    let mut board = Gameboard::new();
    assert_eq!(
        board.receive_hit(Coordinate::new(10, 0)),
        Err(HitError::OutOfRange(Coordinate::new(10, 0)))
    );
}

#[test]
fn test_all_sunk_partial_and_complete() {
    let mut ships = vec![Ship::new(1), Ship::new(2), Ship::new(3)];
    ships[0].record_hit(Coordinate::new(0, 0)).unwrap();
    ships[1].record_hit(Coordinate::new(0, 1)).unwrap();
    ships[2].record_hit(Coordinate::new(1, 1)).unwrap();
    assert!(!broadside::all_sunk(&ships));

    ships[1].record_hit(Coordinate::new(0, 2)).unwrap();
    ships[2].record_hit(Coordinate::new(1, 2)).unwrap();
    ships[2].record_hit(Coordinate::new(1, 3)).unwrap();
    assert!(broadside::all_sunk(&ships));
}

#[test]
fn test_random_placement_reproducible() {
    let mut a = Gameboard::new();
    let mut b = Gameboard::new();
    a.place_ships_randomly(&mut SmallRng::seed_from_u64(42), 100).unwrap();
    b.place_ships_randomly(&mut SmallRng::seed_from_u64(42), 100).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_clear_resets_ships_and_cells() {
    let mut board = Gameboard::new();
    let mut rng = SmallRng::seed_from_u64(8);
    board.place_ships_randomly(&mut rng, 100).unwrap();
    board.receive_hit(Coordinate::new(5, 5)).unwrap();
    board.clear();
    assert_eq!(board, Gameboard::new());
    assert_eq!(
        board.place_ship(7, Coordinate::new(0, 0), Orientation::Down),
        Err(BoardError::InvalidIndex(7))
    );
}

use broadside::{
    AttackMark, AttackOutcome, Board, BoardError, Coord, Orientation, PlayerId, SessionToken,
    ShipKind, SHIPS, TOTAL_SHIP_CELLS,
};
use rand::{rngs::SmallRng, SeedableRng};

fn coord(x: usize, y: usize) -> Coord {
    Coord::new(x, y).unwrap()
}

fn empty_board() -> Board {
    let mut rng = SmallRng::seed_from_u64(7);
    Board::new(PlayerId::generate(&mut rng), SessionToken::generate(&mut rng))
}

/// Carrier on row 0, battleship on row 1, ..., destroyer on row 4, all from x = 0.
fn stacked_board() -> Board {
    let mut board = empty_board();
    for (row, kind) in SHIPS.iter().enumerate() {
        board
            .place_ship(*kind, coord(0, row), Orientation::Horizontal)
            .unwrap();
    }
    board
}

#[test]
fn placement_paints_markers() -> Result<(), BoardError> {
    let mut board = empty_board();
    board.place_ship(ShipKind::Cruiser, coord(2, 3), Orientation::Vertical)?;
    let marker = ShipKind::Cruiser.marker();
    assert_eq!(board.marker_at(coord(2, 3)), marker);
    assert_eq!(board.marker_at(coord(2, 4)), marker);
    assert_eq!(board.marker_at(coord(2, 5)), marker);
    assert_eq!(board.marker_at(coord(2, 6)), 0);
    assert_eq!(board.marker_at(coord(3, 3)), 0);
    assert!(board.has_ship(ShipKind::Cruiser));
    assert!(!board.all_ships_placed());
    Ok(())
}

#[test]
fn overlapping_placement_leaves_grid_unchanged() -> Result<(), BoardError> {
    let mut board = empty_board();
    board.place_ship(ShipKind::Carrier, coord(0, 2), Orientation::Horizontal)?;
    let before = *board.marker_grid();
    let err = board
        .place_ship(ShipKind::Battleship, coord(3, 0), Orientation::Vertical)
        .unwrap_err();
    assert_eq!(err, BoardError::ShipOverlaps);
    assert_eq!(*board.marker_grid(), before);
    assert!(!board.has_ship(ShipKind::Battleship));
    Ok(())
}

#[test]
fn duplicate_and_out_of_bounds_placements_rejected() -> Result<(), BoardError> {
    let mut board = empty_board();
    board.place_ship(ShipKind::Destroyer, coord(0, 0), Orientation::Horizontal)?;
    assert_eq!(
        board.place_ship(ShipKind::Destroyer, coord(5, 5), Orientation::Horizontal),
        Err(BoardError::ShipAlreadyPlaced(ShipKind::Destroyer))
    );
    assert_eq!(
        board.place_ship(ShipKind::Carrier, coord(7, 7), Orientation::Vertical),
        Err(BoardError::ShipOutOfBounds)
    );
    Ok(())
}

#[test]
fn attacks_refused_until_fleet_placed() -> Result<(), BoardError> {
    let mut board = empty_board();
    board.place_ship(ShipKind::Destroyer, coord(0, 0), Orientation::Horizontal)?;
    assert_eq!(
        board.register_attack(coord(0, 0)),
        Err(BoardError::ShipsNotPlaced)
    );
    assert!(board
        .attack_grid()
        .iter()
        .flatten()
        .all(|mark| *mark == AttackMark::Unattempted));
    assert!(board.moves().is_empty());
    Ok(())
}

#[test]
fn lone_destroyer_is_hit_then_sunk() -> Result<(), BoardError> {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut board = Board::with_fleet(
        PlayerId::generate(&mut rng),
        SessionToken::generate(&mut rng),
        &[ShipKind::Destroyer],
    );
    board.place_ship(ShipKind::Destroyer, coord(0, 0), Orientation::Horizontal)?;
    assert!(board.all_ships_placed());

    assert_eq!(
        board.register_attack(coord(5, 5))?,
        AttackOutcome {
            hit: false,
            sunk: None,
            sunk_all: false
        }
    );
    assert_eq!(
        board.register_attack(coord(0, 0))?,
        AttackOutcome {
            hit: true,
            sunk: Some(false),
            sunk_all: false
        }
    );
    assert_eq!(
        board.register_attack(coord(1, 0))?,
        AttackOutcome {
            hit: true,
            sunk: Some(true),
            sunk_all: true
        }
    );
    assert!(board.is_sunk_all());
    assert_eq!(
        board.register_attack(coord(9, 9)),
        Err(BoardError::AlreadyDefeated)
    );
    Ok(())
}

#[test]
fn fleet_outside_board_fleet_rejected() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut board = Board::with_fleet(
        PlayerId::generate(&mut rng),
        SessionToken::generate(&mut rng),
        &[ShipKind::Destroyer],
    );
    assert_eq!(
        board.place_ship(ShipKind::Carrier, coord(0, 0), Orientation::Horizontal),
        Err(BoardError::ShipNotInFleet(ShipKind::Carrier))
    );
}

#[test]
fn sinking_shortest_ship_leaves_fleet_afloat() -> Result<(), BoardError> {
    let mut board = stacked_board();
    let first = board.register_attack(coord(0, 4))?;
    assert_eq!(first, AttackOutcome::hit(false, false));
    let second = board.register_attack(coord(1, 4))?;
    assert_eq!(second, AttackOutcome::hit(true, false));
    let sunk: Vec<_> = board
        .ships()
        .filter(|s| s.is_sunk())
        .map(|s| s.kind())
        .collect();
    assert_eq!(sunk, vec![ShipKind::Destroyer]);
    assert!(!board.is_sunk_all());
    Ok(())
}

#[test]
fn sinking_every_ship_sets_sunk_all() -> Result<(), BoardError> {
    let mut board = stacked_board();
    let cells: Vec<Coord> = board.ships().flat_map(|s| s.cells()).collect();
    assert_eq!(cells.len(), TOTAL_SHIP_CELLS);
    let mut last = AttackOutcome::MISS;
    for c in cells {
        assert!(!board.is_sunk_all());
        last = board.register_attack(c)?;
    }
    assert_eq!(last, AttackOutcome::hit(true, true));
    assert!(board.is_sunk_all());
    assert_eq!(board.moves().len(), TOTAL_SHIP_CELLS);
    Ok(())
}

#[test]
fn repeated_shot_counts_again() -> Result<(), BoardError> {
    let mut board = stacked_board();
    board.register_attack(coord(0, 4))?;
    let again = board.register_attack(coord(0, 4))?;
    assert_eq!(again, AttackOutcome::hit(true, false));
    assert!(board.ship(ShipKind::Destroyer).unwrap().is_sunk());
    assert_eq!(board.moves(), &[coord(0, 4), coord(0, 4)]);

    board.register_attack(coord(9, 9))?;
    assert_eq!(board.register_attack(coord(9, 9))?, AttackOutcome::MISS);
    assert_eq!(board.attack_mark(coord(9, 9)), AttackMark::Miss);
    Ok(())
}

#[test]
fn attack_grid_records_results() -> Result<(), BoardError> {
    let mut board = stacked_board();
    board.register_attack(coord(0, 0))?;
    board.register_attack(coord(8, 8))?;
    let grid = board.attack_grid();
    assert_eq!(grid[0][0], AttackMark::Hit);
    assert_eq!(grid[8][8], AttackMark::Miss);
    assert_eq!(grid[0][1], AttackMark::Unattempted);
    assert_eq!(AttackMark::Hit.code(), 1);
    assert_eq!(AttackMark::Miss.code(), 2);
    Ok(())
}

#[test]
fn ship_lookup_through_marker() -> Result<(), BoardError> {
    let board = stacked_board();
    assert_eq!(
        board.ship_at(coord(2, 1))?.map(|s| s.kind()),
        Some(ShipKind::Battleship)
    );
    assert!(board.ship_at(coord(9, 9))?.is_none());
    Ok(())
}

#[test]
fn random_fleet_is_complete_and_disjoint() -> Result<(), BoardError> {
    let mut board = empty_board();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_fleet_randomly(&mut rng)?;
    assert!(board.all_ships_placed());
    let painted = board
        .marker_grid()
        .iter()
        .flatten()
        .filter(|m| **m != 0)
        .count();
    assert_eq!(painted, TOTAL_SHIP_CELLS);
    Ok(())
}

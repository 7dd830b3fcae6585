use broadside::{
    AttackMark, Board, BoardError, Coord, Orientation, PlayerId, SessionToken, Ship, ShipKind,
    BOARD_SIZE, SHIPS, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(PlayerId::generate(&mut rng), SessionToken::generate(&mut rng));
    board.place_fleet_randomly(&mut rng).unwrap();
    board
}

fn kind_strategy() -> impl Strategy<Value = ShipKind> {
    (0..SHIPS.len()).prop_map(|i| SHIPS[i])
}

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hit_count_never_exceeds_length(kind in kind_strategy(), hits in 0usize..12) {
        let origin = Coord::new(0, 0).unwrap();
        let mut ship = Ship::new(kind, origin, Orientation::Vertical).unwrap();
        for _ in 0..hits {
            ship.register_hit();
            prop_assert!(ship.hit_count() <= ship.length());
            prop_assert_eq!(ship.is_sunk(), ship.hit_count() == ship.length());
        }
    }

    #[test]
    fn rejected_placement_leaves_grid_unchanged(
        seed in any::<u64>(),
        kind in kind_strategy(),
        x in 0..BOARD_SIZE as usize,
        y in 0..BOARD_SIZE as usize,
        orientation in orientation_strategy(),
    ) {
        let mut board = random_board(seed);
        let before = *board.marker_grid();
        // The fleet is complete, so every kind is already on the board.
        let err = board.place_ship(kind, Coord::new(x, y).unwrap(), orientation).unwrap_err();
        prop_assert!(matches!(
            err,
            BoardError::ShipAlreadyPlaced(_) | BoardError::ShipOutOfBounds
        ));
        prop_assert_eq!(*board.marker_grid(), before);
    }

    #[test]
    fn overlap_always_rejected(
        seed in any::<u64>(),
        x in 0..BOARD_SIZE as usize,
        y in 0..BOARD_SIZE as usize,
        orientation in orientation_strategy(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(PlayerId::generate(&mut rng), SessionToken::generate(&mut rng));
        board.place_ship(ShipKind::Carrier, Coord::new(0, 5).unwrap(), Orientation::Horizontal).unwrap();
        let before = *board.marker_grid();
        let origin = Coord::new(x, y).unwrap();
        let Ok(candidate) = Ship::new(ShipKind::Battleship, origin, orientation) else {
            return Ok(());
        };
        let overlaps = candidate.cells().any(|c| board.marker_at(c) != 0);
        let result = board.place_ship(ShipKind::Battleship, origin, orientation);
        if overlaps {
            prop_assert_eq!(result, Err(BoardError::ShipOverlaps));
            prop_assert_eq!(*board.marker_grid(), before);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn random_fleet_covers_catalog(seed in any::<u64>()) {
        let board = random_board(seed);
        let painted = board.marker_grid().iter().flatten().filter(|m| **m != 0).count();
        prop_assert_eq!(painted, TOTAL_SHIP_CELLS);
        for kind in SHIPS {
            let ship = board.ship(kind).unwrap();
            for c in ship.cells() {
                prop_assert_eq!(board.marker_at(c), kind.marker());
            }
        }
    }

    #[test]
    fn attack_marks_follow_markers(seed in any::<u64>(), shots in 1usize..40) {
        let mut board = random_board(seed);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..shots {
            if board.is_sunk_all() {
                break;
            }
            let c = Coord::new(
                rng.random_range(0..BOARD_SIZE as usize),
                rng.random_range(0..BOARD_SIZE as usize),
            ).unwrap();
            let outcome = board.register_attack(c).unwrap();
            prop_assert_eq!(outcome.hit, board.marker_at(c) != 0);
            let expected = if outcome.hit { AttackMark::Hit } else { AttackMark::Miss };
            prop_assert_eq!(board.attack_mark(c), expected);
        }
        for ship in board.ships() {
            prop_assert!(ship.hit_count() <= ship.length());
        }
    }
}

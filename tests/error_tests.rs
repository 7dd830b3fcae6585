use broadside::{BoardError, Coord, CoordError, ErrorKind, GameError, ShipKind};

#[test]
fn codes_are_stable() {
    assert_eq!(GameError::UnknownMatch.code(), "game_not_found");
    assert_eq!(GameError::UnknownPlayer.code(), "player_not_found");
    assert_eq!(GameError::Unauthorized.code(), "player_session_not_authorized");
    assert_eq!(
        GameError::MalformedCoordinates(CoordError::Malformed).code(),
        "bad_coords"
    );
    assert_eq!(GameError::MatchFull.code(), "max_players_already_joined");
    assert_eq!(GameError::NoOpponent.code(), "no_opposing_player");
    assert_eq!(
        GameError::Board(BoardError::ShipOverlaps).code(),
        "ship_overlaps"
    );
    assert_eq!(
        GameError::Board(BoardError::AlreadyDefeated).code(),
        "all_ships_already_sunk"
    );
}

#[test]
fn kinds_follow_taxonomy() {
    assert_eq!(GameError::UnknownMatch.kind(), ErrorKind::NotFound);
    assert_eq!(GameError::Unauthorized.kind(), ErrorKind::Unauthorized);
    assert_eq!(GameError::UnknownShipKind.kind(), ErrorKind::InvalidInput);
    assert_eq!(
        GameError::Board(BoardError::ShipAlreadyPlaced(ShipKind::Carrier)).kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        GameError::Board(BoardError::ShipsNotPlaced).kind(),
        ErrorKind::Precondition
    );
    assert_eq!(GameError::MatchFull.kind(), ErrorKind::Precondition);
    assert_eq!(
        GameError::Board(BoardError::UnknownMarker(9)).kind(),
        ErrorKind::Internal
    );
}

#[test]
fn parse_errors_convert() {
    let err: GameError = "x".parse::<Coord>().unwrap_err().into();
    assert_eq!(err, GameError::MalformedCoordinates(CoordError::Malformed));
    let err: GameError = "raft".parse::<ShipKind>().unwrap_err().into();
    assert_eq!(err, GameError::UnknownShipKind);
}

#[test]
fn errors_wrap_in_anyhow() {
    let err = anyhow::Error::new(GameError::NotYourTurn);
    assert_eq!(err.to_string(), "It is the other player's turn");
    assert_eq!(broadside::rejection(&err), Some(GameError::NotYourTurn));
    assert_eq!(broadside::rejection(&anyhow::anyhow!("io")), None);
}

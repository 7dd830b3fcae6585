use broadside::{Coord, CoordError, Orientation, Placement};

#[test]
fn parse_move_text() {
    assert_eq!("3-7".parse::<Coord>(), Ok(Coord::new(3, 7).unwrap()));
    assert_eq!("0-0".parse::<Coord>(), Ok(Coord::new(0, 0).unwrap()));
    assert_eq!(" 9-9 ".parse::<Coord>(), Ok(Coord::new(9, 9).unwrap()));
}

#[test]
fn reject_malformed_move_text() {
    for text in ["", "3", "3-", "-3", "3-7-x", "a-b", "-1-2", "3 -7", "+3-7", "3.0-7"] {
        assert_eq!(
            text.parse::<Coord>(),
            Err(CoordError::Malformed),
            "input {:?}",
            text
        );
    }
}

#[test]
fn reject_out_of_bounds_move_text() {
    assert_eq!(
        "10-0".parse::<Coord>(),
        Err(CoordError::OutOfBounds { x: 10, y: 0 })
    );
    assert_eq!(
        "0-999".parse::<Coord>(),
        Err(CoordError::OutOfBounds { x: 0, y: 999 })
    );
    assert_eq!("0-1000".parse::<Coord>(), Err(CoordError::Malformed));
}

#[test]
fn parse_placement_text() {
    let p: Placement = "2-5-x".parse().unwrap();
    assert_eq!(p.origin, Coord::new(2, 5).unwrap());
    assert_eq!(p.orientation, Orientation::Horizontal);

    let p: Placement = "9-0-Y".parse().unwrap();
    assert_eq!(p.orientation, Orientation::Vertical);
}

#[test]
fn reject_bad_placement_text() {
    assert_eq!("2-5".parse::<Placement>(), Err(CoordError::Malformed));
    assert_eq!("2-5-z".parse::<Placement>(), Err(CoordError::Malformed));
    assert_eq!("2-5-x-1".parse::<Placement>(), Err(CoordError::Malformed));
    assert_eq!(
        "12-5-x".parse::<Placement>(),
        Err(CoordError::OutOfBounds { x: 12, y: 5 })
    );
}

#[test]
fn display_matches_parse_format() {
    let c = Coord::new(4, 8).unwrap();
    assert_eq!(c.to_string(), "4-8");
    let p = Placement::new(c, Orientation::Vertical);
    assert_eq!(p.to_string(), "4-8-y");
    assert_eq!(p.to_string().parse::<Placement>(), Ok(p));
}

#[test]
fn all_cells_in_row_major_order() {
    let cells: Vec<_> = Coord::all().collect();
    assert_eq!(cells.len(), 100);
    assert_eq!(cells[0], Coord::new(0, 0).unwrap());
    assert_eq!(cells[1], Coord::new(1, 0).unwrap());
    assert_eq!(cells[10], Coord::new(0, 1).unwrap());
    assert_eq!(cells[99], Coord::new(9, 9).unwrap());
}

#[test]
fn accessors_expose_axes() {
    let c = Coord::new(2, 6).unwrap();
    assert_eq!((c.x(), c.y()), (2, 6));
    assert_eq!((c.col(), c.row()), (2, 6));
}

#[test]
fn deserialize_checks_bounds() {
    let c: Coord = serde_json::from_str(r#"{"x":3,"y":4}"#).unwrap();
    assert_eq!(c, Coord::new(3, 4).unwrap());
    assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"x":3,"y":4}"#);

    assert!(serde_json::from_str::<Coord>(r#"{"x":10,"y":0}"#).is_err());
    assert!(serde_json::from_str::<Coord>(r#"{"x":0,"y":255}"#).is_err());
    assert!(serde_json::from_str::<Coord>(r#"{"x":300,"y":0}"#).is_err());
}

#[test]
fn bincode_wire_shape_is_checked() {
    let c = Coord::new(7, 2).unwrap();
    let bytes = bincode::serialize(&c).unwrap();
    assert_eq!(bytes, vec![7, 2]);
    assert_eq!(bincode::deserialize::<Coord>(&bytes).unwrap(), c);
    assert!(bincode::deserialize::<Coord>(&[10, 0]).is_err());
}

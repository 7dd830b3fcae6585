use broadside::{BitBoard, BitBoardError};

#[test]
fn set_and_get() -> Result<(), BitBoardError> {
    let mut bb = BitBoard::<u128, 10>::new();
    assert!(bb.is_empty());
    bb.set(3, 7)?;
    assert!(bb.get(3, 7)?);
    assert!(!bb.get(7, 3)?);
    assert_eq!(bb.count_ones(), 1);
    Ok(())
}

#[test]
fn out_of_bounds_is_an_error() {
    let mut bb = BitBoard::<u128, 10>::new();
    assert_eq!(
        bb.set(10, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 10, col: 0 })
    );
    assert_eq!(
        bb.get(0, 10),
        Err(BitBoardError::IndexOutOfBounds { row: 0, col: 10 })
    );
}

#[test]
fn set_operations() -> Result<(), BitBoardError> {
    let a = BitBoard::<u128, 10>::from_cells([(0, 0), (0, 1), (0, 2)])?;
    let b = BitBoard::<u128, 10>::from_cells([(0, 2), (1, 2)])?;
    assert_eq!((a & b).count_ones(), 1);
    assert!((a & b).get(0, 2)?);
    assert_eq!((a | b).count_ones(), 4);

    let mut c = a;
    c |= b;
    assert_eq!(c, a | b);
    Ok(())
}

#[test]
fn cells_iterate_row_major() -> Result<(), BitBoardError> {
    let bb = BitBoard::<u128, 10>::from_cells([(4, 1), (0, 9), (4, 0)])?;
    let cells: Vec<_> = bb.cells().collect();
    assert_eq!(cells, vec![(0, 9), (4, 0), (4, 1)]);
    Ok(())
}

use pixel_grid_paint::{CellState, Color, GridError, GridModel, MAX_GRID_SIZE};

#[test]
fn test_create_allocates_size_squared_cells() {
    for size in 1..=MAX_GRID_SIZE {
        let grid = GridModel::new(size).unwrap();
        assert_eq!(grid.size(), size);
        assert_eq!(grid.cells().len(), size * size);
        assert!(grid.cells().iter().all(CellState::is_clear));
    }
}

#[test]
fn test_create_rejects_invalid_sizes() {
    assert_eq!(
        GridModel::new(0),
        Err(GridError::InvalidSize { size: 0, max: 100 })
    );
    assert_eq!(
        GridModel::new(200),
        Err(GridError::InvalidSize { size: 200, max: 100 })
    );
    assert!(GridModel::with_limit(20, 10).is_err());
    assert!(GridModel::with_limit(10, 10).is_ok());
}

#[test]
fn test_failed_resize_keeps_previous_grid() {
    let mut grid = GridModel::new(4).unwrap();
    grid.get_mut(3, 3).unwrap().paint(Color::BLACK);
    let before = grid.clone();

    assert!(matches!(grid.resize(200), Err(GridError::InvalidSize { .. })));
    assert_eq!(grid, before);
}

#[test]
fn test_resize_discards_content() {
    let mut grid = GridModel::new(4).unwrap();
    grid.get_mut(0, 0).unwrap().paint(Color::BLACK);

    grid.resize(6).unwrap();
    assert_eq!(grid.cells().len(), 36);
    assert!(grid.get(0, 0).unwrap().is_clear());
}

#[test]
fn test_get_out_of_bounds() {
    let mut grid = GridModel::new(4).unwrap();
    assert_eq!(
        grid.get(4, 0).unwrap_err(),
        GridError::OutOfBounds { row: 4, col: 0, size: 4 }
    );
    assert!(grid.get(0, 4).is_err());
    assert!(grid.get_mut(9, 9).is_err());
    assert!(grid.set(4, 4, CellState::new()).is_err());
}

#[test]
fn test_clear_keeps_size() {
    let mut grid = GridModel::new(5).unwrap();
    grid.get_mut(2, 2).unwrap().accumulate(Color::BLACK, 0.1);
    grid.set(1, 1, CellState::with_color(Color::WHITE)).unwrap();

    grid.clear();
    assert_eq!(grid.size(), 5);
    assert!(grid.cells().iter().all(CellState::is_clear));
}

#[test]
fn test_matrix_is_row_major() {
    let mut grid = GridModel::new(3).unwrap();
    grid.get_mut(2, 0).unwrap().paint(Color::rgb(0, 0, 255));

    let matrix = grid.to_matrix();
    assert_eq!(matrix[2][0], Color::rgb(0, 0, 255));
    assert_eq!(matrix[0][2], Color::TRANSPARENT);
}

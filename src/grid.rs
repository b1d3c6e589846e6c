use crate::cell::CellState;
use crate::color::Color;
use crate::error::{GridError, GridResult};

/// Largest grid side accepted unless a different limit is given
pub const MAX_GRID_SIZE: usize = 100;

/// Grid side used when nothing else is configured
pub const DEFAULT_GRID_SIZE: usize = 16;

/// Position of a cell in the grid, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A square grid of cells stored row-major: `(row, col)` lives at
/// `row * size + col`.
///
/// `cells.len() == size * size` holds at all times. Resizing rebuilds every
/// cell; nothing survives a resize.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    size: usize,
    cells: Vec<CellState>,
}

impl GridModel {
    pub fn new(size: usize) -> GridResult<Self> {
        Self::with_limit(size, MAX_GRID_SIZE)
    }

    pub fn with_limit(size: usize, max: usize) -> GridResult<Self> {
        if size < 1 || size > max {
            return Err(GridError::InvalidSize { size, max });
        }
        Ok(Self {
            size,
            cells: vec![CellState::new(); size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Replace the grid with a fresh one. On error `self` is left untouched.
    pub fn resize(&mut self, new_size: usize) -> GridResult<()> {
        self.resize_with_limit(new_size, MAX_GRID_SIZE)
    }

    pub fn resize_with_limit(&mut self, new_size: usize, max: usize) -> GridResult<()> {
        *self = Self::with_limit(new_size, max)?;
        Ok(())
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn index(&self, row: usize, col: usize) -> GridResult<usize> {
        if self.contains(row, col) {
            Ok(row * self.size + col)
        } else {
            Err(GridError::OutOfBounds { row, col, size: self.size })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> GridResult<&CellState> {
        let index = self.index(row, col)?;
        Ok(&self.cells[index])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> GridResult<&mut CellState> {
        let index = self.index(row, col)?;
        Ok(&mut self.cells[index])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: CellState) -> GridResult<()> {
        *self.get_mut(row, col)? = cell;
        Ok(())
    }

    /// Clear every cell without changing the size
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(CellState::clear);
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &CellState)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (CellPos::new(i / size, i % size), cell))
    }

    /// Row-major snapshot of every cell's color
    pub fn to_matrix(&self) -> Vec<Vec<Color>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(CellState::color).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        let mut grid = GridModel::new(3).unwrap();
        grid.get_mut(1, 2).unwrap().paint(Color::BLACK);
        assert_eq!(grid.cells()[5].color(), Color::BLACK);

        let (pos, _) = grid.iter().nth(5).unwrap();
        assert_eq!(pos, CellPos::new(1, 2));
    }

    #[test]
    fn test_to_matrix_shape() {
        let mut grid = GridModel::new(2).unwrap();
        grid.get_mut(0, 1).unwrap().paint(Color::WHITE);
        let matrix = grid.to_matrix();
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().all(|row| row.len() == 2));
        assert_eq!(matrix[0][1], Color::WHITE);
        assert_eq!(matrix[1][0], Color::TRANSPARENT);
    }
}

use super::{Cell, LifeError, Result};
use rand::Rng;
use rayon::prelude::*;

/// Grids with at least this many cells evolve row-parallel.
pub const PARALLEL_THRESHOLD: usize = 100 * 100;

/// Dense `height x width` field of cells, stored row-major at `row * width + col`.
///
/// Positions outside the grid are permanently dead: the edges are bounded,
/// not toroidal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead.
    ///
    /// Dimensions whose cell count overflows `usize` or cannot be allocated
    /// are rejected as invalid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = LifeError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or_else(|| invalid.clone())?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, Cell::Dead);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major cell storage
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Flip one cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        let idx = self.index(row, col)?;
        self.cells[idx] = self.cells[idx].toggled();
        Ok(self.cells[idx])
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Fill every cell independently, alive with probability one half
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = Cell::from_alive(rng.random_bool(0.5)));
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Count live cells in the Moore neighbourhood, treating off-grid positions as dead
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let rows = row.saturating_sub(1)..=(row + 1).min(self.height - 1);
        let cols = col.saturating_sub(1)..=(col + 1).min(self.width - 1);

        rows.flat_map(|r| cols.clone().map(move |c| (r, c)))
            .filter(|&pos| pos != (row, col))
            .filter(|&(r, c)| self.cells[r * self.width + c].is_alive())
            .count() as u8
    }

    fn evolve_row(&self, row: usize, out: &mut [Cell]) {
        let start = row * self.width;
        for (col, next) in out.iter_mut().enumerate() {
            *next = self.cells[start + col].evolve(self.live_neighbors(row, col));
        }
    }

    /// Write the next generation into `next`, picking serial or parallel by grid size.
    ///
    /// `self` is only read, so every cell sees the previous generation.
    pub fn evolve_into(&self, next: &mut Grid) {
        if self.cells.len() >= PARALLEL_THRESHOLD {
            self.evolve_into_parallel(next);
        } else {
            self.evolve_into_serial(next);
        }
    }

    pub fn evolve_into_serial(&self, next: &mut Grid) {
        debug_assert_eq!((next.width, next.height), (self.width, self.height));
        next.cells
            .chunks_mut(self.width)
            .enumerate()
            .for_each(|(row, out)| self.evolve_row(row, out));
    }

    /// Row-parallel evolution using rayon
    pub fn evolve_into_parallel(&self, next: &mut Grid) {
        debug_assert_eq!((next.width, next.height), (self.width, self.height));
        next.cells
            .par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(row, out)| self.evolve_row(row, out));
    }

    /// Iterate over all cells as `(row, col, cell)`
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.width, idx % self.width, cell))
    }
}

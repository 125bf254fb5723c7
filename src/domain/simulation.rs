use super::{Cell, Grid, Result};
use rand::Rng;

/// Simulation owns one grid plus the generation counter.
///
/// `tick` evolves into a scratch grid of the same size and swaps it in, so the
/// next generation is computed entirely from the previous one.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    scratch: Grid,
    generation: u64,
}

impl Simulation {
    /// All cells dead, generation zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let grid = Grid::new(width, height)?;
        Ok(Self {
            scratch: grid.clone(),
            grid,
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Advance one generation
    pub fn tick(&mut self) {
        self.grid.evolve_into(&mut self.scratch);
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
    }

    /// Flip one cell. The generation counter is untouched.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<Cell> {
        self.grid.toggle(row, col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        self.grid.set(row, col, cell)
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Result<Cell> {
        self.grid.get(row, col)
    }

    /// Re-roll every cell from `rng`. Keeps the generation counter.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.randomize(rng);
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }
}

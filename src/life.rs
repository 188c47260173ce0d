pub mod neighbors;

use log::trace;
use randomize::PCG32;
use thiserror::Error;

use crate::life::neighbors::{apply_neighbor_delta, recount_neighbors, Delta};
use crate::render::{RenderAdapter, Shade};

/// Generate a pseudorandom seed for the game's PRNG.
pub fn generate_seed() -> Result<(u64, u64), getrandom::Error> {
    use byteorder::{ByteOrder, NativeEndian};
    use getrandom::getrandom;

    let mut seed = [0_u8; 16];

    getrandom(&mut seed)?;

    Ok((
        NativeEndian::read_u64(&seed[0..8]),
        NativeEndian::read_u64(&seed[8..16]),
    ))
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },
}

/// Which neighbor counts a generation's rule decisions read.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Sweep {
    /// Decisions read the counts as they stood when the scan began, so every
    /// cell sees the previous generation.
    #[default]
    Snapshot,
    /// Decisions read the live counts, so flips earlier in the row-major scan
    /// feed into later cells of the same generation.
    InPlace,
}

/// A status change decided during [`LifeGrid::step`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Flip {
    pub row: usize,
    pub col: usize,
    pub alive: bool,
}

/// Conway's Game of Life on a bounded `rows x cols` grid.
///
/// Alongside each cell's status the grid keeps the number of live neighbors
/// of every cell. Counts are only touched when a cell flips, which adjusts
/// the (up to) eight surrounding entries.
#[derive(Clone, Debug)]
pub struct LifeGrid {
    rows: usize,
    cols: usize,
    alive: Vec<bool>,
    neighbors: Vec<u8>,
    scratch: Vec<u8>,
    flips: Vec<Flip>,
    population: usize,
    sweep: Sweep,
}

impl LifeGrid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        let len = rows * cols;

        Ok(Self {
            rows,
            cols,
            alive: vec![false; len],
            neighbors: vec![0; len],
            scratch: vec![0; len],
            flips: Vec::new(),
            population: 0,
            sweep: Sweep::default(),
        })
    }

    pub fn new_random(
        rows: usize,
        cols: usize,
        rng: &mut PCG32,
        density: f32,
    ) -> Result<Self, GridError> {
        let mut result = Self::new(rows, cols)?;
        result.randomize(rng, density);
        Ok(result)
    }

    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.sweep = sweep;
        self
    }

    /// Bring each cell to life with probability `density`, in row-major
    /// order. One value is drawn from `rng` per cell, so a fixed seed always
    /// yields the same grid.
    pub fn randomize(&mut self, rng: &mut PCG32, density: f32) {
        assert!(
            (0.0..=1.0).contains(&density),
            "density {density} outside [0, 1]"
        );
        for row in 0..self.rows {
            for col in 0..self.cols {
                if randomize::f32_half_open_right(rng.next_u32()) < density {
                    self.set_alive(row, col, true);
                }
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.alive[self.index(row, col)]
    }

    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        self.neighbors[self.index(row, col)]
    }

    /// Coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Set one cell's status, keeping the neighbor counts current. Does
    /// nothing if the cell already has that status.
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) {
        if self.is_alive(row, col) != alive {
            self.flip(row, col, alive);
        }
    }

    /// Compare the incremental counts against a full recount. Returns the
    /// first cell whose count disagrees.
    pub fn verify_neighbor_counts(&self) -> Option<(usize, usize)> {
        recount_neighbors(&self.alive, self.rows, self.cols)
            .iter()
            .zip(&self.neighbors)
            .position(|(expected, actual)| expected != actual)
            .map(|idx| (idx / self.cols, idx % self.cols))
    }

    /// Advance one generation and return the flips in scan order.
    pub fn step(&mut self) -> &[Flip] {
        self.flips.clear();
        if self.sweep == Sweep::Snapshot {
            self.scratch.copy_from_slice(&self.neighbors);
        }

        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row * self.cols + col;
                let count = match self.sweep {
                    Sweep::Snapshot => self.scratch[idx],
                    Sweep::InPlace => self.neighbors[idx],
                };
                let alive = self.alive[idx];
                let next = matches!((alive, count), (true, 2 | 3) | (false, 3));

                if next != alive {
                    self.flip(row, col, next);
                    self.flips.push(Flip {
                        row,
                        col,
                        alive: next,
                    });
                }
            }
        }

        trace!(
            "{} flips, population {}",
            self.flips.len(),
            self.population
        );
        &self.flips
    }

    /// Advance one generation, painting only the cells that flipped.
    /// Returns the number of flips.
    pub fn advance<R: RenderAdapter + ?Sized>(&mut self, canvas: &mut R) -> usize {
        let flips = self.step();
        for flip in flips {
            canvas.paint_cell(Shade::from(flip.alive), flip.row, flip.col);
        }
        flips.len()
    }

    fn flip(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        self.alive[idx] = alive;
        if alive {
            self.population += 1;
        } else {
            self.population -= 1;
        }
        apply_neighbor_delta(
            &mut self.neighbors,
            self.rows,
            self.cols,
            Delta::for_status(alive),
            row,
            col,
        );
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

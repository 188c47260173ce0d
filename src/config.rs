use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::life::Sweep;

pub const ROWS: usize = 300;
pub const COLS: usize = 300;
/// Edge length of one cell, in pixels.
pub const CELL_SIZE: usize = 4;
/// Chance that a cell starts alive.
pub const DENSITY: f32 = 0.5;
/// Slow the loop down to `TICK_RATE` per generation, for visibility.
pub const LIMIT_RATE: bool = false;
pub const TICK_RATE: Duration = Duration::from_millis(100);
pub const QUIT_KEY: KeyCode = KeyCode::Space;

#[derive(Clone, Debug)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub density: f32,
    /// Minimum time between generations. `None` runs as fast as the loop spins.
    pub tick_rate: Option<Duration>,
    /// PRNG seed. `None` draws one from the OS at startup.
    pub seed: Option<(u64, u64)>,
    pub sweep: Sweep,
    pub quit_key: KeyCode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            density: DENSITY,
            tick_rate: LIMIT_RATE.then_some(TICK_RATE),
            seed: None,
            sweep: Sweep::default(),
            quit_key: QUIT_KEY,
        }
    }
}

impl Config {
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    pub fn density(mut self, density: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&density),
            "density {density} outside [0, 1]"
        );
        self.density = density;
        self
    }

    pub fn tick_rate(mut self, tick_rate: Option<Duration>) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn seed(mut self, seed: (u64, u64)) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sweep(mut self, sweep: Sweep) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn quit_key(mut self, key: KeyCode) -> Self {
        self.quit_key = key;
        self
    }

    /// Pixel buffer size as `(width, height)`.
    pub fn frame_size(&self) -> (u32, u32) {
        (
            (self.cols * CELL_SIZE) as u32,
            (self.rows * CELL_SIZE) as u32,
        )
    }
}

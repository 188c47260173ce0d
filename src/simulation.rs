use std::time::{Duration, Instant};

use log::debug;
use randomize::PCG32;

use crate::config::Config;
use crate::input::InputAdapter;
use crate::life::{GridError, LifeGrid};
use crate::render::RenderAdapter;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Gates generations to a minimum interval without sleeping.
#[derive(Clone, Debug)]
pub struct Pacer {
    interval: Option<Duration>,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True if a generation may run at `now`. Starts the next interval when it
    /// returns true.
    pub fn ready(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        match self.last {
            Some(last) if now.saturating_duration_since(last) < interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Everything one run of the game owns: the grid, its generation counter and
/// the pacing timer.
pub struct Simulation {
    grid: LifeGrid,
    generation: u64,
    pacer: Pacer,
}

impl Simulation {
    pub fn new(grid: LifeGrid, tick_rate: Option<Duration>) -> Self {
        Self {
            grid,
            generation: 0,
            pacer: Pacer::new(tick_rate),
        }
    }

    /// Build a randomly seeded simulation as described by `config`.
    pub fn from_config(config: &Config, rng: &mut PCG32) -> Result<Self, GridError> {
        let grid = LifeGrid::new_random(config.rows, config.cols, rng, config.density)?
            .with_sweep(config.sweep);
        Ok(Self::new(grid, config.tick_rate))
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// One loop iteration: check for quit, then advance a generation if the
    /// pacer allows it. Nothing is painted once quit is seen.
    pub fn tick<I, R>(&mut self, input: &mut I, canvas: &mut R) -> Flow
    where
        I: InputAdapter + ?Sized,
        R: RenderAdapter + ?Sized,
    {
        if input.poll_quit() {
            debug!("quit requested after {} generations", self.generation);
            return Flow::Quit;
        }
        if self.pacer.ready(Instant::now()) {
            self.grid.advance(canvas);
            self.generation += 1;
        }
        Flow::Continue
    }

    /// Tick until quit, calling `present` after every iteration that
    /// continues.
    pub fn run_until_quit<I, R, P>(&mut self, input: &mut I, canvas: &mut R, mut present: P)
    where
        I: InputAdapter + ?Sized,
        R: RenderAdapter + ?Sized,
        P: FnMut(&mut R),
    {
        while self.tick(input, canvas) == Flow::Continue {
            present(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Shade;

    /// Quits on the `quit_on`th poll.
    struct Scripted {
        polls: usize,
        quit_on: usize,
    }

    impl InputAdapter for Scripted {
        fn poll_quit(&mut self) -> bool {
            self.polls += 1;
            self.polls >= self.quit_on
        }
    }

    #[derive(Default)]
    struct Recorder {
        paints: Vec<(Shade, usize, usize)>,
    }

    impl RenderAdapter for Recorder {
        fn paint_cell(&mut self, shade: Shade, row: usize, col: usize) {
            self.paints.push((shade, row, col));
        }
    }

    fn blinker() -> Simulation {
        let mut grid = LifeGrid::new(5, 5).unwrap();
        for col in 1..4 {
            grid.set_alive(2, col, true);
        }
        Simulation::new(grid, None)
    }

    #[test]
    fn quit_stops_within_one_iteration() {
        let mut sim = blinker();
        let mut input = Scripted { polls: 0, quit_on: 4 };
        let mut canvas = Recorder::default();
        let mut presented = Vec::new();

        sim.run_until_quit(&mut input, &mut canvas, |canvas| {
            presented.push(canvas.paints.len())
        });

        assert_eq!(input.polls, 4);
        assert_eq!(sim.generation(), 3);
        assert_eq!(presented, [4, 8, 12]);
        assert_eq!(canvas.paints.len(), 12);
    }

    #[test]
    fn immediate_quit_touches_nothing() {
        let mut sim = blinker();
        let mut input = Scripted { polls: 0, quit_on: 1 };
        let mut canvas = Recorder::default();
        let mut presents = 0;

        sim.run_until_quit(&mut input, &mut canvas, |_| presents += 1);

        assert_eq!(sim.generation(), 0);
        assert_eq!(presents, 0);
        assert!(canvas.paints.is_empty());
        assert_eq!(sim.grid().live_cells().collect::<Vec<_>>(), [(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn tick_after_quit_keeps_quitting() {
        let mut sim = blinker();
        let mut input = Scripted { polls: 0, quit_on: 1 };
        let mut canvas = Recorder::default();

        assert_eq!(sim.tick(&mut input, &mut canvas), Flow::Quit);
        assert_eq!(sim.tick(&mut input, &mut canvas), Flow::Quit);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn pacer_without_interval_is_always_ready() {
        let mut pacer = Pacer::new(None);
        let now = Instant::now();
        assert!(pacer.ready(now));
        assert!(pacer.ready(now));
    }

    #[test]
    fn pacer_waits_out_the_interval() {
        let interval = Duration::from_millis(100);
        let mut pacer = Pacer::new(Some(interval));
        let start = Instant::now();

        assert!(pacer.ready(start));
        assert!(!pacer.ready(start + Duration::from_millis(40)));
        assert!(pacer.ready(start + interval));
        assert!(!pacer.ready(start + interval + Duration::from_millis(99)));
        assert!(pacer.ready(start + interval * 2));
    }

    #[test]
    fn from_config_seeds_the_grid() {
        let config = Config::default().rows(12).cols(9).seed((5, 6));
        let mut rng: PCG32 = (5_u64, 6_u64).into();
        let sim = Simulation::from_config(&config, &mut rng).unwrap();

        assert_eq!((sim.grid().rows(), sim.grid().cols()), (12, 9));
        assert_eq!(sim.grid().verify_neighbor_counts(), None);
        assert_eq!(sim.generation(), 0);

        let empty = Config::default().rows(0);
        assert!(Simulation::from_config(&empty, &mut rng).is_err());
    }
}

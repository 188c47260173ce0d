#![forbid(unsafe_code)]

pub mod config;
pub mod input;
pub mod life;
pub mod render;
pub mod simulation;

use error_iter::ErrorIter as _;
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use randomize::PCG32;
use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

pub use crate::config::{Config, CELL_SIZE};
use crate::input::WindowInput;
use crate::life::{generate_seed, GridError};
use crate::render::{paint_all, FrameCanvas, FrameError};
use crate::simulation::{Flow, Simulation};

#[derive(Debug, Error)]
pub enum Error {
    #[error("event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface")]
    Pixels(#[from] pixels::Error),
    #[error("failed to seed the random source")]
    Entropy(#[from] getrandom::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

pub fn run(config: Config) -> Result<(), Error> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();
    let (width, height) = config.frame_size();

    let window = {
        let size = LogicalSize::new(width as f64, height as f64);
        WindowBuilder::new()
            .with_title("Conway's Game of Life")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };

    // Declared after the window so the surface is dropped first.
    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture)?
    };

    let seed = match config.seed {
        Some(seed) => seed,
        None => generate_seed()?,
    };
    let mut rng: PCG32 = seed.into();
    let mut sim = Simulation::from_config(&config, &mut rng)?;
    info!(
        "{}x{} grid seeded with {:?}, {} live cells",
        config.rows,
        config.cols,
        seed,
        sim.grid().population()
    );

    let (rows, cols) = (config.rows, config.cols);
    paint_all(
        sim.grid(),
        &mut FrameCanvas::new(pixels.frame_mut(), rows, cols, CELL_SIZE)?,
    );

    event_loop.run(|event, elwt| {
        // Present whatever the last advance painted.
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            if let Err(err) = pixels.render() {
                log_error("pixels.render", err);
                elwt.exit();
                return;
            }
        }

        // `update` returns true once the pending events are drained.
        if input.update(&event) {
            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    elwt.exit();
                    return;
                }
            }

            let mut canvas = match FrameCanvas::new(pixels.frame_mut(), rows, cols, CELL_SIZE) {
                Ok(canvas) => canvas,
                Err(err) => {
                    log_error("FrameCanvas::new", err);
                    elwt.exit();
                    return;
                }
            };
            let mut quit = WindowInput::new(&input, config.quit_key);
            if sim.tick(&mut quit, &mut canvas) == Flow::Quit {
                elwt.exit();
                return;
            }
            window.request_redraw();
        }
    })?;

    debug!("stopped after {} generations", sim.generation());
    Ok(())
}

pub fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}

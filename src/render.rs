use thiserror::Error;

use crate::life::LifeGrid;

/// Grayscale value a cell is drawn with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shade {
    Off,
    On,
}

impl Shade {
    pub const fn value(self) -> u8 {
        match self {
            Shade::Off => 0x00,
            Shade::On => 0xff,
        }
    }

    pub const fn rgba(self) -> [u8; 4] {
        let v = self.value();
        [v, v, v, 0xff]
    }
}

impl From<bool> for Shade {
    fn from(alive: bool) -> Self {
        if alive { Shade::On } else { Shade::Off }
    }
}

/// Anything a cell can be painted onto.
pub trait RenderAdapter {
    fn paint_cell(&mut self, shade: Shade, row: usize, col: usize);
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum FrameError {
    #[error("frame holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A row-major RGBA frame buffer divided into `cell_size`-pixel squares.
pub struct FrameCanvas<'frame> {
    frame: &'frame mut [u8],
    rows: usize,
    cols: usize,
    cell_size: usize,
}

impl<'frame> FrameCanvas<'frame> {
    pub fn new(
        frame: &'frame mut [u8],
        rows: usize,
        cols: usize,
        cell_size: usize,
    ) -> Result<Self, FrameError> {
        let expected = rows * cols * cell_size * cell_size * 4;
        if frame.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: frame.len(),
            });
        }

        Ok(Self {
            frame,
            rows,
            cols,
            cell_size,
        })
    }

    /// Width of one pixel row, in bytes.
    fn stride(&self) -> usize {
        self.cols * self.cell_size * 4
    }
}

impl RenderAdapter for FrameCanvas<'_> {
    fn paint_cell(&mut self, shade: Shade, row: usize, col: usize) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} canvas",
            self.rows,
            self.cols
        );
        let rgba = shade.rgba();
        let stride = self.stride();
        let width = self.cell_size * 4;

        for y in 0..self.cell_size {
            let start = (row * self.cell_size + y) * stride + col * width;
            for pixel in self.frame[start..start + width].chunks_exact_mut(4) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }
}

/// Paint every cell of `grid`, dead or alive.
pub fn paint_all<R: RenderAdapter + ?Sized>(grid: &LifeGrid, canvas: &mut R) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            canvas.paint_cell(Shade::from(grid.is_alive(row, col)), row, col);
        }
    }
}

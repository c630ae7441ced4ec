//! Frame and depth buffers.
//!
//! Both buffers are fixed-size row-major grids with bounds-checked access.
//! Their dimensions are validated once at construction and never change.
//!
//! # Depth Buffer
//!
//! The depth buffer stores the NDC depth in `[0, 1]` of the nearest fragment
//! written so far. It starts at `+inf`; a fragment is accepted only when its
//! depth is strictly smaller than the stored value, so an equal-depth fragment
//! arriving later never replaces the earlier one.

use std::fmt;

use crate::error::RenderError;

/// A value that can live in a [`FrameBuffer`] cell.
pub trait Pixel: Copy + PartialEq + fmt::Debug {
    /// The value of a cell no fragment has been written to.
    const BLANK: Self;

    /// Write this cell as text, used by the framed buffer printout.
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Pixel for char {
    const BLANK: Self = ' ';

    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Pixel for u8 {
    const BLANK: Self = b' ';

    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as char)
    }
}

/// Integer cells start as the code of `' '` and print a blank for it, so an
/// int buffer frames the same way a char buffer does.
impl Pixel for i32 {
    const BLANK: Self = b' ' as i32;

    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::BLANK {
            write!(f, " ")
        } else {
            write!(f, "{self}")
        }
    }
}

/// A row-major `width x height` grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// # Errors
    /// [`RenderError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize, fill: T) -> Result<Self, RenderError> {
        let size = width
            .checked_mul(height)
            .filter(|&size| size > 0)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        Ok(Self {
            cells: vec![fill; size],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, row: i64, col: i64) -> Result<usize, RenderError> {
        if row < 0 || col < 0 || row as u64 >= self.height as u64 || col as u64 >= self.width as u64
        {
            return Err(RenderError::PixelOutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row as usize * self.width + col as usize)
    }

    /// Read the cell at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Result<T, RenderError> {
        let index = self.offset(saturating_i64(row), saturating_i64(col))?;
        Ok(self.cells[index])
    }

    #[inline]
    pub(crate) fn get_signed(&self, row: i64, col: i64) -> Result<T, RenderError> {
        let index = self.offset(row, col)?;
        Ok(self.cells[index])
    }

    #[inline]
    pub(crate) fn set_signed(&mut self, row: i64, col: i64, value: T) -> Result<(), RenderError> {
        let index = self.offset(row, col)?;
        self.cells[index] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact(self.width)
    }
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// The shaded output grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer<T: Pixel> {
    grid: Grid<T>,
}

impl<T: Pixel> FrameBuffer<T> {
    /// A buffer with every cell set to [`Pixel::BLANK`].
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        Ok(Self {
            grid: Grid::new(width, height, T::BLANK)?,
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read the cell at (`row`, `col`).
    ///
    /// # Errors
    /// [`RenderError::PixelOutOfBounds`] if either coordinate is past its axis.
    pub fn get(&self, row: usize, col: usize) -> Result<T, RenderError> {
        self.grid.get(row, col)
    }

    #[inline]
    pub(crate) fn set(&mut self, row: i64, col: i64, value: T) -> Result<(), RenderError> {
        self.grid.set_signed(row, col, value)
    }

    pub fn clear(&mut self) {
        self.grid.fill(T::BLANK);
    }

    /// True when no cell holds anything but [`Pixel::BLANK`].
    pub fn is_blank(&self) -> bool {
        self.grid.as_slice().iter().all(|&cell| cell == T::BLANK)
    }

    pub fn as_slice(&self) -> &[T] {
        self.grid.as_slice()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.grid.rows()
    }
}

/// Per-pixel nearest depth.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    grid: Grid<f32>,
}

impl DepthBuffer {
    /// A buffer with every cell at `+inf`.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        Ok(Self {
            grid: Grid::new(width, height, f32::INFINITY)?,
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f32, RenderError> {
        self.grid.get(row, col)
    }

    /// Depth test at (`row`, `col`).
    ///
    /// Stores `depth` and returns `true` only if it is strictly less than the
    /// current value. A NaN depth never passes.
    #[inline]
    pub(crate) fn test_and_set(
        &mut self,
        row: i64,
        col: i64,
        depth: f32,
    ) -> Result<bool, RenderError> {
        if self.grid.get_signed(row, col)? > depth {
            self.grid.set_signed(row, col, depth)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn clear(&mut self) {
        self.grid.fill(f32::INFINITY);
    }

    /// True when every cell is back at `+inf`.
    pub fn is_empty(&self) -> bool {
        self.grid.as_slice().iter().all(|&d| d == f32::INFINITY)
    }

    pub fn as_slice(&self) -> &[f32] {
        self.grid.as_slice()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.grid.rows()
    }
}

/// A view into the frame and depth buffers of one pipeline.
///
/// Pairs the two grids so a fragment can be depth-tested and shaded in one
/// step. This is a borrowed view, not an owning type - it's meant to be
/// created for the duration of a render pass.
pub struct RenderTarget<'a, T: Pixel> {
    frame: &'a mut FrameBuffer<T>,
    depth: &'a mut DepthBuffer,
}

impl<'a, T: Pixel> RenderTarget<'a, T> {
    pub fn new(frame: &'a mut FrameBuffer<T>, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            (frame.width(), frame.height()),
            (depth.width(), depth.height()),
            "Frame and depth buffer dimensions differ"
        );
        Self { frame, depth }
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Set a pixel at (`row`, `col`) with depth testing.
    ///
    /// `shade` runs only when `depth` is strictly nearer than the stored
    /// depth; its value is then written and `true` returned.
    ///
    /// # Errors
    /// [`RenderError::PixelOutOfBounds`] if the pixel is off the grid. Nothing
    /// is written in that case.
    #[inline]
    pub fn set_pixel_with_depth(
        &mut self,
        row: i64,
        col: i64,
        depth: f32,
        shade: impl FnOnce() -> T,
    ) -> Result<bool, RenderError> {
        if !self.depth.test_and_set(row, col, depth)? {
            return Ok(false);
        }
        self.frame.set(row, col, shade())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            FrameBuffer::<char>::new(0, 4),
            Err(RenderError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(DepthBuffer::new(3, 0).is_err());
        assert!(Grid::new(usize::MAX, 2, 0u8).is_err());
    }

    #[test]
    fn test_new_buffers_are_blank() {
        let frame = FrameBuffer::<i32>::new(3, 2).unwrap();
        assert!(frame.is_blank());
        assert_eq!(frame.get(1, 2), Ok(32));
        let depth = DepthBuffer::new(3, 2).unwrap();
        assert!(depth.is_empty());
        assert_eq!(depth.get(0, 0), Ok(f32::INFINITY));
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let frame = FrameBuffer::<char>::new(3, 2).unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert!(frame.get(1, 2).is_ok());
        assert_eq!(
            frame.get(2, 0),
            Err(RenderError::PixelOutOfBounds {
                row: 2,
                col: 0,
                width: 3,
                height: 2
            })
        );
        assert!(frame.get(0, 3).is_err());
    }

    #[test]
    fn test_signed_writes_reject_negative_coordinates() {
        let mut frame = FrameBuffer::<char>::new(2, 2).unwrap();
        assert!(frame.set(-1, 0, 'x').is_err());
        assert!(frame.set(0, -1, 'x').is_err());
        frame.set(1, 0, 'x').unwrap();
        assert_eq!(frame.get(1, 0), Ok('x'));
        assert_eq!(frame.as_slice(), &[' ', ' ', 'x', ' ']);
    }

    #[test]
    fn test_depth_test_is_strict() {
        let mut depth = DepthBuffer::new(1, 1).unwrap();
        assert_eq!(depth.test_and_set(0, 0, 0.7), Ok(true));
        assert_eq!(depth.test_and_set(0, 0, 0.7), Ok(false));
        assert_eq!(depth.test_and_set(0, 0, 0.9), Ok(false));
        assert_eq!(depth.test_and_set(0, 0, 0.3), Ok(true));
        assert_eq!(depth.test_and_set(0, 0, f32::NAN), Ok(false));
        assert_eq!(depth.get(0, 0), Ok(0.3));
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut frame = FrameBuffer::<u8>::new(2, 2).unwrap();
        let mut depth = DepthBuffer::new(2, 2).unwrap();
        frame.set(0, 1, b'7').unwrap();
        depth.test_and_set(0, 1, 0.5).unwrap();
        frame.clear();
        depth.clear();
        assert!(frame.is_blank());
        assert!(depth.is_empty());
    }

    #[test]
    fn test_render_target_shades_only_accepted_pixels() {
        let mut frame = FrameBuffer::<char>::new(2, 1).unwrap();
        let mut depth = DepthBuffer::new(2, 1).unwrap();
        let mut calls = 0;
        {
            let mut target = RenderTarget::new(&mut frame, &mut depth);
            assert_eq!(target.width(), 2);
            assert_eq!(target.height(), 1);
            let mut shade = |c: char| {
                calls += 1;
                c
            };
            assert_eq!(target.set_pixel_with_depth(0, 1, 0.5, || shade('a')), Ok(true));
            assert_eq!(target.set_pixel_with_depth(0, 1, 0.5, || shade('b')), Ok(false));
            assert!(target.set_pixel_with_depth(1, 0, 0.1, || shade('c')).is_err());
        }
        assert_eq!(calls, 1);
        assert_eq!(frame.get(0, 1), Ok('a'));
        assert_eq!(frame.get(0, 0), Ok(' '));
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut grid = Grid::new(3, 2, 0i32).unwrap();
        grid.set_signed(1, 0, 5).unwrap();
        let rows: Vec<&[i32]> = grid.rows().collect();
        assert_eq!(rows, vec![&[0, 0, 0][..], &[5, 0, 0][..]]);
    }
}

//! Buffers written concurrently by the worker pool.
//!
//! Workers never lock these buffers. Each one writes only the index range its
//! partition assigns it, and phases are separated by barrier checkpoints, so
//! a region is either written by one worker or read by many, never both at
//! once. The accessors are `unsafe` and callers restate that argument at each
//! call site.

use std::cell::UnsafeCell;
use std::ops::Range;

use raster::{Image, Rgb};

use crate::error::{PipelineError, Result};
use crate::grid::Grid;

/// Fixed-length buffer shared across worker threads.
pub(crate) struct SharedBuffer<T> {
    cells: Box<[UnsafeCell<T>]>,
}

// SAFETY: concurrent access is restricted to disjoint ranges by the callers
// of the unsafe accessors below; T itself moves between threads.
unsafe impl<T: Send> Sync for SharedBuffer<T> {}

impl<T: Copy> SharedBuffer<T> {
    /// Allocate `len` copies of `value`, reporting failure instead of aborting.
    pub fn try_filled(len: usize, value: T, what: &'static str) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| PipelineError::allocation::<T>(what, len))?;
        data.resize(len, value);
        Ok(Self::from_vec(data))
    }
}

impl<T> SharedBuffer<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            cells: data.into_iter().map(UnsafeCell::new).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
            .into_vec()
            .into_iter()
            .map(UnsafeCell::into_inner)
            .collect()
    }

    /// Exclusive access to `range`.
    ///
    /// # Safety
    /// No other thread may read or write any index in `range` while the
    /// returned slice is alive.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [T] {
        let cells = &self.cells[range];
        // UnsafeCell<T> is repr(transparent), so the cells are laid out as [T].
        std::slice::from_raw_parts_mut(UnsafeCell::raw_get(cells.as_ptr()), cells.len())
    }

    /// Shared view of the whole buffer.
    ///
    /// # Safety
    /// No thread may write any index while the returned slice is alive.
    pub unsafe fn as_slice(&self) -> &[T] {
        std::slice::from_raw_parts(UnsafeCell::raw_get(self.cells.as_ptr()), self.cells.len())
    }

    /// Owner-only access, no other references can exist.
    pub fn get_mut(&mut self) -> &mut [T] {
        // SAFETY: &mut self rules out any shared view.
        unsafe { self.slice_mut(0..self.cells.len()) }
    }
}

/// The working image, shared by all workers from grid sampling onwards.
pub(crate) struct SharedImage {
    width: usize,
    height: usize,
    pixels: SharedBuffer<Rgb>,
}

impl SharedImage {
    /// Fresh black image for the rescale phase.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        let len = width.saturating_mul(height);
        Ok(Self {
            width,
            height,
            pixels: SharedBuffer::try_filled(len, Rgb::BLACK, "rescaled image")?,
        })
    }

    /// Take over an existing image and its pixel allocation.
    pub fn from_image(image: Image) -> Self {
        let (width, height) = (image.width(), image.height());
        Self {
            width,
            height,
            pixels: SharedBuffer::from_vec(image.into_pixels()),
        }
    }

    pub fn into_image(self) -> Image {
        let (width, height) = (self.width, self.height);
        Image::new(width, height, self.pixels.into_vec())
            .unwrap_or_else(|_| unreachable!("pixel count fixed at construction"))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels of the rows in `rows`, row-major.
    ///
    /// # Safety
    /// Same contract as [`SharedBuffer::slice_mut`] for those rows.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn rows_mut(&self, rows: Range<usize>) -> &mut [Rgb] {
        self.pixels
            .slice_mut(rows.start * self.width..rows.end * self.width)
    }

    /// # Safety
    /// Same contract as [`SharedBuffer::as_slice`].
    pub unsafe fn pixels(&self) -> &[Rgb] {
        self.pixels.as_slice()
    }
}

/// The occupancy grid while it is being sampled and marched.
pub(crate) struct SharedGrid {
    rows: usize,
    cols: usize,
    cells: SharedBuffer<u8>,
}

impl SharedGrid {
    /// All-zero grid of `rows x cols`.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.saturating_mul(cols);
        Ok(Self {
            rows,
            cols,
            cells: SharedBuffer::try_filled(len, 0u8, "grid")?,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Set one cell before the grid is published.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let cols = self.cols;
        self.cells.get_mut()[row * cols + col] = value;
    }

    /// Full rows `rows`, row-major.
    ///
    /// # Safety
    /// Same contract as [`SharedBuffer::slice_mut`] for those rows.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn rows_mut(&self, rows: Range<usize>) -> &mut [u8] {
        self.cells.slice_mut(rows.start * self.cols..rows.end * self.cols)
    }

    /// Columns `cols` of a single row.
    ///
    /// # Safety
    /// Same contract as [`SharedBuffer::slice_mut`] for those cells.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn row_segment_mut(&self, row: usize, cols: Range<usize>) -> &mut [u8] {
        let base = row * self.cols;
        self.cells.slice_mut(base + cols.start..base + cols.end)
    }

    /// # Safety
    /// Same contract as [`SharedBuffer::as_slice`].
    pub unsafe fn cells(&self) -> &[u8] {
        self.cells.as_slice()
    }

    pub fn into_grid(self) -> Grid {
        Grid::from_cells(self.rows, self.cols, self.cells.into_vec())
            .unwrap_or_else(|_| unreachable!("cell count fixed at construction"))
    }
}

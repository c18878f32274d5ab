//! Binary occupancy grid produced by the sampling phase.

use crate::march::configuration_index;
use crate::stencil::CONFIGURATION_COUNT;

/// Binary matrix of `(P+1) x (Q+1)` sample points, row-major.
///
/// A cell is 1 when its sample pixel is inside the contour (dark enough) and 0
/// otherwise. The last row and column hold samples taken from the image's
/// bottom and right edges; the bottom-right corner is always 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Wrap cells, returning them back if the length does not match.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self, Vec<u8>> {
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(cells);
        }
        Ok(Self { rows, cols, cells })
    }

    /// Number of sample rows, `P + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sample columns, `Q + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    /// Number of marching squares, `P x Q`.
    pub fn square_count(&self) -> usize {
        self.rows.saturating_sub(1) * self.cols.saturating_sub(1)
    }

    /// Configuration index of the square whose top-left corner is (`row`, `col`).
    ///
    /// Valid for `row < rows - 1` and `col < cols - 1`.
    pub fn configuration(&self, row: usize, col: usize) -> u8 {
        configuration_index(
            self.get(row, col),
            self.get(row, col + 1),
            self.get(row + 1, col + 1),
            self.get(row + 1, col),
        )
    }

    /// How many squares fall into each of the 16 configurations.
    pub fn configuration_histogram(&self) -> [usize; CONFIGURATION_COUNT] {
        let mut histogram = [0usize; CONFIGURATION_COUNT];
        for row in 0..self.rows.saturating_sub(1) {
            for col in 0..self.cols.saturating_sub(1) {
                histogram[self.configuration(row, col) as usize] += 1;
            }
        }
        histogram
    }
}

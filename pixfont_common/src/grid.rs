// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangular buffer of cell codes.

use alloc::vec;
use alloc::vec::Vec;

use crate::pixel::{PX_EMPTY, PX_FULL, PX_SUBPIXEL};

/// A row-major grid of cell codes.
///
/// Rows are `stride` bytes apart, and only the first `width` bytes of every row belong to the
/// grid. Grids built by [`PixelGrid::new`] and [`PixelGrid::from_cells`] carry one extra
/// [`PX_EMPTY`] column on the right and one extra row at the bottom, so that a reader may look
/// one cell past the last row or column without a bounds check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    height: u32,
    width: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Creates a blank grid of the given size.
    pub fn new(height: u32, width: u32) -> Self {
        let stride = width as usize + 1;
        Self {
            height,
            width,
            stride,
            data: vec![PX_EMPTY; stride * (height as usize + 1)],
        }
    }

    /// Creates a grid from tightly packed rows.
    ///
    /// Returns `None` if `cells` does not hold exactly `height * width` codes.
    pub fn from_cells(height: u32, width: u32, cells: &[u8]) -> Option<Self> {
        if cells.len() != height as usize * width as usize {
            return None;
        }
        let mut grid = Self::new(height, width);
        if width > 0 {
            for (row, src) in cells.chunks_exact(width as usize).enumerate() {
                let start = row * grid.stride;
                grid.data[start..start + src.len()].copy_from_slice(src);
            }
        }
        Some(grid)
    }

    /// Wraps an existing strided buffer without copying it.
    ///
    /// Returns `None` if `stride` is narrower than `width` or `data` is too short to hold every
    /// row.
    pub fn from_strided(height: u32, width: u32, stride: usize, data: Vec<u8>) -> Option<Self> {
        if stride < width as usize {
            return None;
        }
        let needed = match height as usize {
            0 => 0,
            h => (h - 1) * stride + width as usize,
        };
        if data.len() < needed {
            return None;
        }
        Some(Self {
            height,
            width,
            stride,
            data,
        })
    }

    /// Returns a copy of this grid repacked so it carries the sentinel column and row.
    pub fn with_sentinels(&self) -> Self {
        if self.has_sentinels() {
            return self.clone();
        }
        let mut grid = Self::new(self.height, self.width);
        for row in 0..self.height {
            let dst = row as usize * grid.stride;
            grid.data[dst..dst + self.width as usize].copy_from_slice(self.row(row));
        }
        grid
    }

    /// Whether the cells right of and below the grid exist and are empty.
    pub fn has_sentinels(&self) -> bool {
        let width = self.width as usize;
        let height = self.height as usize;
        if self.stride <= width || self.data.len() < self.stride * (height + 1) {
            return false;
        }
        let column_clear = (0..=height).all(|row| self.data[row * self.stride + width] == PX_EMPTY);
        let row_clear = self.data[height * self.stride..height * self.stride + width]
            .iter()
            .all(|&cell| cell == PX_EMPTY);
        column_clear && row_clear
    }

    /// The number of rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The number of columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The distance in bytes between the starts of two consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The raw backing buffer, including any padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The cells of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: u32) -> &[u8] {
        assert!(row < self.height, "row {row} out of bounds");
        let start = row as usize * self.stride;
        &self.data[start..start + self.width as usize]
    }

    /// Returns the cell at `(row, col)`, or [`PX_EMPTY`] outside the grid.
    #[inline]
    pub fn get(&self, row: i64, col: i64) -> u8 {
        if row < 0 || col < 0 || row >= i64::from(self.height) || col >= i64::from(self.width) {
            return PX_EMPTY;
        }
        self.data[row as usize * self.stride + col as usize]
    }

    /// Overwrites the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    pub fn set(&mut self, row: u32, col: u32, cell: u8) {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) out of bounds"
        );
        self.data[row as usize * self.stride + col as usize] = cell;
    }

    /// Iterates over `(row, col, cell)` for every cell of the grid.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width)
                .zip(self.row(row))
                .map(move |(col, &cell)| (row, col, cell))
        })
    }

    /// Whether no cell of the grid has any fill in either reading.
    pub fn is_blank(&self) -> bool {
        self.cells()
            .all(|(_, _, cell)| cell & (PX_FULL | PX_SUBPIXEL) == PX_EMPTY)
    }
}

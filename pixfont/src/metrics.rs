// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal metrics.

use pixfont_common::adjacency::leftmost;
use pixfont_common::pixel::{PX_EMPTY, PX_FULL, PX_SUBPIXEL};

use crate::graph::GlyphGraph;

impl GlyphGraph {
    /// The advance width of a glyph, in cells.
    pub fn advance(&self, name: &str) -> Option<u32> {
        self.get(name)?.size().map(|(_, width)| width)
    }

    /// The distance from the glyph origin to the leftmost ink, in cells.
    ///
    /// Shapes that start at the middle of their cell count from there. Negated components
    /// never add ink and are skipped. A glyph without ink reports its advance width.
    ///
    /// # Panics
    ///
    /// Panics if the glyph has not been resolved.
    pub fn left_side_bearing(&self, name: &str) -> Option<f32> {
        let advance = self.advance(name)?;
        let mut bearing = advance as f32;
        for placed in self.flatten(name)? {
            if placed.is_negated() {
                continue;
            }
            for (_, col, cell) in self.literal(placed.literal).cells() {
                let Some(start) = cell_start(cell) else {
                    continue;
                };
                let x = (placed.left as f32) + (col as f32) + start;
                bearing = bearing.min(x);
            }
        }
        Some(bearing)
    }
}

/// Where the ink of a cell starts within the cell.
fn cell_start(cell: u8) -> Option<f32> {
    let shape = cell & PX_SUBPIXEL;
    if shape != PX_EMPTY {
        leftmost(shape)
    } else if cell & PX_FULL != 0 {
        leftmost(PX_FULL)
    } else {
        None
    }
}

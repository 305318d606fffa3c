// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which parts of a cell's boundary each shape touches.
//!
//! Every edge of a cell is split in two halves, since a diagonal can cover only half of an
//! edge. The eight half-edges are numbered clockwise from the top left:
//!
//! ```txt
//!      a   b
//!     +--+--+
//!   h |     | c
//!     +     +
//!   g |     | d
//!     +--+--+
//!      f   e
//! ```
//!
//! with `a` as the most significant bit of the mask. A shape whose outline does not run along
//! the cell edges also carries its interior boundary as a list of [`GapSegment`]s.

use crate::pixel::{PX_EMPTY, PX_FULL, PX_QUAD3, PX_SLANT2H, PX_SLANT4H, PX_SUBPIXEL};

/// Half-edge bits of an adjacency mask.
pub mod edge {
    /// Left half of the top edge.
    pub const TOP_LEFT: u8 = 0b1000_0000;
    /// Right half of the top edge.
    pub const TOP_RIGHT: u8 = 0b0100_0000;
    /// Upper half of the right edge.
    pub const RIGHT_TOP: u8 = 0b0010_0000;
    /// Lower half of the right edge.
    pub const RIGHT_BOTTOM: u8 = 0b0001_0000;
    /// Right half of the bottom edge.
    pub const BOTTOM_RIGHT: u8 = 0b0000_1000;
    /// Left half of the bottom edge.
    pub const BOTTOM_LEFT: u8 = 0b0000_0100;
    /// Lower half of the left edge.
    pub const LEFT_BOTTOM: u8 = 0b0000_0010;
    /// Upper half of the left edge.
    pub const LEFT_TOP: u8 = 0b0000_0001;

    /// The whole top edge.
    pub const TOP: u8 = TOP_LEFT | TOP_RIGHT;
    /// The whole right edge.
    pub const RIGHT: u8 = RIGHT_TOP | RIGHT_BOTTOM;
    /// The whole bottom edge.
    pub const BOTTOM: u8 = BOTTOM_RIGHT | BOTTOM_LEFT;
    /// The whole left edge.
    pub const LEFT: u8 = LEFT_BOTTOM | LEFT_TOP;
    /// Every half-edge.
    pub const ALL: u8 = 0xff;
}

/// A boundary segment inside a unit cell.
///
/// Coordinates count half cells, so they range over `0..=2` with `(0, 0)` the top left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GapSegment {
    /// Start x.
    pub x0: u8,
    /// Start y.
    pub y0: u8,
    /// End x.
    pub x1: u8,
    /// End y.
    pub y1: u8,
}

const fn seg(x0: u8, y0: u8, x1: u8, y1: u8) -> GapSegment {
    GapSegment { x0, y0, x1, y1 }
}

/// The boundary description of one shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adjacency {
    /// The half-edges covered by the shape, see [`edge`].
    pub mask: u8,
    /// Boundary segments of the shape that do not lie on a cell edge.
    pub gaps: &'static [GapSegment],
}

const fn entry(mask: u8, gaps: &'static [GapSegment]) -> Adjacency {
    Adjacency { mask, gaps }
}

/// Shapes `0..=0xf`; the rest are derived from these by complement.
const CANONICAL: [Adjacency; 16] = [
    /* PX_EMPTY   */ entry(0b0000_0000, &[]),
    /* PX_HALF1   */ entry(0b0000_1111, &[seg(0, 0, 2, 2)]),
    /* PX_HALF3   */ entry(0b1100_0011, &[seg(0, 2, 2, 0)]),
    /* PX_QUAD1   */ entry(0b0000_0011, &[seg(0, 0, 1, 1), seg(1, 1, 0, 2)]),
    /* PX_QUAD2   */ entry(0b1100_0000, &[seg(0, 0, 1, 1), seg(1, 1, 2, 0)]),
    /* PX_QUAD3   */ entry(0b0011_0000, &[seg(2, 0, 1, 1), seg(1, 1, 2, 2)]),
    /* PX_QUAD4   */ entry(0b0000_1100, &[seg(0, 2, 1, 1), seg(1, 1, 2, 2)]),
    /* PX_SLANT1H */ entry(0b0000_0111, &[seg(0, 0, 1, 2)]),
    /* PX_SLANT2H */ entry(0b0111_0000, &[seg(1, 0, 2, 2)]),
    /* PX_SLANT3H */ entry(0b1000_0011, &[seg(0, 2, 1, 0)]),
    /* PX_SLANT4H */ entry(0b0011_1000, &[seg(1, 2, 2, 0)]),
    /* PX_SLANT1V */ entry(0b0000_1110, &[seg(0, 1, 2, 2)]),
    /* PX_SLANT2V */ entry(0b1110_0000, &[seg(0, 0, 2, 1)]),
    /* PX_SLANT3V */ entry(0b1100_0001, &[seg(0, 1, 2, 0)]),
    /* PX_SLANT4V */ entry(0b0001_1100, &[seg(0, 2, 2, 1)]),
    /* PX_DOT     */
    entry(
        0b0000_0000,
        &[seg(0, 1, 1, 0), seg(1, 0, 2, 1), seg(2, 1, 1, 2), seg(1, 2, 0, 1)],
    ),
];

/// Entries for every fine shape, followed by the entry for [`PX_FULL`].
const TABLE: [Adjacency; 0x21] = build_table();

const fn build_table() -> [Adjacency; 0x21] {
    let mut table = [entry(0, &[]); 0x21];
    let mut code = 0;
    while code < 0x20 {
        table[code] = if code < 0x10 {
            CANONICAL[code]
        } else {
            let dual = CANONICAL[code ^ PX_SUBPIXEL as usize];
            entry(!dual.mask, dual.gaps)
        };
        code += 1;
    }
    table[0x20] = table[PX_SUBPIXEL as usize];
    table
}

/// Returns the boundary description of `shape`.
///
/// `shape` is a cell already reduced by a [`FillMask`](crate::pixel::FillMask): a fine code in
/// `0..=0x1f`, or [`PX_FULL`] for a coarse solid cell.
#[inline]
pub fn adjacency(shape: u8) -> Adjacency {
    if shape & PX_FULL != 0 {
        TABLE[0x20]
    } else {
        TABLE[(shape & PX_SUBPIXEL) as usize]
    }
}

/// The smallest fractional x covered by `shape`, or `None` when it covers nothing.
pub fn leftmost(shape: u8) -> Option<f32> {
    let shape = if shape & PX_FULL != 0 {
        PX_FULL
    } else {
        shape & PX_SUBPIXEL
    };
    match shape {
        PX_EMPTY => None,
        PX_QUAD3 | PX_SLANT2H | PX_SLANT4H => Some(0.5),
        _ => Some(0.0),
    }
}

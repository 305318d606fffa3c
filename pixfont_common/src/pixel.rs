// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell codes.
//!
//! A cell is one byte. The low five bits ([`PX_SUBPIXEL`]) select one of 32 fill shapes,
//! and [`PX_FULL`] records whether the cell counts as solid when read coarsely.
//!
//! Codes `0x10..=0x1f` are the anti-shapes of `code ^ PX_SUBPIXEL`: the region they fill is
//! exactly the region the other code leaves empty.

/// Mask selecting the fine shape of a cell.
pub const PX_SUBPIXEL: u8 = 0x1f;
/// Bit marking a cell as solid in the coarse reading.
pub const PX_FULL: u8 = 0x20;

const M: u8 = PX_SUBPIXEL;

/// Nothing.
pub const PX_EMPTY: u8 = 0;
/// The whole cell.
pub const PX_ALMOSTFULL: u8 = M;
/// Lower left triangle.
pub const PX_HALF1: u8 = 1;
/// Upper right triangle.
pub const PX_HALF2: u8 = 1 ^ M;
/// Upper left triangle.
pub const PX_HALF3: u8 = 2;
/// Lower right triangle.
pub const PX_HALF4: u8 = 2 ^ M;
/// Left quadrant, a triangle pointing right.
pub const PX_QUAD1: u8 = 3;
/// Top quadrant, a triangle pointing down.
pub const PX_QUAD2: u8 = 4;
/// Right quadrant, a triangle pointing left.
pub const PX_QUAD3: u8 = 5;
/// Bottom quadrant, a triangle pointing up.
pub const PX_QUAD4: u8 = 6;
/// Everything except the left quadrant.
pub const PX_INVQUAD1: u8 = 3 ^ M;
/// Everything except the top quadrant.
pub const PX_INVQUAD2: u8 = 4 ^ M;
/// Everything except the right quadrant.
pub const PX_INVQUAD3: u8 = 5 ^ M;
/// Everything except the bottom quadrant.
pub const PX_INVQUAD4: u8 = 6 ^ M;
/// [`PX_HALF1`] squeezed horizontally into the left half of the cell.
pub const PX_SLANT1H: u8 = 7;
/// [`PX_HALF2`] squeezed horizontally into the right half of the cell.
pub const PX_SLANT2H: u8 = 8;
/// [`PX_HALF3`] squeezed horizontally into the left half of the cell.
pub const PX_SLANT3H: u8 = 9;
/// [`PX_HALF4`] squeezed horizontally into the right half of the cell.
pub const PX_SLANT4H: u8 = 10;
/// [`PX_HALF1`] squeezed vertically into the bottom half of the cell.
pub const PX_SLANT1V: u8 = 11;
/// [`PX_HALF2`] squeezed vertically into the top half of the cell.
pub const PX_SLANT2V: u8 = 12;
/// [`PX_HALF3`] squeezed vertically into the top half of the cell.
pub const PX_SLANT3V: u8 = 13;
/// [`PX_HALF4`] squeezed vertically into the bottom half of the cell.
pub const PX_SLANT4V: u8 = 14;
/// Everything except [`PX_SLANT2H`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT1H: u8 = 8 ^ M;
/// Everything except [`PX_SLANT1H`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT2H: u8 = 7 ^ M;
/// Everything except [`PX_SLANT4H`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT3H: u8 = 10 ^ M;
/// Everything except [`PX_SLANT3H`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT4H: u8 = 9 ^ M;
/// Everything except [`PX_SLANT2V`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT1V: u8 = 12 ^ M;
/// Everything except [`PX_SLANT1V`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT2V: u8 = 11 ^ M;
/// Everything except [`PX_SLANT4V`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT3V: u8 = 14 ^ M;
/// Everything except [`PX_SLANT3V`]; the wide part of a slope spanning one and a half cells.
pub const PX_HALFSLANT4V: u8 = 13 ^ M;
/// A diamond touching the midpoint of every edge.
pub const PX_DOT: u8 = 15;

/// The reading of a cell used when tracing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FillMask {
    /// Every cell is either solid or empty, decided by [`PX_FULL`].
    Coarse,
    /// Every cell contributes its fine shape.
    #[default]
    Fine,
}

impl FillMask {
    /// The bits of a cell this mask keeps.
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Coarse => PX_FULL,
            Self::Fine => PX_SUBPIXEL,
        }
    }

    /// Returns the shape of `cell` under this reading.
    ///
    /// The result is either a fine code in `0..=0x1f` or [`PX_FULL`].
    #[inline]
    pub const fn shape(self, cell: u8) -> u8 {
        cell & self.bits()
    }
}

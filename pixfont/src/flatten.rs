// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a resolved glyph into its literal components.

use pixfont_common::grid::PixelGrid;
use pixfont_common::pixel::{PX_EMPTY, PX_FULL, PX_SUBPIXEL};

use crate::glyph::{GlyphId, LiteralId, Payload};
use crate::graph::GlyphGraph;

/// A literal buffer placed in glyph space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedLiteral {
    /// Row of the top edge.
    pub top: i32,
    /// Column of the left edge.
    pub left: i32,
    /// Number of rows.
    pub height: u32,
    /// Number of columns.
    pub width: u32,
    /// The buffer.
    pub literal: LiteralId,
    /// Total punch count along the reference chain.
    pub negated: u32,
}

impl PlacedLiteral {
    /// Whether the literal subtracts from the glyph.
    #[inline]
    pub fn is_negated(&self) -> bool {
        self.negated & 1 == 1
    }
}

impl GlyphGraph {
    /// The literal components of a glyph, in drawing order, fully placed.
    ///
    /// Positions start from the glyph's preferred anchor and add up along every reference.
    /// Returns `None` if there is no live glyph called `name`.
    ///
    /// # Panics
    ///
    /// Panics if the glyph has not been resolved.
    pub fn flatten(&self, name: &str) -> Option<Vec<PlacedLiteral>> {
        self.id(name).map(|id| self.flatten_id(id))
    }

    /// The literal components of the glyph with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the glyph has not been resolved.
    pub fn flatten_id(&self, id: GlyphId) -> Vec<PlacedLiteral> {
        let glyph = self.glyph(id);
        let mut out = Vec::new();
        let mut stack: Vec<_> = glyph
            .components
            .iter()
            .rev()
            .map(|sub| (*sub, glyph.preferred_anchor(), 0))
            .collect();
        while let Some((sub, (dt, dl), negated)) = stack.pop() {
            let (top, left) = sub.origin();
            let (top, left) = (top + dt, left + dl);
            let negated = negated + sub.negated;
            match sub.payload {
                Payload::Literal(literal) => {
                    let (height, width) = sub.size();
                    out.push(PlacedLiteral {
                        top,
                        left,
                        height,
                        width,
                        literal,
                        negated,
                    });
                }
                Payload::Reference(target) => {
                    let child = self.glyph(target);
                    stack.extend(
                        child
                            .components
                            .iter()
                            .rev()
                            .map(|inner| (*inner, (top, left), negated)),
                    );
                }
                Payload::AnchoredReference(_) => panic!("glyph `{}` is not resolved", glyph.name),
            }
        }
        out
    }

    /// Draws a glyph into a grid of its own size.
    ///
    /// Later components draw over earlier ones. A negated component clears every cell it
    /// covers with a non-empty cell, and empty cells of a literal leave the grid untouched.
    /// Anything outside the glyph's bounds is clipped. Returns `None` if there is no live glyph
    /// called `name`.
    ///
    /// # Panics
    ///
    /// Panics if the glyph has not been resolved.
    pub fn compose(&self, name: &str) -> Option<PixelGrid> {
        let id = self.id(name)?;
        let (height, width) = self.glyph(id).size().expect("glyph is not resolved");
        let mut grid = PixelGrid::new(height, width);
        for placed in self.flatten_id(id) {
            let literal = self.literal(placed.literal);
            for (row, col, cell) in literal.cells() {
                if cell & (PX_FULL | PX_SUBPIXEL) == PX_EMPTY {
                    continue;
                }
                let y = i64::from(placed.top) + i64::from(row);
                let x = i64::from(placed.left) + i64::from(col);
                let (Ok(y), Ok(x)) = (u32::try_from(y), u32::try_from(x)) else {
                    continue;
                };
                if y >= height || x >= width {
                    continue;
                }
                grid.set(y, x, if placed.is_negated() { PX_EMPTY } else { cell });
            }
        }
        Some(grid)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pixfont_common::pixel::PX_ALMOSTFULL;

    use super::*;
    use crate::source::{GlyphSource, SubglyphSource};

    const SOLID: u8 = PX_ALMOSTFULL | PX_FULL;

    fn resolved(entries: Vec<(&str, GlyphSource)>) -> GlyphGraph {
        let sources: BTreeMap<_, _> = entries
            .into_iter()
            .map(|(name, source)| (name.to_owned(), source))
            .collect();
        let mut graph = GlyphGraph::link(sources).unwrap();
        graph.resolve_all().unwrap();
        graph
    }

    #[test]
    fn offsets_and_negation_accumulate() {
        let g = resolved(vec![
            (
                "inner",
                GlyphSource::new().with(SubglyphSource::pixels(1, 1, vec![SOLID]).at(1, 1)),
            ),
            (
                "middle",
                GlyphSource::new().with(SubglyphSource::reference("inner").at(2, 0).negate()),
            ),
            (
                "outer",
                GlyphSource::new()
                    .anchored_at(1, 0)
                    .with(SubglyphSource::reference("middle").at(0, 3).negate()),
            ),
        ]);
        let placed = g.flatten("outer").unwrap();
        assert_eq!(placed.len(), 1, "one literal");
        assert_eq!((placed[0].top, placed[0].left), (4, 4), "offsets add up from the anchor");
        assert_eq!(placed[0].negated, 2, "negation counts add up");
        assert!(!placed[0].is_negated(), "double negation draws");
    }

    #[test]
    fn negated_cell_is_cleared() {
        let g = resolved(vec![(
            "glyph",
            GlyphSource::new()
                .with(SubglyphSource::pixels(2, 2, vec![SOLID; 4]))
                .with(SubglyphSource::pixels(1, 1, vec![SOLID]).negate()),
        )]);
        let grid = g.compose("glyph").unwrap();
        assert_eq!(grid.row(0), &[PX_EMPTY, SOLID], "top-left punched out");
        assert_eq!(grid.row(1), &[SOLID, SOLID], "bottom row intact");
    }

    #[test]
    fn later_components_draw_over() {
        let g = resolved(vec![(
            "glyph",
            GlyphSource::new()
                .with(SubglyphSource::pixels(1, 2, vec![SOLID, SOLID]))
                .with(SubglyphSource::pixels(1, 2, vec![PX_EMPTY, 1]).at(0, 0)),
        )]);
        let grid = g.compose("glyph").unwrap();
        assert_eq!(grid.row(0), &[SOLID, 1], "empty cells are transparent");
    }
}

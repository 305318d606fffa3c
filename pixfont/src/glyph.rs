// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph records as stored in a [`GlyphGraph`](crate::GlyphGraph).

use std::collections::BTreeMap;

/// The index of a glyph in its graph.
///
/// Ids follow the sorted order of glyph names, so they are stable for a given set of sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub(crate) u32);

impl GlyphId {
    /// The position of the glyph in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The index of a literal pixel buffer in its graph.
///
/// Identical buffers share one id, so an id can key per-buffer caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiteralId(pub(crate) u32);

impl LiteralId {
    /// The position of the buffer in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One coordinate of a component's placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Coord {
    /// A fixed position in the parent.
    Absolute(i32),
    /// An offset from the anchor chosen for the component.
    Relative(i32),
    /// The anchor chosen for the component.
    #[default]
    Unset,
}

impl Coord {
    /// Returns the final position, given the anchor of the component.
    #[inline]
    pub fn resolve(self, anchor: i32) -> i32 {
        match self {
            Self::Absolute(value) => value,
            Self::Relative(delta) => anchor + delta,
            Self::Unset => anchor,
        }
    }

    /// The position, if it is already fixed.
    #[inline]
    pub fn absolute(self) -> Option<i32> {
        match self {
            Self::Absolute(value) => Some(value),
            _ => None,
        }
    }
}

/// What a component draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Payload {
    /// A literal pixel buffer.
    Literal(LiteralId),
    /// Another glyph, placed by offset.
    Reference(GlyphId),
    /// Another glyph, placed by matching its `-name` points against the parent's `+name` points.
    ///
    /// Resolution turns this into a [`Payload::Reference`].
    AnchoredReference(GlyphId),
}

impl Payload {
    /// The referenced glyph, if any.
    #[inline]
    pub fn target(self) -> Option<GlyphId> {
        match self {
            Self::Literal(_) => None,
            Self::Reference(id) | Self::AnchoredReference(id) => Some(id),
        }
    }
}

/// A component of a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subglyph {
    /// Row of the component's top edge in the parent.
    pub top: Coord,
    /// Column of the component's left edge in the parent.
    pub left: Coord,
    /// Height of the component, or `None` to take it from the payload.
    pub height: Option<u32>,
    /// Width of the component, or `None` to take it from the payload.
    pub width: Option<u32>,
    /// What the component draws.
    pub payload: Payload,
    /// How many times the component is punched out. Odd counts subtract, even counts add.
    pub negated: u32,
}

impl Subglyph {
    /// The `(top, left)` of a resolved component.
    ///
    /// # Panics
    ///
    /// Panics if the component has not been resolved.
    pub fn origin(&self) -> (i32, i32) {
        match (self.top, self.left) {
            (Coord::Absolute(top), Coord::Absolute(left)) => (top, left),
            _ => panic!("component placement has not been resolved"),
        }
    }

    /// The `(height, width)` of a resolved component.
    ///
    /// # Panics
    ///
    /// Panics if the component has not been resolved.
    pub fn size(&self) -> (u32, u32) {
        self.height
            .zip(self.width)
            .expect("component size has not been resolved")
    }

    /// Whether the component subtracts from the glyph.
    #[inline]
    pub fn is_negated(&self) -> bool {
        self.negated & 1 == 1
    }

    pub(crate) fn shift(&mut self, (dt, dl): (i32, i32)) {
        let (top, left) = self.origin();
        self.top = Coord::Absolute(top + dt);
        self.left = Coord::Absolute(left + dl);
    }
}

/// A named glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub(crate) name: String,
    pub(crate) fixed_height: Option<u32>,
    pub(crate) fixed_width: Option<u32>,
    pub(crate) size: Option<(u32, u32)>,
    pub(crate) preferred_top: i32,
    pub(crate) preferred_left: i32,
    pub(crate) sticky: bool,
    pub(crate) inline: bool,
    pub(crate) points: BTreeMap<String, (i32, i32)>,
    pub(crate) components: Vec<Subglyph>,
    pub(crate) removed: bool,
}

impl Glyph {
    /// The glyph's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved `(height, width)`, or `None` before resolution.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Whether the width was fixed by the source instead of computed from the components.
    pub fn has_fixed_advance(&self) -> bool {
        self.fixed_width.is_some()
    }

    /// The `(top, left)` used when the glyph is placed without an explicit offset.
    pub fn preferred_anchor(&self) -> (i32, i32) {
        (self.preferred_top, self.preferred_left)
    }

    /// Whether the glyph is externally addressable and so never removed or redirected.
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Whether the glyph is a fragment to be spliced into its referrers.
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Named points, as `(row, col)` in the glyph's own space.
    ///
    /// After resolution this also holds the unmatched points of adjoined components.
    pub fn points(&self) -> &BTreeMap<String, (i32, i32)> {
        &self.points
    }

    /// The components, in drawing order.
    pub fn components(&self) -> &[Subglyph] {
        &self.components
    }
}

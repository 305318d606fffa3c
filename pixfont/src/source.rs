// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unresolved glyph records, keyed by name, as produced by a glyph description parser.

use std::collections::BTreeMap;

use crate::glyph::Coord;

/// A glyph before linking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GlyphSource {
    /// Fixed height, overriding the extent of the components.
    pub height: Option<u32>,
    /// Fixed advance width, overriding the extent of the components.
    pub width: Option<u32>,
    /// Row the glyph sits at when placed without an explicit offset.
    pub top: i32,
    /// Column the glyph sits at when placed without an explicit offset.
    pub left: i32,
    /// Never remove or redirect this glyph.
    pub sticky: bool,
    /// Splice this glyph into every referrer instead of emitting it.
    pub inline: bool,
    /// Named points as `(row, col)`. Names starting with `-` are anchor targets, and names
    /// starting with `+` are anchor sources.
    pub points: BTreeMap<String, (i32, i32)>,
    /// Components in drawing order.
    pub components: Vec<SubglyphSource>,
}

impl GlyphSource {
    /// Creates an empty glyph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component.
    pub fn with(mut self, component: SubglyphSource) -> Self {
        self.components.push(component);
        self
    }

    /// Sets where the glyph sits when placed without an explicit offset.
    pub fn anchored_at(mut self, top: i32, left: i32) -> Self {
        self.top = top;
        self.left = left;
        self
    }

    /// Adds a named point.
    pub fn point(mut self, name: impl Into<String>, row: i32, col: i32) -> Self {
        self.points.insert(name.into(), (row, col));
        self
    }

    /// Fixes the glyph's size.
    pub fn fixed(mut self, height: u32, width: u32) -> Self {
        self.height = Some(height);
        self.width = Some(width);
        self
    }

    /// Marks the glyph as sticky.
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Marks the glyph as inline.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// A component before linking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubglyphSource {
    /// Placement row.
    #[cfg_attr(feature = "serde", serde(default))]
    pub top: Coord,
    /// Placement column.
    #[cfg_attr(feature = "serde", serde(default))]
    pub left: Coord,
    /// Height of the literal, or the size a reference is expected to have.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<u32>,
    /// Width of the literal, or the size a reference is expected to have.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<u32>,
    /// Row stride of literal data, defaulting to the width.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stride: Option<usize>,
    /// What the component draws.
    pub data: PayloadSource,
    /// How many times the component is punched out.
    #[cfg_attr(feature = "serde", serde(default))]
    pub negated: u32,
}

impl SubglyphSource {
    fn with_data(data: PayloadSource) -> Self {
        Self {
            top: Coord::Unset,
            left: Coord::Unset,
            height: None,
            width: None,
            stride: None,
            data,
            negated: 0,
        }
    }

    /// A literal buffer of tightly packed rows, placed at the origin.
    pub fn pixels(height: u32, width: u32, cells: Vec<u8>) -> Self {
        Self {
            height: Some(height),
            width: Some(width),
            ..Self::with_data(PayloadSource::Pixels(cells))
        }
        .at(0, 0)
    }

    /// A reference to another glyph, placed at its preferred anchor.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::with_data(PayloadSource::Named(name.into()))
    }

    /// A reference to another glyph, placed by matching anchor points.
    pub fn adjoin(name: impl Into<String>) -> Self {
        Self::with_data(PayloadSource::Adjoin((name.into(),)))
    }

    /// Places the component at a fixed position.
    pub fn at(mut self, top: i32, left: i32) -> Self {
        self.top = Coord::Absolute(top);
        self.left = Coord::Absolute(left);
        self
    }

    /// Places the component relative to its anchor.
    pub fn offset(mut self, top: i32, left: i32) -> Self {
        self.top = Coord::Relative(top);
        self.left = Coord::Relative(left);
        self
    }

    /// Requires a referenced glyph to have the given size.
    pub fn sized(mut self, height: u32, width: u32) -> Self {
        self.height = Some(height);
        self.width = Some(width);
        self
    }

    /// Punches the component out of the glyph, or undoes a previous punch.
    pub fn negate(mut self) -> Self {
        self.negated += 1;
        self
    }
}

/// What a component draws, before names are linked.
///
/// In JSON, literal data is an array of cell codes, a plain reference is a string and an
/// anchored reference is a string wrapped in a one-element array.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum PayloadSource {
    /// Cell codes.
    Pixels(Vec<u8>),
    /// The name of another glyph.
    Named(String),
    /// The name of another glyph, placed by matching anchor points.
    Adjoin((String,)),
}

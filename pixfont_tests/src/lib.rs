// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers for building glyph graphs in tests.
//!
//! Pixel art is written as one string per row:
//!
//! - `@`: a solid cell.
//! - `.`: an empty cell.
//! - `*`: a dot.
//! - `b`: a solid cell drawn as its lower-left half.
//! - `d`: a solid cell drawn as its lower-right half.

use std::collections::BTreeMap;

use pixfont::pixfont_common::grid::PixelGrid;
use pixfont::pixfont_common::pixel::{PX_ALMOSTFULL, PX_DOT, PX_EMPTY, PX_FULL, PX_HALF1, PX_HALF4};
use pixfont::{GlyphGraph, GlyphSource, SubglyphSource};

/// A cell that is solid at both granularities.
pub const SOLID: u8 = PX_FULL | PX_ALMOSTFULL;

/// Parses one row-per-string picture into tightly packed cell codes.
///
/// # Panics
///
/// Panics on rows of different lengths or unknown characters.
pub fn cells(rows: &[&str]) -> (u32, u32, Vec<u8>) {
    let width = rows.first().map_or(0, |row| row.len());
    let mut out = Vec::with_capacity(rows.len() * width);
    for row in rows {
        assert_eq!(row.len(), width, "ragged picture");
        out.extend(row.chars().map(|c| match c {
            '@' => SOLID,
            '.' => PX_EMPTY,
            '*' => PX_DOT,
            'b' => PX_HALF1 | PX_FULL,
            'd' => PX_HALF4 | PX_FULL,
            other => panic!("unknown cell `{other}`"),
        }));
    }
    let height = u32::try_from(rows.len()).expect("picture height fits in u32");
    let width = u32::try_from(width).expect("picture width fits in u32");
    (height, width, out)
}

/// A pixel grid drawn as a picture, with sentinels.
pub fn grid(rows: &[&str]) -> PixelGrid {
    let (height, width, cells) = cells(rows);
    PixelGrid::from_cells(height, width, &cells).expect("picture is rectangular")
}

/// A literal component drawn as a picture, placed at the origin.
pub fn art(rows: &[&str]) -> SubglyphSource {
    let (height, width, cells) = cells(rows);
    SubglyphSource::pixels(height, width, cells)
}

/// A solid literal component, placed at the origin.
pub fn solid(height: u32, width: u32) -> SubglyphSource {
    SubglyphSource::pixels(height, width, vec![SOLID; (height * width) as usize])
}

/// Collects named sources.
pub fn sources<'a>(
    entries: impl IntoIterator<Item = (&'a str, GlyphSource)>,
) -> BTreeMap<String, GlyphSource> {
    entries
        .into_iter()
        .map(|(name, source)| (name.to_owned(), source))
        .collect()
}

/// Links and resolves named sources.
///
/// # Panics
///
/// Panics if linking or resolution fails.
pub fn resolved<'a>(entries: impl IntoIterator<Item = (&'a str, GlyphSource)>) -> GlyphGraph {
    let mut graph = GlyphGraph::link(sources(entries)).expect("sources link");
    graph.resolve_all().expect("sources resolve");
    graph
}

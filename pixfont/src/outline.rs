// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector outlines of glyphs.

use std::sync::Arc;

use hashbrown::HashMap;
use pixfont_common::contour::{Contour, trace};
use pixfont_common::kurbo::BezPath;
use pixfont_common::pixel::FillMask;

use crate::flatten::PlacedLiteral;
use crate::glyph::LiteralId;
use crate::graph::GlyphGraph;

/// Traced contours of literal buffers.
///
/// Many glyphs share literal buffers through composition, so each buffer is traced once per
/// fill mask. Entries are keyed by [`LiteralId`], so a cache must only be used with the graph
/// that filled it.
#[derive(Clone, Debug, Default)]
pub struct ContourCache {
    entries: HashMap<(LiteralId, FillMask), Arc<[Contour]>>,
}

impl ContourCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The contours of a literal buffer, tracing it on first use.
    pub fn get_or_trace(
        &mut self,
        graph: &GlyphGraph,
        literal: LiteralId,
        mask: FillMask,
    ) -> Arc<[Contour]> {
        self.entries
            .entry((literal, mask))
            .or_insert_with(|| trace(graph.literal(literal), mask).into())
            .clone()
    }

    /// The number of traced buffers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been traced yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every traced buffer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Traces every literal buffer used by the named glyphs, in parallel.
    ///
    /// Unknown names are skipped.
    #[cfg(feature = "multithreading")]
    pub fn prefetch<'a>(
        &mut self,
        graph: &GlyphGraph,
        names: impl IntoIterator<Item = &'a str>,
        mask: FillMask,
    ) {
        use rayon::prelude::*;

        let mut pending: Vec<LiteralId> = names
            .into_iter()
            .filter_map(|name| graph.flatten(name))
            .flatten()
            .map(|placed| placed.literal)
            .filter(|literal| !self.entries.contains_key(&(*literal, mask)))
            .collect();
        pending.sort_unstable();
        pending.dedup();

        let traced: Vec<_> = pending
            .par_iter()
            .map(|&literal| (literal, trace(graph.literal(literal), mask)))
            .collect();
        log::debug!("prefetched {} literal buffers", traced.len());
        for (literal, contours) in traced {
            self.entries.insert((literal, mask), contours.into());
        }
    }
}

/// The traced outline of one glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphOutline {
    /// The advance width, in cells.
    pub advance: u32,
    /// Contours in glyph space, in cells.
    pub contours: Vec<Contour>,
}

impl GlyphOutline {
    /// Builds a path with one cell scaled to `scale` units.
    ///
    /// The path is filled with the nonzero rule.
    pub fn to_path(&self, scale: f64) -> BezPath {
        let mut path = BezPath::new();
        for contour in &self.contours {
            contour.append_to(&mut path, scale);
        }
        path
    }
}

impl GlyphGraph {
    /// Traces every literal component of a glyph.
    ///
    /// Components may overlap, so contours of different components are not merged. A glyph
    /// that punches out any component is traced from its composed raster instead, since
    /// negation clears cells however many components cover them. Returns `None` if there is no
    /// live glyph called `name`.
    ///
    /// # Panics
    ///
    /// Panics if the glyph has not been resolved.
    pub fn outline(
        &self,
        name: &str,
        mask: FillMask,
        cache: &mut ContourCache,
    ) -> Option<GlyphOutline> {
        let advance = self.advance(name)?;
        let placed = self.flatten(name)?;
        if placed.iter().any(PlacedLiteral::is_negated) {
            let contours = trace(&self.compose(name)?, mask);
            return Some(GlyphOutline { advance, contours });
        }
        let mut contours = Vec::new();
        for placed in placed {
            for contour in cache.get_or_trace(self, placed.literal, mask).iter() {
                let mut contour = contour.clone();
                contour.translate(placed.top, placed.left);
                contours.push(contour);
            }
        }
        Some(GlyphOutline { advance, contours })
    }
}

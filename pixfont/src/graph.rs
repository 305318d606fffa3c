// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The arena holding every glyph and literal buffer.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use log::debug;
use pixfont_common::grid::PixelGrid;

use crate::glyph::{Glyph, GlyphId, LiteralId, Payload, Subglyph};
use crate::source::{GlyphSource, PayloadSource, SubglyphSource};
use crate::{Error, Result};

/// Resolution state of a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Every glyph of a font, with components linked by id.
///
/// Glyphs refer to each other by [`GlyphId`], so the graph owns all records and reference
/// cycles in the input cannot become ownership cycles.
#[derive(Clone, Debug, Default)]
pub struct GlyphGraph {
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) names: HashMap<String, GlyphId>,
    pub(crate) literals: Vec<PixelGrid>,
    pub(crate) marks: Vec<Mark>,
    /// Glyphs in the order they finished resolving, so every glyph follows its dependencies.
    pub(crate) order: Vec<GlyphId>,
}

impl GlyphGraph {
    /// Builds a graph from name-keyed sources.
    ///
    /// Ids are assigned in name order. Identical literal buffers are stored once.
    pub fn link(sources: BTreeMap<String, GlyphSource>) -> Result<Self> {
        let names: HashMap<String, GlyphId> = sources
            .keys()
            .enumerate()
            .map(|(i, name)| {
                let id = u32::try_from(i).expect("glyph count fits in u32");
                (name.clone(), GlyphId(id))
            })
            .collect();

        let mut literals = Vec::new();
        let mut interned: HashMap<PixelGrid, LiteralId> = HashMap::new();
        let mut glyphs = Vec::with_capacity(sources.len());
        for (name, source) in sources {
            let mut components = Vec::with_capacity(source.components.len());
            for sub in source.components {
                let payload = match &sub.data {
                    PayloadSource::Pixels(cells) => {
                        let grid = literal_grid(&name, &sub, cells)?;
                        let id = *interned.entry(grid).or_insert_with_key(|grid| {
                            let id = u32::try_from(literals.len())
                                .expect("literal count fits in u32");
                            literals.push(grid.clone());
                            LiteralId(id)
                        });
                        Payload::Literal(id)
                    }
                    PayloadSource::Named(target) => {
                        Payload::Reference(lookup(&names, &name, target)?)
                    }
                    PayloadSource::Adjoin((target,)) => {
                        Payload::AnchoredReference(lookup(&names, &name, target)?)
                    }
                };
                components.push(Subglyph {
                    top: sub.top,
                    left: sub.left,
                    height: sub.height,
                    width: sub.width,
                    payload,
                    negated: sub.negated,
                });
            }
            glyphs.push(Glyph {
                name,
                fixed_height: source.height,
                fixed_width: source.width,
                size: None,
                preferred_top: source.top,
                preferred_left: source.left,
                sticky: source.sticky,
                inline: source.inline,
                points: source.points,
                components,
                removed: false,
            });
        }

        debug!(
            "linked {} glyphs with {} distinct literals",
            glyphs.len(),
            literals.len()
        );
        Ok(Self {
            marks: vec![Mark::Unvisited; glyphs.len()],
            glyphs,
            names,
            literals,
            order: Vec::new(),
        })
    }

    /// Looks up a live glyph by name.
    pub fn id(&self, name: &str) -> Option<GlyphId> {
        self.names
            .get(name)
            .copied()
            .filter(|id| !self.glyphs[id.index()].removed)
    }

    /// Looks up a live glyph by name.
    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.id(name).map(|id| self.glyph(id))
    }

    /// Returns the glyph with the given id, even if it has been removed.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this graph.
    pub fn glyph(&self, id: GlyphId) -> &Glyph {
        &self.glyphs[id.index()]
    }

    /// Returns a literal buffer.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this graph.
    pub fn literal(&self, id: LiteralId) -> &PixelGrid {
        &self.literals[id.index()]
    }

    /// The number of distinct literal buffers.
    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }

    /// Iterates over live glyphs in id order.
    pub fn glyphs(&self) -> impl Iterator<Item = (GlyphId, &Glyph)> + '_ {
        self.glyphs
            .iter()
            .zip(0..)
            .filter(|(glyph, _)| !glyph.removed)
            .map(|(glyph, i)| (GlyphId(i), glyph))
    }

    /// The number of live glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.iter().filter(|glyph| !glyph.removed).count()
    }

    /// Whether the graph has no live glyphs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every glyph has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.marks.iter().all(|&mark| mark == Mark::Done)
    }

    /// Protects a glyph from removal and redirection.
    ///
    /// `referrer` names whatever addresses the glyph externally, for the error raised when
    /// `name` is not a live glyph.
    pub fn mark_sticky(&mut self, name: &str, referrer: &str) -> Result<GlyphId> {
        let id = self.id(name).ok_or_else(|| Error::UndefinedGlyphReference {
            referrer: referrer.to_owned(),
            target: name.to_owned(),
        })?;
        self.glyphs[id.index()].sticky = true;
        Ok(id)
    }
}

fn lookup(names: &HashMap<String, GlyphId>, referrer: &str, target: &str) -> Result<GlyphId> {
    names
        .get(target)
        .copied()
        .ok_or_else(|| Error::UndefinedGlyphReference {
            referrer: referrer.to_owned(),
            target: target.to_owned(),
        })
}

/// Validates literal data and repacks it with sentinels.
fn literal_grid(glyph: &str, sub: &SubglyphSource, cells: &[u8]) -> Result<PixelGrid> {
    let invalid = || Error::InvalidPixelData {
        glyph: glyph.to_owned(),
    };
    let (height, width) = sub.height.zip(sub.width).ok_or_else(invalid)?;
    let stride = sub.stride.unwrap_or(width as usize);
    let grid = PixelGrid::from_strided(height, width, stride, cells.to_vec()).ok_or_else(invalid)?;
    Ok(grid.with_sentinels())
}

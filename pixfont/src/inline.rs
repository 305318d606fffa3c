// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Removing glyphs that need not be emitted on their own.
//!
//! The first pass walks glyphs with their dependencies first. It drops components that draw
//! nothing and then looks at what is left:
//!
//! - A glyph with no components becomes empty, unless it is sticky.
//! - A non-sticky glyph whose only component is a plain reference is replaced by a redirect
//!   to that reference.
//! - A sticky glyph whose only component is a plain reference to a non-sticky glyph takes
//!   over that glyph's components, and the child is redirected back to it.
//!
//! The second pass rewrites every remaining component through the redirects and splices in
//! the components of every inline glyph, then deletes inline and empty glyphs.

use std::mem;

use hashbrown::{HashMap, HashSet};
use log::{debug, trace};

use crate::glyph::{GlyphId, Payload, Subglyph};
use crate::graph::GlyphGraph;

/// Counts of what an inlining pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InlineStats {
    /// Components dropped because they drew nothing.
    pub dropped: usize,
    /// Glyphs found to draw nothing.
    pub emptied: usize,
    /// Glyphs replaced by a redirect to their only child.
    pub redirected: usize,
    /// Sticky glyphs that took over the components of their only child.
    pub absorbed: usize,
    /// Inline glyph components spliced into a referrer.
    pub spliced: usize,
    /// Glyphs deleted in total.
    pub removed: usize,
}

impl InlineStats {
    /// Whether the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Glyphs that were replaced by another glyph at an offset.
///
/// A glyph `a` redirects to `b` exactly when `a` is listed among the dependents of `b`, and a
/// redirect target is never itself redirected.
#[derive(Debug, Default)]
struct Redirects {
    to: HashMap<GlyphId, (GlyphId, (i32, i32))>,
    dependents: HashMap<GlyphId, Vec<GlyphId>>,
}

impl Redirects {
    fn add(&mut self, from: GlyphId, to: GlyphId, offset: (i32, i32)) {
        assert!(!self.to.contains_key(&from), "glyph is already redirected");
        assert!(!self.to.contains_key(&to), "redirect target is itself redirected");

        if let Some(dependents) = self.dependents.remove(&from) {
            for dependent in &dependents {
                let (target, shift) = self
                    .to
                    .get_mut(dependent)
                    .expect("dependent has no redirect");
                assert_eq!(*target, from, "dependent redirects elsewhere");
                *target = to;
                shift.0 += offset.0;
                shift.1 += offset.1;
            }
            self.dependents.entry(to).or_default().extend(dependents);
        }
        self.to.insert(from, (to, offset));
        self.dependents.entry(to).or_default().push(from);
    }

    fn get(&self, id: GlyphId) -> Option<(GlyphId, (i32, i32))> {
        self.to.get(&id).copied()
    }
}

impl GlyphGraph {
    /// Removes empty glyphs, collapses single-reference glyphs and splices inline glyphs.
    ///
    /// Running this on an already inlined graph changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if the graph has not been fully resolved.
    pub fn inline(&mut self) -> InlineStats {
        assert!(self.is_resolved(), "inlining requires a resolved graph");

        let mut stats = InlineStats::default();
        let mut redirects = Redirects::default();
        let mut empty = HashSet::new();
        for id in self.order.clone() {
            self.collapse(id, &mut redirects, &mut empty, &mut stats);
        }

        for i in 0..self.glyphs.len() {
            let id = GlyphId(u32::try_from(i).expect("glyph count fits in u32"));
            let glyph = &self.glyphs[id.index()];
            if glyph.removed || empty.contains(&id) || is_spliced(glyph.inline, glyph.sticky) {
                continue;
            }
            let components = mem::take(&mut self.glyphs[id.index()].components);
            let expanded = self.expand(components, &redirects, &mut stats);
            self.glyphs[id.index()].components = expanded;
        }

        for (i, glyph) in self.glyphs.iter_mut().enumerate() {
            if glyph.removed {
                continue;
            }
            let id = GlyphId(u32::try_from(i).expect("glyph count fits in u32"));
            if empty.contains(&id) || is_spliced(glyph.inline, glyph.sticky) {
                trace!("deleting `{}`", glyph.name);
                glyph.removed = true;
                glyph.components.clear();
                stats.removed += 1;
            }
        }

        debug!(
            "inlined glyphs: {} components dropped, {} empty, {} redirected, \
             {} absorbed, {} spliced, {} removed",
            stats.dropped,
            stats.emptied,
            stats.redirected,
            stats.absorbed,
            stats.spliced,
            stats.removed
        );
        stats
    }

    /// The first pass, for one glyph whose dependencies have all been visited.
    fn collapse(
        &mut self,
        id: GlyphId,
        redirects: &mut Redirects,
        empty: &mut HashSet<GlyphId>,
        stats: &mut InlineStats,
    ) {
        if self.glyphs[id.index()].removed {
            return;
        }
        let mut components = mem::take(&mut self.glyphs[id.index()].components);
        let before = components.len();
        components.retain_mut(|sub| match sub.payload {
            Payload::Literal(literal) => !self.literals[literal.index()].is_blank(),
            Payload::Reference(_) => {
                self.retarget(sub, redirects);
                let target = sub.payload.target().expect("still a reference");
                !empty.contains(&target)
            }
            Payload::AnchoredReference(_) => unreachable!("resolved graphs have no anchors"),
        });
        stats.dropped += before - components.len();

        let sticky = self.glyphs[id.index()].sticky;
        let only_child = match components.as_slice() {
            [only] if only.negated == 0 => match only.payload {
                Payload::Reference(child) => Some((child, only.origin())),
                _ => None,
            },
            _ => None,
        };

        if components.is_empty() && !sticky {
            trace!("`{}` draws nothing", self.glyphs[id.index()].name);
            empty.insert(id);
            stats.emptied += 1;
        } else if let Some((child, offset)) = only_child {
            if !sticky {
                trace!(
                    "redirecting `{}` to `{}`",
                    self.glyphs[id.index()].name,
                    self.glyphs[child.index()].name
                );
                redirects.add(id, child, offset);
                self.glyphs[id.index()].removed = true;
                stats.redirected += 1;
                stats.removed += 1;
                return;
            }
            if !self.glyphs[child.index()].sticky {
                trace!(
                    "`{}` absorbs `{}`",
                    self.glyphs[id.index()].name,
                    self.glyphs[child.index()].name
                );
                let child_glyph = &mut self.glyphs[child.index()];
                components = mem::take(&mut child_glyph.components);
                child_glyph.removed = true;
                for sub in &mut components {
                    sub.shift(offset);
                }
                redirects.add(child, id, (-offset.0, -offset.1));
                stats.absorbed += 1;
                stats.removed += 1;
            }
        }
        self.glyphs[id.index()].components = components;
    }

    /// Points a reference at the end of its redirect, if it has one.
    fn retarget(&self, sub: &mut Subglyph, redirects: &Redirects) {
        let Payload::Reference(target) = sub.payload else {
            return;
        };
        let Some((to, offset)) = redirects.get(target) else {
            return;
        };
        sub.shift(offset);
        let (height, width) = self.glyphs[to.index()]
            .size
            .expect("redirect targets are resolved");
        sub.height = Some(height);
        sub.width = Some(width);
        sub.payload = Payload::Reference(to);
    }

    /// The second pass, for one glyph.
    fn expand(
        &self,
        components: Vec<Subglyph>,
        redirects: &Redirects,
        stats: &mut InlineStats,
    ) -> Vec<Subglyph> {
        let mut out = Vec::with_capacity(components.len());
        let mut stack: Vec<Subglyph> = components.into_iter().rev().collect();
        while let Some(mut sub) = stack.pop() {
            self.retarget(&mut sub, redirects);
            let Payload::Reference(target) = sub.payload else {
                out.push(sub);
                continue;
            };
            let glyph = &self.glyphs[target.index()];
            assert!(!glyph.removed, "reference to deleted glyph `{}`", glyph.name);
            if !is_spliced(glyph.inline, glyph.sticky) {
                out.push(sub);
                continue;
            }
            let offset = sub.origin();
            stack.extend(glyph.components.iter().rev().map(|inner| {
                let mut inner = *inner;
                inner.shift(offset);
                inner.negated += sub.negated;
                inner
            }));
            stats.spliced += glyph.components.len();
        }
        out
    }
}

/// Sticky glyphs are kept whole even when marked inline.
fn is_spliced(inline: bool, sticky: bool) -> bool {
    inline && !sticky
}

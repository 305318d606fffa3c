// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placing every component of every glyph.
//!
//! Resolution walks the reference graph depth first with an explicit stack, so deep chains of
//! references cannot overflow the call stack. A glyph is placed only once all of its
//! references are placed, and a reference to a glyph still on the stack is a cycle.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::glyph::{Coord, Glyph, GlyphId, Payload, Subglyph};
use crate::graph::{GlyphGraph, Mark};
use crate::{Error, Result};

impl GlyphGraph {
    /// Resolves a glyph and everything it references.
    ///
    /// Afterwards every component reachable from `name` has a fixed position and size, and
    /// every anchored reference has become a plain one. Resolving an already resolved glyph
    /// does nothing.
    pub fn resolve(&mut self, name: &str) -> Result<()> {
        let id = self.id(name).ok_or_else(|| Error::UndefinedGlyphReference {
            referrer: "resolve".to_owned(),
            target: name.to_owned(),
        })?;
        self.resolve_id(id)
    }

    /// Resolves every glyph, in id order.
    pub fn resolve_all(&mut self) -> Result<()> {
        for i in 0..self.glyphs.len() {
            let id = GlyphId(u32::try_from(i).expect("glyph count fits in u32"));
            self.resolve_id(id)?;
        }
        debug!("resolved {} glyphs", self.order.len());
        Ok(())
    }

    fn resolve_id(&mut self, root: GlyphId) -> Result<()> {
        if self.marks[root.index()] == Mark::Done {
            return Ok(());
        }
        self.marks[root.index()] = Mark::InProgress;
        let mut stack = vec![root];

        while let Some(&id) = stack.last() {
            let pending = self.glyphs[id.index()]
                .components
                .iter()
                .filter_map(|sub| sub.payload.target())
                .find(|dep| self.marks[dep.index()] != Mark::Done);

            let result = match pending {
                Some(dep) if self.marks[dep.index()] == Mark::InProgress => {
                    Err(Error::CyclicDependency {
                        glyph: self.glyphs[id.index()].name.clone(),
                    })
                }
                Some(dep) => {
                    self.marks[dep.index()] = Mark::InProgress;
                    stack.push(dep);
                    Ok(())
                }
                None => self.place(id).map(|()| {
                    self.marks[id.index()] = Mark::Done;
                    self.order.push(id);
                    stack.pop();
                }),
            };

            if let Err(err) = result {
                // Reset the marks, so resolving again fails the same way.
                for id in stack {
                    self.marks[id.index()] = Mark::Unvisited;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Places the components of a glyph whose references are all resolved.
    fn place(&mut self, id: GlyphId) -> Result<()> {
        // Work on copies so a failed placement leaves the glyph untouched.
        let glyph = &self.glyphs[id.index()];
        let mut components = glyph.components.clone();
        let mut points = glyph.points.clone();
        for sub in &mut components {
            self.place_component(id, sub, &mut points)?;
        }

        let glyph = &mut self.glyphs[id.index()];
        glyph.components = components;
        glyph.points = points;

        let extent = |edge: fn(&Subglyph) -> i32| {
            let far = glyph.components.iter().map(edge).max().unwrap_or(0);
            far.max(0).unsigned_abs()
        };
        let height = glyph.fixed_height.unwrap_or_else(|| {
            extent(|sub| sub.origin().0.saturating_add_unsigned(sub.size().0))
        });
        let width = glyph.fixed_width.unwrap_or_else(|| {
            extent(|sub| sub.origin().1.saturating_add_unsigned(sub.size().1))
        });
        glyph.size = Some((height, width));
        trace!("placed `{}` at size {height}x{width}", glyph.name);
        Ok(())
    }

    fn place_component(
        &self,
        id: GlyphId,
        sub: &mut Subglyph,
        points: &mut BTreeMap<String, (i32, i32)>,
    ) -> Result<()> {
        let (target, anchored) = match sub.payload {
            Payload::Literal(literal) => {
                let grid = self.literal(literal);
                sub.top = Coord::Absolute(sub.top.resolve(0));
                sub.left = Coord::Absolute(sub.left.resolve(0));
                sub.height = Some(grid.height());
                sub.width = Some(grid.width());
                return Ok(());
            }
            Payload::Reference(target) => (target, false),
            Payload::AnchoredReference(target) => (target, true),
        };

        let child = &self.glyphs[target.index()];
        let actual = child
            .size
            .expect("references are placed after their targets");
        let requested = (
            sub.height.unwrap_or(actual.0),
            sub.width.unwrap_or(actual.1),
        );
        if requested != actual {
            return Err(Error::DimensionMismatch {
                glyph: self.glyphs[id.index()].name.clone(),
                referenced: child.name.clone(),
                requested,
                actual,
            });
        }

        let anchor = if anchored {
            self.adjoin_anchor(id, child, points)?
        } else {
            child.preferred_anchor()
        };
        let top = sub.top.resolve(anchor.0);
        let left = sub.left.resolve(anchor.1);

        if anchored {
            for (name, &(row, col)) in &child.points {
                if !is_matched(name, points) {
                    points
                        .entry(name.clone())
                        .or_insert((row + top, col + left));
                }
            }
        }

        sub.top = Coord::Absolute(top);
        sub.left = Coord::Absolute(left);
        sub.height = Some(actual.0);
        sub.width = Some(actual.1);
        sub.payload = Payload::Reference(target);
        Ok(())
    }

    /// Finds the offset that lines up `child`'s `-name` points with the parent's `+name` points.
    fn adjoin_anchor(
        &self,
        id: GlyphId,
        child: &Glyph,
        points: &BTreeMap<String, (i32, i32)>,
    ) -> Result<(i32, i32)> {
        let mut delta = None;
        let mut first_target = None;
        for (name, &(row, col)) in &child.points {
            let Some(base) = name.strip_prefix('-') else {
                continue;
            };
            first_target.get_or_insert(base);
            let Some(&(prow, pcol)) = points.get(&format!("+{base}")) else {
                continue;
            };
            let pair = (prow - row, pcol - col);
            if delta.is_some_and(|agreed| agreed != pair) {
                return Err(Error::InconsistentAdjoinPoints {
                    glyph: self.glyphs[id.index()].name.clone(),
                });
            }
            delta = Some(pair);
        }

        match (delta, first_target) {
            (Some(delta), _) => Ok(delta),
            (None, Some(point)) => Err(Error::MissingPoint {
                glyph: self.glyphs[id.index()].name.clone(),
                point: point.to_owned(),
                mark: '+',
            }),
            (None, None) => Ok(child.preferred_anchor()),
        }
    }
}

/// Whether a child's point was consumed by matching against the parent.
fn is_matched(name: &str, parent: &BTreeMap<String, (i32, i32)>) -> bool {
    name.strip_prefix('-')
        .is_some_and(|base| parent.contains_key(&format!("+{base}")))
}

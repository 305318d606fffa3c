// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing the outline of a pixel grid.
//!
//! [`trace`] works in three steps:
//!
//! 1. Every connected run of filled cells is flooded, and each half-edge a cell covers but its
//!    neighbour does not becomes a boundary segment. Shapes whose outline cuts through the cell
//!    also contribute their interior gap segments from the [adjacency](crate::adjacency) table.
//! 2. The segments of a run are stitched into closed loops. Collinear steps are merged, and a
//!    walk that meets itself splits off the loop it just closed.
//! 3. Each loop is oriented so that outer boundaries have positive area and holes negative area,
//!    using the parity of its winding number with respect to every other loop.
//!
//! All coordinates are kept in half-cell units internally, since a shape can turn at the
//! midpoint of an edge.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{BezPath, Point};
use smallvec::SmallVec;

use crate::adjacency::{Adjacency, adjacency, edge};
use crate::grid::PixelGrid;
use crate::pixel::{FillMask, PX_EMPTY};

/// Sample points for the winding test are interpolated at this many bits of sub-unit precision.
const MICRO_SHIFT: u32 = 10;

/// A contour vertex, in half-cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    /// Horizontal position, growing to the right.
    pub x: i32,
    /// Vertical position, growing downwards.
    pub y: i32,
}

impl GridPoint {
    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn scaled(self) -> (i64, i64) {
        (i64::from(self.x) << MICRO_SHIFT, i64::from(self.y) << MICRO_SHIFT)
    }
}

/// A closed polygon. The last point connects back to the first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Contour {
    points: Vec<GridPoint>,
}

impl Contour {
    /// Creates a contour from its vertices in half-cell units.
    pub fn new(points: Vec<GridPoint>) -> Self {
        Self { points }
    }

    /// The vertices in half-cell units.
    pub fn grid_points(&self) -> &[GridPoint] {
        &self.points
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The vertices in cell units.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .map(|p| Point::new(f64::from(p.x) * 0.5, f64::from(p.y) * 0.5))
    }

    /// The signed area in square cells.
    ///
    /// With y growing downwards, outer boundaries produced by [`trace`] are positive and holes
    /// are negative.
    pub fn signed_area(&self) -> f64 {
        // Twice the area, in quarter cells.
        self.doubled_area() as f64 / 8.0
    }

    /// Reverses the direction of the contour.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Moves the contour by whole cells.
    pub fn translate(&mut self, rows: i32, cols: i32) {
        for p in &mut self.points {
            p.x += cols * 2;
            p.y += rows * 2;
        }
    }

    /// Appends this contour to a path, scaling one cell to `scale` units.
    pub fn append_to(&self, path: &mut BezPath, scale: f64) {
        let mut points = self.points().map(|p| (p.to_vec2() * scale).to_point());
        let Some(first) = points.next() else {
            return;
        };
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
        path.close_path();
    }

    /// Converts the contour into a path, scaling one cell to `scale` units.
    pub fn to_path(&self, scale: f64) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path, scale);
        path
    }

    fn doubled_area(&self) -> i64 {
        self.edges()
            .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
            .sum()
    }

    /// Iterates over `(previous, current)` vertex pairs, starting with the closing edge.
    fn edges(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        let last = self.points.last().copied();
        last.into_iter()
            .chain(self.points.iter().copied())
            .zip(self.points.iter().copied())
    }

    /// The winding number of this contour around a point given in scaled units.
    fn winding_number(&self, (x, y): (i64, i64)) -> i32 {
        let mut winding = 0;
        for (a, b) in self.edges() {
            let (a, b) = (a.scaled(), b.scaled());
            if a.1 <= y {
                if b.1 > y && ccw(a, b, (x, y)) > 0 {
                    winding += 1;
                }
            } else if b.1 <= y && ccw(a, b, (x, y)) < 0 {
                winding -= 1;
            }
        }
        winding
    }

    /// A point on this contour, in scaled units, that does not lie on `other`.
    ///
    /// Candidates sit on an edge of this contour, a tiny step away from one of its vertices.
    fn sample_off(&self, other: &Self) -> Option<(i64, i64)> {
        let weight = (1_i64 << MICRO_SHIFT) - 1;
        self.edges()
            .map(|(a, b)| {
                (
                    i64::from(a.x) + i64::from(b.x) * weight,
                    i64::from(a.y) + i64::from(b.y) * weight,
                )
            })
            .find(|&sample| {
                !other
                    .edges()
                    .any(|(a, b)| on_segment(a.scaled(), sample, b.scaled()))
            })
    }
}

/// Twice the signed area of the triangle `a, b, c`.
fn ccw(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> i64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Whether `p` lies on the closed segment from `a` to `b`.
fn on_segment(a: (i64, i64), p: (i64, i64), b: (i64, i64)) -> bool {
    ccw(a, p, b) == 0
        && a.0.min(b.0) <= p.0
        && p.0 <= a.0.max(b.0)
        && a.1.min(b.1) <= p.1
        && p.1 <= a.1.max(b.1)
}

type Segment = (GridPoint, GridPoint);

/// Traces the outline of every filled region of `grid`.
///
/// Each filled region yields one contour for its outer boundary and one for every hole. The
/// result is deterministic for a given grid and mask.
pub fn trace(grid: &PixelGrid, mask: FillMask) -> Vec<Contour> {
    let width = grid.width() as usize;
    let mut visited = vec![false; width * grid.height() as usize];
    let mut contours = Vec::new();
    for (row, col, cell) in grid.cells() {
        if visited[row as usize * width + col as usize] || mask.shape(cell) == PX_EMPTY {
            continue;
        }
        let segments = flood(grid, mask, row, col, &mut visited);
        stitch(segments, &mut contours);
    }
    orient(&mut contours);
    log::trace!(
        "traced {}x{} grid into {} contours",
        grid.height(),
        grid.width(),
        contours.len()
    );
    contours
}

/// Collects the boundary segments of the region connected to `(row, col)`.
fn flood(
    grid: &PixelGrid,
    mask: FillMask,
    row: u32,
    col: u32,
    visited: &mut [bool],
) -> Vec<Segment> {
    let width = grid.width() as usize;
    let lookup = |row: i64, col: i64| adjacency(mask.shape(grid.get(row, col))).mask;

    let mut pending = BTreeSet::new();
    pending.insert((row, col));
    let mut segments = Vec::new();
    while let Some((row, col)) = pending.pop_first() {
        visited[row as usize * width + col as usize] = true;

        let Adjacency { mask: cell, gaps } =
            adjacency(mask.shape(grid.get(row.into(), col.into())));
        let (r, c) = (i64::from(row), i64::from(col));
        let top = lookup(r - 1, c);
        let right = lookup(r, c + 1);
        let bottom = lookup(r + 1, c);
        let left = lookup(r, c - 1);

        // Each half-edge is matched against the facing half-edge of the neighbour.
        let connected = (cell & (top << 5) & edge::TOP_LEFT)
            | (cell & (top << 3) & edge::TOP_RIGHT)
            | (cell & (right << 5) & edge::RIGHT_TOP)
            | (cell & (right << 3) & edge::RIGHT_BOTTOM)
            | (cell & (bottom >> 3) & edge::BOTTOM_RIGHT)
            | (cell & (bottom >> 5) & edge::BOTTOM_LEFT)
            | (cell & (left >> 3) & edge::LEFT_BOTTOM)
            | (cell & (left >> 5) & edge::LEFT_TOP);

        let mut visit = |row: u32, col: u32| {
            if !visited[row as usize * width + col as usize] {
                pending.insert((row, col));
            }
        };
        if connected & edge::TOP != 0 {
            visit(row - 1, col);
        }
        if connected & edge::RIGHT != 0 {
            visit(row, col + 1);
        }
        if connected & edge::BOTTOM != 0 {
            visit(row + 1, col);
        }
        if connected & edge::LEFT != 0 {
            visit(row, col - 1);
        }

        let exposed = cell & !connected;
        let x = i32::try_from(col).expect("grid width fits in i32") * 2;
        let y = i32::try_from(row).expect("grid height fits in i32") * 2;
        let p = GridPoint::new;
        emit_side(&mut segments, exposed >> 6, [p(x, y), p(x + 1, y), p(x + 2, y)]);
        emit_side(
            &mut segments,
            exposed >> 4,
            [p(x + 2, y), p(x + 2, y + 1), p(x + 2, y + 2)],
        );
        emit_side(
            &mut segments,
            exposed >> 2,
            [p(x + 2, y + 2), p(x + 1, y + 2), p(x, y + 2)],
        );
        emit_side(&mut segments, exposed, [p(x, y + 2), p(x, y + 1), p(x, y)]);

        if cell != edge::ALL {
            for gap in gaps {
                segments.push((
                    p(x + i32::from(gap.x0), y + i32::from(gap.y0)),
                    p(x + i32::from(gap.x1), y + i32::from(gap.y1)),
                ));
            }
        }
    }
    segments
}

/// Emits the exposed parts of one cell side.
///
/// The two low bits of `bits` select the first and second half of the side from `a` through
/// `mid` to `b`. Two exposed halves become a single segment.
fn emit_side(segments: &mut Vec<Segment>, bits: u8, [a, mid, b]: [GridPoint; 3]) {
    match bits & 0b11 {
        0b11 => segments.push((a, b)),
        0b10 => segments.push((a, mid)),
        0b01 => segments.push((mid, b)),
        _ => {}
    }
}

/// Joins boundary segments into closed contours.
fn stitch(segments: Vec<Segment>, contours: &mut Vec<Contour>) {
    let mut incident: BTreeMap<GridPoint, SmallVec<[GridPoint; 4]>> = BTreeMap::new();
    for (a, b) in segments {
        incident.entry(a).or_default().push(b);
        incident.entry(b).or_default().push(a);
    }
    assert!(
        incident.values().all(|around| around.len() % 2 == 0),
        "boundary has a vertex with an odd number of segments"
    );

    while let Some(mut first) = incident.first_entry() {
        let origin = *first.key();
        let mut cur = first
            .get_mut()
            .pop()
            .expect("every vertex in the map has a segment");
        let mut prev = origin;
        let mut dir = (origin.x - cur.x, origin.y - cur.y);
        let mut path = vec![origin];
        // Where each vertex of the open path would be, counting elided ones.
        let mut seen: HashMap<GridPoint, usize> = HashMap::new();
        seen.insert(origin, 0);

        loop {
            let mut around = incident
                .remove(&cur)
                .expect("walk reached a vertex with no remaining segments");
            let back = around
                .iter()
                .position(|&p| p == prev)
                .expect("segment is missing from one of its endpoints");
            around.remove(back);

            if let Some(&start) = seen.get(&cur) {
                let mut cycle: Vec<_> = path.drain(start..).collect();
                if cycle.first() != Some(&cur) {
                    cycle.insert(0, cur);
                }
                contours.push(Contour::new(cycle));

                if path.is_empty() {
                    if !around.is_empty() {
                        incident.insert(cur, around);
                    }
                    break;
                }
                let len = path.len();
                seen.retain(|_, at| *at < len);
                let last = path[len - 1];
                dir = (cur.x - last.x, cur.y - last.y);
            }

            let next = around.remove(0);
            if !around.is_empty() {
                incident.insert(cur, around);
            }

            seen.insert(cur, path.len());
            if dir.0 * (cur.y - next.y) != dir.1 * (cur.x - next.x) {
                path.push(cur);
                dir = (cur.x - next.x, cur.y - next.y);
            }
            prev = cur;
            cur = next;
        }
    }
}

/// Reverses every contour whose direction disagrees with its nesting depth.
fn orient(contours: &mut [Contour]) {
    for i in 0..contours.len() {
        let contour = &contours[i];
        let winding: i32 = contours
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, other)| {
                let sample = contour
                    .sample_off(other)
                    .expect("contour lies entirely on another contour");
                other.winding_number(sample)
            })
            .sum();
        let nested = (winding & 1) == 1;
        if nested != (contour.doubled_area() < 0) {
            contours[i].reverse();
        }
    }
}

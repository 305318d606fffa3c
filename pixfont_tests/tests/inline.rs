// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pixfont::pixfont_common::pixel::PX_EMPTY;
use pixfont::{GlyphGraph, GlyphSource, Payload, PlacedLiteral, SubglyphSource};
use pixfont_tests::{SOLID, art, resolved, solid};

fn font() -> Vec<(&'static str, GlyphSource)> {
    vec![
        ("dot", GlyphSource::new().with(solid(1, 1))),
        ("blank", GlyphSource::new().with(art(&["..", ".."]))),
        (
            "period",
            GlyphSource::new()
                .sticky()
                .with(SubglyphSource::reference("dot").at(5, 0)),
        ),
        (
            "dot_alias",
            GlyphSource::new().with(SubglyphSource::reference("dot").at(1, 1)),
        ),
        (
            "alias_alias",
            GlyphSource::new().with(SubglyphSource::reference("dot_alias").at(1, 0)),
        ),
        (
            "stroke",
            GlyphSource::new().inline().with(solid(1, 3)).with(solid(1, 1).at(1, 1)),
        ),
        (
            "colon",
            GlyphSource::new()
                .sticky()
                .with(SubglyphSource::reference("period"))
                .with(SubglyphSource::reference("alias_alias").at(0, 0))
                .with(SubglyphSource::reference("blank")),
        ),
        (
            "crossed",
            GlyphSource::new()
                .sticky()
                .with(solid(3, 3))
                .with(SubglyphSource::reference("stroke").at(1, 0).negate()),
        ),
    ]
}

fn flattened(graph: &GlyphGraph) -> Vec<(String, Vec<PlacedLiteral>)> {
    graph
        .glyphs()
        .map(|(id, glyph)| (glyph.name().to_owned(), graph.flatten_id(id)))
        .collect()
}

#[test]
fn inlining_keeps_geometry() {
    let mut graph = resolved(font());
    let before: Vec<_> = ["period", "colon", "crossed"]
        .iter()
        .map(|name| graph.compose(name).unwrap())
        .collect();
    graph.inline();
    let after: Vec<_> = ["period", "colon", "crossed"]
        .iter()
        .map(|name| graph.compose(name).unwrap())
        .collect();
    assert_eq!(before, after, "sticky glyphs draw the same");
}

#[test]
fn inlining_removes_what_is_not_needed() {
    let mut graph = resolved(font());
    let stats = graph.inline();
    assert!(graph.get("blank").is_none(), "blank glyphs vanish");
    assert!(graph.get("stroke").is_none(), "inline glyphs vanish");
    assert!(graph.get("dot_alias").is_none(), "aliases are redirected");
    assert!(graph.get("alias_alias").is_none(), "alias chains are redirected");
    assert!(graph.get("dot").is_none(), "absorbed into the sticky period");
    assert_eq!(stats.spliced, 2, "both stroke components were spliced");

    let colon = graph.get("colon").unwrap();
    let period = graph.id("period").unwrap();
    assert_eq!(colon.components().len(), 2, "blank reference dropped");
    assert_eq!(colon.components()[1].payload, Payload::Reference(period), "chain resolved");
    assert_eq!(colon.components()[1].origin(), (-3, 1), "offsets compose");

    let crossed = graph.get("crossed").unwrap();
    assert_eq!(crossed.components().len(), 3, "stroke spliced in");
    assert!(
        crossed.components()[1..].iter().all(|sub| sub.is_negated()),
        "negation is carried into spliced components"
    );
}

#[test]
fn inlining_is_idempotent() {
    let mut graph = resolved(font());
    graph.inline();
    let once = flattened(&graph);
    let stats = graph.inline();
    assert!(stats.is_noop(), "second pass changed something: {stats:?}");
    assert_eq!(flattened(&graph), once, "second pass moved something");
}

#[test]
fn negated_component_clears_one_cell() {
    let mut graph = resolved([
        ("block", GlyphSource::new().with(solid(2, 2))),
        ("punch", GlyphSource::new().with(solid(1, 1))),
        (
            "glyph",
            GlyphSource::new()
                .sticky()
                .with(SubglyphSource::reference("block"))
                .with(SubglyphSource::reference("punch").negate()),
        ),
    ]);
    for pass in ["resolved", "inlined"] {
        let grid = graph.compose("glyph").unwrap();
        assert_eq!(grid.row(0), &[PX_EMPTY, SOLID], "{pass}: top-left cleared");
        assert_eq!(grid.row(1), &[SOLID, SOLID], "{pass}: bottom row solid");
        graph.inline();
    }
}

#[test]
fn sticky_inline_glyph_is_kept_whole() {
    let mut graph = resolved([
        ("bar", GlyphSource::new().sticky().inline().with(solid(2, 1))),
        (
            "glyph",
            GlyphSource::new()
                .sticky()
                .with(solid(2, 1))
                .with(SubglyphSource::reference("bar").at(0, 1)),
        ),
    ]);
    let stats = graph.inline();
    assert_eq!(stats.spliced, 0, "nothing spliced");
    let bar = graph.id("bar").expect("sticky wins over inline");
    let glyph = graph.get("glyph").unwrap();
    assert_eq!(glyph.components().len(), 2, "component count unchanged");
    assert_eq!(glyph.components()[1].payload, Payload::Reference(bar), "still referenced");
}

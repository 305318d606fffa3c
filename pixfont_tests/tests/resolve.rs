// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pixfont::{Error, GlyphGraph, GlyphSource, Payload, SubglyphSource};
use pixfont_tests::{resolved, solid, sources};

fn alphabet() -> Vec<(&'static str, GlyphSource)> {
    vec![
        ("bar", GlyphSource::new().with(solid(1, 4))),
        ("stem", GlyphSource::new().with(solid(5, 1))),
        (
            "tee",
            GlyphSource::new()
                .with(SubglyphSource::reference("bar"))
                .with(SubglyphSource::reference("stem").offset(1, 2)),
        ),
        (
            "raised",
            GlyphSource::new().with(SubglyphSource::reference("bar").at(-2, -1)),
        ),
        (
            "pair",
            GlyphSource::new()
                .with(SubglyphSource::reference("tee"))
                .with(SubglyphSource::reference("tee").at(0, 5).negate()),
        ),
        (
            "hat",
            GlyphSource::new()
                .anchored_at(0, 1)
                .with(solid(1, 2))
                .point("-top", 0, 1),
        ),
        (
            "hatted",
            GlyphSource::new()
                .point("+top", -1, 2)
                .with(SubglyphSource::reference("stem").at(0, 1))
                .with(SubglyphSource::adjoin("hat")),
        ),
        ("space", GlyphSource::new().fixed(6, 3)),
    ]
}

#[test]
fn size_is_extent_of_components() {
    let graph = resolved(alphabet());
    let mut checked = 0;
    for (_, glyph) in graph.glyphs() {
        if glyph.has_fixed_advance() {
            continue;
        }
        let extent = |pick: fn((i32, i32), (u32, u32)) -> i32| {
            glyph
                .components()
                .iter()
                .map(|sub| pick(sub.origin(), sub.size()))
                .max()
                .unwrap_or(0)
                .max(0) as u32
        };
        let height = extent(|(top, _), (height, _)| top + height as i32);
        let width = extent(|(_, left), (_, width)| left + width as i32);
        assert_eq!(glyph.size(), Some((height, width)), "size of `{}`", glyph.name());
        checked += 1;
    }
    assert_eq!(checked, 7, "every computed glyph was checked");

    assert_eq!(graph.get("tee").unwrap().size(), Some((6, 4)), "stem hangs below the bar");
    assert_eq!(graph.get("raised").unwrap().size(), Some((0, 3)), "clamped at zero");
    assert_eq!(graph.get("pair").unwrap().size(), Some((6, 9)), "negated parts still count");
    assert_eq!(graph.get("space").unwrap().size(), Some((6, 3)), "fixed size");
}

#[test]
fn resolution_order_does_not_matter() {
    let all = resolved(alphabet());

    let mut one_by_one = GlyphGraph::link(sources(alphabet())).unwrap();
    let mut names: Vec<_> = alphabet().into_iter().map(|(name, _)| name).collect();
    names.reverse();
    for name in &names {
        one_by_one.resolve(name).unwrap();
        one_by_one.resolve(name).unwrap();
    }
    assert!(one_by_one.is_resolved(), "every glyph was reached");

    for name in &names {
        assert_eq!(all.get(name), one_by_one.get(name), "`{name}` resolved differently");
    }
}

#[test]
fn adjoin_places_by_points() {
    let graph = resolved(alphabet());
    let hatted = graph.get("hatted").unwrap();
    let hat = hatted.components()[1];
    assert_eq!(hat.origin(), (-1, 1), "`+top` minus `-top`");
    assert_eq!(hat.payload, Payload::Reference(graph.id("hat").unwrap()), "plain reference");
}

#[test]
fn adjoin_example() {
    let graph = resolved([
        (
            "a",
            GlyphSource::new()
                .point("+base", 5, 7)
                .with(SubglyphSource::adjoin("b")),
        ),
        (
            "b",
            GlyphSource::new().with(solid(1, 1)).point("-base", 2, 2),
        ),
    ]);
    let placed = graph.get("a").unwrap().components()[0];
    assert_eq!(placed.origin(), (3, 5), "placement of `b` within `a`");
}

#[test]
fn adjoin_points_compose_through_levels() {
    let graph = resolved([
        ("dot", GlyphSource::new().with(solid(1, 1)).point("-at", 0, 0)),
        (
            "accent",
            GlyphSource::new()
                .with(solid(1, 3))
                .point("-top", 1, 1)
                .point("+at", -1, 1),
        ),
        (
            "letter",
            GlyphSource::new()
                .with(solid(4, 3).at(2, 0))
                .point("+top", 2, 1)
                .with(SubglyphSource::adjoin("accent"))
                .with(SubglyphSource::adjoin("dot")),
        ),
    ]);
    let letter = graph.get("letter").unwrap();
    assert_eq!(letter.components()[1].origin(), (1, 0), "accent sits on the letter");
    assert_eq!(letter.points().get("+at"), Some(&(0, 1)), "accent point carried over");
    assert_eq!(letter.components()[2].origin(), (0, 1), "dot sits on the accent");
}

#[test]
fn long_cycle_is_detected_without_overflow() {
    let names: Vec<String> = (0..1000).map(|i| format!("g{i:04}")).collect();
    let entries = names.iter().enumerate().map(|(i, name)| {
        let next = &names[(i + 1) % names.len()];
        (
            name.as_str(),
            GlyphSource::new().with(SubglyphSource::reference(next.as_str())),
        )
    });
    let mut graph = GlyphGraph::link(sources(entries)).unwrap();
    let err = graph.resolve_all().unwrap_err();
    assert_eq!(
        err,
        Error::CyclicDependency {
            glyph: "g0999".to_owned()
        },
        "the cycle closes at the last glyph"
    );
    assert_eq!(graph.resolve("g0500").unwrap_err().glyph(), "g0499", "deterministic");
}

#[test]
fn long_chain_resolves_and_flattens() {
    let names: Vec<String> = (0..5000).map(|i| format!("g{i:04}")).collect();
    let entries = names.iter().enumerate().map(|(i, name)| {
        let source = match names.get(i + 1) {
            Some(next) => GlyphSource::new().with(SubglyphSource::reference(next.as_str())),
            None => GlyphSource::new().with(solid(1, 1).at(2, 3)),
        };
        (name.as_str(), source)
    });
    let graph = resolved(entries);
    assert_eq!(graph.get("g0000").unwrap().size(), Some((3, 4)), "size propagates up");
    let placed = graph.flatten("g0000").unwrap();
    assert_eq!(placed.len(), 1, "one literal at the bottom");
    assert_eq!((placed[0].top, placed[0].left), (2, 3), "placement propagates up");
}

#[test]
fn undefined_reference_names_both_ends() {
    let err = GlyphGraph::link(sources([(
        "a",
        GlyphSource::new().with(SubglyphSource::adjoin("nowhere")),
    )]))
    .unwrap_err();
    assert_eq!(
        err,
        Error::UndefinedGlyphReference {
            referrer: "a".to_owned(),
            target: "nowhere".to_owned(),
        },
        "anchored references are checked too"
    );
}

// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiling a whole font.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::graph::GlyphGraph;
use crate::source::GlyphSource;
use crate::{Error, Result};

/// Name of the glyph shown for unmapped characters.
pub const NOTDEF: &str = ".notdef";

/// Everything a glyph description parser produces for one font.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FontSource {
    /// Line height, in cells.
    pub height: u32,
    /// Distance from the top of a line to the baseline, in cells.
    pub ascent: i32,
    /// Distance from the baseline to the bottom of a line, in cells.
    pub descent: i32,
    /// Glyphs by name.
    pub glyphs: BTreeMap<String, GlyphSource>,
    /// Character map from code point to glyph name.
    pub cmap: BTreeMap<u32, String>,
    /// Named sets of substitution rules.
    pub remaps: BTreeMap<String, Vec<Remap>>,
    /// Named glyph classes, referred to as `%name` in substitution rules.
    pub classes: BTreeMap<String, Vec<String>>,
}

#[cfg(feature = "serde")]
impl FontSource {
    /// Reads a font source from JSON.
    pub fn from_json<R: std::io::Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}

/// A contextual substitution rule.
///
/// Rules are not applied here. Their glyph names are validated and protected from removal so
/// that a table writer can emit them later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Remap {
    /// Glyphs that must precede the pattern.
    pub lookbehind: Vec<RemapItem>,
    /// Glyphs to replace.
    pub pattern: Vec<RemapItem>,
    /// Glyphs to replace them with.
    pub replacement: Vec<RemapItem>,
    /// Glyphs that must follow the pattern.
    pub lookahead: Vec<RemapItem>,
}

impl Remap {
    /// Every item of the rule, in order.
    pub fn items(&self) -> impl Iterator<Item = &RemapItem> + '_ {
        self.lookbehind
            .iter()
            .chain(&self.pattern)
            .chain(&self.replacement)
            .chain(&self.lookahead)
    }
}

/// One position of a substitution rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum RemapItem {
    /// A glyph name, or `%name` for a glyph class.
    Name(String),
    /// Any of several glyph names.
    List(Vec<String>),
}

impl RemapItem {
    fn names(&self) -> &[String] {
        match self {
            Self::Name(name) => core::slice::from_ref(name),
            Self::List(names) => names,
        }
    }
}

/// Options for [`Font::compile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Simplify the graph after resolving it.
    pub inline: bool,
    /// Fail if the font has no `.notdef` glyph.
    pub require_notdef: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            inline: true,
            require_notdef: false,
        }
    }
}

/// A compiled font: a resolved glyph graph plus the tables that address it.
#[derive(Clone, Debug)]
pub struct Font {
    graph: GlyphGraph,
    height: u32,
    ascent: i32,
    descent: i32,
    cmap: BTreeMap<u32, String>,
    remaps: BTreeMap<String, Vec<Remap>>,
    classes: BTreeMap<String, Vec<String>>,
}

impl Font {
    /// Links, resolves and simplifies a font.
    ///
    /// Every glyph addressed from outside the graph, by the character map, by a substitution
    /// rule or as `.notdef`, is made sticky before inlining, so it survives under its own name.
    /// The first error aborts compilation.
    pub fn compile(source: FontSource, options: &CompileOptions) -> Result<Self> {
        let FontSource {
            height,
            ascent,
            descent,
            glyphs,
            cmap,
            remaps,
            classes,
        } = source;

        let mut graph = GlyphGraph::link(glyphs)?;
        graph.resolve_all()?;

        if graph.id(NOTDEF).is_some() {
            graph.mark_sticky(NOTDEF, "font")?;
        } else if options.require_notdef {
            return Err(Error::UndefinedGlyphReference {
                referrer: "font".to_owned(),
                target: NOTDEF.to_owned(),
            });
        }

        for (code, name) in &cmap {
            graph.mark_sticky(name, &format!("U+{code:04X}"))?;
        }

        for (set, rules) in &remaps {
            for name in rules.iter().flat_map(Remap::items).flat_map(RemapItem::names) {
                match name.strip_prefix('%') {
                    Some(class) => {
                        let members =
                            classes
                                .get(class)
                                .ok_or_else(|| Error::UndefinedGlyphReference {
                                    referrer: set.clone(),
                                    target: name.clone(),
                                })?;
                        for member in members {
                            graph.mark_sticky(member, set)?;
                        }
                    }
                    None => {
                        graph.mark_sticky(name, set)?;
                    }
                }
            }
        }

        if options.inline {
            graph.inline();
        }

        for (code, name) in &cmap {
            let empty = graph
                .get(name)
                .is_some_and(|glyph| glyph.components().is_empty());
            if empty {
                warn!("U+{code:04X} maps to `{name}`, which draws nothing");
            }
        }

        debug!("compiled {} glyphs, {} mapped", graph.len(), cmap.len());
        Ok(Self {
            graph,
            height,
            ascent,
            descent,
            cmap,
            remaps,
            classes,
        })
    }

    /// The resolved glyph graph.
    pub fn graph(&self) -> &GlyphGraph {
        &self.graph
    }

    /// The character map.
    pub fn cmap(&self) -> &BTreeMap<u32, String> {
        &self.cmap
    }

    /// The glyph mapped to a code point.
    pub fn glyph_name(&self, code: u32) -> Option<&str> {
        self.cmap.get(&code).map(String::as_str)
    }

    /// Substitution rules, by set name.
    pub fn remaps(&self) -> &BTreeMap<String, Vec<Remap>> {
        &self.remaps
    }

    /// Glyph classes, by name.
    pub fn classes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.classes
    }

    /// Line height, in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance from the top of a line to the baseline, in cells.
    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    /// Distance from the baseline to the bottom of a line, in cells.
    pub fn descent(&self) -> i32 {
        self.descent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SubglyphSource;

    fn font(entries: Vec<(&str, GlyphSource)>) -> FontSource {
        FontSource {
            height: 8,
            glyphs: entries
                .into_iter()
                .map(|(name, source)| (name.to_owned(), source))
                .collect(),
            ..FontSource::default()
        }
    }

    fn dot() -> GlyphSource {
        GlyphSource::new().with(SubglyphSource::pixels(1, 1, vec![0x3f]))
    }

    #[test]
    fn mapped_glyphs_survive_inlining() {
        let mut source = font(vec![
            ("dot", dot()),
            ("period", GlyphSource::new().with(SubglyphSource::reference("dot"))),
        ]);
        source.cmap.insert(0x2e, "period".to_owned());
        let font = Font::compile(source, &CompileOptions::default()).unwrap();
        assert_eq!(font.glyph_name(0x2e), Some("period"), "cmap kept verbatim");
        let period = font.graph().get("period").unwrap();
        assert_eq!(period.components().len(), 1, "mapped glyph keeps its component");
        assert!(period.is_sticky(), "mapped glyphs are sticky");
    }

    #[test]
    fn unmapped_target_is_reported() {
        let mut source = font(vec![("dot", dot())]);
        source.cmap.insert(0x41, "A".to_owned());
        let err = Font::compile(source, &CompileOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::UndefinedGlyphReference {
                referrer: "U+0041".to_owned(),
                target: "A".to_owned(),
            },
            "the code point is the referrer"
        );
    }

    #[test]
    fn notdef_can_be_required() {
        let options = CompileOptions {
            require_notdef: true,
            ..CompileOptions::default()
        };
        let err = Font::compile(font(vec![("dot", dot())]), &options).unwrap_err();
        assert_eq!(err.glyph(), "font", "the font is the referrer");

        let font = Font::compile(font(vec![(NOTDEF, dot())]), &options).unwrap();
        assert!(font.graph().get(NOTDEF).unwrap().is_sticky(), ".notdef is sticky");
    }

    #[test]
    fn remap_classes_expand() {
        let mut source = font(vec![("a", dot()), ("b", dot()), ("c", dot())]);
        source.classes.insert("letters".to_owned(), vec!["a".to_owned(), "b".to_owned()]);
        source.remaps.insert(
            "liga".to_owned(),
            vec![Remap {
                pattern: vec![RemapItem::Name("%letters".to_owned())],
                replacement: vec![RemapItem::List(vec!["c".to_owned()])],
                ..Remap::default()
            }],
        );
        let font = Font::compile(source.clone(), &CompileOptions::default()).unwrap();
        for name in ["a", "b", "c"] {
            assert!(font.graph().get(name).unwrap().is_sticky(), "`{name}` is sticky");
        }

        source.classes.clear();
        assert_eq!(
            Font::compile(source, &CompileOptions::default()).unwrap_err(),
            Error::UndefinedGlyphReference {
                referrer: "liga".to_owned(),
                target: "%letters".to_owned(),
            },
            "unknown class"
        );
    }

    #[test]
    fn inlining_can_be_skipped() {
        let source = font(vec![
            ("dot", dot()),
            ("period", GlyphSource::new().with(SubglyphSource::reference("dot"))),
        ]);
        let options = CompileOptions {
            inline: false,
            ..CompileOptions::default()
        };
        let kept = Font::compile(source.clone(), &options).unwrap();
        assert!(kept.graph().get("period").is_some(), "nothing collapsed");
        let inlined = Font::compile(source, &CompileOptions::default()).unwrap();
        assert!(inlined.graph().get("period").is_none(), "redirected away");
    }
}

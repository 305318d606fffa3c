// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixfont compiles pixel-art glyph descriptions into vector outlines.
//!
//! Glyphs are built from literal pixel buffers and from references to other glyphs, which may
//! be offset, punched out, or placed by matching named anchor points. The pipeline is:
//!
//! 1. [`GlyphGraph::link`] turns name-keyed [`GlyphSource`] records into an arena of glyphs.
//! 2. [`GlyphGraph::resolve_all`] places every component and computes every glyph's size,
//!    rejecting reference cycles and size mismatches.
//! 3. [`GlyphGraph::inline`] collapses trivial glyphs, drops empty ones and splices inline
//!    glyphs into their referrers.
//! 4. [`GlyphGraph::flatten`] and [`GlyphGraph::outline`] produce the placed literal buffers
//!    and traced contours that font writers consume.
//!
//! [`Font::compile`] runs the first three steps for a whole [`FontSource`].
//!
//! ```
//! use pixfont::{ContourCache, GlyphGraph, GlyphSource, SubglyphSource};
//! use pixfont::pixfont_common::pixel::FillMask;
//!
//! let sources = [(
//!     "dot".to_owned(),
//!     GlyphSource::new().with(SubglyphSource::pixels(1, 1, vec![0x3f])),
//! )]
//! .into_iter()
//! .collect();
//! let mut graph = GlyphGraph::link(sources)?;
//! graph.resolve_all()?;
//! let outline = graph
//!     .outline("dot", FillMask::Fine, &mut ContourCache::new())
//!     .expect("`dot` exists");
//! assert_eq!(outline.contours.len(), 1);
//! # Ok::<(), pixfont::Error>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: Deserialize [`FontSource`] and the records it holds, for example from JSON.
//! - `multithreading`: Trace literal buffers in parallel with [`ContourCache::prefetch`].

#![forbid(unsafe_code)]

mod error;
mod flatten;
mod font;
mod glyph;
mod graph;
mod inline;
mod metrics;
mod outline;
mod resolve;
mod source;

pub use pixfont_common;

pub use error::{Error, Result};
pub use flatten::PlacedLiteral;
pub use font::{CompileOptions, Font, FontSource, NOTDEF, Remap, RemapItem};
pub use glyph::{Coord, Glyph, GlyphId, LiteralId, Payload, Subglyph};
pub use graph::GlyphGraph;
pub use inline::InlineStats;
pub use outline::{ContourCache, GlyphOutline};
pub use source::{GlyphSource, PayloadSource, SubglyphSource};

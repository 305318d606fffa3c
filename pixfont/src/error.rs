// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur while linking, resolving or compiling glyphs.
///
/// Every variant names the glyph it was raised for. Any error aborts the whole batch; the graph
/// it was raised on should be discarded.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Resolving the glyph requires resolving itself first.
    #[error("glyph `{glyph}` has a cyclic dependency")]
    CyclicDependency {
        /// The glyph being resolved when the cycle closed.
        glyph: String,
    },
    /// Two pairs of matching points placed an adjoined component at different offsets.
    #[error("glyph `{glyph}` adjoins a component whose points do not agree on an offset")]
    InconsistentAdjoinPoints {
        /// The glyph owning the adjoined component.
        glyph: String,
    },
    /// A referenced glyph was requested at a size other than its own.
    #[error(
        "glyph `{glyph}` places `{referenced}` with size {requested:?}, but it is {actual:?}"
    )]
    DimensionMismatch {
        /// The glyph owning the component.
        glyph: String,
        /// The glyph the component refers to.
        referenced: String,
        /// The `(height, width)` the component asked for.
        requested: (u32, u32),
        /// The resolved `(height, width)` of the referenced glyph.
        actual: (u32, u32),
    },
    /// An adjoined component has anchor targets, but none of them has a source in the glyph.
    #[error("glyph `{glyph}` has no point `{mark}{point}` to adjoin to")]
    MissingPoint {
        /// The glyph owning the adjoined component.
        glyph: String,
        /// The point name, without its mark.
        point: String,
        /// The mark the point was expected to carry.
        mark: char,
    },
    /// A name that does not belong to any glyph.
    #[error("`{referrer}` refers to undefined glyph `{target}`")]
    UndefinedGlyphReference {
        /// The glyph, character or substitution set that used the name.
        referrer: String,
        /// The missing name.
        target: String,
    },
    /// A literal component whose data does not cover its declared size.
    #[error("glyph `{glyph}` has pixel data that does not match its size")]
    InvalidPixelData {
        /// The glyph owning the literal.
        glyph: String,
    },
}

impl Error {
    /// The glyph, or other referrer, this error was raised for.
    pub fn glyph(&self) -> &str {
        match self {
            Self::CyclicDependency { glyph }
            | Self::InconsistentAdjoinPoints { glyph }
            | Self::DimensionMismatch { glyph, .. }
            | Self::MissingPoint { glyph, .. }
            | Self::InvalidPixelData { glyph } => glyph,
            Self::UndefinedGlyphReference { referrer, .. } => referrer,
        }
    }
}

/// A specialized `Result` type for glyph operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

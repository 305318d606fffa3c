// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data structures shared across Pixfont.
//!
//! This crate holds everything that only needs to know about a single grid of cells:
//!
//! - [`pixel`]: the cell codes and the coarse/fine [`FillMask`](pixel::FillMask).
//! - [`adjacency`]: the per-code table of exposed half-edges and interior gap segments.
//! - [`grid`]: [`PixelGrid`](grid::PixelGrid), a row-major buffer of cell codes.
//! - [`contour`]: the tracer turning a grid into closed, correctly wound contours.
//!
//! Everything here is a pure function of its inputs and can be shared freely across threads.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("pixfont_common requires either the `std` or `libm` feature to be enabled");

pub use kurbo;

pub mod adjacency;
pub mod contour;
pub mod grid;
pub mod pixel;

// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration tests for Pixfont.

mod inline;
mod resolve;
mod trace;

// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiles a JSON font source and prints the outline of every mapped glyph.
//!
//! ```sh
//! cargo run -p compile -- font.json --scale 64 -o outlines.json
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pixfont::pixfont_common::pixel::FillMask;
use pixfont::{CompileOptions, ContourCache, Font, FontSource};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Compile a pixel font source into SVG glyph outlines")]
struct Args {
    /// The font source, as JSON. Reads standard input when omitted.
    input: Option<PathBuf>,
    /// Where to write the outlines. Writes to standard output when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Trace every cell as a full square, ignoring diagonal shapes.
    #[arg(long)]
    coarse: bool,
    /// Keep every glyph instead of folding aliases and fragments away.
    #[arg(long)]
    no_inline: bool,
    /// Size of one cell in output units.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Fail if the font has no `.notdef` glyph.
    #[arg(long)]
    require_notdef: bool,
}

#[derive(Serialize, Debug)]
struct GlyphEntry {
    glyph: String,
    advance: f64,
    lsb: f64,
    path: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            FontSource::from_json(BufReader::new(file))
        }
        None => FontSource::from_json(io::stdin().lock()),
    }
    .context("parsing font source")?;

    let options = CompileOptions {
        inline: !args.no_inline,
        require_notdef: args.require_notdef,
    };
    let font = Font::compile(source, &options).context("compiling font")?;
    let mask = if args.coarse {
        FillMask::Coarse
    } else {
        FillMask::Fine
    };

    let graph = font.graph();
    let mut cache = ContourCache::new();
    cache.prefetch(graph, font.cmap().values().map(String::as_str), mask);

    let mut entries = BTreeMap::new();
    for (code, name) in font.cmap() {
        let outline = graph
            .outline(name, mask, &mut cache)
            .with_context(|| format!("`{name}` vanished during compilation"))?;
        let lsb = graph.left_side_bearing(name).unwrap_or_default();
        entries.insert(
            format!("U+{code:04X}"),
            GlyphEntry {
                glyph: name.clone(),
                advance: f64::from(outline.advance) * args.scale,
                lsb: f64::from(lsb) * args.scale,
                path: outline.to_path(args.scale).to_svg(),
            },
        );
    }
    log::info!(
        "traced {} glyphs from {} distinct buffers",
        entries.len(),
        cache.len()
    );

    let json = serde_json::to_string_pretty(&entries)?;
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            writeln!(out, "{json}")?;
            out.flush()?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

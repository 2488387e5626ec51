// SPDX-License-Identifier: MIT
//
// Command-line options for the inkgrid demo.
//
// Parsed by hand from `std::env::args`: the surface is four flags, not
// worth a parser framework.
//
//   inkgrid [--atlas PATH] [--glyph-size N] [--font-size N] [--background RRGGBB]
//   inkgrid --help

use std::path::PathBuf;

use ink_grid::Rgba;

/// Atlas cell size assumed when `--glyph-size` is absent: the 10 px cells
/// of a stock CP437 sheet.
pub const DEFAULT_GLYPH_SIZE: u32 = 10;

/// Window background of the demo page.
pub const DEFAULT_BACKGROUND: Rgba = Rgba::from_u32(0x191f_2aff);

pub const USAGE: &str = "\
usage: inkgrid [options]

options:
  --atlas PATH          bitmap font atlas to load (PNG, BMP, ...)
  --glyph-size N        atlas cell size in pixels (default 10)
  --font-size N         screen cell width in pixels (default 11)
  --background RRGGBB   default background color (default 191f2a)
  -h, --help            show this help

environment:
  INKGRID_LOG           log filter, e.g. debug or ink_atlas=trace (default warn)";

/// Resolved demo options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub atlas: Option<PathBuf>,
    pub glyph_size: u32,
    pub font_size: u32,
    pub background: Rgba,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            atlas: None,
            glyph_size: DEFAULT_GLYPH_SIZE,
            font_size: ink_grid::surface::DEFAULT_FONT_SIZE,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Options),
    Help,
}

/// Parse arguments (without the program name).
///
/// # Errors
///
/// A human-readable message for unknown flags, missing values, or values
/// that don't parse.
pub fn parse<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--atlas" => options.atlas = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--glyph-size" => options.glyph_size = positive(&value(&mut args, &arg)?, &arg)?,
            "--font-size" => options.font_size = positive(&value(&mut args, &arg)?, &arg)?,
            "--background" => {
                let raw = value(&mut args, &arg)?;
                options.background = Rgba::parse_hex(&raw)
                    .ok_or_else(|| format!("{arg}: expected RRGGBB, got '{raw}'"))?;
            }
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(Invocation::Run(options))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag}: missing value"))
}

fn positive(raw: &str, flag: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag}: expected a positive integer, got '{raw}'")),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

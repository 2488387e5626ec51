// SPDX-License-Identifier: MIT
//
// inkgrid: demo binary for the ink-atlas and ink-grid crates.
//
// Wires the two libraries together the way an application would:
//
//   ink-atlas → loads a bitmap font atlas and measures every glyph
//   ink-grid  → surface, markup printing, sparse buffer, frame layout
//
// One frame is printed (the demo page below), laid out against the atlas
// when one is given, and drawn to stdout as true-color ANSI text:
//
//   args → Options → Surface (+ GlyphAtlas) → print page → layout → ansi
//
// Logging goes through `log` to stderr, level from INKGRID_LOG.

mod ansi;
mod logger;
mod options;

use std::env;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use ink_atlas::GlyphAtlas;
use ink_grid::{Rgba, Surface, SurfaceConfig};

use options::{Invocation, Options};

/// Steps in the background gradient strip.
const GRADIENT_STEPS: u32 = 50;

/// Print the demo page: every markup feature once, then a gradient strip
/// driven through the push API and a tab-separated hint line.
fn print_demo_page(surface: &mut Surface) {
    surface.print("#bbold#r\n");
    surface.print("#iitalic#r\n");
    surface.print("#ff0000red#r\n");
    surface.print("#0000ff#_00ff00blue on green#r\n");
    surface.print("ζ\n");

    for i in 0..GRADIENT_STEPS {
        let red = u8::try_from(i * 255 / GRADIENT_STEPS).unwrap_or(u8::MAX);
        surface.push_background_color(Rgba::rgb(red, 0, 0));
        surface.print(" ");
    }
    surface.print("\n\n");
    surface.reset_style();

    surface.print("#000000#_ffffff↑ zoom in#r\t");
    surface.print("#000000#_ffffff↓ zoom out#r\n");
}

fn load_atlas(options: &Options) -> Option<Arc<GlyphAtlas>> {
    let path = options.atlas.as_ref()?;
    match GlyphAtlas::from_path(path, options.glyph_size) {
        Ok(atlas) => {
            log::info!(
                "loaded {}: {} glyphs of {}px",
                path.display(),
                atlas.capacity(),
                atlas.glyph_size()
            );
            Some(Arc::new(atlas))
        }
        Err(e) => {
            eprintln!("inkgrid: {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn run(options: &Options) -> io::Result<()> {
    let mut surface = Surface::new(SurfaceConfig {
        font_size: options.font_size,
        background: options.background,
        ..SurfaceConfig::default()
    });
    log::debug!(
        "surface: font size {}, background {}",
        surface.font_size(),
        surface.default_brush().background
    );
    if let Some(atlas) = load_atlas(options) {
        surface.set_font(atlas);
    }

    surface.clear();
    print_demo_page(&mut surface);

    if surface.font().is_some() {
        let quads = surface.layout().filter(|q| q.glyph.is_some()).count();
        log::info!(
            "frame: {} cells, {quads} glyph quads, cell {:?}",
            surface.screen_buffer().len(),
            surface.cell_size()
        );
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    ansi::render(&mut out, surface.screen_buffer(), surface.default_brush())?;
    out.flush()
}

fn main() {
    logger::init();

    let options = match options::parse(env::args().skip(1)) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Help) => {
            println!("{}", options::USAGE);
            return;
        }
        Err(msg) => {
            eprintln!("inkgrid: {msg}");
            eprintln!("{}", options::USAGE);
            process::exit(2);
        }
    };
    log::debug!("options: {options:?}");

    if let Err(e) = run(&options) {
        // A closed pipe (e.g. `inkgrid | head`) isn't worth reporting.
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("inkgrid: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn demo() -> Surface {
        let mut surface = Surface::default();
        print_demo_page(&mut surface);
        surface
    }

    #[test]
    fn demo_page_lines() {
        let surface = demo();
        assert_eq!(surface.line(0).into_string(), "bold");
        assert_eq!(surface.line(1).into_string(), "italic");
        assert_eq!(surface.line(2).into_string(), "red");
        assert_eq!(surface.line(3).into_string(), "blue on green");
        assert_eq!(surface.line(4).into_string(), "ζ");
        assert!(surface.character(0, 0).unwrap().brush.bold());
        assert!(surface.character(0, 1).unwrap().brush.italic());
    }

    #[test]
    fn gradient_strip_ramps_red() {
        let surface = demo();
        let first = surface.character(0, 5).unwrap().brush.background;
        let last = surface.character(49, 5).unwrap().brush.background;
        assert_eq!(first, Rgba::rgb(0, 0, 0));
        assert_eq!(last, Rgba::rgb(249, 0, 0));
    }

    #[test]
    fn hint_line_has_tab_gap() {
        let surface = demo();
        assert_eq!(surface.line(7).into_string(), "↑ zoom in    ↓ zoom out");
        // The tab spaces carry the default brush after #r.
        let tab = surface.character(9, 7).unwrap();
        assert_eq!(tab.brush, surface.default_brush());
    }
}

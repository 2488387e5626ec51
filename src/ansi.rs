// SPDX-License-Identifier: MIT
//
// ANSI renderer: draws a screen buffer as true-color terminal text.
//
// A stand-in for the pixel renderer: every buffer row becomes one output
// line, column gaps are filled with spaces in the default brush, and SGR
// sequences are emitted only when the brush changes. Bold and italic map
// to SGR 1 and 3; colors use 24-bit `38;2` / `48;2`.
//
// Codes that aren't printable scalars (control characters, raw code-page
// bytes below 0x20, the empty sentinel) are drawn as `?` so the terminal
// never receives stray control bytes.

use std::io::{self, Write};

use ink_grid::{Brush, Rgba, ScreenBuffer};

/// Printed in place of codes the terminal can't show.
const REPLACEMENT: char = '?';

// ─── Escape Sequences ───────────────────────────────────────────────────────

/// Reset all SGR attributes (SGR 0).
fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

fn fg(w: &mut impl Write, c: Rgba) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

fn bg(w: &mut impl Write, c: Rgba) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b)
}

// ─── BrushWriter ────────────────────────────────────────────────────────────

/// Tracks the last emitted brush to skip redundant escapes.
///
/// Attribute changes go through SGR 0 (there is no portable "bold off"
/// that doesn't also touch dim), which invalidates tracked colors.
struct BrushWriter {
    last: Option<Brush>,
}

impl BrushWriter {
    const fn new() -> Self {
        Self { last: None }
    }

    fn apply(&mut self, w: &mut impl Write, brush: Brush) -> io::Result<()> {
        let mut last_fg = self.last.map(|b| b.foreground);
        let mut last_bg = self.last.map(|b| b.background);

        if self.last.map(|b| b.attrs) != Some(brush.attrs) {
            reset(w)?;
            last_fg = None;
            last_bg = None;
            if brush.bold() {
                w.write_all(b"\x1b[1m")?;
            }
            if brush.italic() {
                w.write_all(b"\x1b[3m")?;
            }
        }
        if last_fg != Some(brush.foreground) {
            fg(w, brush.foreground)?;
        }
        if last_bg != Some(brush.background) {
            bg(w, brush.background)?;
        }

        self.last = Some(brush);
        Ok(())
    }

    /// End the line with attributes cleared.
    fn end_line(&mut self, w: &mut impl Write) -> io::Result<()> {
        reset(w)?;
        self.last = None;
        w.write_all(b"\n")
    }
}

/// The character to print for a cell code.
fn printable(code: u32) -> char {
    char::from_u32(code)
        .filter(|ch| !ch.is_control())
        .unwrap_or(REPLACEMENT)
}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// Rows past this are not drawn.
pub const MAX_ROWS: u32 = 1024;
/// Columns past this are not drawn.
pub const MAX_COLS: u32 = 1024;

/// Write every row from 0 through the last written one.
///
/// Rows with nothing written come out as empty lines, so the terminal
/// layout matches the buffer's row numbers. Output is clipped to
/// `MAX_COLS × MAX_ROWS`; cells beyond it are skipped.
pub fn render(w: &mut impl Write, buffer: &ScreenBuffer, default: Brush) -> io::Result<()> {
    let mut writer = BrushWriter::new();
    let mut next_row = 0u32;

    for row in buffer.rows().take_while(|&row| row < MAX_ROWS) {
        for _ in next_row..row {
            w.write_all(b"\n")?;
        }

        let mut next_col = 0u32;
        for (col, cell) in buffer.row(row).take_while(|&(col, _)| col < MAX_COLS) {
            if col > next_col {
                writer.apply(w, default)?;
                for _ in next_col..col {
                    w.write_all(b" ")?;
                }
            }
            writer.apply(w, cell.brush)?;
            write!(w, "{}", printable(cell.code))?;
            next_col = col + 1;
        }
        writer.end_line(w)?;
        next_row = row + 1;
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
//
// Surface: the drawing target applications print to.
//
// A surface owns the per-frame state (screen buffer, cursor, style) plus
// the font and font size that give cells their pixel size. It has no window
// and draws nothing: once a frame is printed, hand `layout()` (or the raw
// buffer) to whatever renderer you use.
//
// The frame cycle:
//
//   clear()  →  print(...) × N  →  layout() / screen_buffer()  →  clear() ...
//
// `clear()` wipes the buffer, homes the cursor and resets the active brush.
// The default brush survives across frames until set_*_color changes it.

use std::sync::Arc;

use ink_atlas::GlyphAtlas;

use crate::brush::{Brush, StyleState};
use crate::cell::Cell;
use crate::color::Rgba;
use crate::error::GridError;
use crate::layout::{self, CellQuad, LayoutParams};
use crate::markup::{tokenize, tokenize_narrow};
use crate::screen::{Cursor, Line, ScreenBuffer, Text};
use crate::writer::BufferWriter;

/// Font size a surface starts with.
pub const DEFAULT_FONT_SIZE: u32 = 11;

// ─── SurfaceConfig ──────────────────────────────────────────────────────────

/// Construction-time settings for a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Cell width in pixels; cells are twice as tall.
    pub font_size: u32,
    /// Default text color.
    pub foreground: Rgba,
    /// Default (window) background color.
    pub background: Rgba,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            foreground: Rgba::WHITE,
            background: Rgba::BLACK,
        }
    }
}

// ─── Surface ────────────────────────────────────────────────────────────────

/// A printable grid of styled cells.
///
/// # Examples
///
/// ```
/// use ink_grid::color::Rgba;
/// use ink_grid::surface::Surface;
///
/// let mut surface = Surface::default();
/// surface.print("#bbold#r\n#ff0000red#r");
///
/// assert_eq!(surface.line(0).into_string(), "bold");
/// assert!(surface.character(0, 0).unwrap().brush.bold());
/// assert_eq!(
///     surface.character(0, 1).unwrap().brush.foreground,
///     Rgba::rgb(255, 0, 0)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Surface {
    font: Option<Arc<GlyphAtlas>>,
    font_size: u32,
    cursor: Cursor,
    buffer: ScreenBuffer,
    style: StyleState,
}

impl Surface {
    #[must_use]
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            font: None,
            font_size: config.font_size.max(1),
            cursor: Cursor::ORIGIN,
            buffer: ScreenBuffer::new(),
            style: StyleState::new(Brush::new(config.foreground, config.background)),
        }
    }

    /// Attach a font at construction.
    #[must_use]
    pub fn with_font(mut self, font: Arc<GlyphAtlas>) -> Self {
        self.font = Some(font);
        self
    }

    // ─── Font & Metrics ──────────────────────────────────────────────────

    #[must_use]
    pub fn font(&self) -> Option<&Arc<GlyphAtlas>> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Arc<GlyphAtlas>) {
        log::debug!("surface font set: {font:?}");
        self.font = Some(font);
    }

    #[inline]
    #[must_use]
    pub const fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Change the cell width. Clamped to at least 1.
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.max(1);
    }

    /// Cell size in pixels: `(font_size, 2 × font_size)`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn cell_size(&self) -> (f32, f32) {
        let w = self.font_size as f32;
        (w, w * 2.0)
    }

    // ─── Cursor ──────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    // ─── Brushes ─────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn default_brush(&self) -> Brush {
        self.style.default_brush()
    }

    #[inline]
    #[must_use]
    pub const fn active_brush(&self) -> Brush {
        self.style.active()
    }

    /// Set the default text color. The active color follows unless it was
    /// overridden.
    pub fn set_foreground_color(&mut self, color: Rgba) {
        self.style.set_foreground(color);
    }

    /// Set the default background color. The active color follows unless it
    /// was overridden.
    pub fn set_background_color(&mut self, color: Rgba) {
        self.style.set_background(color);
    }

    /// Text color for following prints.
    pub const fn push_foreground_color(&mut self, color: Rgba) {
        self.style.push_foreground(color);
    }

    /// Background color for following prints.
    pub const fn push_background_color(&mut self, color: Rgba) {
        self.style.push_background(color);
    }

    pub fn push_bold(&mut self, bold: bool) {
        self.style.push_bold(bold);
    }

    pub fn push_italic(&mut self, italic: bool) {
        self.style.push_italic(italic);
    }

    /// Active brush back to the default.
    pub const fn reset_style(&mut self) {
        self.style.reset();
    }

    // ─── Printing ────────────────────────────────────────────────────────

    /// Print markup at the cursor.
    pub fn print(&mut self, text: &str) {
        self.writer().write(tokenize(text));
    }

    /// Print markup at column 0 of `row`.
    pub fn print_row(&mut self, text: &str, row: u32) {
        self.print_at(text, 0, row);
    }

    /// Print markup at `(col, row)`.
    pub fn print_at(&mut self, text: &str, col: u32, row: u32) {
        self.cursor = Cursor::new(col, row);
        self.print(text);
    }

    /// Print single-byte code-page markup at the cursor. Each byte becomes
    /// the character with the same code; no UTF-8 decoding happens.
    pub fn print_narrow(&mut self, text: &[u8]) {
        self.writer().write(tokenize_narrow(text));
    }

    /// [`print_narrow`](Self::print_narrow) at column 0 of `row`.
    pub fn print_narrow_row(&mut self, text: &[u8], row: u32) {
        self.print_narrow_at(text, 0, row);
    }

    /// [`print_narrow`](Self::print_narrow) at `(col, row)`.
    pub fn print_narrow_at(&mut self, text: &[u8], col: u32, row: u32) {
        self.cursor = Cursor::new(col, row);
        self.print_narrow(text);
    }

    fn writer(&mut self) -> BufferWriter<'_> {
        BufferWriter::new(&mut self.buffer, &mut self.cursor, &mut self.style)
    }

    /// Start a new frame: empty buffer, cursor home, active brush reset.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = Cursor::ORIGIN;
        self.style.reset();
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// The cell at `(col, row)`.
    ///
    /// # Errors
    ///
    /// [`GridError::SparseMiss`] if nothing was written there.
    pub fn character(&self, col: u32, row: u32) -> Result<&Cell, GridError> {
        self.buffer.get(col, row)
    }

    /// See [`ScreenBuffer::line`].
    #[must_use]
    pub fn line(&self, row: u32) -> Line<'_> {
        self.buffer.line(row)
    }

    /// See [`ScreenBuffer::text`].
    #[must_use]
    pub fn text(&self, row: u32) -> Text<'_> {
        self.buffer.text(row)
    }

    #[must_use]
    pub const fn screen_buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Replace the whole buffer. Cursor and style are left alone.
    pub fn set_screen_buffer(&mut self, buffer: ScreenBuffer) {
        self.buffer = buffer;
    }

    /// Pixel placement of every written cell, for the renderer.
    pub fn layout(&self) -> impl Iterator<Item = CellQuad> + '_ {
        let (cell_width, cell_height) = self.cell_size();
        layout::layout(
            &self.buffer,
            self.font.as_deref(),
            LayoutParams {
                cell_width,
                cell_height,
                window_background: self.style.default_brush().background,
            },
        )
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const GREEN: Rgba = Rgba::rgb(0, 255, 0);

    #[test]
    fn config_defaults() {
        let surface = Surface::default();
        assert_eq!(surface.font_size(), 11);
        assert_eq!(surface.default_brush(), Brush::new(Rgba::WHITE, Rgba::BLACK));
        assert_eq!(surface.active_brush(), surface.default_brush());
        assert_eq!(surface.cursor(), Cursor::ORIGIN);
        assert!(surface.font().is_none());
    }

    #[test]
    fn cell_size_is_one_by_two() {
        let mut surface = Surface::default();
        surface.set_font_size(16);
        assert_eq!(surface.cell_size(), (16.0, 32.0));
        surface.set_font_size(0);
        assert_eq!(surface.font_size(), 1);
    }

    #[test]
    fn print_color_then_reset() {
        let mut surface = Surface::default();
        surface.print("#ff0000A#r");
        let cell = surface.character(0, 0).unwrap();
        assert_eq!(cell.code, u32::from('A'));
        assert_eq!(cell.brush.foreground, Rgba::rgba(255, 0, 0, 255));
        assert_eq!(surface.active_brush(), surface.default_brush());
    }

    #[test]
    fn print_background_only() {
        let mut surface = Surface::default();
        surface.print("#_00ff00A");
        let cell = surface.character(0, 0).unwrap();
        assert_eq!(cell.brush.background, Rgba::rgba(0, 255, 0, 255));
        assert_eq!(cell.brush.foreground, surface.default_brush().foreground);
    }

    #[test]
    fn print_tab() {
        let mut surface = Surface::default();
        surface.print("ab");
        surface.print("\t");
        assert_eq!(surface.cursor(), Cursor::new(6, 0));
        for col in 2..6 {
            assert_eq!(surface.character(col, 0).unwrap().character(), Some(' '));
        }
    }

    #[test]
    fn print_newline() {
        let mut surface = Surface::default();
        surface.print("A\nB");
        assert_eq!(surface.character(0, 0).unwrap().character(), Some('A'));
        assert_eq!(surface.character(0, 1).unwrap().character(), Some('B'));
        assert_eq!(surface.cursor(), Cursor::new(1, 1));
    }

    #[test]
    fn positional_prints() {
        let mut surface = Surface::default();
        surface.print("xxxx");
        surface.print_row("row", 3);
        assert_eq!(surface.cursor(), Cursor::new(3, 3));
        surface.print_at("at", 7, 5);
        assert_eq!(surface.line(3).into_string(), "row");
        assert_eq!(surface.line(5).into_string(), "at");
        assert_eq!(surface.cursor(), Cursor::new(9, 5));
    }

    #[test]
    fn narrow_prints() {
        let mut surface = Surface::default();
        surface.print_narrow_at(b"\x18 up", 2, 1);
        assert_eq!(surface.character(2, 1).unwrap().code, 0x18);
        surface.print_narrow_row(b"#bB", 4);
        assert!(surface.character(0, 4).unwrap().brush.bold());
        surface.print_narrow(b"c");
        assert_eq!(surface.line(4).into_string(), "Bc");
    }

    #[test]
    fn line_and_text_queries() {
        let mut surface = Surface::default();
        surface.print("AB");
        surface.print_at("Z", 5, 0);
        surface.print_row("CD", 1);
        assert_eq!(surface.line(0).into_string(), "AB");
        assert_eq!(surface.text(1).into_string(), "CD");
    }

    #[test]
    fn soft_wrapped_text() {
        let mut surface = Surface::default();
        surface.print("AB\nCD");
        assert_eq!(surface.text(0).into_string(), "ABCD");
        assert_eq!(surface.line(0).into_string(), "AB");
    }

    #[test]
    fn missing_character_is_sparse_miss() {
        let surface = Surface::default();
        assert_eq!(
            surface.character(1, 2),
            Err(GridError::SparseMiss { col: 1, row: 2 })
        );
    }

    #[test]
    fn clear_resets_frame_state() {
        let mut surface = Surface::default();
        surface.set_foreground_color(GREEN);
        surface.print("#b#ff0000#_0000ffsome text\n\tmore");
        surface.push_italic(true);
        surface.clear();
        assert!(surface.screen_buffer().is_empty());
        assert_eq!(surface.cursor(), Cursor::ORIGIN);
        assert_eq!(surface.active_brush(), surface.default_brush());
        // The default brush persists across frames.
        assert_eq!(surface.default_brush().foreground, GREEN);
    }

    #[test]
    fn written_cells_do_not_alias_active_brush() {
        let mut surface = Surface::default();
        surface.print("A");
        let before = *surface.character(0, 0).unwrap();
        surface.push_bold(true);
        surface.push_italic(true);
        let after = surface.character(0, 0).unwrap();
        assert_eq!(after.code, before.code);
        assert_eq!(after.brush, before.brush);
        assert!(!after.brush.bold());
    }

    #[test]
    fn set_color_respects_pushed_override() {
        let mut surface = Surface::default();
        surface.push_foreground_color(RED);
        surface.set_foreground_color(GREEN);
        assert_eq!(surface.active_brush().foreground, RED);

        surface.set_background_color(GREEN);
        assert_eq!(surface.active_brush().background, GREEN);
        surface.push_background_color(RED);
        surface.set_background_color(Rgba::BLACK);
        assert_eq!(surface.active_brush().background, RED);

        surface.reset_style();
        assert_eq!(surface.active_brush(), surface.default_brush());
    }

    #[test]
    fn screen_buffer_swap() {
        let mut surface = Surface::default();
        surface.print("old");
        let mut other = Surface::default();
        other.print("new");
        surface.set_screen_buffer(other.screen_buffer().clone());
        assert_eq!(surface.line(0).into_string(), "new");
        assert_eq!(surface.cursor(), Cursor::new(3, 0));
    }

    #[test]
    fn layout_uses_font_and_window_background() {
        let mut img = image::RgbaImage::new(20, 10);
        img.put_pixel(12, 2, image::Rgba([255, 255, 255, 255]));
        let atlas = Arc::new(GlyphAtlas::from_image(img, 10).unwrap());

        let mut surface = Surface::new(SurfaceConfig {
            font_size: 10,
            ..SurfaceConfig::default()
        });
        surface.set_font(Arc::clone(&atlas));
        surface.set_cursor(Cursor::new(1, 0));
        surface.print_narrow(b"\x01");

        let quads: Vec<CellQuad> = surface.layout().collect();
        assert_eq!(quads.len(), 1);
        let quad = quads[0];
        assert_eq!(quad.cell.x, 10.0);
        assert_eq!(quad.glyph_background, Rgba::TRANSPARENT);
        let glyph = quad.glyph.unwrap();
        assert_eq!(glyph.source_origin, ink_atlas::Vec2::new(12, 2));
        assert_eq!(glyph.dest.y, 4.0);
    }

    #[test]
    fn layout_without_font_has_no_glyphs() {
        let mut surface = Surface::default();
        surface.print("hi");
        assert!(surface.layout().all(|q| q.glyph.is_none()));
    }
}

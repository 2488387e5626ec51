// SPDX-License-Identifier: MIT
//
// Frame layout: pixel placement of every written cell.
//
// The renderer collaborator owns textures, shaders and the window. What it
// needs from us is pure geometry: for each cell, where its background goes,
// which atlas rectangle to sample, where to put that sample, and which
// colors and effects to draw it with. This module computes exactly that and
// nothing else.
//
// Placement of one cell at (col, row), cell size (cw, ch):
//
//   cell rect   = (col·cw, row·ch, cw, ch)
//   scale       = 2·cw / glyph_size
//   dest size   = ink size · scale
//   dest x      = cell x + cw/2 − dest width/2     (centred horizontally)
//   dest y      = cell y + ink origin y · scale    (keeps the baseline)
//
// A glyph whose background equals the window background is drawn with a
// transparent background so the blend doesn't paint a box over neighbours.
// Bold is faked with extra passes shifted right by one pixel each; italic
// is a shear the renderer applies to the quad.

// Pixel coordinates are small integers; f32 is exact well past any screen.
#![allow(clippy::cast_precision_loss)]

use ink_atlas::{GlyphAtlas, Vec2};

use crate::color::Rgba;
use crate::screen::ScreenBuffer;

/// Extra draws for bold cells.
pub const BOLD_PASSES: u32 = 2;
/// Horizontal shift of each bold pass, in pixels.
pub const BOLD_OFFSET: f32 = 1.0;

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where a glyph comes from in the atlas and where it lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Top-left of the ink in atlas pixels.
    pub source_origin: Vec2,
    /// Ink extent in atlas pixels.
    pub source_size: Vec2,
    /// Destination on screen.
    pub dest: Rect,
}

/// Everything needed to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellQuad {
    pub col: u32,
    pub row: u32,
    pub code: u32,
    /// Background rectangle, filled with `background`.
    pub cell: Rect,
    /// `None` without a font, or when neither the code nor the fallback has
    /// a glyph.
    pub glyph: Option<GlyphQuad>,
    pub foreground: Rgba,
    pub background: Rgba,
    /// Background to blend the glyph against: `background`, or transparent
    /// when it matches the window background.
    pub glyph_background: Rgba,
    pub italic: bool,
    /// Additional offset draws for bold.
    pub bold_passes: u32,
}

/// Inputs that don't come from the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub cell_width: f32,
    pub cell_height: f32,
    /// The default background the window is cleared to.
    pub window_background: Rgba,
}

/// Lay out every cell in ascending (row, column) order.
pub fn layout<'a>(
    buffer: &'a ScreenBuffer,
    atlas: Option<&'a GlyphAtlas>,
    params: LayoutParams,
) -> impl Iterator<Item = CellQuad> + 'a {
    buffer.iter().map(move |(pos, cell)| {
        let x = pos.col as f32 * params.cell_width;
        let y = pos.row as f32 * params.cell_height;
        let cell_rect = Rect::new(x, y, params.cell_width, params.cell_height);

        let glyph = atlas.and_then(|atlas| {
            let glyph = atlas.glyph_or_fallback(cell.code)?;
            let scale = params.cell_width / atlas.glyph_size() as f32 * 2.0;
            let width = glyph.size.x as f32 * scale;
            let height = glyph.size.y as f32 * scale;
            Some(GlyphQuad {
                source_origin: glyph.ink_position(),
                source_size: glyph.size,
                dest: Rect::new(
                    x + params.cell_width / 2.0 - width / 2.0,
                    y + glyph.origin.y as f32 * scale,
                    width,
                    height,
                ),
            })
        });

        let brush = cell.brush;
        let glyph_background = if brush.background == params.window_background {
            Rgba::TRANSPARENT
        } else {
            brush.background
        };

        CellQuad {
            col: pos.col,
            row: pos.row,
            code: cell.code,
            cell: cell_rect,
            glyph,
            foreground: brush.foreground,
            background: brush.background,
            glyph_background,
            italic: brush.italic(),
            bold_passes: if brush.bold() { BOLD_PASSES } else { 0 },
        }
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────

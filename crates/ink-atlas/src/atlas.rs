// SPDX-License-Identifier: MIT
//
// GlyphAtlas: grid-sliced bitmap font with derived ink bounds.
//
// Loading:
//
//   encoded bytes / file ──decode──▶ RgbaImage ──slice S×S──▶ Vec<Glyph>
//
// The table has `floor(width × height / S²)` entries. Grid positions are
// enumerated row-major over `ceil(width / S)` columns, so entry k is the
// cell at column `k % cols`, row `k / cols`. When the image dimensions are
// not multiples of S the right and bottom cells are partial; pixels past
// the image edge simply hold no ink.
//
// Ink detection: a pixel is ink unless it is fully transparent or opaque
// pure black. Both conventions show up in real atlases (alpha-keyed white
// on transparent, or white on a black sheet), and this test accepts either.
//
// A cell without any ink gets a space-shaped box: origin (0, 0), size
// (S/2, S). That is indistinguishable from a cell whose ink detection
// failed; callers relying on blank cells get a sensible advance either way.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::AtlasError;
use crate::glyph::{Glyph, Vec2};

/// Extra pixel added to every ink width so adjacent glyphs don't clip.
pub const KERNING: u32 = 1;

/// Default substitute for codes outside the table: `'?'`.
pub const DEFAULT_FALLBACK: u32 = '?' as u32;

/// A bitmap font: the atlas pixels plus one [`Glyph`] per character code.
///
/// Lookup is index-as-code: `glyph(k)` is the k-th grid cell. Codes at or
/// past [`capacity`](Self::capacity) are rejected by [`glyph`](Self::glyph)
/// and substituted by [`glyph_or_fallback`](Self::glyph_or_fallback).
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use ink_atlas::GlyphAtlas;
///
/// // Two 8×8 cells side by side; ink only in the second.
/// let mut img = RgbaImage::new(16, 8);
/// img.put_pixel(10, 3, Rgba([255, 255, 255, 255]));
///
/// let atlas = GlyphAtlas::from_image(img, 8).unwrap();
/// assert_eq!(atlas.capacity(), 2);
///
/// let glyph = atlas.glyph(1).unwrap();
/// assert_eq!((glyph.origin.x, glyph.origin.y), (2, 3));
/// ```
#[derive(Clone)]
pub struct GlyphAtlas {
    image: RgbaImage,
    glyph_size: u32,
    glyphs: Vec<Glyph>,
    fallback: u32,
}

impl GlyphAtlas {
    // ─── Construction ────────────────────────────────────────────────────

    /// Load an atlas from an image file.
    ///
    /// # Errors
    ///
    /// [`AtlasError::Decode`] if the file can't be read or decoded,
    /// [`AtlasError::InvalidCellSize`] if `glyph_size` is zero.
    pub fn from_path(path: impl AsRef<Path>, glyph_size: u32) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        log::debug!("decoded atlas {}", path.display());
        Self::from_image(image, glyph_size)
    }

    /// Load an atlas from encoded image bytes (PNG, BMP, ...).
    ///
    /// # Errors
    ///
    /// Same as [`from_path`](Self::from_path).
    pub fn from_memory(bytes: &[u8], glyph_size: u32) -> Result<Self, AtlasError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_image(image, glyph_size)
    }

    /// Build an atlas from already-decoded pixels.
    ///
    /// # Errors
    ///
    /// [`AtlasError::InvalidCellSize`] if `glyph_size` is zero.
    pub fn from_image(image: RgbaImage, glyph_size: u32) -> Result<Self, AtlasError> {
        if glyph_size == 0 {
            return Err(AtlasError::InvalidCellSize(glyph_size));
        }

        let (width, height) = image.dimensions();
        let area = u64::from(width) * u64::from(height);
        let cell_area = u64::from(glyph_size) * u64::from(glyph_size);
        #[allow(clippy::cast_possible_truncation)] // bounded by pixel count
        let capacity = (area / cell_area) as usize;
        let cols = width.div_ceil(glyph_size).max(1) as usize;

        let glyphs = (0..capacity)
            .map(|k| {
                // k < capacity ≤ cols × rows, so both fit in u32.
                #[allow(clippy::cast_possible_truncation)]
                let (cx, cy) = ((k % cols) as u32, (k / cols) as u32);
                measure_cell(&image, cx * glyph_size, cy * glyph_size, glyph_size)
            })
            .collect::<Vec<_>>();

        log::debug!(
            "atlas {width}x{height}, cell {glyph_size}px: {} glyphs",
            glyphs.len()
        );

        Ok(Self {
            image,
            glyph_size,
            glyphs,
            fallback: DEFAULT_FALLBACK,
        })
    }

    /// Use `code` as the substitute for out-of-range lookups.
    #[must_use]
    pub const fn with_fallback(mut self, code: u32) -> Self {
        self.fallback = code;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Number of glyphs in the table. Valid codes are `0..capacity`.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.glyphs.len()
    }

    /// Side length of one grid cell in atlas pixels.
    #[inline]
    #[must_use]
    pub const fn glyph_size(&self) -> u32 {
        self.glyph_size
    }

    /// The code substituted by [`glyph_or_fallback`](Self::glyph_or_fallback).
    #[inline]
    #[must_use]
    pub const fn fallback(&self) -> u32 {
        self.fallback
    }

    /// Atlas pixels, for uploading as a texture.
    #[inline]
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// All glyphs in code order.
    #[inline]
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    /// The glyph for character code `code`.
    ///
    /// # Errors
    ///
    /// [`AtlasError::CodeOutOfRange`] if `code >= capacity`.
    pub fn glyph(&self, code: u32) -> Result<&Glyph, AtlasError> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.glyphs.get(idx))
            .ok_or(AtlasError::CodeOutOfRange {
                code,
                capacity: self.glyphs.len(),
            })
    }

    /// The glyph for `code`, or the fallback glyph if `code` is out of range.
    ///
    /// Returns `None` only when the fallback itself is out of range (for
    /// example an empty atlas).
    #[must_use]
    pub fn glyph_or_fallback(&self, code: u32) -> Option<&Glyph> {
        self.glyph(code).ok().or_else(|| {
            log::debug!("no glyph for code {code}, substituting {}", self.fallback);
            self.glyph(self.fallback).ok()
        })
    }
}

impl std::fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.image.dimensions();
        write!(
            f,
            "GlyphAtlas({w}x{h}, cell {}px, {} glyphs)",
            self.glyph_size,
            self.glyphs.len()
        )
    }
}

// ─── Cell Measurement ───────────────────────────────────────────────────────

/// Whether a pixel contributes to a glyph's ink.
#[inline]
fn is_ink(px: Rgba<u8>) -> bool {
    let [r, g, b, a] = px.0;
    a != 0 && !(r == 0 && g == 0 && b == 0 && a == u8::MAX)
}

/// Compute the glyph for the cell whose top-left atlas pixel is `(x, y)`.
fn measure_cell(image: &RgbaImage, x: u32, y: u32, size: u32) -> Glyph {
    let (width, height) = image.dimensions();
    // (min_x, max_x, min_y, max_y) in cell-local coordinates.
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for ly in 0..size {
        let py = y + ly;
        if py >= height {
            break;
        }
        for lx in 0..size {
            let px = x + lx;
            if px >= width {
                break;
            }
            if !is_ink(*image.get_pixel(px, py)) {
                continue;
            }
            bounds = Some(match bounds {
                None => (lx, lx, ly, ly),
                Some((min_x, max_x, min_y, max_y)) => {
                    (min_x.min(lx), max_x.max(lx), min_y.min(ly), max_y.max(ly))
                }
            });
        }
    }

    let coords = Vec2::new(x, y);
    match bounds {
        Some((min_x, max_x, min_y, max_y)) => Glyph {
            coords,
            origin: Vec2::new(min_x, min_y),
            size: Vec2::new(max_x - min_x + 1 + KERNING, max_y - min_y + 1),
        },
        None => Glyph {
            coords,
            origin: Vec2::ZERO,
            size: Vec2::new(size / 2, size),
        },
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

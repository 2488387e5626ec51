// SPDX-License-Identifier: MIT
//
// Atlas errors.
//
// Two families: load faults (the image could not be turned into a glyph
// table) and index faults (a code outside the table was requested). Both are
// ordinary values; nothing in this crate aborts.

use thiserror::Error;

/// Failure to build or query a [`GlyphAtlas`](crate::GlyphAtlas).
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The atlas image could not be read or decoded.
    #[error("failed to decode atlas image: {0}")]
    Decode(#[from] image::ImageError),

    /// The glyph cell size is zero.
    #[error("invalid glyph cell size {0}: must be at least 1 pixel")]
    InvalidCellSize(u32),

    /// A character code at or past the end of the glyph table.
    #[error("character code {code} is outside the glyph table (capacity {capacity})")]
    CodeOutOfRange {
        /// The requested code.
        code: u32,
        /// Number of glyphs in the table.
        capacity: usize,
    },
}

impl AtlasError {
    /// Whether this is a load fault (as opposed to a lookup fault).
    #[must_use]
    pub const fn is_load_fault(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::InvalidCellSize(_))
    }
}

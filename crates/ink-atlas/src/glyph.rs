// SPDX-License-Identifier: MIT
//
// Glyph: where a character lives in the atlas and where its ink is.

use std::fmt;

/// A 2-D vector of pixel units.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: u32,
    pub y: u32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ink bounds of one character in the atlas.
///
/// - `coords`: top-left corner of the glyph's grid cell in the atlas.
/// - `origin`: top-left corner of the ink, relative to `coords`.
/// - `size`: ink extent. The width carries one extra kerning pixel so
///   neighbouring glyphs never clip each other; the height is exact.
///
/// The texture rectangle to sample is therefore
/// `(coords + origin, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub coords: Vec2,
    pub origin: Vec2,
    pub size: Vec2,
}

impl Glyph {
    /// Top-left corner of the ink in atlas space.
    #[inline]
    #[must_use]
    pub const fn ink_position(&self) -> Vec2 {
        Vec2::new(self.coords.x + self.origin.x, self.coords.y + self.origin.y)
    }
}

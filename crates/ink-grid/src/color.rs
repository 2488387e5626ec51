// SPDX-License-Identifier: MIT
//
// Rgba: the 8-bit color value cells carry.
//
// Deliberately dumb: four bytes, equality, hex parsing. Blending, shading
// and gamma are the renderer's business; the grid only records which
// color a cell was written with.

use std::fmt;

/// An 8-bit-per-channel RGBA color.
///
/// # Examples
///
/// ```
/// use ink_grid::color::Rgba;
///
/// let red = Rgba::from_hex_digits(&['f', 'f', '0', '0', '0', '0']).unwrap();
/// assert_eq!(red, Rgba::rgb(255, 0, 0));
/// assert_eq!(red.a, 255);
///
/// assert_eq!(Rgba::from_u32(0x191f_2aff), Rgba::rgb(0x19, 0x1f, 0x2a));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack `0xRRGGBBAA`.
    #[inline]
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Parse six hex digits `RRGGBB` into an opaque color.
    ///
    /// Returns `None` if any digit isn't hexadecimal (either case).
    #[must_use]
    pub fn from_hex_digits(digits: &[char; 6]) -> Option<Self> {
        let mut channels = [0u8; 3];
        for (channel, pair) in channels.iter_mut().zip(digits.chunks_exact(2)) {
            let hi = pair[0].to_digit(16)?;
            let lo = pair[1].to_digit(16)?;
            // Two hex digits never exceed 0xFF.
            #[allow(clippy::cast_possible_truncation)]
            {
                *channel = (hi * 16 + lo) as u8;
            }
        }
        let [r, g, b] = channels;
        Some(Self::rgb(r, g, b))
    }

    /// Parse `RRGGBB` or `#RRGGBB`.
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let mut digits = ['0'; 6];
        let mut chars = s.chars();
        for slot in &mut digits {
            *slot = chars.next()?;
        }
        if chars.next().is_some() {
            return None;
        }
        Self::from_hex_digits(&digits)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

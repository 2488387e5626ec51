// SPDX-License-Identifier: MIT
//
// Cell: one addressed character in the screen buffer.
//
// A cell is a character code plus the brush snapshot taken when it was
// written. Code 0 is the "unset" sentinel: line queries stop on it. A cell
// holding code 0 is still different from no cell at all, which is how the
// sparse buffer expresses "nothing written here".

use std::fmt;

use crate::brush::Brush;

/// The sentinel code for an empty cell.
pub const NUL: u32 = 0;

/// A written character and the brush it was written with.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character code. Usually a Unicode scalar value; narrow-text prints
    /// store raw code-page bytes here, and the glyph atlas indexes by it.
    pub code: u32,
    /// Style snapshot.
    pub brush: Brush,
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn new(ch: char, brush: Brush) -> Self {
        Self {
            code: ch as u32,
            brush,
        }
    }

    /// A cell holding the empty sentinel.
    #[inline]
    #[must_use]
    pub const fn empty(brush: Brush) -> Self {
        Self { code: NUL, brush }
    }

    /// Whether this cell holds the empty sentinel.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.code == NUL
    }

    /// The code as a `char`, or `None` for the sentinel and non-scalar codes.
    #[inline]
    #[must_use]
    pub fn character(&self) -> Option<char> {
        if self.is_empty() {
            None
        } else {
            char::from_u32(self.code)
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.character() {
            Some(ch) => write!(f, "Cell({ch:?}")?,
            None => write!(f, "Cell(U+{:04X}", self.code)?,
        }
        write!(
            f,
            ", fg={:?}, bg={:?}",
            self.brush.foreground, self.brush.background
        )?;
        if !self.brush.attrs.is_empty() {
            write!(f, ", {:?}", self.brush.attrs)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_round_trips() {
        let cell = Cell::new('ζ', Brush::DEFAULT);
        assert_eq!(cell.code, 0x03B6);
        assert_eq!(cell.character(), Some('ζ'));
        assert!(!cell.is_empty());
    }

    #[test]
    fn sentinel_has_no_character() {
        let cell = Cell::empty(Brush::DEFAULT);
        assert!(cell.is_empty());
        assert_eq!(cell.character(), None);
    }

    #[test]
    fn surrogate_code_has_no_character() {
        let cell = Cell {
            code: 0xD800,
            brush: Brush::DEFAULT,
        };
        assert_eq!(cell.character(), None);
        assert!(format!("{cell:?}").starts_with("Cell(U+D800"));
    }

    #[test]
    fn cell_is_a_snapshot() {
        let mut brush = Brush::DEFAULT;
        let cell = Cell::new('A', brush);
        brush.set_bold(true);
        assert!(!cell.brush.bold());
    }
}

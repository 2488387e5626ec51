// SPDX-License-Identifier: MIT
//
// BufferWriter: applies markup tokens to a screen buffer.
//
// The writer borrows the three pieces of mutable state a print touches
// (buffer, cursor, style) for the duration of one pass. It owns nothing,
// so a surface, a test, or any other owner can drive it.
//
// Per token:
//
//   Style(cmd)  → mutate the active brush
//   Char('\t')  → four spaces at the cursor, cursor.col += 4 (no tab stops)
//   Char('\n')  → cursor to column 0 of the next row, nothing written
//   Char(c)     → one cell with the active brush, cursor.col += 1

use crate::brush::StyleState;
use crate::cell::Cell;
use crate::markup::Token;
use crate::screen::{Cursor, ScreenBuffer};

/// Number of cells a tab expands to.
pub const TAB_WIDTH: u32 = 4;

/// Writes tokenized markup into a [`ScreenBuffer`] at a [`Cursor`].
///
/// # Examples
///
/// ```
/// use ink_grid::brush::StyleState;
/// use ink_grid::markup::tokenize;
/// use ink_grid::screen::{Cursor, ScreenBuffer};
/// use ink_grid::writer::BufferWriter;
///
/// let mut buffer = ScreenBuffer::new();
/// let mut cursor = Cursor::ORIGIN;
/// let mut style = StyleState::default();
///
/// BufferWriter::new(&mut buffer, &mut cursor, &mut style).write(tokenize("A\nB"));
///
/// assert_eq!(buffer.get(0, 0).unwrap().character(), Some('A'));
/// assert_eq!(buffer.get(0, 1).unwrap().character(), Some('B'));
/// assert_eq!(cursor, Cursor::new(1, 1));
/// ```
pub struct BufferWriter<'a> {
    buffer: &'a mut ScreenBuffer,
    cursor: &'a mut Cursor,
    style: &'a mut StyleState,
}

impl<'a> BufferWriter<'a> {
    pub const fn new(
        buffer: &'a mut ScreenBuffer,
        cursor: &'a mut Cursor,
        style: &'a mut StyleState,
    ) -> Self {
        Self {
            buffer,
            cursor,
            style,
        }
    }

    /// Consume every token.
    pub fn write(&mut self, tokens: impl IntoIterator<Item = Token>) {
        for token in tokens {
            self.write_token(token);
        }
    }

    /// Apply a single token.
    pub fn write_token(&mut self, token: Token) {
        match token {
            Token::Style(command) => self.style.apply(command),
            Token::Char('\t') => {
                let cell = Cell::new(' ', self.style.active());
                for i in 0..TAB_WIDTH {
                    let col = self.cursor.col.saturating_add(i);
                    self.buffer.insert(col, self.cursor.row, cell);
                }
                self.cursor.advance(TAB_WIDTH);
            }
            Token::Char('\n') => self.cursor.newline(),
            Token::Char(ch) => {
                self.buffer
                    .insert(self.cursor.col, self.cursor.row, Cell::new(ch, self.style.active()));
                self.cursor.advance(1);
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Brush;
    use crate::color::Rgba;
    use crate::markup::{tokenize, tokenize_narrow};
    use pretty_assertions::assert_eq;

    struct Fixture {
        buffer: ScreenBuffer,
        cursor: Cursor,
        style: StyleState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                buffer: ScreenBuffer::new(),
                cursor: Cursor::ORIGIN,
                style: StyleState::default(),
            }
        }

        fn print(&mut self, text: &str) {
            BufferWriter::new(&mut self.buffer, &mut self.cursor, &mut self.style)
                .write(tokenize(text));
        }
    }

    #[test]
    fn plain_text_advances_cursor() {
        let mut fx = Fixture::new();
        fx.print("abc");
        assert_eq!(fx.cursor, Cursor::new(3, 0));
        assert_eq!(fx.buffer.line(0).into_string(), "abc");
    }

    #[test]
    fn color_tag_then_reset() {
        let mut fx = Fixture::new();
        fx.print("#ff0000A#r");
        assert_eq!(fx.buffer.len(), 1);
        let cell = fx.buffer.get(0, 0).unwrap();
        assert_eq!(cell.character(), Some('A'));
        assert_eq!(cell.brush.foreground, Rgba::rgba(255, 0, 0, 255));
        assert_eq!(fx.style.active(), fx.style.default_brush());
    }

    #[test]
    fn background_tag_leaves_foreground() {
        let mut fx = Fixture::new();
        fx.print("#_00ff00A");
        let cell = fx.buffer.get(0, 0).unwrap();
        assert_eq!(cell.brush.background, Rgba::rgba(0, 255, 0, 255));
        assert_eq!(cell.brush.foreground, Rgba::WHITE);
    }

    #[test]
    fn tab_writes_four_spaces() {
        let mut fx = Fixture::new();
        fx.cursor = Cursor::new(3, 2);
        fx.print("#_102030\t");
        for col in 3..7 {
            let cell = fx.buffer.get(col, 2).unwrap();
            assert_eq!(cell.character(), Some(' '));
            assert_eq!(cell.brush.background, Rgba::rgb(0x10, 0x20, 0x30));
        }
        assert!(!fx.buffer.contains(7, 2));
        assert_eq!(fx.buffer.len(), 4);
        assert_eq!(fx.cursor, Cursor::new(7, 2));
    }

    #[test]
    fn newline_moves_cursor_without_writing() {
        let mut fx = Fixture::new();
        fx.print("A\nB");
        assert_eq!(fx.buffer.get(0, 0).unwrap().character(), Some('A'));
        assert_eq!(fx.buffer.get(0, 1).unwrap().character(), Some('B'));
        assert_eq!(fx.buffer.len(), 2);
        assert_eq!(fx.cursor, Cursor::new(1, 1));
    }

    #[test]
    fn cursor_persists_across_passes() {
        let mut fx = Fixture::new();
        fx.print("AB");
        fx.print("CD");
        assert_eq!(fx.buffer.line(0).into_string(), "ABCD");
    }

    #[test]
    fn style_persists_across_passes() {
        let mut fx = Fixture::new();
        fx.print("#bA");
        fx.print("B");
        assert!(fx.buffer.get(1, 0).unwrap().brush.bold());
    }

    #[test]
    fn cells_are_not_aliased_to_active_brush() {
        let mut fx = Fixture::new();
        fx.print("A");
        fx.style.push_bold(true);
        fx.style.push_italic(true);
        fx.style.push_foreground(Rgba::rgb(1, 2, 3));
        let cell = fx.buffer.get(0, 0).unwrap();
        assert_eq!(cell.code, u32::from('A'));
        assert_eq!(cell.brush, Brush::DEFAULT);
    }

    #[test]
    fn overwrite_replaces_cell() {
        let mut fx = Fixture::new();
        fx.print("AB");
        fx.cursor = Cursor::ORIGIN;
        fx.print("#iX");
        assert_eq!(fx.buffer.line(0).into_string(), "XB");
        assert!(fx.buffer.get(0, 0).unwrap().brush.italic());
    }

    #[test]
    fn escaped_tab_still_expands() {
        let mut fx = Fixture::new();
        fx.print("/\t");
        assert_eq!(fx.cursor, Cursor::new(4, 0));
    }

    #[test]
    fn cursor_saturates_at_limit() {
        let mut fx = Fixture::new();
        fx.cursor = Cursor::new(u32::MAX - 1, 0);
        fx.print("\t");
        assert_eq!(fx.cursor.col, u32::MAX);
        assert!(fx.buffer.contains(u32::MAX, 0));
    }

    #[test]
    fn narrow_tokens_write_raw_codes() {
        let mut fx = Fixture::new();
        BufferWriter::new(&mut fx.buffer, &mut fx.cursor, &mut fx.style)
            .write(tokenize_narrow(b"\x18\xe9"));
        assert_eq!(fx.buffer.get(0, 0).unwrap().code, 0x18);
        assert_eq!(fx.buffer.get(1, 0).unwrap().code, 0xE9);
    }
}

// SPDX-License-Identifier: MIT
//
// Style markup tokenizer.
//
// Turns decorated text into a lazy stream of tokens: style commands and
// literal characters. The writer consumes the stream; nothing here touches
// a buffer, so the grammar can be tested on its own.
//
// Grammar (every tag starts with `#`):
//
//   #r          reset active brush to the default
//   #b          toggle bold
//   #i          toggle italic
//   #RRGGBB     foreground color, alpha forced to 255
//   #_RRGGBB    background color, alpha forced to 255
//   /x          literal x (any character, including `#` and `/`)
//
// Quirks kept on purpose:
//
//   - A `#` followed by fewer characters than its tag needs ends the
//     stream. The marker and the trailing fragment are dropped silently,
//     not written as text.
//   - A `#` followed by enough characters that aren't hex digits is not a
//     tag at all; the `#` comes out as a literal and scanning resumes right
//     after it.
//   - A lone trailing `/` is dropped.
//
// Lookahead is done by cloning the underlying char iterator, so any
// `Clone` iterator works: `str::Chars` for Unicode text, or `widen` for
// single-byte code-page text.

use std::iter::FusedIterator;
use std::str::Chars;

use crate::color::Rgba;

/// Starts every tag.
pub const TAG: char = '#';
/// Makes the following character literal.
pub const ESCAPE: char = '/';
/// After [`TAG`], selects the background color form.
pub const BACKGROUND: char = '_';
/// After [`TAG`], resets the active brush.
pub const RESET: char = 'r';
/// After [`TAG`], toggles bold.
pub const BOLD: char = 'b';
/// After [`TAG`], toggles italic.
pub const ITALIC: char = 'i';

/// Number of hex digits in a color tag.
const COLOR_DIGITS: usize = 6;

// ─── Tokens ─────────────────────────────────────────────────────────────────

/// A change to the active brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleCommand {
    Reset,
    ToggleBold,
    ToggleItalic,
    Foreground(Rgba),
    Background(Rgba),
}

/// One unit of tokenized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Mutate the active brush.
    Style(StyleCommand),
    /// Write this character (tab and newline included).
    Char(char),
}

/// Outcome of reading a tag body after [`TAG`].
enum Tag {
    Command(StyleCommand),
    /// Well-formed length, but not a tag. The marker is literal.
    NotATag,
    /// Input ended before the tag was complete.
    Truncated,
}

// ─── Tokenizer ──────────────────────────────────────────────────────────────

/// Lazy markup tokenizer over any cloneable `char` iterator.
///
/// # Examples
///
/// ```
/// use ink_grid::color::Rgba;
/// use ink_grid::markup::{tokenize, StyleCommand, Token};
///
/// let tokens: Vec<Token> = tokenize("#ff0000A#r").collect();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Style(StyleCommand::Foreground(Rgba::rgb(255, 0, 0))),
///         Token::Char('A'),
///         Token::Style(StyleCommand::Reset),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<I> {
    chars: I,
    finished: bool,
}

impl<I> Tokenizer<I>
where
    I: Iterator<Item = char> + Clone,
{
    #[must_use]
    pub const fn new(chars: I) -> Self {
        Self {
            chars,
            finished: false,
        }
    }

    /// Read a tag body. Consumes input only for complete commands.
    fn tag(&mut self) -> Tag {
        let mut ahead = self.chars.clone();
        let command = match ahead.next() {
            None => return Tag::Truncated,
            Some(RESET) => StyleCommand::Reset,
            Some(BOLD) => StyleCommand::ToggleBold,
            Some(ITALIC) => StyleCommand::ToggleItalic,
            Some(BACKGROUND) => match read_color(&mut ahead, None) {
                Ok(color) => StyleCommand::Background(color),
                Err(tag) => return tag,
            },
            Some(first) => match read_color(&mut ahead, Some(first)) {
                Ok(color) => StyleCommand::Foreground(color),
                Err(tag) => return tag,
            },
        };
        self.chars = ahead;
        Tag::Command(command)
    }
}

/// Collect six hex digits (the first possibly already read).
fn read_color<I>(chars: &mut I, first: Option<char>) -> Result<Rgba, Tag>
where
    I: Iterator<Item = char>,
{
    let mut digits = ['0'; COLOR_DIGITS];
    let mut filled = 0;
    if let Some(first) = first {
        digits[0] = first;
        filled = 1;
    }
    for slot in &mut digits[filled..] {
        *slot = chars.next().ok_or(Tag::Truncated)?;
    }
    Rgba::from_hex_digits(&digits).ok_or(Tag::NotATag)
}

impl<I> Iterator for Tokenizer<I>
where
    I: Iterator<Item = char> + Clone,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let Some(ch) = self.chars.next() else {
            self.finished = true;
            return None;
        };

        match ch {
            ESCAPE => {
                let literal = self.chars.next();
                if literal.is_none() {
                    self.finished = true;
                }
                literal.map(Token::Char)
            }
            TAG => match self.tag() {
                Tag::Command(command) => Some(Token::Style(command)),
                Tag::NotATag => {
                    log::trace!("'{TAG}' does not start a valid tag, writing it literally");
                    Some(Token::Char(TAG))
                }
                Tag::Truncated => {
                    log::trace!("dropping truncated tag at end of markup");
                    self.finished = true;
                    None
                }
            },
            other => Some(Token::Char(other)),
        }
    }
}

impl<I> FusedIterator for Tokenizer<I> where I: Iterator<Item = char> + Clone {}

// ─── Entry Points ───────────────────────────────────────────────────────────

/// Tokenize Unicode markup.
#[must_use]
pub fn tokenize(text: &str) -> Tokenizer<Chars<'_>> {
    Tokenizer::new(text.chars())
}

/// Widen single-byte text to chars by zero extension.
///
/// Every byte becomes the scalar with the same value (Latin-1 style). This
/// is not UTF-8 decoding; multi-byte sequences come out as several chars.
pub fn widen(bytes: &[u8]) -> impl Iterator<Item = char> + Clone + '_ {
    bytes.iter().map(|&b| char::from(b))
}

/// Tokenize single-byte code-page markup. See [`widen`].
pub fn tokenize_narrow(bytes: &[u8]) -> Tokenizer<impl Iterator<Item = char> + Clone + '_> {
    Tokenizer::new(widen(bytes))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

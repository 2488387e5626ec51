// SPDX-License-Identifier: MIT
//
// Brush and style state.
//
// A Brush is the complete style a cell is written with. It is a plain Copy
// value: every written cell holds its own snapshot, so changing the brush
// later never reaches back into the buffer.
//
// StyleState pairs the two brushes a surface tracks:
//
//   default: the baseline, restored by a reset tag or `reset()`
//   active:  what the next written cell receives
//
// Markup tags and push_* calls touch only `active`. The set_* calls move
// the baseline and drag `active` along only for channels the caller hasn't
// overridden, so an explicit push survives a theme change.

use crate::color::Rgba;
use crate::markup::StyleCommand;

// ─── Attributes ─────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes as a compact bitfield.
    ///
    /// ```
    /// use ink_grid::brush::Attr;
    ///
    /// let style = Attr::BOLD | Attr::ITALIC;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!Attr::ITALIC.contains(Attr::BOLD));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// Drawn with extra horizontally offset passes.
        const BOLD   = 1 << 0;
        /// Drawn sheared.
        const ITALIC = 1 << 1;
    }
}

// ─── Brush ──────────────────────────────────────────────────────────────────

/// Foreground, background and attributes for written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Brush {
    pub foreground: Rgba,
    pub background: Rgba,
    pub attrs: Attr,
}

impl Brush {
    /// White on black, no attributes.
    pub const DEFAULT: Self = Self::new(Rgba::WHITE, Rgba::BLACK);

    #[inline]
    #[must_use]
    pub const fn new(foreground: Rgba, background: Rgba) -> Self {
        Self {
            foreground,
            background,
            attrs: Attr::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn bold(&self) -> bool {
        self.attrs.contains(Attr::BOLD)
    }

    #[inline]
    #[must_use]
    pub const fn italic(&self) -> bool {
        self.attrs.contains(Attr::ITALIC)
    }

    #[inline]
    pub fn set_bold(&mut self, on: bool) {
        self.attrs.set(Attr::BOLD, on);
    }

    #[inline]
    pub fn set_italic(&mut self, on: bool) {
        self.attrs.set(Attr::ITALIC, on);
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─── StyleState ─────────────────────────────────────────────────────────────

/// The default/active brush pair a writer draws with.
///
/// # Examples
///
/// ```
/// use ink_grid::brush::{Brush, StyleState};
/// use ink_grid::color::Rgba;
///
/// let mut style = StyleState::new(Brush::DEFAULT);
/// style.push_foreground(Rgba::rgb(255, 0, 0));
///
/// // The override survives a baseline change...
/// style.set_foreground(Rgba::rgb(0, 0, 255));
/// assert_eq!(style.active().foreground, Rgba::rgb(255, 0, 0));
///
/// // ...until a reset.
/// style.reset();
/// assert_eq!(style.active().foreground, Rgba::rgb(0, 0, 255));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleState {
    default: Brush,
    active: Brush,
}

impl StyleState {
    /// Start with `default` as both baseline and active brush.
    #[must_use]
    pub const fn new(default: Brush) -> Self {
        Self {
            default,
            active: default,
        }
    }

    #[inline]
    #[must_use]
    pub const fn default_brush(&self) -> Brush {
        self.default
    }

    #[inline]
    #[must_use]
    pub const fn active(&self) -> Brush {
        self.active
    }

    // ─── Baseline ────────────────────────────────────────────────────────

    /// Change the default foreground. The active foreground follows only if
    /// it still equals the old default.
    pub fn set_foreground(&mut self, color: Rgba) {
        if self.active.foreground == self.default.foreground {
            self.active.foreground = color;
        }
        self.default.foreground = color;
    }

    /// Change the default background. The active background follows only if
    /// it still equals the old default.
    pub fn set_background(&mut self, color: Rgba) {
        if self.active.background == self.default.background {
            self.active.background = color;
        }
        self.default.background = color;
    }

    // ─── Active overrides ────────────────────────────────────────────────

    pub const fn push_foreground(&mut self, color: Rgba) {
        self.active.foreground = color;
    }

    pub const fn push_background(&mut self, color: Rgba) {
        self.active.background = color;
    }

    pub fn push_bold(&mut self, bold: bool) {
        self.active.set_bold(bold);
    }

    pub fn push_italic(&mut self, italic: bool) {
        self.active.set_italic(italic);
    }

    /// Active brush := default brush.
    pub const fn reset(&mut self) {
        self.active = self.default;
    }

    /// Apply one markup style command to the active brush.
    pub fn apply(&mut self, command: StyleCommand) {
        match command {
            StyleCommand::Reset => self.reset(),
            StyleCommand::ToggleBold => self.push_bold(!self.active.bold()),
            StyleCommand::ToggleItalic => self.push_italic(!self.active.italic()),
            StyleCommand::Foreground(color) => self.push_foreground(color),
            StyleCommand::Background(color) => self.push_background(color),
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new(Brush::DEFAULT)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

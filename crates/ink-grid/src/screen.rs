// SPDX-License-Identifier: MIT
//
// ScreenBuffer: the sparse grid of written cells.
//
// Only positions that were written exist. The grid is one ordered map keyed
// by (row, column), so iteration is ascending row, then ascending column:
// exactly the order a renderer draws in and the order line queries scan.
//
//   (0,0) 'H'  (0,1) 'i'  (0,5) '!'  (1,0) 'o'  (1,1) 'k'
//   └──────── row 0 ─────────────┘  └─── row 1 ───┘
//
// Line queries:
//
//   line(row)  scans one row from its first written column. Stops before a
//              column gap (> 1) or an empty-sentinel cell, and right after
//              a newline cell.
//   text(row)  same stop rules, but a newline or the end of a row carries
//              on into row + 1, stitching soft-wrapped lines back together.
//              It ends when the next row has nothing written.
//
// Both are lazy and read the buffer as it is when they run.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::iter::FusedIterator;

use crate::cell::{Cell, NUL};
use crate::error::GridError;

/// Code of the newline character.
const NEWLINE: u32 = '\n' as u32;

// ─── GridPos ────────────────────────────────────────────────────────────────

/// A buffer coordinate, ordered row-major (row first, then column).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    // Field order drives the derived Ord: row, then column.
    pub row: u32,
    pub col: u32,
}

impl GridPos {
    #[inline]
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { row, col }
    }

    /// First possible position in `row`.
    const fn row_start(row: u32) -> Self {
        Self { row, col: 0 }
    }

    /// Last possible position in `row`.
    const fn row_end(row: u32) -> Self {
        Self { row, col: u32::MAX }
    }
}

impl fmt::Debug for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

// ─── Cursor ─────────────────────────────────────────────────────────────────

/// The write position. Unclamped: it may sit anywhere, written or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub col: u32,
    pub row: u32,
}

impl Cursor {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    #[inline]
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Move right by `n` columns, saturating.
    #[inline]
    pub const fn advance(&mut self, n: u32) {
        self.col = self.col.saturating_add(n);
    }

    /// Column 0 of the next row.
    #[inline]
    pub const fn newline(&mut self) {
        self.col = 0;
        self.row = self.row.saturating_add(1);
    }

    #[inline]
    #[must_use]
    pub const fn pos(self) -> GridPos {
        GridPos::new(self.col, self.row)
    }
}

// ─── ScreenBuffer ───────────────────────────────────────────────────────────

/// Sparse, ordered grid of [`Cell`]s.
///
/// # Examples
///
/// ```
/// use ink_grid::brush::Brush;
/// use ink_grid::cell::Cell;
/// use ink_grid::screen::ScreenBuffer;
///
/// let mut buf = ScreenBuffer::new();
/// buf.insert(0, 0, Cell::new('A', Brush::DEFAULT));
/// buf.insert(1, 0, Cell::new('B', Brush::DEFAULT));
/// buf.insert(5, 0, Cell::new('C', Brush::DEFAULT));
///
/// assert_eq!(buf.line(0).into_string(), "AB");
/// assert!(buf.get(2, 0).is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ScreenBuffer {
    cells: BTreeMap<GridPos, Cell>,
}

impl ScreenBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    // ─── Access ──────────────────────────────────────────────────────────

    /// Number of written cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `(col, row)`.
    ///
    /// # Errors
    ///
    /// [`GridError::SparseMiss`] if nothing was written there.
    pub fn get(&self, col: u32, row: u32) -> Result<&Cell, GridError> {
        self.cells
            .get(&GridPos::new(col, row))
            .ok_or(GridError::SparseMiss { col, row })
    }

    /// Whether a cell exists at `(col, row)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, col: u32, row: u32) -> bool {
        self.cells.contains_key(&GridPos::new(col, row))
    }

    /// Whether anything is written in `row`.
    #[must_use]
    pub fn has_row(&self, row: u32) -> bool {
        self.row_range(row).next().is_some()
    }

    /// All cells, ascending row then column.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Cell)> + '_ {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Cells of one row as `(column, cell)`, ascending.
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, &Cell)> + '_ {
        self.row_range(row).map(|(pos, cell)| (pos.col, cell))
    }

    /// Distinct row indices that hold at least one cell, ascending.
    pub fn rows(&self) -> impl Iterator<Item = u32> + '_ {
        let mut last = None;
        self.cells.keys().filter_map(move |pos| {
            if last == Some(pos.row) {
                None
            } else {
                last = Some(pos.row);
                last
            }
        })
    }

    fn row_range(&self, row: u32) -> btree_map::Range<'_, GridPos, Cell> {
        self.cells.range(GridPos::row_start(row)..=GridPos::row_end(row))
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Write a cell, returning whatever was there before.
    pub fn insert(&mut self, col: u32, row: u32, cell: Cell) -> Option<Cell> {
        self.cells.insert(GridPos::new(col, row), cell)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    // ─── Line Queries ────────────────────────────────────────────────────

    /// Codes of one logical line starting in `row`. See the module docs for
    /// the stop rules. A row with nothing written yields nothing.
    #[must_use]
    pub fn line(&self, row: u32) -> Line<'_> {
        Line {
            cells: self.row_range(row),
            prev_col: None,
            done: false,
        }
    }

    /// Codes of the text starting in `row`, continuing across rows.
    #[must_use]
    pub fn text(&self, row: u32) -> Text<'_> {
        Text {
            buffer: self,
            row,
            cells: self.row_range(row),
            prev_col: None,
            done: !self.has_row(row),
        }
    }
}

impl fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.cells.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ScreenBuffer {
    type Item = (&'a GridPos, &'a Cell);
    type IntoIter = btree_map::Iter<'a, GridPos, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl FromIterator<(GridPos, Cell)> for ScreenBuffer {
    fn from_iter<T: IntoIterator<Item = (GridPos, Cell)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

// ─── Scan Helpers ───────────────────────────────────────────────────────────

/// Whether `col` breaks contiguity after `prev`.
#[inline]
fn is_gap(prev: Option<u32>, col: u32) -> bool {
    prev.is_some_and(|p| col.saturating_sub(p) > 1)
}

/// Collect codes into a `String`, replacing non-scalar codes with U+FFFD.
fn codes_to_string(codes: impl Iterator<Item = u32>) -> String {
    codes
        .map(|code| char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

// ─── Line ───────────────────────────────────────────────────────────────────

/// Lazy scan of one row. Created by [`ScreenBuffer::line`].
pub struct Line<'a> {
    cells: btree_map::Range<'a, GridPos, Cell>,
    prev_col: Option<u32>,
    done: bool,
}

impl Line<'_> {
    /// Drain into a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        codes_to_string(self)
    }
}

impl Iterator for Line<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.done {
            return None;
        }
        let Some((pos, cell)) = self.cells.next() else {
            self.done = true;
            return None;
        };
        if is_gap(self.prev_col, pos.col) || cell.code == NUL {
            self.done = true;
            return None;
        }
        self.prev_col = Some(pos.col);
        if cell.code == NEWLINE {
            self.done = true;
        }
        Some(cell.code)
    }
}

impl FusedIterator for Line<'_> {}

// ─── Text ───────────────────────────────────────────────────────────────────

/// Lazy scan across soft-wrapped rows. Created by [`ScreenBuffer::text`].
pub struct Text<'a> {
    buffer: &'a ScreenBuffer,
    row: u32,
    cells: btree_map::Range<'a, GridPos, Cell>,
    prev_col: Option<u32>,
    done: bool,
}

impl Text<'_> {
    /// Drain into a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        codes_to_string(self)
    }

    /// Move on to the next row, or finish if it holds nothing.
    fn next_row(&mut self) {
        match self.row.checked_add(1) {
            Some(row) if self.buffer.has_row(row) => {
                self.row = row;
                self.cells = self.buffer.row_range(row);
                self.prev_col = None;
            }
            _ => self.done = true,
        }
    }
}

impl Iterator for Text<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while !self.done {
            let Some((pos, cell)) = self.cells.next() else {
                self.next_row();
                continue;
            };
            if is_gap(self.prev_col, pos.col) || cell.code == NUL {
                self.done = true;
                return None;
            }
            self.prev_col = Some(pos.col);
            if cell.code == NEWLINE {
                self.next_row();
            }
            return Some(cell.code);
        }
        None
    }
}

impl FusedIterator for Text<'_> {}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Brush;
    use pretty_assertions::assert_eq;

    fn put(buf: &mut ScreenBuffer, col: u32, row: u32, text: &str) {
        for (i, ch) in (0u32..).zip(text.chars()) {
            buf.insert(col + i, row, Cell::new(ch, Brush::DEFAULT));
        }
    }

    // ── Access ──────────────────────────────────────────────────────────

    #[test]
    fn absent_cell_is_sparse_miss() {
        let buf = ScreenBuffer::new();
        assert_eq!(buf.get(3, 4), Err(GridError::SparseMiss { col: 3, row: 4 }));
    }

    #[test]
    fn empty_sentinel_is_distinct_from_absence() {
        let mut buf = ScreenBuffer::new();
        buf.insert(0, 0, Cell::empty(Brush::DEFAULT));
        assert!(buf.get(0, 0).unwrap().is_empty());
        assert!(buf.contains(0, 0));
        assert!(!buf.contains(1, 0));
    }

    #[test]
    fn iteration_is_row_then_column() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 5, 1, "c");
        put(&mut buf, 9, 0, "b");
        put(&mut buf, 0, 1, "z");
        put(&mut buf, 2, 0, "a");
        let order: Vec<_> = buf.iter().map(|(p, _)| (p.col, p.row)).collect();
        assert_eq!(order, vec![(2, 0), (9, 0), (0, 1), (5, 1)]);
        assert_eq!(buf.rows().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn row_yields_only_that_row() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "ab");
        put(&mut buf, 0, 1, "cd");
        put(&mut buf, 0, 2, "ef");
        let cols: Vec<u32> = buf.row(1).map(|(c, _)| c).collect();
        assert_eq!(cols, vec![0, 1]);
        assert_eq!(buf.row(1).next().unwrap().1.character(), Some('c'));
    }

    #[test]
    fn insert_replace_clear() {
        let mut buf = ScreenBuffer::new();
        assert!(buf.insert(1, 1, Cell::new('x', Brush::DEFAULT)).is_none());
        let old = buf.insert(1, 1, Cell::new('y', Brush::DEFAULT)).unwrap();
        assert_eq!(old.character(), Some('x'));
        assert_eq!(buf.len(), 1);
        put(&mut buf, 0, 0, "abc");
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn extreme_coordinates() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, u32::MAX, u32::MAX, "x");
        assert!(buf.has_row(u32::MAX));
        assert_eq!(buf.line(u32::MAX).into_string(), "x");
        assert_eq!(buf.text(u32::MAX).into_string(), "x");
    }

    // ── line() ──────────────────────────────────────────────────────────

    #[test]
    fn line_stops_at_gap() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        put(&mut buf, 5, 0, "C");
        assert_eq!(buf.line(0).into_string(), "AB");
    }

    #[test]
    fn line_stops_at_sentinel() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        buf.insert(2, 0, Cell::empty(Brush::DEFAULT));
        put(&mut buf, 3, 0, "CD");
        assert_eq!(buf.line(0).into_string(), "AB");
    }

    #[test]
    fn line_includes_newline_then_stops() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB\nCD");
        assert_eq!(buf.line(0).into_string(), "AB\n");
    }

    #[test]
    fn line_starts_at_first_written_column() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 4, 2, "hey");
        assert_eq!(buf.line(2).into_string(), "hey");
    }

    #[test]
    fn line_of_missing_row_is_empty() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 1, "x");
        assert_eq!(buf.line(0).count(), 0);
    }

    #[test]
    fn line_does_not_cross_rows() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        put(&mut buf, 0, 1, "CD");
        assert_eq!(buf.line(0).collect::<Vec<_>>(), vec![65, 66]);
    }

    #[test]
    fn line_is_recomputed_per_call() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        assert_eq!(buf.line(0).into_string(), "AB");
        put(&mut buf, 2, 0, "C");
        assert_eq!(buf.line(0).into_string(), "ABC");
    }

    // ── text() ──────────────────────────────────────────────────────────

    #[test]
    fn text_continues_into_next_row() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        put(&mut buf, 0, 1, "CD");
        assert_eq!(buf.text(0).into_string(), "ABCD");
    }

    #[test]
    fn text_keeps_newline_and_continues() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB\n");
        put(&mut buf, 0, 1, "CD");
        assert_eq!(buf.text(0).into_string(), "AB\nCD");
    }

    #[test]
    fn text_stops_at_missing_row() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        put(&mut buf, 0, 2, "CD");
        assert_eq!(buf.text(0).into_string(), "AB");
    }

    #[test]
    fn text_stops_at_gap_in_later_row() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        put(&mut buf, 0, 1, "CD");
        put(&mut buf, 7, 1, "X");
        put(&mut buf, 0, 2, "EF");
        assert_eq!(buf.text(0).into_string(), "ABCD");
    }

    #[test]
    fn text_stops_at_sentinel() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 0, "AB");
        buf.insert(0, 1, Cell::empty(Brush::DEFAULT));
        put(&mut buf, 0, 2, "CD");
        assert_eq!(buf.text(0).into_string(), "AB");
    }

    #[test]
    fn text_of_missing_row_is_empty_even_if_next_exists() {
        let mut buf = ScreenBuffer::new();
        put(&mut buf, 0, 1, "CD");
        assert_eq!(buf.text(0).count(), 0);
    }

    #[test]
    fn non_scalar_codes_are_replaced_in_strings() {
        let mut buf = ScreenBuffer::new();
        buf.insert(
            0,
            0,
            Cell {
                code: 0xD800,
                brush: Brush::DEFAULT,
            },
        );
        assert_eq!(buf.line(0).into_string(), "\u{FFFD}");
    }

    #[test]
    fn collect_from_positions() {
        let buf: ScreenBuffer = [
            (GridPos::new(1, 0), Cell::new('b', Brush::DEFAULT)),
            (GridPos::new(0, 0), Cell::new('a', Brush::DEFAULT)),
        ]
        .into_iter()
        .collect();
        assert_eq!(buf.line(0).into_string(), "ab");
    }
}

// SPDX-License-Identifier: MIT
//
// Grid errors.

use thiserror::Error;

/// Failure to query the screen buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Nothing has been written at this coordinate.
    #[error("no cell written at column {col}, row {row}")]
    SparseMiss {
        col: u32,
        row: u32,
    },
}

// SPDX-License-Identifier: MIT
//
// ink-grid: styled, addressable text on a sparse cell grid.
//
// Text goes in decorated with a tiny inline markup (`#b`, `#ff0000`,
// `#_202020`, `#r`, `/` to escape) and comes out as cells in a sparse
// row/column grid, each carrying the brush it was written with.
//
//   markup ──tokenize──▶ Token stream ──BufferWriter──▶ ScreenBuffer
//                                          ▲   ▲
//                                  Cursor ─┘   └─ StyleState
//
// The Surface bundles buffer, cursor, style and font into the object an
// application prints to each frame, and `layout` turns a finished frame into
// pixel geometry for whatever renderer sits on top.

pub mod brush;
pub mod cell;
pub mod color;
pub mod error;
pub mod layout;
pub mod markup;
pub mod screen;
pub mod surface;
pub mod writer;

pub use brush::{Attr, Brush, StyleState};
pub use cell::Cell;
pub use color::Rgba;
pub use error::GridError;
pub use screen::{Cursor, GridPos, ScreenBuffer};
pub use surface::{Surface, SurfaceConfig};

// SPDX-License-Identifier: MIT
//
// ink-atlas: bitmap font atlas for inkgrid.
//
// A font here is a single raster image sliced into a fixed grid of square
// cells. Cell k (row-major) is the glyph for character code k, so the atlas
// layout must follow the code page the text uses (CP437 for the classic
// terminal look). At load time every cell is scanned once to find the
// bounding box of its ink; the renderer samples only that box and centres
// it inside the screen cell.
//
// Built once, never mutated afterwards. Share it behind an `Arc` between the
// surface and whatever draws it.

pub mod atlas;
pub mod error;
pub mod glyph;

pub use atlas::GlyphAtlas;
pub use error::AtlasError;
pub use glyph::{Glyph, Vec2};

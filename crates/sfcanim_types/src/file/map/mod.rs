//! Tile map support for `sfcanim-rs` project.
//!
//! Background frames keep the dense map produced by the tile engine verbatim.
//! Sprite frames are transcoded into a sparse list that only carries the cells
//! whose tile differs from the frame's empty (all-zero) tile.
//!
//! # Dense Map Entry (16 bits)
//!
//! ```text
//! Bits    Field
//! ------  --------------------------
//! 0-9     tile index
//! 10-12   palette
//! 13      priority
//! 14      horizontal flip
//! 15      vertical flip
//! ```
//!
//! # Sparse Map Entry (4 bytes)
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  --------------------------
//! +0x00   1     x (pixels, modulo 256)
//! +0x01   1     y (pixels, modulo 256)
//! +0x02   2     sprite attribute word (little-endian)
//! ```
//!
//! The sprite attribute word is `vflip<<15 | hflip<<14 | 3<<12 | palette<<9 | tile`.

pub mod attribute;
pub mod sparse;
pub mod tiles;

pub use attribute::{SparseMapEntry, TileAttribute};
pub use sparse::{MapGeometry, SparseMap, transcode_sparse};
pub use tiles::{find_empty_tile, tile_count};

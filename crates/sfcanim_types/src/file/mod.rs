//! File format support for `sfcanim-rs` project.

mod bpp;
mod error;

pub mod anim;
pub mod map;

// Re-export shared types
pub use bpp::Bpp;
pub use error::FormatError;

// Re-export main file types
pub use anim::{File as AnimFile, FrameRecord, Header as AnimHeader};
pub use map::{MapGeometry, SparseMap, SparseMapEntry, TileAttribute};

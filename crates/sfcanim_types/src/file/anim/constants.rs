//! Animation container constants.
//!
//! This module contains the fixed offsets and sizes of the `SP` container layout.

/// Magic tag at the start of every container ("SP")
pub const MAGIC: [u8; 2] = *b"SP";

/// Size of the main header (magic + three u16 fields + bpp byte)
pub const HEADER_SIZE: usize = 9;

/// Size of one frame pointer table entry
pub const POINTER_SIZE: usize = 2;

/// Size of the per-frame sub-header (tile, map and palette lengths)
pub const FRAME_HEADER_SIZE: usize = 6;

/// Maximum number of frames a container can index
pub const MAX_FRAMES: usize = u16::MAX as usize;

/// Offset of the max tile-blob size field
pub const MAX_TILE_SIZE_OFFSET: usize = 2;

/// Offset of the palette size field
pub const PALETTE_SIZE_OFFSET: usize = 4;

/// Offset of the frame count field
pub const FRAME_COUNT_OFFSET: usize = 6;

/// Offset of the encoded bit depth byte
pub const BPP_OFFSET: usize = 8;

/// Offset where the frame pointer table starts
pub const POINTER_TABLE_OFFSET: usize = HEADER_SIZE;

//! Prelude module for `sfcanim_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use sfcanim_types::prelude::*;
//!
//! let attr = TileAttribute::from_raw(0x4005);
//! assert_eq!(attr.tile_index, 5);
//! assert!(attr.h_flip);
//! ```

#[doc(inline)]
pub use crate::file::{
	// Container types
	AnimFile,
	AnimHeader,
	Bpp,
	FormatError,
	FrameRecord,

	// Map types
	MapGeometry,
	SparseMap,
	SparseMapEntry,
	TileAttribute,
};

#[doc(inline)]
pub use crate::file::map::{find_empty_tile, transcode_sparse};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;

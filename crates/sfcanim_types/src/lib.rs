//! This crate provides the binary container format and tile map codecs for the `sfcanim-rs` project.
//!
//! # Formats
//!
//! - **Animation container** (`SP`): header, frame pointer table and per-frame
//!   tile/map/palette records, consumed by 16-bit console playback code
//! - **Dense tile map**: row-major 16-bit background map entries
//! - **Sparse sprite map**: filtered `(x, y, attribute)` entries for sprite frames
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use sfcanim_types::prelude::*;
//!
//! let record = FrameRecord::new(vec![0u8; 32], vec![0u8; 2], vec![0u8; 32]);
//! let anim = AnimFile::new(Bpp::Four, 32, 32, vec![record]).unwrap();
//!
//! assert_eq!(anim.frame_count(), 1);
//! assert_eq!(&anim.to_bytes()[0..2], b"SP");
//! ```

pub mod file;

/// `use sfcanim_types::prelude::*;` to import commonly used items.
pub mod prelude;

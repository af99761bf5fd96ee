//! This module is separated into its own crate to enable simple dynamic linking for `sfcanim-rs`, and should not be used directly.

/// `use sfcanim_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use sfcanim_compiler;
pub use sfcanim_types;

// Re-export commonly used types at crate root
pub use sfcanim_compiler::{CompileConfig, CompileError, MapMode, Pipeline, SuperFamiconv, TileEngine};
pub use sfcanim_types::file::{AnimFile, Bpp, FormatError, FrameRecord};

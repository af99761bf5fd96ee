//! Prelude module for `sfcanim_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use sfcanim_internal::prelude::*;
//!
//! let config = CompileConfig::new("frames/", "out.anim")
//!     .with_bpp(Bpp::Four)
//!     .with_mode(MapMode::Sprite);
//! assert!(config.validate().is_ok());
//! ```

// Re-export everything from the member crate preludes
#[doc(inline)]
pub use sfcanim_compiler::prelude::*;
#[doc(inline)]
pub use sfcanim_types::prelude::*;

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use sfcanim_compiler;
#[doc(inline)]
pub use sfcanim_types;

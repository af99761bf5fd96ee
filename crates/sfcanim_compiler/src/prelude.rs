//! Prelude module for `sfcanim_compiler`.
//!
//! This module provides a convenient way to import commonly used types and traits.

#[doc(inline)]
pub use crate::{
	// Configuration
	CompileConfig,
	MapMode,

	// Errors
	CompileError,
	EngineError,

	// Engine contract
	EngineOutput,
	EngineRequest,
	SuperFamiconv,
	TileEngine,

	// Pipeline
	Compilation,
	Pipeline,
	Stage,
};

#[doc(inline)]
pub use sfcanim_types::file::Bpp;

//! Contract with the external tile/palette/map generation engine.
//!
//! The engine receives a quantized frame and returns three byte buffers:
//!
//! - **palette**: `colors × bytes-per-entry` in the engine's packed color format
//! - **tiles**: bitplane-packed tiles, `tile count × bytes-per-tile` for the bit depth
//! - **map**: dense row-major 16-bit tile map covering every pixel exactly once,
//!   with tile indices dense from zero
//!
//! The engine is also the authority on hardware tile and palette budgets; its
//! rejection is trusted and never re-validated here.

mod superfamiconv;

use image::RgbImage;
use sfcanim_types::file::Bpp;

use crate::EngineError;

pub use superfamiconv::SuperFamiconv;

/// Input handed to a [`TileEngine`] for one frame.
#[derive(Debug, Clone, Copy)]
pub struct EngineRequest<'a> {
	/// Index of the frame in playback order
	pub frame_index: usize,
	/// Quantized frame image
	pub image: &'a RgbImage,
	/// Target color count per palette
	pub colors: usize,
	/// Number of hardware palettes the engine may use
	pub palettes: u8,
	/// Bit depth
	pub bpp: Bpp,
	/// Tile width in pixels
	pub tile_width: u32,
	/// Tile height in pixels
	pub tile_height: u32,
}

/// Raw buffers produced by a [`TileEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
	/// Packed palette
	pub palette: Vec<u8>,
	/// Bitplane-packed tiles
	pub tiles: Vec<u8>,
	/// Dense 16-bit tile map
	pub map: Vec<u8>,
}

/// A generator of palette, tile and map data for quantized frames.
///
/// Engines are invoked once per frame, sequentially. Any error aborts the run.
pub trait TileEngine {
	/// Human-readable engine name used in diagnostics.
	fn name(&self) -> &str;

	/// Converts one quantized frame.
	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError>;
}

impl<T: TileEngine + ?Sized> TileEngine for Box<T> {
	fn name(&self) -> &str {
		(**self).name()
	}

	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
		(**self).convert(request)
	}
}

impl<T: TileEngine + ?Sized> TileEngine for &mut T {
	fn name(&self) -> &str {
		(**self).name()
	}

	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
		(**self).convert(request)
	}
}

//! Machine-readable summary of a compilation run.

use std::path::PathBuf;

use serde::Serialize;
use sfcanim_types::file::{AnimFile, Bpp};

use crate::compiler::CompiledFrame;
use crate::{CompileConfig, MapMode};

/// Per-frame statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
	/// Frame index
	pub index: usize,
	/// Source image path
	pub source: PathBuf,
	/// Image width in pixels
	pub width: u32,
	/// Image height in pixels
	pub height: u32,
	/// Colors after quantization
	pub colors: usize,
	/// Tile blob length
	pub tiles_len: usize,
	/// Map blob length
	pub map_len: usize,
	/// Palette blob length
	pub palette_len: usize,
	/// Empty tile id used to filter a sprite map
	pub empty_tile: Option<u16>,
	/// Cells in the dense map produced by the engine
	pub dense_cells: usize,
}

impl From<&CompiledFrame> for FrameReport {
	fn from(frame: &CompiledFrame) -> Self {
		Self {
			index: frame.index,
			source: frame.source.clone(),
			width: frame.width,
			height: frame.height,
			colors: frame.colors,
			tiles_len: frame.tiles.len(),
			map_len: frame.map.len(),
			palette_len: frame.palette.len(),
			empty_tile: frame.empty_tile,
			dense_cells: frame.dense_cells,
		}
	}
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
	/// Map mode
	pub mode: MapMode,
	/// Bits per pixel
	pub bpp: Bpp,
	/// Tile width in pixels
	pub tile_width: u32,
	/// Tile height in pixels
	pub tile_height: u32,
	/// Palettes the engine was allowed to use
	pub palettes: u8,
	/// Header `max_tile_size`
	pub max_tile_size: u16,
	/// Header `palette_size`
	pub palette_size: u16,
	/// Size of the serialized container in bytes
	pub total_size: usize,
	/// Per-frame statistics, in frame order
	pub frames: Vec<FrameReport>,
}

impl BuildReport {
	/// Builds the report for a packaged animation.
	pub fn new(config: &CompileConfig, animation: &AnimFile, frames: Vec<FrameReport>) -> Self {
		let header = animation.header();
		Self {
			mode: config.mode,
			bpp: config.bpp,
			tile_width: config.tile_width,
			tile_height: config.tile_height,
			palettes: config.palettes,
			max_tile_size: header.max_tile_size(),
			palette_size: header.palette_size(),
			total_size: animation.encoded_len(),
			frames,
		}
	}

	/// Sum of all map blob lengths.
	pub fn total_map_len(&self) -> usize {
		self.frames.iter().map(|f| f.map_len).sum()
	}

	/// Sum of all tile blob lengths.
	pub fn total_tiles_len(&self) -> usize {
		self.frames.iter().map(|f| f.tiles_len).sum()
	}
}

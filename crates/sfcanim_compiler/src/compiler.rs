//! Per-frame compilation: quantize, convert with the engine, encode the map.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::debug;
use sfcanim_types::file::{FrameRecord, MapGeometry};

use crate::encoder::{MapEncoder, MapInput};
use crate::engine::{EngineOutput, EngineRequest, TileEngine};
use crate::{CompileConfig, CompileError, quantize};

/// A frame after the engine ran, before its map is encoded.
#[derive(Debug, Clone)]
pub struct ConvertedFrame {
	/// Frame index
	pub index: usize,
	/// Source image path
	pub source: PathBuf,
	/// Image width in pixels
	pub width: u32,
	/// Image height in pixels
	pub height: u32,
	/// Number of colors left after quantization
	pub colors: usize,
	/// Raw engine buffers
	pub output: EngineOutput,
}

/// A fully compiled frame, ready for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFrame {
	/// Frame index
	pub index: usize,
	/// Source image path
	pub source: PathBuf,
	/// Image width in pixels
	pub width: u32,
	/// Image height in pixels
	pub height: u32,
	/// Number of colors left after quantization
	pub colors: usize,
	/// Bitplane-packed tiles
	pub tiles: Vec<u8>,
	/// Encoded map (dense or sparse)
	pub map: Vec<u8>,
	/// Palette blob; empty for every frame but the first
	pub palette: Vec<u8>,
	/// Empty tile id found while encoding a sprite map
	pub empty_tile: Option<u16>,
	/// Number of cells in the engine's dense map
	pub dense_cells: usize,
}

impl CompiledFrame {
	/// Converts the frame into a container record.
	pub fn into_record(self) -> FrameRecord {
		FrameRecord::new(self.tiles, self.map, self.palette)
	}
}

/// Compiles frames one at a time using a shared configuration.
pub struct FrameCompiler<'a> {
	config: &'a CompileConfig,
	encoder: Box<dyn MapEncoder>,
}

impl<'a> FrameCompiler<'a> {
	/// Creates a compiler using the encoder of the configured mode.
	pub fn new(config: &'a CompileConfig) -> Self {
		Self::with_encoder(config, config.mode.encoder())
	}

	/// Creates a compiler with an explicit map encoder.
	pub fn with_encoder(config: &'a CompileConfig, encoder: Box<dyn MapEncoder>) -> Self {
		Self {
			config,
			encoder,
		}
	}

	/// Returns the map encoder in use.
	pub fn encoder(&self) -> &dyn MapEncoder {
		self.encoder.as_ref()
	}

	/// Loads, quantizes and converts one frame.
	pub fn convert<E: TileEngine + ?Sized>(
		&self,
		engine: &mut E,
		index: usize,
		path: &Path,
	) -> Result<ConvertedFrame, CompileError> {
		let image = load_frame(index, path)?;
		let quantized = quantize(&image, self.config.color_count());
		debug!(
			"Frame {}: {} ({}x{}), {} colors after quantization",
			index,
			path.display(),
			image.width(),
			image.height(),
			quantized.color_count()
		);

		let request = EngineRequest {
			frame_index: index,
			image: quantized.image(),
			colors: self.config.color_count(),
			palettes: self.config.palettes,
			bpp: self.config.bpp,
			tile_width: self.config.tile_width,
			tile_height: self.config.tile_height,
		};

		let output =
			engine.convert(&request).map_err(|source| CompileError::from_engine(index, engine.name(), source))?;

		Ok(ConvertedFrame {
			index,
			source: path.to_path_buf(),
			width: image.width(),
			height: image.height(),
			colors: quantized.color_count(),
			output,
		})
	}

	/// Encodes the map of a converted frame and applies the shared-palette rule.
	pub fn encode(&self, frame: ConvertedFrame) -> Result<CompiledFrame, CompileError> {
		let input = MapInput {
			frame_index: frame.index,
			dense_map: &frame.output.map,
			tiles: &frame.output.tiles,
			geometry: MapGeometry::new(self.config.tile_width, self.config.tile_height, frame.width, frame.height),
			bpp: self.config.bpp,
		};

		let encoded = self.encoder.encode(&input).map_err(|err| CompileError::FormatConstraint {
			frame: frame.index,
			message: err.to_string(),
		})?;

		let EngineOutput {
			palette,
			tiles,
			..
		} = frame.output;

		Ok(CompiledFrame {
			index: frame.index,
			source: frame.source,
			width: frame.width,
			height: frame.height,
			colors: frame.colors,
			tiles,
			map: encoded.bytes,
			palette: if frame.index == 0 { palette } else { Vec::new() },
			empty_tile: encoded.empty_tile,
			dense_cells: encoded.dense_cells,
		})
	}

	/// Runs [`FrameCompiler::convert`] then [`FrameCompiler::encode`].
	pub fn compile<E: TileEngine + ?Sized>(
		&self,
		engine: &mut E,
		index: usize,
		path: &Path,
	) -> Result<CompiledFrame, CompileError> {
		let converted = self.convert(engine, index, path)?;
		self.encode(converted)
	}
}

fn load_frame(index: usize, path: &Path) -> Result<RgbImage, CompileError> {
	let image = image::open(path).map_err(|source| CompileError::Image {
		frame: index,
		path: path.to_path_buf(),
		source,
	})?;
	Ok(image.to_rgb8())
}

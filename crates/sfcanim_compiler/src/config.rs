//! Typed configuration consumed by the pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sfcanim_types::file::Bpp;

use crate::CompileError;
use crate::encoder::{DenseEncoder, MapEncoder, SparseEncoder};

/// How the tile map of each frame is stored in the container.
///
/// Deserialization goes through [`FromStr`], so `bg`, `Sprite` or `SPRITE`
/// are all accepted; serialization writes the lowercase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MapMode {
	/// Dense row-major map, stored verbatim
	#[default]
	Background,

	/// Sparse `(x, y, attribute)` list without empty-tile cells
	Sprite,
}

impl MapMode {
	/// Returns the encoder implementing this mode.
	pub fn encoder(self) -> Box<dyn MapEncoder> {
		match self {
			MapMode::Background => Box::new(DenseEncoder),
			MapMode::Sprite => Box::new(SparseEncoder),
		}
	}
}

impl FromStr for MapMode {
	type Err = CompileError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"bg" | "background" => Ok(MapMode::Background),
			"sprite" => Ok(MapMode::Sprite),
			other => Err(CompileError::Configuration(format!(
				"unknown mode \"{other}\" (expected bg or sprite)"
			))),
		}
	}
}

impl TryFrom<String> for MapMode {
	type Error = CompileError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for MapMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MapMode::Background => write!(f, "bg"),
			MapMode::Sprite => write!(f, "sprite"),
		}
	}
}

/// Immutable settings for one pipeline run.
///
/// # Examples
///
/// ```
/// use sfcanim_compiler::{CompileConfig, MapMode};
/// use sfcanim_types::file::Bpp;
///
/// let config = CompileConfig::new("frames/", "out.anim");
/// assert_eq!(config.bpp, Bpp::Four);
/// assert_eq!(config.mode, MapMode::Background);
/// assert_eq!((config.tile_width, config.tile_height), (8, 8));
///
/// let sprite = config.with_mode(MapMode::Sprite).with_tile_size(16, 16);
/// assert!(sprite.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
	/// Directory holding the frame images
	pub input_dir: PathBuf,
	/// Destination of the packaged container
	pub output_file: PathBuf,
	/// Number of hardware palettes the engine may use
	pub palettes: u8,
	/// Tile width in pixels
	pub tile_width: u32,
	/// Tile height in pixels
	pub tile_height: u32,
	/// Bit depth of tiles and palettes
	pub bpp: Bpp,
	/// Map encoding
	pub mode: MapMode,
}

impl CompileConfig {
	/// Default tile edge in pixels
	pub const DEFAULT_TILE_SIZE: u32 = 8;

	/// Tile edges supported by the hardware
	pub const TILE_SIZES: [u32; 2] = [8, 16];

	/// Maximum number of hardware palettes
	pub const MAX_PALETTES: u8 = 8;

	/// Creates a configuration with default settings: one palette, 8x8 tiles,
	/// 4bpp, background mode.
	pub fn new(input_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
		Self {
			input_dir: input_dir.into(),
			output_file: output_file.into(),
			palettes: 1,
			tile_width: Self::DEFAULT_TILE_SIZE,
			tile_height: Self::DEFAULT_TILE_SIZE,
			bpp: Bpp::default(),
			mode: MapMode::default(),
		}
	}

	/// Sets the number of palettes.
	pub fn with_palettes(mut self, palettes: u8) -> Self {
		self.palettes = palettes;
		self
	}

	/// Sets the tile size.
	pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
		self.tile_width = width;
		self.tile_height = height;
		self
	}

	/// Sets the bit depth.
	pub fn with_bpp(mut self, bpp: Bpp) -> Self {
		self.bpp = bpp;
		self
	}

	/// Sets the map mode.
	pub fn with_mode(mut self, mode: MapMode) -> Self {
		self.mode = mode;
		self
	}

	/// Returns the input directory.
	pub fn input_dir(&self) -> &Path {
		&self.input_dir
	}

	/// Returns the output file path.
	pub fn output_file(&self) -> &Path {
		&self.output_file
	}

	/// Number of colors each frame is quantized to (16 at 4bpp, 4 at 2bpp).
	pub fn color_count(&self) -> usize {
		self.bpp.colors()
	}

	/// Size in bytes of one packed tile.
	pub fn bytes_per_tile(&self) -> usize {
		self.bpp.bytes_per_tile(self.tile_width, self.tile_height)
	}

	/// Checks the settings against hardware limits.
	pub fn validate(&self) -> Result<(), CompileError> {
		if !(1..=Self::MAX_PALETTES).contains(&self.palettes) {
			return Err(CompileError::Configuration(format!(
				"palette count {} is outside 1..={}",
				self.palettes,
				Self::MAX_PALETTES
			)));
		}

		for (name, size) in [("width", self.tile_width), ("height", self.tile_height)] {
			if !Self::TILE_SIZES.contains(&size) {
				return Err(CompileError::Configuration(format!(
					"tile {name} {size} is not supported (expected 8 or 16)"
				)));
			}
		}

		Ok(())
	}
}

//! Layered settings: defaults, `anim_writer.toml`, `ANIM_WRITER_*` variables,
//! then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use sfcanim_rs::prelude::*;

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "anim_writer";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ANIM_WRITER";

/// Resolved settings for a `compile` run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
	/// Number of palettes
	pub palettes: u8,
	/// Tile width in pixels
	pub tile_width: u32,
	/// Tile height in pixels
	pub tile_height: u32,
	/// Bits per pixel, 2 or 4
	pub bpp: u8,
	/// `bg` or `sprite`
	pub mode: MapMode,
	/// Explicit `superfamiconv` executable
	pub engine: Option<PathBuf>,
	/// Scratch directory root for engine runs
	pub scratch_dir: Option<PathBuf>,
	/// Values above zero hand the run to the legacy writer
	pub tile_threshold: u32,
	/// Legacy writer command
	pub legacy_writer: Option<PathBuf>,
}

/// Values given on the command line; `None` leaves the lower layers in charge.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub palettes: Option<u8>,
	pub tile_width: Option<u32>,
	pub tile_height: Option<u32>,
	pub bpp: Option<u8>,
	pub mode: Option<String>,
	pub engine: Option<PathBuf>,
	pub scratch_dir: Option<PathBuf>,
	pub tile_threshold: Option<u32>,
	pub legacy_writer: Option<PathBuf>,
}

impl Settings {
	/// Resolves the settings layers.
	///
	/// # Arguments
	///
	/// * `config_file` - Explicit settings file; must exist when given
	/// * `overrides` - Command-line values, applied last
	pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
		let file = match config_file {
			Some(path) => File::from(path).required(true),
			None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
		};

		let builder = Config::builder()
			.set_default("palettes", 1_i64)?
			.set_default("tile_width", i64::from(CompileConfig::DEFAULT_TILE_SIZE))?
			.set_default("tile_height", i64::from(CompileConfig::DEFAULT_TILE_SIZE))?
			.set_default("bpp", i64::from(Bpp::default().bits()))?
			.set_default("mode", MapMode::default().to_string())?
			.set_default("tile_threshold", 0_i64)?
			.add_source(file)
			.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
			.set_override_option("palettes", overrides.palettes.map(i64::from))?
			.set_override_option("tile_width", overrides.tile_width.map(i64::from))?
			.set_override_option("tile_height", overrides.tile_height.map(i64::from))?
			.set_override_option("bpp", overrides.bpp.map(i64::from))?
			.set_override_option("mode", overrides.mode.clone())?
			.set_override_option("engine", overrides.engine.as_deref().map(path_value))?
			.set_override_option("scratch_dir", overrides.scratch_dir.as_deref().map(path_value))?
			.set_override_option("tile_threshold", overrides.tile_threshold.map(i64::from))?
			.set_override_option("legacy_writer", overrides.legacy_writer.as_deref().map(path_value))?;

		let settings: Self = builder
			.build()
			.context("Failed to read settings")?
			.try_deserialize()
			.context("Invalid settings")?;
		debug!("Resolved settings: {settings:?}");
		Ok(settings)
	}

	/// Builds the pipeline configuration for one run.
	pub fn compile_config(&self, input_dir: &Path, output_file: &Path) -> Result<CompileConfig> {
		let bpp = Bpp::try_from(self.bpp).context("Invalid bpp setting")?;
		let config = CompileConfig::new(input_dir, output_file)
			.with_palettes(self.palettes)
			.with_tile_size(self.tile_width, self.tile_height)
			.with_bpp(bpp)
			.with_mode(self.mode);
		config.validate()?;
		Ok(config)
	}

	/// Builds the tile engine.
	pub fn engine(&self) -> SuperFamiconv {
		let engine = match &self.engine {
			Some(program) => SuperFamiconv::new(program),
			None => SuperFamiconv::locate(),
		};
		match &self.scratch_dir {
			Some(dir) => engine.with_scratch_root(dir),
			None => engine,
		}
	}

	/// Returns `true` if the run goes to the legacy writer.
	pub fn uses_legacy_writer(&self) -> bool {
		self.tile_threshold > 0
	}

	/// Arguments forwarded to the legacy writer.
	pub fn legacy_args(&self, input_dir: &Path, output_file: &Path) -> Vec<String> {
		vec![
			"-infolder".to_string(),
			input_dir.display().to_string(),
			"-outfile".to_string(),
			output_file.display().to_string(),
			"-palettes".to_string(),
			self.palettes.to_string(),
			"-tilesizex".to_string(),
			self.tile_width.to_string(),
			"-tilesizey".to_string(),
			self.tile_height.to_string(),
			"-bpp".to_string(),
			self.bpp.to_string(),
			"-mode".to_string(),
			self.mode.to_string(),
			"-tilethreshold".to_string(),
			self.tile_threshold.to_string(),
		]
	}
}

fn path_value(path: &Path) -> String {
	path.to_string_lossy().into_owned()
}

//! SP animation writer
//!
//! Compiles a folder of ordered frame images into an `SP` animation container
//! for 16-bit console playback, and inspects existing containers.
//!
//! # Subcommands
//!
//! - **compile**: quantize every frame, run the tile engine, encode maps and
//!   write the container
//! - **info**: display the header and per-frame section sizes of a container
//!
//! # Settings
//!
//! Compile settings are layered, later layers winning:
//!
//! 1. Built-in defaults (1 palette, 8x8 tiles, 4bpp, `bg` mode)
//! 2. `anim_writer.toml` in the working directory, or the file given with `--config`
//! 3. `ANIM_WRITER_*` environment variables (e.g. `ANIM_WRITER_ENGINE`)
//! 4. Command-line flags
//!
//! # Usage
//!
//! ```bash
//! # Compile a sprite animation
//! anim_writer compile frames/bang/ build/bang.anim --mode sprite
//!
//! # Full-screen background with 8 palettes and a build report
//! anim_writer compile frames/title/ build/title.anim -p 8 --report build/title.json
//!
//! # Show container information
//! anim_writer info build/bang.anim --detailed
//! ```

mod settings;

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use sfcanim_rs::prelude::*;

use crate::settings::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "anim_writer")]
#[command(author = "sfcanim-rs project")]
#[command(version)]
#[command(about = "SP animation writer - compile frame folders into SNES animation containers", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Compile a folder of frame images into an animation container
	Compile(CompileArgs),

	/// Display information about an animation container
	Info {
		/// Input animation file
		#[arg(value_name = "INPUT_ANIM")]
		input: PathBuf,

		/// Show per-frame pointers and section sizes
		#[arg(short, long)]
		detailed: bool,
	},
}

#[derive(Args)]
struct CompileArgs {
	/// Folder containing the frame images
	#[arg(value_name = "INPUT_DIR")]
	input: PathBuf,

	/// Output animation file
	#[arg(value_name = "OUTPUT_ANIM")]
	output: PathBuf,

	/// Number of palettes (1-8)
	#[arg(short, long, value_name = "COUNT")]
	palettes: Option<u8>,

	/// Tile width in pixels (8 or 16)
	#[arg(long, value_name = "PIXELS")]
	tile_width: Option<u32>,

	/// Tile height in pixels (8 or 16)
	#[arg(long, value_name = "PIXELS")]
	tile_height: Option<u32>,

	/// Bits per pixel (2 or 4)
	#[arg(short, long, value_name = "BPP")]
	bpp: Option<u8>,

	/// Map mode: bg or sprite
	#[arg(short, long, value_name = "MODE")]
	mode: Option<String>,

	/// Path to the superfamiconv executable
	#[arg(short, long, value_name = "PROGRAM")]
	engine: Option<PathBuf>,

	/// Directory for engine scratch files
	#[arg(long, value_name = "DIR")]
	scratch_dir: Option<PathBuf>,

	/// Hand the run to the legacy lossy writer when above zero
	#[arg(long, value_name = "TILES")]
	tile_threshold: Option<u32>,

	/// Legacy writer command used with --tile-threshold
	#[arg(long, value_name = "PROGRAM")]
	legacy_writer: Option<PathBuf>,

	/// Settings file (defaults to anim_writer.toml when present)
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Write a JSON build report
	#[arg(short, long, value_name = "FILE")]
	report: Option<PathBuf>,

	/// Show verbose output
	#[arg(short, long)]
	verbose: bool,
}

impl CompileArgs {
	fn overrides(&self) -> Overrides {
		Overrides {
			palettes: self.palettes,
			tile_width: self.tile_width,
			tile_height: self.tile_height,
			bpp: self.bpp,
			mode: self.mode.clone(),
			engine: self.engine.clone(),
			scratch_dir: self.scratch_dir.clone(),
			tile_threshold: self.tile_threshold,
			legacy_writer: self.legacy_writer.clone(),
		}
	}
}

fn main() {
	let cli = Cli::parse();

	let verbose = matches!(&cli.command, Commands::Compile(args) if args.verbose);
	env_logger::init_from_env(env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "info" }));

	let result = match cli.command {
		Commands::Compile(args) => compile(&args),
		Commands::Info {
			input,
			detailed,
		} => show_info(&input, detailed),
	};

	if let Err(err) = result {
		error!("{err:#}");
		std::process::exit(1);
	}
}

fn compile(args: &CompileArgs) -> Result<()> {
	let settings = Settings::load(args.config.as_deref(), &args.overrides())?;

	if settings.uses_legacy_writer() {
		return run_legacy_writer(&settings, &args.input, &args.output);
	}

	let config = settings.compile_config(&args.input, &args.output)?;
	info!(
		"Compiling {} -> {} ({} mode, {}, {}x{} tiles, {} palette(s))",
		args.input.display(),
		args.output.display(),
		config.mode,
		config.bpp,
		config.tile_width,
		config.tile_height,
		config.palettes
	);

	let mut pipeline = Pipeline::new(config, settings.engine());
	let compilation = pipeline.run()?;
	info!("{}", compilation.animation);

	if let Some(path) = &args.report {
		let json = serde_json::to_string_pretty(&compilation.report)?;
		std::fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))?;
		info!("Report written to {}", path.display());
	}

	Ok(())
}

fn run_legacy_writer(settings: &Settings, input: &Path, output: &Path) -> Result<()> {
	let Some(program) = &settings.legacy_writer else {
		bail!("Tile threshold {} requires a legacy writer (--legacy-writer)", settings.tile_threshold);
	};

	info!(
		"Tile threshold {} > 0, handing the run to legacy writer {}",
		settings.tile_threshold,
		program.display()
	);

	let status = Command::new(program)
		.args(settings.legacy_args(input, output))
		.status()
		.with_context(|| format!("Failed to launch {}", program.display()))?;

	if !status.success() {
		bail!("Legacy writer failed with {status}");
	}
	Ok(())
}

fn show_info(input: &Path, detailed: bool) -> Result<()> {
	let animation = AnimFile::open(input).with_context(|| format!("Failed to read {}", input.display()))?;
	let header = animation.header();

	println!("File: {}", input.display());
	println!("Size: {} bytes", animation.encoded_len());
	println!("Frames: {}", header.frame_count());
	println!("Bit depth: {}", header.bpp());
	println!("Max tile size: {} bytes", header.max_tile_size());
	println!("Palette size: {} bytes", header.palette_size());

	if detailed {
		println!();
		println!("{:>5}  {:>7}  {:>7}  {:>7}  {:>7}", "Frame", "Offset", "Tiles", "Map", "Palette");
		for (index, (pointer, frame)) in animation.frame_pointers().iter().zip(animation.iter()).enumerate() {
			println!(
				"{:>5}  {:>#7x}  {:>7}  {:>7}  {:>7}",
				index,
				pointer,
				frame.tiles().len(),
				frame.map().len(),
				frame.palette().len()
			);
		}
	}

	Ok(())
}

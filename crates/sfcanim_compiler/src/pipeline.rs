//! Sequential compilation pipeline.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use sfcanim_types::file::anim::constants::{HEADER_SIZE, POINTER_SIZE};
use sfcanim_types::file::{AnimFile, FormatError, FrameRecord};

use crate::compiler::FrameCompiler;
use crate::engine::TileEngine;
use crate::report::{BuildReport, FrameReport};
use crate::{CompileConfig, CompileError, FrameBudget, MapMode, enumerate_frames};

/// Progress of a [`Pipeline`].
///
/// ```text
/// Idle -> Enumerating -> Compiling(i) [-> Transcoding(i)] -> ... -> Packaging -> Done
///
/// Transcoding is entered in sprite mode only. Any error ends in Failed.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
	/// Nothing has run yet
	#[default]
	Idle,
	/// Listing frame files
	Enumerating,
	/// Running the tile engine on a frame
	Compiling {
		/// Frame index
		frame: usize,
		/// Number of frames in the run
		total: usize,
	},
	/// Encoding the sparse map of a sprite frame
	Transcoding {
		/// Frame index
		frame: usize,
	},
	/// Building and writing the container
	Packaging,
	/// The run completed
	Done,
	/// The run aborted
	Failed,
}

impl std::fmt::Display for Stage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Stage::Idle => write!(f, "idle"),
			Stage::Enumerating => write!(f, "enumerating"),
			Stage::Compiling {
				frame,
				total,
			} => write!(f, "compiling frame {}/{}", frame + 1, total),
			Stage::Transcoding {
				frame,
			} => write!(f, "transcoding frame {frame}"),
			Stage::Packaging => write!(f, "packaging"),
			Stage::Done => write!(f, "done"),
			Stage::Failed => write!(f, "failed"),
		}
	}
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Compilation {
	/// Packaged container
	pub animation: AnimFile,
	/// Run statistics
	pub report: BuildReport,
}

/// Drives a full compilation: enumerate, compile every frame, package.
pub struct Pipeline<E: TileEngine> {
	config: CompileConfig,
	engine: E,
	stage: Stage,
}

impl<E: TileEngine> Pipeline<E> {
	/// Creates a pipeline for `config` using `engine` for tile generation.
	pub fn new(config: CompileConfig, engine: E) -> Self {
		Self {
			config,
			engine,
			stage: Stage::Idle,
		}
	}

	/// Returns the current stage.
	pub fn stage(&self) -> Stage {
		self.stage
	}

	/// Returns the run configuration.
	pub fn config(&self) -> &CompileConfig {
		&self.config
	}

	/// Returns the tile engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// Consumes the pipeline and returns its engine.
	pub fn into_engine(self) -> E {
		self.engine
	}

	/// Compiles every frame into an in-memory container without writing it.
	///
	/// # Errors
	///
	/// Fails on invalid settings, a missing or empty input folder, and on the
	/// first frame that cannot be loaded, converted or encoded.
	pub fn compile(&mut self) -> Result<Compilation, CompileError> {
		let result = self.compile_frames();
		self.stage = if result.is_ok() { Stage::Done } else { Stage::Failed };
		result
	}

	/// Compiles every frame and writes the container to the output file.
	///
	/// The file is written through a temporary sibling and renamed into place.
	/// A failed run leaves no output file.
	pub fn run(&mut self) -> Result<Compilation, CompileError> {
		let result = self.compile_frames().and_then(|compilation| {
			write_atomic(self.config.output_file(), &compilation.animation.to_bytes())?;
			Ok(compilation)
		});
		let compilation = match result {
			Ok(compilation) => compilation,
			Err(err) => {
				self.stage = Stage::Failed;
				return Err(err);
			}
		};

		self.stage = Stage::Done;
		info!("Successfully wrote animation file {}", self.config.output_file().display());
		Ok(compilation)
	}

	fn compile_frames(&mut self) -> Result<Compilation, CompileError> {
		self.config.validate()?;

		self.stage = Stage::Enumerating;
		let paths = enumerate_frames(self.config.input_dir())?;
		let total = paths.len();
		info!("Processing {} frames...", total);

		let compiler = FrameCompiler::new(&self.config);
		let mut budget = FrameBudget::new();
		let mut records = Vec::with_capacity(total);
		let mut reports = Vec::with_capacity(total);
		let mut offset = HEADER_SIZE + POINTER_SIZE * total;

		for (index, path) in paths.iter().enumerate() {
			self.stage = Stage::Compiling {
				frame: index,
				total,
			};
			let converted = compiler.convert(&mut self.engine, index, path)?;

			if self.config.mode == MapMode::Sprite {
				self.stage = Stage::Transcoding {
					frame: index,
				};
			}
			let frame = compiler.encode(converted)?;

			budget.record(index, frame.tiles.len(), frame.palette.len());
			debug!(
				"Frame {}: tiles {} bytes, map {} bytes, palette {} bytes",
				index,
				frame.tiles.len(),
				frame.map.len(),
				frame.palette.len()
			);
			reports.push(FrameReport::from(&frame));
			let record = frame.into_record();
			offset = place_record(index, offset, &record)?;
			records.push(record);
		}

		self.stage = Stage::Packaging;
		let animation = AnimFile::new(self.config.bpp, budget.max_tile_size(), budget.palette_size(), records)?;
		let report = BuildReport::new(&self.config, &animation, reports);

		Ok(Compilation {
			animation,
			report,
		})
	}
}

/// Checks that `record`, stored at `offset`, fits the container's 16-bit
/// fields and returns the offset of the next record.
fn place_record(index: usize, offset: usize, record: &FrameRecord) -> Result<usize, CompileError> {
	let constraint = |err: FormatError| CompileError::FormatConstraint {
		frame: index,
		message: err.to_string(),
	};
	record.validate().map_err(constraint)?;
	FormatError::check_u16("frame pointer", offset).map_err(constraint)?;
	Ok(offset + record.encoded_len())
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CompileError> {
	let io_error = |path: &Path| {
		let path = path.to_path_buf();
		move |source: std::io::Error| CompileError::Io {
			path,
			source,
		}
	};

	let parent = match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
		_ => PathBuf::from("."),
	};
	std::fs::create_dir_all(&parent).map_err(io_error(&parent))?;

	let mut file = tempfile::NamedTempFile::new_in(&parent).map_err(io_error(&parent))?;
	file.write_all(data).map_err(io_error(file.path()))?;
	file.persist(path).map_err(|err| io_error(path)(err.error))?;
	Ok(())
}

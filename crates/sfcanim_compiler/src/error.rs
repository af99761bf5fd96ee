//! Error types for frame compilation.

use std::path::PathBuf;

use sfcanim_types::file::FormatError;
use thiserror::Error;

/// Errors reported by a [`TileEngine`](crate::TileEngine)
#[derive(Debug, Error)]
pub enum EngineError {
	/// The engine executable could not be started
	#[error("Failed to launch {program}: {source}")]
	Spawn {
		/// Program that was launched
		program: String,
		/// Underlying error
		#[source]
		source: std::io::Error,
	},

	/// The engine exited unsuccessfully
	#[error("`{command}` exited with {status}\n{output}")]
	Failed {
		/// Command line that failed
		command: String,
		/// Exit status description
		status: String,
		/// Captured stdout and stderr
		output: String,
	},

	/// The engine rejected the frame because it exceeds a tile or palette budget
	#[error("`{command}` reported a tile or palette overflow\n{output}")]
	Overflow {
		/// Command line that failed
		command: String,
		/// Captured stdout and stderr
		output: String,
	},

	/// An output file the engine should have produced is missing or unreadable
	#[error("Engine output {} is unreadable: {source}", .path.display())]
	MissingOutput {
		/// Expected output path
		path: PathBuf,
		/// Underlying error
		#[source]
		source: std::io::Error,
	},

	/// The engine rejected its input for a reason of its own
	#[error("{0}")]
	Rejected(String),

	/// Scratch space could not be prepared
	#[error("Scratch directory error: {0}")]
	Scratch(#[from] std::io::Error),

	/// The quantized frame could not be written for the engine
	#[error("Cannot write engine input image: {0}")]
	Image(#[from] image::ImageError),
}

impl EngineError {
	/// Returns `true` if the engine signaled a hardware budget overflow.
	pub fn is_overflow(&self) -> bool {
		matches!(self, EngineError::Overflow { .. })
	}
}

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum CompileError {
	/// Invalid settings
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// The input folder does not exist
	#[error("Input folder \"{}\" is nonexistent", .0.display())]
	MissingInputDirectory(PathBuf),

	/// The input folder holds no frame images
	#[error("Input folder \"{}\" does not contain any parseable frame image files", .0.display())]
	NoFrames(PathBuf),

	/// A frame image could not be decoded
	#[error("Frame {frame}: cannot load {}: {source}", .path.display())]
	Image {
		/// Frame index
		frame: usize,
		/// Frame file
		path: PathBuf,
		/// Underlying error
		#[source]
		source: image::ImageError,
	},

	/// The tile engine failed
	#[error("Frame {frame}: {engine} failed: {source}")]
	EngineInvocation {
		/// Frame index
		frame: usize,
		/// Engine name
		engine: String,
		/// Underlying error
		#[source]
		source: EngineError,
	},

	/// The frame does not fit the hardware or container limits
	#[error("Frame {frame}: {message}")]
	FormatConstraint {
		/// Frame index
		frame: usize,
		/// Description of the violated constraint
		message: String,
	},

	/// File system error on scratch or output files
	#[error("I/O error on {}: {source}", .path.display())]
	Io {
		/// Path being accessed
		path: PathBuf,
		/// Underlying error
		#[source]
		source: std::io::Error,
	},

	/// The compiled frames cannot be packaged
	#[error(transparent)]
	Container(#[from] FormatError),
}

impl CompileError {
	/// Returns the index of the frame that caused the error, if any.
	pub fn frame(&self) -> Option<usize> {
		match self {
			CompileError::Image {
				frame,
				..
			}
			| CompileError::EngineInvocation {
				frame,
				..
			}
			| CompileError::FormatConstraint {
				frame,
				..
			} => Some(*frame),
			_ => None,
		}
	}

	/// Wraps an engine error for `frame`, promoting overflow signals to
	/// [`CompileError::FormatConstraint`].
	pub fn from_engine(frame: usize, engine: &str, source: EngineError) -> Self {
		if source.is_overflow() {
			return CompileError::FormatConstraint {
				frame,
				message: source.to_string(),
			};
		}

		CompileError::EngineInvocation {
			frame,
			engine: engine.to_string(),
			source,
		}
	}
}

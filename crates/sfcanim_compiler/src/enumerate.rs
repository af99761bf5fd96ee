//! Frame file discovery.

use std::path::{Path, PathBuf};

use log::debug;

use crate::CompileError;

/// Raster extensions accepted as animation frames (compared case-insensitively)
pub const FRAME_EXTENSIONS: [&str; 3] = ["png", "gif", "bmp"];

/// Lists the frame images of `dir` in playback order.
///
/// Only regular files with a recognized raster extension are kept; they are
/// sorted by file name, ascending.
///
/// # Errors
///
/// - [`CompileError::MissingInputDirectory`] if `dir` does not exist
/// - [`CompileError::NoFrames`] if no matching file is found
/// - [`CompileError::Io`] if the directory cannot be read
pub fn enumerate_frames(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
	if !dir.is_dir() {
		return Err(CompileError::MissingInputDirectory(dir.to_path_buf()));
	}

	let io_error = |source| CompileError::Io {
		path: dir.to_path_buf(),
		source,
	};

	let mut frames = Vec::new();
	for entry in std::fs::read_dir(dir).map_err(io_error)? {
		let path = entry.map_err(io_error)?.path();
		if path.is_file() && is_frame_file(&path) {
			frames.push(path);
		}
	}

	if frames.is_empty() {
		return Err(CompileError::NoFrames(dir.to_path_buf()));
	}

	frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
	debug!("Found {} frames in {}", frames.len(), dir.display());

	Ok(frames)
}

fn is_frame_file(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| FRAME_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
}

//! Tile engine backed by the `superfamiconv` executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::ImageFormat;
use log::{debug, trace};

use super::{EngineOutput, EngineRequest, TileEngine};
use crate::EngineError;

/// Output fragments `superfamiconv` prints when a frame exceeds a hardware budget
const OVERFLOW_MARKERS: [&str; 3] = ["too many", "exceed", "overflow"];

/// Runs `superfamiconv palette`, `tiles` and `map` on every frame.
///
/// Each conversion works in its own scratch directory, removed when the
/// conversion returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperFamiconv {
	program: PathBuf,
	scratch_root: Option<PathBuf>,
}

impl SuperFamiconv {
	/// Executable name looked up on `PATH`
	pub const PROGRAM: &'static str = "superfamiconv";

	/// Creates an engine running the given executable.
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
			scratch_root: None,
		}
	}

	/// Resolves the executable: a `superfamiconv/` directory next to the running
	/// binary takes precedence over `PATH`.
	pub fn locate() -> Self {
		let file_name = format!("{}{}", Self::PROGRAM, std::env::consts::EXE_SUFFIX);
		let bundled = std::env::current_exe()
			.ok()
			.and_then(|exe| exe.parent().map(|dir| dir.join(Self::PROGRAM).join(&file_name)));

		match bundled {
			Some(path) if path.is_file() => Self::new(path),
			_ => Self::new(Self::PROGRAM),
		}
	}

	/// Places scratch directories under `dir` instead of the system temp dir.
	///
	/// Needed when the executable cannot see the system temp dir, e.g. a
	/// Windows build launched from a Linux compatibility layer.
	pub fn with_scratch_root(mut self, dir: impl Into<PathBuf>) -> Self {
		self.scratch_root = Some(dir.into());
		self
	}

	/// Returns the executable path.
	pub fn program(&self) -> &Path {
		&self.program
	}

	fn palette_args(request: &EngineRequest<'_>, image: &Path, palette: &Path) -> Vec<OsString> {
		let mut args: Vec<OsString> = vec![
			"palette".into(),
			"-i".into(),
			image.into(),
			"-d".into(),
			palette.into(),
			"-C".into(),
			request.colors.to_string().into(),
		];
		if request.palettes > 1 {
			args.push("-P".into());
			args.push(request.palettes.to_string().into());
		}
		args
	}

	fn tiles_args(request: &EngineRequest<'_>, image: &Path, palette: &Path, tiles: &Path) -> Vec<OsString> {
		let mut args: Vec<OsString> = vec![
			"tiles".into(),
			"-i".into(),
			image.into(),
			"-p".into(),
			palette.into(),
			"-d".into(),
			tiles.into(),
		];
		args.extend(Self::format_args(request));
		args
	}

	fn map_args(
		request: &EngineRequest<'_>,
		image: &Path,
		palette: &Path,
		tiles: &Path,
		map: &Path,
	) -> Vec<OsString> {
		let mut args: Vec<OsString> = vec![
			"map".into(),
			"-i".into(),
			image.into(),
			"-p".into(),
			palette.into(),
			"-t".into(),
			tiles.into(),
			"-d".into(),
			map.into(),
		];
		args.extend(Self::format_args(request));
		args
	}

	fn format_args(request: &EngineRequest<'_>) -> [OsString; 6] {
		[
			"-B".into(),
			request.bpp.bits().to_string().into(),
			"-W".into(),
			request.tile_width.to_string().into(),
			"-H".into(),
			request.tile_height.to_string().into(),
		]
	}

	fn command_line(&self, args: &[OsString]) -> String {
		let mut line = self.program.display().to_string();
		for arg in args {
			line.push(' ');
			line.push_str(&arg.to_string_lossy());
		}
		line
	}

	fn run(&self, args: &[OsString]) -> Result<(), EngineError> {
		let command = self.command_line(args);
		trace!("Running: {}", command);

		let output = Command::new(&self.program).args(args).output().map_err(|source| {
			EngineError::Spawn {
				program: self.program.display().to_string(),
				source,
			}
		})?;

		let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
		text.push_str(&String::from_utf8_lossy(&output.stderr));
		if !text.trim().is_empty() {
			trace!("{}", text.trim_end());
		}

		if output.status.success() {
			return Ok(());
		}

		if is_overflow_message(&text) {
			return Err(EngineError::Overflow {
				command,
				output: text,
			});
		}

		Err(EngineError::Failed {
			command,
			status: output.status.to_string(),
			output: text,
		})
	}
}

impl Default for SuperFamiconv {
	fn default() -> Self {
		Self::locate()
	}
}

impl TileEngine for SuperFamiconv {
	fn name(&self) -> &str {
		Self::PROGRAM
	}

	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
		let mut builder = tempfile::Builder::new();
		builder.prefix("sfcanim-");
		let scratch = match &self.scratch_root {
			Some(root) => builder.tempdir_in(root)?,
			None => builder.tempdir()?,
		};

		let stem = request.frame_index.to_string();
		let image_path = scratch.path().join(format!("{stem}.quantized.png"));
		let palette_path = scratch.path().join(format!("{stem}.palette"));
		let tiles_path = scratch.path().join(format!("{stem}.tiles"));
		let map_path = scratch.path().join(format!("{stem}.map"));

		request.image.save_with_format(&image_path, ImageFormat::Png)?;

		self.run(&Self::palette_args(request, &image_path, &palette_path))?;
		self.run(&Self::tiles_args(request, &image_path, &palette_path, &tiles_path))?;
		self.run(&Self::map_args(request, &image_path, &palette_path, &tiles_path, &map_path))?;

		let read = |path: &Path| {
			std::fs::read(path).map_err(|source| EngineError::MissingOutput {
				path: path.to_path_buf(),
				source,
			})
		};

		let output = EngineOutput {
			palette: read(&palette_path)?,
			tiles: read(&tiles_path)?,
			map: read(&map_path)?,
		};

		debug!(
			"Frame {}: engine produced palette {} B, tiles {} B, map {} B",
			request.frame_index,
			output.palette.len(),
			output.tiles.len(),
			output.map.len()
		);

		Ok(output)
	}
}

fn is_overflow_message(output: &str) -> bool {
	let output = output.to_ascii_lowercase();
	OVERFLOW_MARKERS.iter().any(|marker| output.contains(marker))
}

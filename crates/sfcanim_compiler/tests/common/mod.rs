//! Shared fixtures: frame folders on disk and in-process tile engines.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use sfcanim_compiler::{EngineError, EngineOutput, EngineRequest, TileEngine};

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const RED: Rgb<u8> = Rgb([248, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 248, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 248]);

/// Writes `frames` as `frame_NN.png` into `dir` and returns their paths.
pub fn write_frames(dir: &Path, frames: &[RgbImage]) -> Vec<PathBuf> {
	frames
		.iter()
		.enumerate()
		.map(|(index, frame)| {
			let path = dir.join(format!("frame_{index:02}.png"));
			frame.save(&path).unwrap();
			path
		})
		.collect()
}

/// A black frame with a solid `size`×`size` square at (`x`, `y`).
pub fn square_frame(width: u32, height: u32, x: u32, y: u32, size: u32, color: Rgb<u8>) -> RgbImage {
	RgbImage::from_fn(width, height, |px, py| {
		if (x..x + size).contains(&px) && (y..y + size).contains(&py) { color } else { BLACK }
	})
}

/// An engine that emulates the output layout of a real converter.
///
/// Black always gets palette index 0, other colors follow in RGB order and
/// indices wider than the bit depth are truncated.
/// Pixel indices are packed MSB-first into tiles of `tile_w * tile_h * bpp / 8`
/// bytes, identical tiles are shared, and the map is one little-endian word
/// per cell holding the tile index.
#[derive(Debug, Default)]
pub struct MockEngine {
	pub calls: usize,
}

impl TileEngine for MockEngine {
	fn name(&self) -> &str {
		"mock"
	}

	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
		self.calls += 1;
		convert(request)
	}
}

/// Fails at a chosen frame index.
#[derive(Debug)]
pub struct FailingEngine {
	pub fail_at: usize,
	pub overflow: bool,
}

impl TileEngine for FailingEngine {
	fn name(&self) -> &str {
		"failing"
	}

	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
		if request.frame_index != self.fail_at {
			return convert(request);
		}

		if self.overflow {
			Err(EngineError::Overflow {
				command: "failing tiles".to_string(),
				output: "Error: too many tiles".to_string(),
			})
		} else {
			Err(EngineError::Rejected("cannot convert frame".to_string()))
		}
	}
}

/// Pads every tile blob to `tiles_len` bytes.
#[derive(Debug)]
pub struct BloatedEngine {
	pub tiles_len: usize,
}

impl TileEngine for BloatedEngine {
	fn name(&self) -> &str {
		"bloated"
	}

	fn convert(&mut self, request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
		let mut output = convert(request)?;
		output.tiles.resize(self.tiles_len, 0xFF);
		Ok(output)
	}
}

fn convert(request: &EngineRequest<'_>) -> Result<EngineOutput, EngineError> {
	let image = request.image;

	let mut colors: Vec<[u8; 3]> = image.pixels().map(|p| p.0).filter(|c| *c != BLACK.0).collect();
	colors.sort_unstable();
	colors.dedup();
	let limit = request.colors * request.palettes as usize;
	if colors.len() + 1 > limit {
		return Err(EngineError::Overflow {
			command: "mock palette".to_string(),
			output: format!("too many colors: {}", colors.len() + 1),
		});
	}

	let index_of = |c: [u8; 3]| -> u8 {
		if c == BLACK.0 {
			0
		} else {
			colors.binary_search(&c).map_or(0, |i| i as u8 + 1)
		}
	};

	let mut palette = Vec::with_capacity(limit * 2);
	palette.extend_from_slice(&bgr555(BLACK.0).to_le_bytes());
	for color in &colors {
		palette.extend_from_slice(&bgr555(*color).to_le_bytes());
	}
	palette.resize(limit * 2, 0);

	let bits = request.bpp.bits() as usize;
	let columns = image.width() / request.tile_width;
	let rows = image.height() / request.tile_height;

	let mut tiles: Vec<u8> = Vec::new();
	let mut seen: HashMap<Vec<u8>, u16> = HashMap::new();
	let mut map = Vec::with_capacity((columns * rows) as usize * 2);

	for row in 0..rows {
		for column in 0..columns {
			let mut tile = vec![0u8; request.bpp.bytes_per_tile(request.tile_width, request.tile_height)];
			let mut bit = 0usize;
			for y in 0..request.tile_height {
				for x in 0..request.tile_width {
					let pixel = image.get_pixel(column * request.tile_width + x, row * request.tile_height + y);
					let value = index_of(pixel.0);
					for b in (0..bits).rev() {
						if (value >> b) & 1 == 1 {
							tile[bit / 8] |= 0x80 >> (bit % 8);
						}
						bit += 1;
					}
				}
			}

			let next = seen.len() as u16;
			let id = *seen.entry(tile.clone()).or_insert_with(|| {
				tiles.extend_from_slice(&tile);
				next
			});
			map.extend_from_slice(&id.to_le_bytes());
		}
	}

	Ok(EngineOutput {
		palette,
		tiles,
		map,
	})
}

fn bgr555([r, g, b]: [u8; 3]) -> u16 {
	(r as u16 >> 3) | ((g as u16 >> 3) << 5) | ((b as u16 >> 3) << 10)
}

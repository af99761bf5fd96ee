//! Benchmark helper utilities for sfcanim-rs
//!
//! Generates synthetic frames, tile blobs and dense maps shaped like the data
//! the tile engine produces for real animations:
//!
//! - a sprite frame is mostly background, with a blob of detail near the center
//! - a background frame covers a full 256x224 screen

use image::{Rgb, RgbImage};

/// Full-screen background width
pub const SCREEN_WIDTH: u32 = 256;

/// Full-screen background height
pub const SCREEN_HEIGHT: u32 = 224;

/// Generates a frame with a gradient disc on a black background.
///
/// `seed` shifts the disc so consecutive frames differ.
pub fn generate_sprite_frame(width: u32, height: u32, seed: u32) -> RgbImage {
	let cx = (width / 2 + seed * 3) % width;
	let cy = height / 2;
	let radius = width.min(height) / 3;

	RgbImage::from_fn(width, height, |x, y| {
		let dx = x.abs_diff(cx);
		let dy = y.abs_diff(cy);
		if dx * dx + dy * dy <= radius * radius {
			Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y + seed) % 256) as u8])
		} else {
			Rgb([0, 0, 0])
		}
	})
}

/// Generates a noisy full-screen frame with many distinct colors.
pub fn generate_background_frame(seed: u32) -> RgbImage {
	RgbImage::from_fn(SCREEN_WIDTH, SCREEN_HEIGHT, |x, y| {
		let v = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17)).wrapping_add(seed);
		Rgb([(v % 251) as u8, (v / 3 % 241) as u8, (v / 7 % 239) as u8])
	})
}

/// Generates a dense map where roughly `fill_percent` of the cells show a
/// non-empty tile and the rest show tile 0.
pub fn generate_dense_map(columns: u32, rows: u32, fill_percent: u32) -> Vec<u8> {
	let mut map = Vec::with_capacity((columns * rows * 2) as usize);
	let mut state = 0x2545_F491u32;

	for cell in 0..columns * rows {
		// xorshift keeps the layout stable between runs
		state ^= state << 13;
		state ^= state >> 17;
		state ^= state << 5;

		let word = if state % 100 < fill_percent {
			let tile = (cell % 0x3FF).max(1) as u16;
			let palette = (state >> 8) as u16 & 0x7;
			let flips = (state >> 16) as u16 & 0xC000;
			flips | (palette << 10) | tile
		} else {
			0
		};
		map.extend_from_slice(&word.to_le_bytes());
	}

	map
}

/// Generates `count` tiles of `bytes_per_tile` bytes; tile `empty_at` is all zero.
pub fn generate_tiles(count: usize, bytes_per_tile: usize, empty_at: usize) -> Vec<u8> {
	let mut tiles = vec![0u8; count * bytes_per_tile];
	for (index, tile) in tiles.chunks_exact_mut(bytes_per_tile).enumerate() {
		if index != empty_at {
			tile.iter_mut().enumerate().for_each(|(i, b)| *b = (index + i) as u8 | 1);
		}
	}
	tiles
}

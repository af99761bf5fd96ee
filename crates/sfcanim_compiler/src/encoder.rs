//! Map encoders: one per [`MapMode`].

use log::debug;
use sfcanim_types::file::map::{find_empty_tile, transcode_sparse};
use sfcanim_types::file::{Bpp, FormatError, MapGeometry};

use crate::MapMode;

/// Edge of one hardware character in pixels
const CHAR_SIZE: u32 = 8;

/// Everything an encoder needs to know about one engine-converted frame.
#[derive(Debug, Clone, Copy)]
pub struct MapInput<'a> {
	/// Index of the frame in playback order
	pub frame_index: usize,
	/// Dense row-major map returned by the engine
	pub dense_map: &'a [u8],
	/// Tile blob returned by the engine
	pub tiles: &'a [u8],
	/// Tile and image dimensions
	pub geometry: MapGeometry,
	/// Bit depth of the tile blob
	pub bpp: Bpp,
}

/// Map bytes ready for the container, plus what the encoder learned on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedMap {
	/// Encoded map blob
	pub bytes: Vec<u8>,
	/// Id of the first all-zero tile, when the encoder looked for one
	pub empty_tile: Option<u16>,
	/// Number of cells in the dense map
	pub dense_cells: usize,
}

/// Strategy turning a dense engine map into the stored map blob.
pub trait MapEncoder {
	/// Mode implemented by this encoder.
	fn mode(&self) -> MapMode;

	/// Encodes the map of one frame.
	fn encode(&self, input: &MapInput<'_>) -> Result<EncodedMap, FormatError>;
}

/// Background mode: the dense map is stored verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseEncoder;

impl MapEncoder for DenseEncoder {
	fn mode(&self) -> MapMode {
		MapMode::Background
	}

	fn encode(&self, input: &MapInput<'_>) -> Result<EncodedMap, FormatError> {
		Ok(EncodedMap {
			bytes: input.dense_map.to_vec(),
			empty_tile: None,
			dense_cells: input.dense_map.len() / 2,
		})
	}
}

/// Sprite mode: cells showing the empty tile are dropped and the rest become
/// `(x, y, attribute)` entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseEncoder;

impl MapEncoder for SparseEncoder {
	fn mode(&self) -> MapMode {
		MapMode::Sprite
	}

	fn encode(&self, input: &MapInput<'_>) -> Result<EncodedMap, FormatError> {
		// map ids count 8x8 characters, whatever the tile size
		let bytes_per_char = input.bpp.bytes_per_tile(CHAR_SIZE, CHAR_SIZE);
		let empty_tile = find_empty_tile(input.tiles, bytes_per_char);
		let sparse = transcode_sparse(input.dense_map, &input.geometry, empty_tile)?;

		match empty_tile {
			Some(id) => debug!(
				"Frame {}: empty tile #{}, kept {} of {} cells",
				input.frame_index,
				id,
				sparse.len(),
				sparse.dense_cells()
			),
			None => debug!("Frame {}: no empty tile, keeping all {} cells", input.frame_index, sparse.len()),
		}

		Ok(EncodedMap {
			bytes: sparse.to_bytes(),
			empty_tile,
			dense_cells: sparse.dense_cells(),
		})
	}
}

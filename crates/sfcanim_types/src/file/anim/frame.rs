//! Frame records of the animation container.
//!
//! Each record starts with a 6-byte sub-header holding the byte lengths of the
//! three sections that follow it, in this order: tile blob, map blob, palette blob.

use std::fmt;

use crate::file::FormatError;

use super::constants;

/// A single compiled frame as stored in the container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameRecord {
	/// Bitplane-packed tile data
	tiles: Vec<u8>,

	/// Dense tile map (background mode) or sparse sprite map (sprite mode)
	map: Vec<u8>,

	/// Packed palette, only non-empty for the first frame
	palette: Vec<u8>,
}

impl FrameRecord {
	/// Creates a new frame record from its three sections.
	pub fn new(tiles: Vec<u8>, map: Vec<u8>, palette: Vec<u8>) -> Self {
		Self {
			tiles,
			map,
			palette,
		}
	}

	/// Returns the tile blob.
	pub fn tiles(&self) -> &[u8] {
		&self.tiles
	}

	/// Returns the map blob.
	pub fn map(&self) -> &[u8] {
		&self.map
	}

	/// Returns the palette blob.
	pub fn palette(&self) -> &[u8] {
		&self.palette
	}

	/// Total number of bytes this record occupies, sub-header included.
	pub fn encoded_len(&self) -> usize {
		constants::FRAME_HEADER_SIZE + self.tiles.len() + self.map.len() + self.palette.len()
	}

	/// Validates that every section length fits its 16-bit sub-header field.
	pub fn validate(&self) -> Result<(), FormatError> {
		FormatError::check_u16("tile blob length", self.tiles.len())?;
		FormatError::check_u16("map blob length", self.map.len())?;
		FormatError::check_u16("palette blob length", self.palette.len())?;
		Ok(())
	}

	/// Appends the sub-header and sections to `out`.
	///
	/// Lengths must have been checked with [`FrameRecord::validate`]; longer
	/// sections are truncated in the sub-header.
	pub fn write_to(&self, out: &mut Vec<u8>) {
		out.reserve(self.encoded_len());
		out.extend_from_slice(&(self.tiles.len() as u16).to_le_bytes());
		out.extend_from_slice(&(self.map.len() as u16).to_le_bytes());
		out.extend_from_slice(&(self.palette.len() as u16).to_le_bytes());
		out.extend_from_slice(&self.tiles);
		out.extend_from_slice(&self.map);
		out.extend_from_slice(&self.palette);
	}

	/// Parses a record starting at the beginning of `data`.
	///
	/// Trailing bytes after the record are ignored.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		if data.len() < constants::FRAME_HEADER_SIZE {
			return Err(FormatError::InsufficientData {
				expected: constants::FRAME_HEADER_SIZE,
				actual: data.len(),
			});
		}

		let tiles_len = u16::from_le_bytes([data[0], data[1]]) as usize;
		let map_len = u16::from_le_bytes([data[2], data[3]]) as usize;
		let palette_len = u16::from_le_bytes([data[4], data[5]]) as usize;

		let tiles_start = constants::FRAME_HEADER_SIZE;
		let map_start = tiles_start + tiles_len;
		let palette_start = map_start + map_len;
		let end = palette_start + palette_len;

		if data.len() < end {
			return Err(FormatError::InsufficientData {
				expected: end,
				actual: data.len(),
			});
		}

		Ok(Self {
			tiles: data[tiles_start..map_start].to_vec(),
			map: data[map_start..palette_start].to_vec(),
			palette: data[palette_start..end].to_vec(),
		})
	}
}

impl fmt::Display for FrameRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"tiles: {} bytes, map: {} bytes, palette: {} bytes",
			self.tiles.len(),
			self.map.len(),
			self.palette.len()
		)
	}
}

//! Main header of the animation container.

use std::fmt::Display;
use std::io::Read;

use crate::file::{Bpp, FormatError};

use super::constants;

/// Header structure for animation containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	magic: [u8; 2],
	max_tile_size: u16,
	palette_size: u16,
	frame_count: u16,
	bpp: Bpp,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Creates a new header.
	///
	/// # Arguments
	///
	/// * `max_tile_size` - Largest tile blob of any frame, in bytes
	/// * `palette_size` - Size of the shared palette carried by frame 0, in bytes
	/// * `frame_count` - Number of frames in the container
	/// * `bpp` - Bit depth shared by all frames
	pub fn new(max_tile_size: u16, palette_size: u16, frame_count: u16, bpp: Bpp) -> Self {
		Self {
			magic: constants::MAGIC,
			max_tile_size,
			palette_size,
			frame_count,
			bpp,
		}
	}

	/// Returns the magic tag.
	pub fn magic(&self) -> [u8; 2] {
		self.magic
	}

	/// Returns the largest tile blob size across all frames.
	pub fn max_tile_size(&self) -> u16 {
		self.max_tile_size
	}

	/// Returns the shared palette size in bytes.
	pub fn palette_size(&self) -> u16 {
		self.palette_size
	}

	/// Returns the number of frames.
	pub fn frame_count(&self) -> u16 {
		self.frame_count
	}

	/// Returns the bit depth.
	pub fn bpp(&self) -> Bpp {
		self.bpp
	}

	/// Size of the header and the frame pointer table, i.e. the offset of the first frame record.
	pub fn data_offset(&self) -> usize {
		constants::HEADER_SIZE + self.frame_count as usize * constants::POINTER_SIZE
	}

	/// Parses a header from the given byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(FormatError::InsufficientData {
				expected: constants::HEADER_SIZE,
				actual: data.len(),
			});
		}

		let magic = [data[0], data[1]];
		if magic != constants::MAGIC {
			return Err(FormatError::InvalidMagic(magic));
		}

		let read_u16 = |offset: usize| u16::from_le_bytes([data[offset], data[offset + 1]]);

		Ok(Self {
			magic,
			max_tile_size: read_u16(constants::MAX_TILE_SIZE_OFFSET),
			palette_size: read_u16(constants::PALETTE_SIZE_OFFSET),
			frame_count: read_u16(constants::FRAME_COUNT_OFFSET),
			bpp: Bpp::from_encoded(data[constants::BPP_OFFSET])?,
		})
	}

	/// Reads a header from any reader without consuming the rest of the container.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, FormatError> {
		let mut buffer = [0u8; constants::HEADER_SIZE];
		reader.read_exact(&mut buffer)?;
		Self::from_bytes(&buffer)
	}

	/// Converts the header to bytes
	pub fn to_bytes(&self) -> [u8; constants::HEADER_SIZE] {
		let mut bytes = [0u8; constants::HEADER_SIZE];

		bytes[0..2].copy_from_slice(&self.magic);
		bytes[2..4].copy_from_slice(&self.max_tile_size.to_le_bytes());
		bytes[4..6].copy_from_slice(&self.palette_size.to_le_bytes());
		bytes[6..8].copy_from_slice(&self.frame_count.to_le_bytes());
		bytes[8] = self.bpp.encoded();

		bytes
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Animation Header:\n\
			- Magic: {:02X?}\n\
			- Max Tile Size: {} bytes\n\
			- Palette Size: {} bytes\n\
			- Frames: {}\n\
			- Depth: {}",
			self.magic, self.max_tile_size, self.palette_size, self.frame_count, self.bpp,
		)
	}
}

//! `SP` animation container support for `sfcanim-rs` project.
//!
//! This module provides the binary container that bundles every compiled frame
//! of a sprite or background animation into a single resource for 16-bit console
//! playback code. The container is self-describing: a reader locates any frame
//! through the pointer table, and the frame's own sub-header states how many bytes
//! of each section follow.
//!
//! # File Structure
//!
//! All multi-byte values are little-endian.
//!
//! ```text
//! Offset      Size  Field           Description
//! ----------  ----  --------------  ------------------------------------------
//! 0x00        2     magic           "SP"
//! 0x02        2     max_tile_size   Largest tile blob of any frame (bytes)
//! 0x04        2     palette_size    Size of the shared palette (bytes)
//! 0x06        2     frame_count     Number of frames N
//! 0x08        1     bpp             Bit depth divided by two
//! 0x09        N*2   pointers        Absolute offset of each frame record
//! 0x09+N*2    ...   records         N frame records
//! ```
//!
//! ## Frame Record
//!
//! ```text
//! Offset  Size  Field        Description
//! ------  ----  -----------  ------------------------------------------
//! +0x00   2     tiles_len    Length of the tile blob
//! +0x02   2     map_len      Length of the map blob (dense or sparse)
//! +0x04   2     palette_len  Length of the palette blob (0 except frame 0)
//! +0x06   ...   tiles        Bitplane-packed tiles
//! ...     ...   map          Tile map
//! ...     ...   palette      Packed palette
//! ```
//!
//! Pointer `i` equals `9 + 2N` plus the encoded size of records `0..i`, so the
//! table is monotonically non-decreasing.
//!
//! # Usage Examples
//!
//! ## Packaging frames
//!
//! ```no_run
//! use sfcanim_types::file::{AnimFile, Bpp, FrameRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frames = vec![
//!     FrameRecord::new(vec![0u8; 64], vec![0u8; 8], vec![0u8; 32]),
//!     FrameRecord::new(vec![0u8; 32], vec![0u8; 8], Vec::new()),
//! ];
//!
//! let anim = AnimFile::new(Bpp::Four, 64, 32, frames)?;
//! anim.save("explosion.anim")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting a container
//!
//! ```no_run
//! use sfcanim_types::file::AnimFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let anim = AnimFile::open("explosion.anim")?;
//!
//! println!("{}", anim.header());
//! for (index, frame) in anim.iter().enumerate() {
//!     println!("Frame #{}: {}", index, frame);
//! }
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};
use std::path::Path;

use crate::file::{Bpp, FormatError};

pub mod constants;
pub mod frame;
pub mod header;


pub use frame::FrameRecord;
pub use header::Header;

/// A complete animation container: header, pointer table and frame records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	/// Main header
	header: Header,

	/// Absolute offset of each frame record
	pointers: Vec<u16>,

	/// Frame records in playback order
	frames: Vec<FrameRecord>,
}

impl File {
	/// Packages compiled frames into a container.
	///
	/// # Arguments
	///
	/// * `bpp` - Bit depth shared by all frames
	/// * `max_tile_size` - Largest tile blob across all frames, in bytes
	/// * `palette_size` - Length of the shared palette carried by frame 0
	/// * `frames` - Frame records in playback order
	///
	/// # Errors
	///
	/// Returns [`FormatError::FieldOverflow`] if the frame count, a section length,
	/// a header size field or a frame pointer does not fit in 16 bits.
	pub fn new(
		bpp: Bpp,
		max_tile_size: usize,
		palette_size: usize,
		frames: Vec<FrameRecord>,
	) -> Result<Self, FormatError> {
		if frames.len() > constants::MAX_FRAMES {
			return Err(FormatError::FieldOverflow {
				field: "frame count",
				value: frames.len(),
			});
		}

		let header = Header::new(
			FormatError::check_u16("max tile size", max_tile_size)?,
			FormatError::check_u16("palette size", palette_size)?,
			frames.len() as u16,
			bpp,
		);

		let mut pointers = Vec::with_capacity(frames.len());
		let mut offset = header.data_offset();
		for frame in &frames {
			frame.validate()?;
			pointers.push(FormatError::check_u16("frame pointer", offset)?);
			offset += frame.encoded_len();
		}

		Ok(Self {
			header,
			pointers,
			frames,
		})
	}

	/// Opens a container from the specified path for inspection.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, FormatError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Loads a container from any reader.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, FormatError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Loads a container from a byte slice.
	///
	/// Each frame is located through the pointer table; the header values are
	/// kept as stored.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		let header = Header::from_bytes(data)?;

		let data_offset = header.data_offset();
		if data.len() < data_offset {
			return Err(FormatError::InsufficientData {
				expected: data_offset,
				actual: data.len(),
			});
		}

		let pointers: Vec<u16> = data[constants::POINTER_TABLE_OFFSET..data_offset]
			.chunks_exact(constants::POINTER_SIZE)
			.map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
			.collect();

		let mut frames = Vec::with_capacity(pointers.len());
		for (index, &pointer) in pointers.iter().enumerate() {
			let offset = pointer as usize;
			if offset < data_offset || offset >= data.len() {
				return Err(FormatError::InvalidPointer {
					index,
					offset: pointer,
				});
			}
			frames.push(FrameRecord::from_bytes(&data[offset..])?);
		}

		Ok(Self {
			header,
			pointers,
			frames,
		})
	}

	/// Returns the header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the number of frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the frame pointer table.
	pub fn frame_pointers(&self) -> &[u16] {
		&self.pointers
	}

	/// Returns all frame records.
	pub fn frames(&self) -> &[FrameRecord] {
		&self.frames
	}

	/// Returns a frame record by index.
	pub fn get_frame(&self, index: usize) -> Option<&FrameRecord> {
		self.frames.get(index)
	}

	/// Returns an iterator over frame records in playback order.
	pub fn iter(&self) -> std::slice::Iter<'_, FrameRecord> {
		self.frames.iter()
	}

	/// Total size of the serialized container in bytes.
	pub fn encoded_len(&self) -> usize {
		self.header.data_offset() + self.frames.iter().map(FrameRecord::encoded_len).sum::<usize>()
	}

	/// Serializes the container to bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.encoded_len());

		out.extend_from_slice(&self.header.to_bytes());
		for pointer in &self.pointers {
			out.extend_from_slice(&pointer.to_le_bytes());
		}
		for frame in &self.frames {
			frame.write_to(&mut out);
		}

		out
	}

	/// Writes the serialized container to any writer.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), FormatError> {
		writer.write_all(&self.to_bytes())?;
		Ok(())
	}

	/// Saves the container to disk.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
		std::fs::write(path, self.to_bytes())?;
		Ok(())
	}
}

impl std::fmt::Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Animation: {} frames, {}, {} bytes",
			self.frames.len(),
			self.header.bpp(),
			self.encoded_len()
		)
	}
}

impl<'a> IntoIterator for &'a File {
	type Item = &'a FrameRecord;
	type IntoIter = std::slice::Iter<'a, FrameRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

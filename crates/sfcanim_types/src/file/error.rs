//! Error types for container serialization and map transcoding.

use thiserror::Error;

/// Errors that can occur when building, transcoding or inspecting animation containers
#[derive(Debug, Error)]
pub enum FormatError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic tag
	#[error("Invalid magic tag: {0:02X?}")]
	InvalidMagic([u8; 2]),

	/// A value does not fit the 16-bit field that stores it
	#[error("{field} of {value} does not fit in a 16-bit field (max {max})", max = u16::MAX)]
	FieldOverflow {
		/// Name of the overflowing field
		field: &'static str,
		/// Value that was to be stored
		value: usize,
	},

	/// Unsupported bit depth
	#[error("Unsupported bit depth: {0} (expected 2 or 4 bpp)")]
	InvalidBpp(u8),

	/// Frame pointer outside of the container
	#[error("Frame pointer #{index} points to offset {offset}, outside of the container")]
	InvalidPointer {
		/// Index of the frame pointer
		index: usize,
		/// Offending absolute offset
		offset: u16,
	},

	/// Map geometry cannot be used to place tiles
	#[error("Invalid map geometry: {0}")]
	InvalidGeometry(String),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl FormatError {
	/// Checks that `value` fits a 16-bit field, returning it narrowed.
	pub fn check_u16(field: &'static str, value: usize) -> Result<u16, Self> {
		u16::try_from(value).map_err(|_| Self::FieldOverflow {
			field,
			value,
		})
	}
}

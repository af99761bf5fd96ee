//! Tile bit depth.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::FormatError;

/// Bits per pixel used for tile graphics and palettes.
///
/// The container stores the depth halved, so 2bpp is written as `1` and
/// 4bpp as `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Bpp {
	/// 2 bits per pixel, 4 colors per palette
	Two = 2,

	/// 4 bits per pixel, 16 colors per palette
	#[default]
	Four = 4,
}

impl Bpp {
	/// Returns the number of bits per pixel.
	pub const fn bits(self) -> u8 {
		self as u8
	}

	/// Returns the number of colors a single palette holds at this depth.
	pub const fn colors(self) -> usize {
		1 << (self as u8)
	}

	/// Returns the value stored in the container header (`bpp / 2`).
	pub const fn encoded(self) -> u8 {
		self as u8 / 2
	}

	/// Decodes the header representation back into a bit depth.
	pub fn from_encoded(value: u8) -> Result<Self, FormatError> {
		Self::try_from(value.saturating_mul(2))
	}

	/// Returns the number of bytes one bitplane-packed tile occupies.
	pub const fn bytes_per_tile(self, tile_width: u32, tile_height: u32) -> usize {
		(tile_width * tile_height * self as u32 / 8) as usize
	}
}

impl TryFrom<u8> for Bpp {
	type Error = FormatError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			2 => Ok(Self::Two),
			4 => Ok(Self::Four),
			other => Err(FormatError::InvalidBpp(other)),
		}
	}
}

impl From<Bpp> for u8 {
	fn from(value: Bpp) -> Self {
		value.bits()
	}
}

impl fmt::Display for Bpp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}bpp", self.bits())
	}
}

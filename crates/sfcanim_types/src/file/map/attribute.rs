//! Tile attribute words for dense maps and sprite entries.

use std::fmt;

/// Mask of the tile index bits shared by dense and sprite attribute words
pub const TILE_INDEX_MASK: u16 = 0x03FF;

/// Bit position of the palette field in a dense map entry
pub const MAP_PALETTE_SHIFT: u16 = 10;

/// Bit position of the priority flag in a dense map entry
pub const MAP_PRIORITY_SHIFT: u16 = 13;

/// Bit position of the palette field in a sprite attribute word
pub const SPRITE_PALETTE_SHIFT: u16 = 9;

/// Bit position of the priority field in a sprite attribute word
pub const SPRITE_PRIORITY_SHIFT: u16 = 12;

/// Priority written into every sprite attribute word
pub const SPRITE_PRIORITY: u16 = 3;

/// Bit position of the horizontal flip flag
pub const H_FLIP_SHIFT: u16 = 14;

/// Bit position of the vertical flip flag
pub const V_FLIP_SHIFT: u16 = 15;

/// Size of a sparse entry in bytes
pub const SPARSE_ENTRY_SIZE: usize = 4;

/// Decoded dense map entry.
///
/// # Examples
///
/// ```
/// use sfcanim_types::file::TileAttribute;
///
/// let attr = TileAttribute::from_raw(0b1010_1100_0000_0111);
/// assert_eq!(attr.tile_index, 7);
/// assert_eq!(attr.palette, 3);
/// assert!(attr.priority);
/// assert!(!attr.h_flip);
/// assert!(attr.v_flip);
/// assert_eq!(attr.to_raw(), 0b1010_1100_0000_0111);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileAttribute {
	/// Tile index (10 bits)
	pub tile_index: u16,
	/// Palette number (3 bits)
	pub palette: u8,
	/// Background priority flag
	pub priority: bool,
	/// Horizontal flip
	pub h_flip: bool,
	/// Vertical flip
	pub v_flip: bool,
}

impl TileAttribute {
	/// Decodes a raw 16-bit dense map entry.
	pub const fn from_raw(raw: u16) -> Self {
		Self {
			tile_index: raw & TILE_INDEX_MASK,
			palette: ((raw >> MAP_PALETTE_SHIFT) & 0x7) as u8,
			priority: (raw >> MAP_PRIORITY_SHIFT) & 1 == 1,
			h_flip: (raw >> H_FLIP_SHIFT) & 1 == 1,
			v_flip: (raw >> V_FLIP_SHIFT) & 1 == 1,
		}
	}

	/// Encodes the entry back into the dense map layout.
	pub const fn to_raw(&self) -> u16 {
		(self.tile_index & TILE_INDEX_MASK)
			| ((self.palette as u16 & 0x7) << MAP_PALETTE_SHIFT)
			| ((self.priority as u16) << MAP_PRIORITY_SHIFT)
			| ((self.h_flip as u16) << H_FLIP_SHIFT)
			| ((self.v_flip as u16) << V_FLIP_SHIFT)
	}

	/// Packs the entry as a sprite attribute word.
	///
	/// The source priority bit is discarded and replaced by [`SPRITE_PRIORITY`];
	/// bit 8 is always clear. The palette is placed at bit 9, which shares bit 9
	/// with the tile index: downstream playback code expects exactly this pattern.
	pub const fn to_sprite_word(&self) -> u16 {
		((self.v_flip as u16) << V_FLIP_SHIFT)
			| ((self.h_flip as u16) << H_FLIP_SHIFT)
			| (SPRITE_PRIORITY << SPRITE_PRIORITY_SHIFT)
			| ((self.palette as u16) << SPRITE_PALETTE_SHIFT)
			| self.tile_index
	}
}

impl fmt::Display for TileAttribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"tile {} pal {}{}{}{}",
			self.tile_index,
			self.palette,
			if self.priority { " prio" } else { "" },
			if self.h_flip { " hflip" } else { "" },
			if self.v_flip { " vflip" } else { "" },
		)
	}
}

/// One emitted sprite-mode map entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SparseMapEntry {
	/// X position in pixels, wrapped to 8 bits
	pub x: u8,
	/// Y position in pixels, wrapped to 8 bits
	pub y: u8,
	/// Packed sprite attribute word
	pub attr: u16,
}

impl SparseMapEntry {
	/// Creates an entry for a dense cell located at pixel `(x, y)`.
	///
	/// Coordinates wrap modulo 256, the width of hardware sprite coordinates.
	pub fn from_cell(x: u32, y: u32, attribute: TileAttribute) -> Self {
		Self {
			x: (x & 0xFF) as u8,
			y: (y & 0xFF) as u8,
			attr: attribute.to_sprite_word(),
		}
	}

	/// Tile index as read back from the packed attribute word.
	pub const fn tile_index(&self) -> u16 {
		self.attr & TILE_INDEX_MASK
	}

	/// Serializes the entry as `x, y, attr-low, attr-high`.
	pub const fn to_bytes(&self) -> [u8; SPARSE_ENTRY_SIZE] {
		let attr = self.attr.to_le_bytes();
		[self.x, self.y, attr[0], attr[1]]
	}

	/// Parses an entry from its 4-byte representation.
	pub const fn from_bytes(bytes: [u8; SPARSE_ENTRY_SIZE]) -> Self {
		Self {
			x: bytes[0],
			y: bytes[1],
			attr: u16::from_le_bytes([bytes[2], bytes[3]]),
		}
	}
}

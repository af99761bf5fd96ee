//! Dense-to-sparse map transcoding for sprite frames.

use std::fmt;

use crate::file::FormatError;

use super::attribute::{SPARSE_ENTRY_SIZE, SparseMapEntry, TileAttribute};

/// Dimensions needed to place dense map cells in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapGeometry {
	/// Tile width in pixels
	pub tile_width: u32,
	/// Tile height in pixels
	pub tile_height: u32,
	/// Image width in pixels
	pub image_width: u32,
	/// Image height in pixels
	pub image_height: u32,
}

impl MapGeometry {
	/// Creates a new geometry.
	pub fn new(tile_width: u32, tile_height: u32, image_width: u32, image_height: u32) -> Self {
		Self {
			tile_width,
			tile_height,
			image_width,
			image_height,
		}
	}

	/// Number of map cells per row.
	pub fn columns(&self) -> u32 {
		self.image_width.checked_div(self.tile_width).unwrap_or(0)
	}

	/// Number of map rows.
	pub fn rows(&self) -> u32 {
		self.image_height.checked_div(self.tile_height).unwrap_or(0)
	}

	/// Number of cells in the dense grid.
	pub fn cell_count(&self) -> usize {
		self.columns() as usize * self.rows() as usize
	}

	/// Checks that at least one tile fits in a map row.
	pub fn validate(&self) -> Result<(), FormatError> {
		if self.tile_width == 0 || self.tile_height == 0 {
			return Err(FormatError::InvalidGeometry(format!(
				"tile size {}x{} has a zero dimension",
				self.tile_width, self.tile_height
			)));
		}
		if self.columns() == 0 {
			return Err(FormatError::InvalidGeometry(format!(
				"image width {} is narrower than one {}-pixel tile",
				self.image_width, self.tile_width
			)));
		}
		Ok(())
	}
}

impl fmt::Display for MapGeometry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}x{} image, {}x{} tiles ({}x{} cells)",
			self.image_width,
			self.image_height,
			self.tile_width,
			self.tile_height,
			self.columns(),
			self.rows()
		)
	}
}

/// Sprite-mode map: the dense cells that survived empty-tile filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseMap {
	entries: Vec<SparseMapEntry>,
	dense_cells: usize,
}

impl SparseMap {
	/// Returns the emitted entries in row-major order.
	pub fn entries(&self) -> &[SparseMapEntry] {
		&self.entries
	}

	/// Number of emitted entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if every cell was filtered out.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of cells in the dense map this was transcoded from.
	pub fn dense_cells(&self) -> usize {
		self.dense_cells
	}

	/// Number of cells dropped because they referenced the empty tile.
	pub fn skipped_cells(&self) -> usize {
		self.dense_cells - self.entries.len()
	}

	/// Serializes all entries, 4 bytes each.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.entries.len() * SPARSE_ENTRY_SIZE);
		for entry in &self.entries {
			out.extend_from_slice(&entry.to_bytes());
		}
		out
	}
}

/// Converts a dense row-major map into a filtered sparse sprite map.
///
/// Each 16-bit little-endian cell is decoded, placed at
/// `(column * tile_width, row * tile_height)` and repacked as a sprite attribute
/// word. Cells whose packed tile index equals `empty_tile` are omitted; with
/// `None` every cell is emitted. A trailing odd byte in `dense` is ignored.
///
/// # Examples
///
/// ```
/// use sfcanim_types::file::map::{MapGeometry, transcode_sparse};
///
/// // 2x1 cells: tile 0 (empty) then tile 1
/// let dense = [0x00, 0x00, 0x01, 0x00];
/// let geometry = MapGeometry::new(8, 8, 16, 8);
///
/// let sparse = transcode_sparse(&dense, &geometry, Some(0)).unwrap();
/// assert_eq!(sparse.to_bytes(), [8, 0, 0x01, 0x30]);
/// ```
pub fn transcode_sparse(
	dense: &[u8],
	geometry: &MapGeometry,
	empty_tile: Option<u16>,
) -> Result<SparseMap, FormatError> {
	geometry.validate()?;

	let columns = geometry.columns() as usize;
	let cells = dense.chunks_exact(2);
	let dense_cells = cells.len();

	let entries = cells
		.enumerate()
		.map(|(index, cell)| {
			let attribute = TileAttribute::from_raw(u16::from_le_bytes([cell[0], cell[1]]));
			let column = (index % columns) as u32;
			let row = (index / columns) as u32;
			SparseMapEntry::from_cell(
				column.wrapping_mul(geometry.tile_width),
				row.wrapping_mul(geometry.tile_height),
				attribute,
			)
		})
		.filter(|entry| Some(entry.tile_index()) != empty_tile)
		.collect();

	Ok(SparseMap {
		entries,
		dense_cells,
	})
}

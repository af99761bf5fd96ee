//! Helpers over bitplane-packed tile blobs.

/// Returns the number of whole tiles in a tile blob.
pub fn tile_count(tiles: &[u8], bytes_per_tile: usize) -> usize {
	if bytes_per_tile == 0 {
		return 0;
	}
	tiles.len() / bytes_per_tile
}

/// Finds the index of the first tile whose bytes are all zero.
///
/// Returns `None` when the blob holds no such tile (or `bytes_per_tile` is
/// zero). Trailing bytes that do not form a whole tile are ignored.
///
/// # Examples
///
/// ```
/// use sfcanim_types::file::map::find_empty_tile;
///
/// let tiles = [1u8, 0, 0, 0, 0, 0];
/// assert_eq!(find_empty_tile(&tiles, 2), Some(1));
/// assert_eq!(find_empty_tile(&tiles[..2], 2), None);
/// ```
pub fn find_empty_tile(tiles: &[u8], bytes_per_tile: usize) -> Option<u16> {
	if bytes_per_tile == 0 {
		return None;
	}

	tiles
		.chunks_exact(bytes_per_tile)
		.position(|tile| tile.iter().all(|&b| b == 0))
		.map(|index| index as u16)
}

//! Cross-frame size bookkeeping.

/// Running totals needed for the container header.
///
/// Tracks the largest tile blob of any frame, used by playback code to size
/// its tile buffers, and the palette size of frame 0, which is the palette
/// shared by the whole animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameBudget {
	max_tile_size: usize,
	palette_size: Option<usize>,
	frames: usize,
}

impl FrameBudget {
	/// Creates an empty budget.
	pub fn new() -> Self {
		Self::default()
	}

	/// Accounts for one compiled frame.
	///
	/// # Arguments
	///
	/// * `index` - Frame index; only frame 0 sets the palette size
	/// * `tile_size` - Length of the frame's tile blob
	/// * `palette_size` - Length of the frame's palette blob
	pub fn record(&mut self, index: usize, tile_size: usize, palette_size: usize) {
		self.max_tile_size = self.max_tile_size.max(tile_size);
		if index == 0 {
			self.palette_size = Some(palette_size);
		}
		self.frames += 1;
	}

	/// Largest tile blob seen so far.
	pub fn max_tile_size(&self) -> usize {
		self.max_tile_size
	}

	/// Palette size of frame 0, or 0 before frame 0 is recorded.
	pub fn palette_size(&self) -> usize {
		self.palette_size.unwrap_or(0)
	}

	/// Number of recorded frames.
	pub fn frames(&self) -> usize {
		self.frames
	}
}

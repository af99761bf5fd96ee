//! Deterministic color quantization.
//!
//! Frames are reduced to the color count of a single hardware palette before
//! they reach the tile engine. The reduction is a plain median cut that
//! always splits the most populated box first. It only approximates coverage
//! based quantizers such as PIL's MAXCOVERAGE and does not reproduce their
//! palettes:
//!
//! 1. Build a histogram of the frame's colors
//! 2. Repeatedly split the box covering the most pixels along its widest
//!    channel, at the pixel-weighted median
//! 3. Use the pixel-weighted mean of every box as a palette color
//! 4. Map each pixel to the nearest palette color, without dithering
//!
//! Every tie is broken by position (earliest box, lowest channel, lowest
//! palette index), so identical input always yields identical output.

use std::collections::{BTreeMap, HashMap};

use image::{Rgb, RgbImage};

/// A frame reduced to a limited palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
	image: RgbImage,
	palette: Vec<Rgb<u8>>,
}

impl QuantizedImage {
	/// Returns the quantized image; every pixel is a palette color.
	pub fn image(&self) -> &RgbImage {
		&self.image
	}

	/// Returns the selected palette colors.
	pub fn palette(&self) -> &[Rgb<u8>] {
		&self.palette
	}

	/// Number of palette colors.
	pub fn color_count(&self) -> usize {
		self.palette.len()
	}

	/// Consumes `self`, returning the quantized image.
	pub fn into_image(self) -> RgbImage {
		self.image
	}
}

#[derive(Debug, Clone)]
struct ColorBox {
	colors: Vec<([u8; 3], u64)>,
	pixels: u64,
}

impl ColorBox {
	fn new(colors: Vec<([u8; 3], u64)>) -> Self {
		let pixels = colors.iter().map(|&(_, count)| count).sum();
		Self {
			colors,
			pixels,
		}
	}

	fn can_split(&self) -> bool {
		self.colors.len() > 1
	}

	/// Channel with the largest value range; ties pick the lowest channel.
	fn widest_channel(&self) -> usize {
		let mut best = (0, 0u8);
		for channel in 0..3 {
			let (min, max) = self.colors.iter().fold((u8::MAX, u8::MIN), |(min, max), (c, _)| {
				(min.min(c[channel]), max.max(c[channel]))
			});
			let range = max - min;
			if range > best.1 {
				best = (channel, range);
			}
		}
		best.0
	}

	fn split(mut self) -> (Self, Self) {
		let channel = self.widest_channel();
		self.colors.sort_by_key(|&(c, _)| (c[channel], c));

		let half = self.pixels.div_ceil(2);
		let mut acc = 0;
		let mut at = self.colors.len() - 1;
		for (index, &(_, count)) in self.colors.iter().enumerate() {
			acc += count;
			if acc >= half {
				at = index + 1;
				break;
			}
		}
		let at = at.clamp(1, self.colors.len() - 1);

		let right = self.colors.split_off(at);
		(Self::new(self.colors), Self::new(right))
	}

	fn mean(&self) -> Rgb<u8> {
		let mut sums = [0u64; 3];
		for &(c, count) in &self.colors {
			for channel in 0..3 {
				sums[channel] += c[channel] as u64 * count;
			}
		}
		let pixels = self.pixels.max(1);
		Rgb(sums.map(|sum| ((sum + pixels / 2) / pixels) as u8))
	}
}

fn histogram(image: &RgbImage) -> BTreeMap<[u8; 3], u64> {
	let mut histogram = BTreeMap::new();
	for pixel in image.pixels() {
		*histogram.entry(pixel.0).or_insert(0) += 1;
	}
	histogram
}

fn nearest(palette: &[Rgb<u8>], color: [u8; 3]) -> Rgb<u8> {
	let distance = |p: &Rgb<u8>| -> u32 {
		(0..3)
			.map(|channel| {
				let d = p.0[channel] as i32 - color[channel] as i32;
				(d * d) as u32
			})
			.sum()
	};

	let mut best = palette[0];
	let mut best_distance = distance(&best);
	for candidate in &palette[1..] {
		let d = distance(candidate);
		if d < best_distance {
			best = *candidate;
			best_distance = d;
		}
	}
	best
}

/// Reduces `image` to at most `max_colors` colors.
///
/// Images that already use `max_colors` colors or fewer are returned unchanged,
/// with their colors as palette in ascending RGB order. A `max_colors` of zero
/// is treated as one.
///
/// # Examples
///
/// ```
/// use image::{Rgb, RgbImage};
/// use sfcanim_compiler::quantize;
///
/// let image = RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 0]));
/// let quantized = quantize(&image, 16);
///
/// assert_eq!(quantized.color_count(), 16);
/// assert_eq!(quantized, quantize(&image, 16));
/// ```
pub fn quantize(image: &RgbImage, max_colors: usize) -> QuantizedImage {
	let max_colors = max_colors.max(1);
	let histogram = histogram(image);

	if histogram.len() <= max_colors {
		return QuantizedImage {
			image: image.clone(),
			palette: histogram.into_keys().map(Rgb).collect(),
		};
	}

	let mut boxes = vec![ColorBox::new(histogram.into_iter().collect())];
	while boxes.len() < max_colors {
		let mut target: Option<usize> = None;
		for (index, candidate) in boxes.iter().enumerate() {
			if candidate.can_split() && target.is_none_or(|t| candidate.pixels > boxes[t].pixels) {
				target = Some(index);
			}
		}

		let Some(index) = target else {
			break;
		};

		let (left, right) = boxes.remove(index).split();
		boxes.insert(index, right);
		boxes.insert(index, left);
	}

	let palette: Vec<Rgb<u8>> = boxes.iter().map(ColorBox::mean).collect();

	let mut lookup: HashMap<[u8; 3], Rgb<u8>> = HashMap::new();
	let mut quantized = image.clone();
	for pixel in quantized.pixels_mut() {
		*pixel = *lookup.entry(pixel.0).or_insert_with(|| nearest(&palette, pixel.0));
	}

	QuantizedImage {
		image: quantized,
		palette,
	}
}

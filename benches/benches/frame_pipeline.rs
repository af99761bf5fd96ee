//! Benchmark suite for the in-process parts of frame compilation
//!
//! Measures color quantization, empty-tile search, sparse map transcoding and
//! container packaging. The external tile engine is not part of the run.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sfcanim_benches::{
	SCREEN_HEIGHT, SCREEN_WIDTH, generate_background_frame, generate_dense_map, generate_sprite_frame,
	generate_tiles,
};
use sfcanim_compiler::quantize;
use sfcanim_types::file::map::{find_empty_tile, transcode_sparse};
use sfcanim_types::file::{AnimFile, Bpp, FrameRecord, MapGeometry};
use std::hint::black_box;

/// Benchmark median-cut quantization on sprite and background frames
fn bench_quantize(c: &mut Criterion) {
	let mut group = c.benchmark_group("quantize");

	let frames = [
		("sprite_64", generate_sprite_frame(64, 64, 0)),
		("sprite_128", generate_sprite_frame(128, 128, 0)),
		("background", generate_background_frame(0)),
	];

	for (name, frame) in &frames {
		group.throughput(Throughput::Elements(u64::from(frame.width() * frame.height())));
		for colors in [4usize, 16] {
			group.bench_with_input(BenchmarkId::new(*name, colors), frame, |b, frame| {
				b.iter(|| black_box(quantize(black_box(frame), colors)));
			});
		}
	}

	group.finish();
}

/// Benchmark sparse transcoding at several sprite densities
fn bench_transcode_sparse(c: &mut Criterion) {
	let mut group = c.benchmark_group("transcode_sparse");

	let geometry = MapGeometry::new(8, 8, SCREEN_WIDTH, SCREEN_HEIGHT);
	for fill in [10u32, 50, 100] {
		let dense = generate_dense_map(geometry.columns(), geometry.rows(), fill);
		group.throughput(Throughput::Elements(geometry.cell_count() as u64));
		group.bench_with_input(BenchmarkId::new("fill_percent", fill), &dense, |b, dense| {
			b.iter(|| black_box(transcode_sparse(black_box(dense), &geometry, Some(0))));
		});
	}

	group.finish();
}

/// Benchmark the empty-tile scan with the empty tile near the end of the blob
fn bench_find_empty_tile(c: &mut Criterion) {
	let mut group = c.benchmark_group("find_empty_tile");

	let bytes_per_tile = Bpp::Four.bytes_per_tile(8, 8);
	for count in [64usize, 512, 1024] {
		let tiles = generate_tiles(count, bytes_per_tile, count - 1);
		group.throughput(Throughput::Bytes(tiles.len() as u64));
		group.bench_with_input(BenchmarkId::new("tiles", count), &tiles, |b, tiles| {
			b.iter(|| black_box(find_empty_tile(black_box(tiles), bytes_per_tile)));
		});
	}

	group.finish();
}

/// Benchmark packaging and serializing a multi-frame container
fn bench_package(c: &mut Criterion) {
	let mut group = c.benchmark_group("package");

	let bytes_per_tile = Bpp::Four.bytes_per_tile(8, 8);
	let records: Vec<FrameRecord> = (0..32)
		.map(|i| {
			let palette = if i == 0 { vec![0u8; 32] } else { Vec::new() };
			FrameRecord::new(generate_tiles(48, bytes_per_tile, 0), vec![0u8; 64 * 4], palette)
		})
		.collect();
	let max_tile_size = records.iter().map(|r| r.tiles().len()).max().unwrap_or(0);

	group.bench_function("32_frames", |b| {
		b.iter(|| {
			let file = AnimFile::new(Bpp::Four, max_tile_size, 32, black_box(records.clone())).unwrap();
			black_box(file.to_bytes())
		});
	});

	group.finish();
}

criterion_group!(benches, bench_quantize, bench_transcode_sparse, bench_find_empty_tile, bench_package);
criterion_main!(benches);

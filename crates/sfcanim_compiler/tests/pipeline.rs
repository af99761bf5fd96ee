//! End-to-end pipeline runs against an in-process tile engine.

mod common;

use common::*;
use image::RgbImage;
use sfcanim_compiler::prelude::*;
use sfcanim_compiler::{FrameBudget, MapEncoder};
use sfcanim_types::prelude::*;

fn sprite_config(input: &std::path::Path, output: &std::path::Path) -> CompileConfig {
	CompileConfig::new(input, output).with_mode(MapMode::Sprite)
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
	u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[test_log::test]
fn test_sprite_animation_layout() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let out_file = output.path().join("walk.anim");

	let frames: Vec<_> = (0..5).map(|i| square_frame(32, 32, i * 4, 8, 8, RED)).collect();
	write_frames(input.path(), &frames);

	let mut pipeline = Pipeline::new(sprite_config(input.path(), &out_file), MockEngine::default());
	let compilation = pipeline.run().unwrap();

	assert_eq!(pipeline.stage(), Stage::Done);
	assert_eq!(pipeline.engine().calls, 5);

	let data = std::fs::read(&out_file).unwrap();
	assert_eq!(&data[0..2], b"SP");
	assert_eq!(read_u16(&data, 6), 5);
	assert_eq!(data[8], 2);
	assert!(data.len() > 19);

	let mut previous = 0;
	for index in 0..5 {
		let pointer = read_u16(&data, 9 + index * 2);
		assert!(pointer >= 19);
		assert!(pointer > previous);
		previous = pointer;
	}
	assert_eq!(read_u16(&data, 9), 19);

	assert_eq!(data, compilation.animation.to_bytes());
	assert_eq!(AnimFile::open(&out_file).unwrap(), compilation.animation);
}

#[test]
fn test_background_full_screen_map() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	let frame = square_frame(256, 224, 64, 32, 40, GREEN);
	write_frames(input.path(), &[frame]);

	let config = CompileConfig::new(input.path(), output.path().join("title.anim")).with_palettes(8);
	let compilation = Pipeline::new(config, MockEngine::default()).run().unwrap();

	let record = compilation.animation.get_frame(0).unwrap();
	assert_eq!(record.map().len(), 896 * 2);
	assert_eq!(record.palette().len(), 16 * 8 * 2);
	assert_eq!(compilation.report.frames[0].dense_cells, 896);
	assert_eq!(compilation.report.frames[0].empty_tile, None);
}

#[test]
fn test_header_sizes_follow_frames() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	// Frame 1 holds the most distinct tiles
	let frames = [
		square_frame(32, 32, 0, 0, 8, RED),
		RgbImage::from_fn(32, 32, |x, y| match (x / 8 + y / 8) % 3 {
			0 => RED,
			1 => GREEN,
			_ => BLUE,
		}),
		square_frame(32, 32, 8, 8, 16, BLUE),
	];
	write_frames(input.path(), &frames);

	let compilation =
		Pipeline::new(sprite_config(input.path(), &output.path().join("a.anim")), MockEngine::default())
			.compile()
			.unwrap();
	let animation = &compilation.animation;

	let largest = animation.iter().map(|f| f.tiles().len()).max().unwrap();
	assert_eq!(animation.header().max_tile_size() as usize, largest);
	assert_eq!(largest, animation.get_frame(1).unwrap().tiles().len());

	assert_eq!(animation.get_frame(0).unwrap().palette().len(), 32);
	assert_eq!(animation.header().palette_size(), 32);
	assert!(animation.iter().skip(1).all(|f| f.palette().is_empty()));
}

#[test]
fn test_sparse_map_skips_empty_tile() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	write_frames(input.path(), &[square_frame(32, 32, 8, 8, 8, RED), square_frame(32, 32, 16, 24, 8, GREEN)]);

	let compilation =
		Pipeline::new(sprite_config(input.path(), &output.path().join("a.anim")), MockEngine::default())
			.compile()
			.unwrap();

	let first = compilation.animation.get_frame(0).unwrap();
	assert_eq!(compilation.report.frames[0].empty_tile, Some(0));
	assert_eq!(first.map(), [8, 8, 0x01, 0x30]);

	for (frame, report) in compilation.animation.iter().zip(&compilation.report.frames) {
		let empty = report.empty_tile.unwrap();
		assert_eq!(frame.map().len() % 4, 0);
		for chunk in frame.map().chunks_exact(4) {
			let entry = SparseMapEntry::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
			assert_ne!(entry.tile_index(), empty);
		}
	}

	let second = compilation.animation.get_frame(1).unwrap();
	assert_eq!(second.map(), [16, 24, 0x01, 0x30]);
}

#[test]
fn test_sparse_map_without_empty_tile_keeps_every_cell() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	write_frames(input.path(), &[RgbImage::from_pixel(16, 16, RED)]);

	let compilation =
		Pipeline::new(sprite_config(input.path(), &output.path().join("a.anim")), MockEngine::default())
			.compile()
			.unwrap();

	let frame = compilation.animation.get_frame(0).unwrap();
	assert_eq!(compilation.report.frames[0].empty_tile, None);
	assert_eq!(frame.tiles().len(), 32);
	assert_eq!(frame.map(), [0, 0, 0x00, 0x30, 8, 0, 0x00, 0x30, 0, 8, 0x00, 0x30, 8, 8, 0x00, 0x30]);
}

#[test]
fn test_two_bpp_header() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	write_frames(input.path(), &[square_frame(16, 16, 0, 0, 8, BLUE)]);

	let config = sprite_config(input.path(), &output.path().join("a.anim")).with_bpp(Bpp::Two);
	let compilation = Pipeline::new(config, MockEngine::default()).compile().unwrap();

	assert_eq!(compilation.animation.header().bpp(), Bpp::Two);
	assert_eq!(compilation.animation.to_bytes()[8], 1);
	assert_eq!(compilation.animation.header().palette_size(), 8);
	assert_eq!(compilation.animation.get_frame(0).unwrap().tiles().len(), 2 * 16);
}

#[test]
fn test_compilation_is_deterministic() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	let frames: Vec<_> = (0..3)
		.map(|i| RgbImage::from_fn(32, 32, |x, y| image::Rgb([(x * 8) as u8, (y * 8) as u8, (i * 40) as u8])))
		.collect();
	write_frames(input.path(), &frames);

	let config = CompileConfig::new(input.path(), output.path().join("a.anim")).with_palettes(8);
	let first = Pipeline::new(config.clone(), MockEngine::default()).compile().unwrap();
	let second = Pipeline::new(config, MockEngine::default()).compile().unwrap();

	assert_eq!(first.animation.to_bytes(), second.animation.to_bytes());
	assert_eq!(first.report, second.report);
}

#[test]
fn test_engine_failure_writes_nothing() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let out_file = output.path().join("a.anim");

	let frames: Vec<_> = (0..4).map(|i| square_frame(16, 16, i * 2, 0, 8, RED)).collect();
	write_frames(input.path(), &frames);

	let engine = FailingEngine {
		fail_at: 2,
		overflow: false,
	};
	let mut pipeline = Pipeline::new(sprite_config(input.path(), &out_file), engine);
	let err = pipeline.run().unwrap_err();

	assert!(matches!(err, CompileError::EngineInvocation { frame: 2, .. }));
	assert_eq!(err.frame(), Some(2));
	assert_eq!(pipeline.stage(), Stage::Failed);
	assert!(!out_file.exists());
	assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_engine_overflow_is_format_constraint() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	write_frames(input.path(), &[square_frame(16, 16, 0, 0, 8, RED), square_frame(16, 16, 8, 8, 8, RED)]);

	let engine = FailingEngine {
		fail_at: 1,
		overflow: true,
	};
	let err = Pipeline::new(sprite_config(input.path(), &output.path().join("a.anim")), engine)
		.run()
		.unwrap_err();

	assert!(matches!(err, CompileError::FormatConstraint { frame: 1, .. }));
}

#[test_log::test]
fn test_pointer_overflow_names_the_frame() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let out_file = output.path().join("big.anim");

	write_frames(input.path(), &[square_frame(16, 16, 0, 0, 8, RED), square_frame(16, 16, 8, 8, 8, RED)]);

	// frame 0 fits on its own, but pushes frame 1 past the 16-bit pointer range
	let engine = BloatedEngine {
		tiles_len: 0xFFF0,
	};
	let mut pipeline = Pipeline::new(CompileConfig::new(input.path(), &out_file), engine);
	let err = pipeline.run().unwrap_err();

	assert!(matches!(err, CompileError::FormatConstraint { frame: 1, .. }));
	assert!(err.to_string().contains("frame pointer"));
	assert_eq!(pipeline.stage(), Stage::Failed);
	assert!(!out_file.exists());
}

#[test]
fn test_oversized_tile_blob_names_the_frame() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();

	write_frames(input.path(), &[square_frame(16, 16, 0, 0, 8, RED)]);

	let engine = BloatedEngine {
		tiles_len: 0x10000,
	};
	let err = Pipeline::new(CompileConfig::new(input.path(), output.path().join("big.anim")), engine)
		.run()
		.unwrap_err();

	assert!(matches!(err, CompileError::FormatConstraint { frame: 0, .. }));
	assert!(err.to_string().contains("tile blob length"));
}

#[test]
fn test_missing_and_empty_input() {
	let output = tempfile::tempdir().unwrap();
	let missing = output.path().join("missing");

	let err = Pipeline::new(CompileConfig::new(&missing, output.path().join("a.anim")), MockEngine::default())
		.run()
		.unwrap_err();
	assert!(matches!(err, CompileError::MissingInputDirectory(_)));

	let empty = tempfile::tempdir().unwrap();
	std::fs::write(empty.path().join("notes.txt"), b"not a frame").unwrap();
	let err = Pipeline::new(CompileConfig::new(empty.path(), output.path().join("a.anim")), MockEngine::default())
		.run()
		.unwrap_err();
	assert!(matches!(err, CompileError::NoFrames(_)));
}

#[test]
fn test_invalid_settings_rejected_before_enumeration() {
	let output = tempfile::tempdir().unwrap();
	let config = CompileConfig::new(output.path().join("missing"), output.path().join("a.anim")).with_palettes(0);

	let mut pipeline = Pipeline::new(config, MockEngine::default());
	assert!(matches!(pipeline.run(), Err(CompileError::Configuration(_))));
	assert_eq!(pipeline.engine().calls, 0);
}

#[test]
fn test_budget_matches_header() {
	let mut budget = FrameBudget::new();
	budget.record(0, 64, 32);
	budget.record(1, 128, 0);

	let animation = AnimFile::new(
		Bpp::Four,
		budget.max_tile_size(),
		budget.palette_size(),
		vec![FrameRecord::new(vec![0; 64], vec![], vec![0; 32]), FrameRecord::new(vec![0; 128], vec![], vec![])],
	)
	.unwrap();

	assert_eq!(animation.header().max_tile_size(), 128);
	assert_eq!(animation.header().palette_size(), 32);
	assert_eq!(MapMode::Sprite.encoder().mode(), MapMode::Sprite);
}

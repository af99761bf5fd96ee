//! Command-line tests for `anim_writer`

use std::path::Path;
use std::process::{Command, Output};

use image::{Rgb, RgbImage};
use sfcanim_rs::prelude::*;

fn anim_writer(cwd: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_anim_writer"))
		.current_dir(cwd)
		.args(args)
		.env_remove("ANIM_WRITER_ENGINE")
		.env("RUST_LOG", "info")
		.output()
		.unwrap()
}

fn write_frame(dir: &Path) {
	let frame = RgbImage::from_fn(16, 16, |x, _| if x < 8 { Rgb([0, 0, 0]) } else { Rgb([248, 0, 0]) });
	frame.save(dir.join("frame_00.png")).unwrap();
}

#[test]
fn test_info_reports_header() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("bang.anim");

	let frames = vec![
		FrameRecord::new(vec![0; 64], vec![0; 8], vec![0; 32]),
		FrameRecord::new(vec![0; 96], vec![0; 4], vec![]),
	];
	AnimFile::new(Bpp::Four, 96, 32, frames).unwrap().save(&path).unwrap();

	let output = anim_writer(dir.path(), &["info", "bang.anim", "--detailed"]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Frames: 2"));
	assert!(stdout.contains("Max tile size: 96 bytes"));
	assert!(stdout.contains("Palette size: 32 bytes"));
	// 9-byte header + two pointers, then frame 0 (6 + 64 + 8 + 32 bytes)
	assert!(stdout.contains("0xd"));
	assert!(stdout.contains("0x7b"));
}

#[test]
fn test_info_rejects_garbage() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("junk.anim"), b"XX\x00\x00\x00\x00\x00\x00\x02").unwrap();

	let output = anim_writer(dir.path(), &["info", "junk.anim"]);
	assert!(!output.status.success());
}

#[test]
fn test_missing_input_folder_fails() {
	let dir = tempfile::tempdir().unwrap();

	let output = anim_writer(dir.path(), &["compile", "missing", "out.anim"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("nonexistent"));
	assert!(!dir.path().join("out.anim").exists());
}

#[test]
fn test_engine_failure_leaves_no_output() {
	let dir = tempfile::tempdir().unwrap();
	let frames = dir.path().join("frames");
	std::fs::create_dir(&frames).unwrap();
	write_frame(&frames);

	let output = anim_writer(
		dir.path(),
		&["compile", "frames", "out.anim", "--mode", "sprite", "--engine", "definitely-not-superfamiconv"],
	);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Frame 0"));
	assert!(!dir.path().join("out.anim").exists());
}

#[test]
fn test_invalid_settings_fail() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::create_dir(dir.path().join("frames")).unwrap();
	std::fs::write(dir.path().join("anim_writer.toml"), "palettes = 12\n").unwrap();

	let output = anim_writer(dir.path(), &["compile", "frames", "out.anim"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("palette count"));
}

#[test]
fn test_tile_threshold_requires_legacy_writer() {
	let dir = tempfile::tempdir().unwrap();

	let output = anim_writer(dir.path(), &["compile", "frames", "out.anim", "--tile-threshold", "10"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("legacy writer"));
}

#[cfg(unix)]
#[test]
fn test_tile_threshold_hands_off_to_legacy_writer() {
	let dir = tempfile::tempdir().unwrap();

	let output = anim_writer(
		dir.path(),
		&["compile", "frames", "out.anim", "--tile-threshold", "10", "--legacy-writer", "true"],
	);

	assert!(output.status.success());
	assert!(!dir.path().join("out.anim").exists());
}

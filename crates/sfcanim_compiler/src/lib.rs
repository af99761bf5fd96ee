//! Frame compilation pipeline for the `sfcanim-rs` project.
//!
//! This crate turns a directory of ordered frame images into an `SP` animation
//! container (see [`sfcanim_types::file::anim`]). The run is strictly sequential:
//!
//! 1. **Enumerate** frame files ([`enumerate_frames`]) in file name order
//! 2. **Compile** each frame: quantize colors ([`quantize`]), hand the quantized
//!    image to a [`TileEngine`] for palette/tile/map generation, then encode the
//!    map with the mode's [`MapEncoder`]
//! 3. **Track** the maximum tile blob and the shared palette ([`FrameBudget`])
//! 4. **Package** the records and write the container atomically
//!
//! Any failure aborts the run without writing an output file.
//!
//! # Examples
//!
//! ```no_run
//! use sfcanim_compiler::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CompileConfig::new("frames/bang", "build/bang.anim")
//!     .with_mode(MapMode::Sprite)
//!     .with_bpp(Bpp::Four);
//!
//! let mut pipeline = Pipeline::new(config, SuperFamiconv::locate());
//! let compilation = pipeline.run()?;
//!
//! println!("{}", compilation.animation);
//! # Ok(())
//! # }
//! ```

mod budget;
mod compiler;
mod config;
mod encoder;
mod enumerate;
mod error;
mod pipeline;
mod report;

pub mod engine;
pub mod quantize;

/// `use sfcanim_compiler::prelude::*;` to import commonly used items.
pub mod prelude;

pub use budget::FrameBudget;
pub use compiler::{CompiledFrame, ConvertedFrame, FrameCompiler};
pub use config::{CompileConfig, MapMode};
pub use encoder::{DenseEncoder, EncodedMap, MapEncoder, MapInput, SparseEncoder};
pub use engine::{EngineOutput, EngineRequest, SuperFamiconv, TileEngine};
pub use enumerate::{FRAME_EXTENSIONS, enumerate_frames};
pub use error::{CompileError, EngineError};
pub use pipeline::{Compilation, Pipeline, Stage};
pub use quantize::{QuantizedImage, quantize};
pub use report::{BuildReport, FrameReport};

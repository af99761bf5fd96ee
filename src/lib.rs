#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `sfcanim-rs` compiles folders of ordered frame images into compact `SP`
//! animation containers for 16-bit console sprite and background playback.
//!
//! The heavy lifting lives in the member crates, re-exported here:
//!
//! - [`sfcanim_types`]: container layout, tile attributes and the sparse map transcoder
//! - [`sfcanim_compiler`]: color quantization, tile engine contract and the pipeline
//!
pub use sfcanim_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use sfcanim_dylib;

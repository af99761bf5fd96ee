#![allow(clippy::single_component_path_imports)]

//! Forces dynamic linking of `sfcanim_internal` when the `dynamic_linking` feature is enabled.
//!
//! This crate should not be used directly.

#[allow(unused_imports)]
use sfcanim_internal;

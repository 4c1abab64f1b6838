// src/core/mod.rs

pub mod align;
pub mod sanitize;

pub use align::{longest_common_run, CommonRun};

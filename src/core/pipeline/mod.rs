//! # Pipeline Module
//!
//! Orchestrates one comparison run.
//!
//! ## Pipeline Stages
//! 1. **Decode** - Validate and read both inputs
//! 2. **Compare** - Per-channel difference, tolerance mask, difference images
//! 3. **Write** - Persist the three images and the report
//!
//! ## Parallelism
//! The compare stage splits rows across rayon's thread pool.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult};

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - sampled curves (`TimeSeries`)
//! - decay-model and standardization parameters
//! - analysis outputs (`CrossingResult`, `ClassificationResult`)
//! - catalog entries and the run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;

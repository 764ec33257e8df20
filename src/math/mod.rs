//! Mathematical utilities.

pub mod embedding;

pub use embedding::*;

//! Physical models evaluated by the analysis code.
//!
//! Models are small and pure so the search/classification code can stay generic.

pub mod decay;

pub use decay::*;

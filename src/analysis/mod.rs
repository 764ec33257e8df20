//! Light-curve analysis.
//!
//! Responsibilities:
//!
//! - derive the nickel mass from model identifiers
//! - locate crossing times against the decay deposition curve (per model, parallel)
//! - classify catalog objects against the standardization band
//! - summarize peak magnitudes and decline rates

pub mod batch;
pub mod crossing;
pub mod model_id;
pub mod phillips;
pub mod standardization;

pub use batch::*;
pub use crossing::*;
pub use model_id::*;
pub use phillips::*;
pub use standardization::*;

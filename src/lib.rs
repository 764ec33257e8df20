//! `light-curves` library crate.
//!
//! The binary (`light`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the decay model, crossing search and classifier are reusable from other tools
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

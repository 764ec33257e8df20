//! Input/output helpers.
//!
//! - whitespace table parsing shared by the simulation readers (`table`)
//! - bolometric (`lbol`) and broad-band magnitude (`tt`) tables
//! - SALT results ingest + validation (`salt`)
//! - model discovery in the data directory (`discover`)
//! - result exports (CSV/JSON) (`export`)

pub mod discover;
pub mod export;
pub mod lbol;
pub mod salt;
pub mod table;
pub mod tt;

pub use discover::*;
pub use export::*;
pub use lbol::*;
pub use salt::*;
pub use table::*;
pub use tt::*;

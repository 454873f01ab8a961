//! Core types for the CO2 emission sources toolkit.
//!
//! Holds the emissions table model, the closed set of emission sources,
//! the static region lookup and the CSV loaders that populate them.

pub mod config;
pub mod emissions;
pub mod error;
pub mod region;
pub mod source;

pub use emissions::EmissionRecord;
pub use error::{Co2Error, Result};
pub use region::RegionMap;
pub use source::{Source, SourceValues};

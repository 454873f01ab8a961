//! Reshaping of CO2 emissions records into chart-ready series.
//!
//! Every function here is a pure transform of a borrowed record slice.
//! Nothing is cached between calls; callers that want caching can key on
//! [`filter::FilterParams`].
//!
//! ```rust
//! use co2_core::{EmissionRecord, Source};
//! use co2_data::reshape::global_breakdown;
//!
//! let us = [100.0, 50.0, 30.0, 10.0, 5.0, 5.0];
//! let cn = [300.0, 100.0, 50.0, 40.0, 5.0, 5.0];
//! let records = vec![
//!     EmissionRecord::new("United States", "USA", 2020, us, 200.0),
//!     EmissionRecord::new("China", "CHN", 2020, cn, 500.0),
//! ];
//! let breakdown = global_breakdown(&records, 2020);
//! assert_eq!(breakdown[&Source::Coal], 400.0);
//! ```

pub mod dashboard;
pub mod filter;
pub mod models;
pub mod reshape;

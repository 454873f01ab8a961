//! Result structs handed to chart renderers.
//!
//! All structs derive `Serialize` so they can be emitted as JSON.

use co2_core::{Source, SourceValues};
use serde::Serialize;

/// Per-source sums for one year, before melting into long form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearlySources {
    pub year: i32,
    pub sources: SourceValues,
}

/// One (year, source, value) point of a melted time series.
///
/// `value` is either million tonnes CO2 or a percentage share, depending on
/// which series produced it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearSourceValue {
    pub year: i32,
    pub source: Source,
    pub value: f64,
}

/// Per-source sums for one region in the focus year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionSources {
    pub region: String,
    pub sources: SourceValues,
}

/// One bar of the grouped regional chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionSourceValue {
    pub region: String,
    pub source: Source,
    pub value: f64,
}

/// Outcome of the regional step.
///
/// `Empty` is distinct from a breakdown whose emissions happen to be zero:
/// it means no record matched the selected regions in the focus year.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "regions", rename_all = "snake_case")]
pub enum RegionalOutcome {
    /// No regions were selected, nothing was computed.
    Skipped,
    Empty,
    Breakdown(Vec<RegionSources>),
}

/// A country's share of its total emissions coming from one source.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryIntensity {
    pub country: String,
    pub iso_code: String,
    pub source: Source,
    /// Source emissions in million tonnes CO2.
    pub emissions: f64,
    /// Country total in million tonnes CO2.
    pub total: f64,
    /// `emissions / total * 100`, at most 100.
    pub intensity: f64,
}

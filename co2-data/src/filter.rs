//! Filter parameters selected by the user.

use co2_core::{
    config::{DEFAULT_END_YEAR, DEFAULT_START_YEAR, TOP_N_COUNTRIES},
    EmissionRecord, Source,
};
use serde::Serialize;

/// Inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Clamp both bounds into `bounds`.
    pub fn clamp_to(&self, bounds: &YearRange) -> YearRange {
        YearRange::new(
            self.start.clamp(bounds.start, bounds.end),
            self.end.clamp(bounds.start, bounds.end),
        )
    }
}

/// Earliest and latest year present in `records`.
pub fn year_bounds(records: &[EmissionRecord]) -> Option<YearRange> {
    let min = records.iter().map(|r| r.year).min()?;
    let max = records.iter().map(|r| r.year).max()?;
    Some(YearRange::new(min, max))
}

/// The configured default range, clamped into the data's bounds.
pub fn default_year_range(records: &[EmissionRecord]) -> Option<YearRange> {
    let bounds = year_bounds(records)?;
    Some(YearRange::new(DEFAULT_START_YEAR, DEFAULT_END_YEAR).clamp_to(&bounds))
}

/// The configured default focus year, clamped into the data's bounds.
pub fn default_focus_year(records: &[EmissionRecord]) -> Option<i32> {
    let bounds = year_bounds(records)?;
    Some(DEFAULT_END_YEAR.clamp(bounds.start, bounds.end))
}

/// Everything the reshaper needs to know about the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterParams {
    pub year_range: YearRange,
    pub focus_year: i32,
    /// Selected region names, in selection order.
    pub regions: Vec<String>,
    pub intensity_source: Source,
    pub top_n: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            year_range: YearRange::new(DEFAULT_START_YEAR, DEFAULT_END_YEAR),
            focus_year: DEFAULT_END_YEAR,
            regions: Vec::new(),
            intensity_source: Source::Coal,
            top_n: TOP_N_COUNTRIES,
        }
    }
}

impl FilterParams {
    /// Defaults with the year range and focus year clamped to `records`.
    pub fn for_records(records: &[EmissionRecord]) -> Self {
        let mut params = FilterParams::default();
        if let Some(range) = default_year_range(records) {
            params.year_range = range;
        }
        if let Some(year) = default_focus_year(records) {
            params.focus_year = year;
        }
        params
    }
}

//! Dashboard defaults shared by every crate in the workspace.

/// Title shown on the dashboard report.
pub const APP_TITLE: &str = "Global CO2 Emissions Dashboard";

/// Default first year of the year-range filter.
pub const DEFAULT_START_YEAR: i32 = 1990;

/// Default last year of the year-range filter, also the default focus year.
pub const DEFAULT_END_YEAR: i32 = 2021;

/// Default chart height in pixels handed to the renderer.
pub const DEFAULT_CHART_HEIGHT: u32 = 500;

/// Default number of countries in the source intensity ranking.
pub const TOP_N_COUNTRIES: usize = 10;

/// Countries with a total below this (million tonnes CO2) are left out of
/// intensity rankings.
pub const MIN_TOTAL_EMISSIONS: f64 = 10.0;

/// Unit label for absolute emission values.
pub const EMISSIONS_UNIT: &str = "Million Tonnes CO2";

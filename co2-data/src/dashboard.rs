//! Assembles every chart view of the emission sources page in one pass.

use crate::{
    filter::FilterParams,
    models::{CountryIntensity, RegionSourceValue, RegionalOutcome, YearSourceValue},
    reshape,
};
use co2_core::{
    config::{APP_TITLE, DEFAULT_CHART_HEIGHT, EMISSIONS_UNIT},
    EmissionRecord, RegionMap, Source,
};
use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;

/// Shown instead of the regional chart when the selection matches nothing.
pub const NO_REGIONAL_DATA_MESSAGE: &str =
    "No data available for selected regions in the chosen year.";

/// Labels and sizing for one chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub height: u32,
}

impl ChartSpec {
    fn new(title: String, x_label: &str, y_label: &str) -> Self {
        ChartSpec {
            title,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

/// A chart description together with the data it plots.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartView<T> {
    pub chart: ChartSpec,
    pub data: T,
}

/// The regional section: either a grouped bar chart or a no-data notice.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RegionalView {
    Chart(ChartView<Vec<RegionSourceValue>>),
    NoData { message: String },
}

/// Every view of the page for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub generated_at: DateTime<Local>,
    pub params: FilterParams,
    /// Colour for each source, shared by all charts.
    pub colors: BTreeMap<Source, &'static str>,
    pub source_breakdown: ChartView<BTreeMap<Source, f64>>,
    pub share_over_time: ChartView<Vec<YearSourceValue>>,
    pub emissions_over_time: ChartView<Vec<YearSourceValue>>,
    /// `None` when no region was selected.
    pub regional: Option<RegionalView>,
    pub intensity: ChartView<Vec<CountryIntensity>>,
}

/// Run every reshaping step for `params` and label the results.
pub fn build_dashboard(
    records: &[EmissionRecord],
    params: &FilterParams,
    region_map: &RegionMap,
) -> Dashboard {
    let year = params.focus_year;
    let yearly = reshape::yearly_source_totals(records, params.year_range);

    let source_breakdown = ChartView {
        chart: ChartSpec::new(
            format!("Global CO2 Emissions by Source ({})", year),
            "Source",
            EMISSIONS_UNIT,
        ),
        data: reshape::global_breakdown(records, year),
    };

    let share_over_time = ChartView {
        chart: ChartSpec::new(
            "Relative Contribution of Emission Sources Over Time (%)".to_string(),
            "Year",
            "Contribution (%)",
        ),
        data: reshape::melt_percentages(&yearly),
    };

    let emissions_over_time = ChartView {
        chart: ChartSpec::new(
            "Global CO2 Emissions by Source Over Time".to_string(),
            "Year",
            EMISSIONS_UNIT,
        ),
        data: reshape::melt_absolute(&yearly),
    };

    let regional = match reshape::regional_breakdown(records, year, &params.regions, region_map) {
        RegionalOutcome::Skipped => None,
        RegionalOutcome::Empty => Some(RegionalView::NoData {
            message: NO_REGIONAL_DATA_MESSAGE.to_string(),
        }),
        RegionalOutcome::Breakdown(rows) => Some(RegionalView::Chart(ChartView {
            chart: ChartSpec::new(
                format!("CO2 Emissions by Source and Region ({})", year),
                "",
                EMISSIONS_UNIT,
            ),
            data: reshape::melt_regional(&rows),
        })),
    };

    let intensity = ChartView {
        chart: ChartSpec::new(
            format!(
                "Top {} Countries by {} Intensity ({})",
                params.top_n, params.intensity_source, year
            ),
            "% of Total Emissions",
            "",
        ),
        data: reshape::intensity_ranking(records, year, params.intensity_source, params.top_n),
    };

    info!(
        "Built dashboard for {}-{} (focus {}): {} years, {} ranked countries",
        params.year_range.start,
        params.year_range.end,
        year,
        yearly.len(),
        intensity.data.len()
    );

    Dashboard {
        title: APP_TITLE.to_string(),
        generated_at: Local::now(),
        params: params.clone(),
        colors: Source::ALL.into_iter().map(|s| (s, s.color())).collect(),
        source_breakdown,
        share_over_time,
        emissions_over_time,
        regional,
        intensity,
    }
}

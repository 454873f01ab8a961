//! Rendering of command results.

use crate::{load::Dataset, Command, OutputFormat};
use co2_core::{config::DEFAULT_END_YEAR, Source};
use co2_data::{
    dashboard::{build_dashboard, NO_REGIONAL_DATA_MESSAGE},
    filter::{default_focus_year, default_year_range, FilterParams, YearRange},
    models::RegionalOutcome,
    reshape,
};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Run `command` against `dataset` and return the text to print.
pub fn render(dataset: &Dataset, command: Command) -> anyhow::Result<String> {
    let records = &dataset.records;
    match command {
        Command::Breakdown { year, format } => {
            let year = focus_year(dataset, year);
            let breakdown = reshape::global_breakdown(records, year);
            if breakdown.is_empty() {
                warn!("No records for {}", year);
            }
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&breakdown)?),
                OutputFormat::Csv => breakdown_csv(&breakdown),
            }
        }
        Command::Trend {
            start,
            end,
            percent,
            format,
        } => {
            let range = year_range(dataset, start, end);
            let series = if percent {
                reshape::percentage_over_time(records, range)
            } else {
                reshape::absolute_over_time(records, range)
            };
            info!("Trend {}-{}: {} points", range.start, range.end, series.len());
            encode(&series, format)
        }
        Command::Regions {
            year,
            regions,
            format,
        } => {
            let year = focus_year(dataset, year);
            match reshape::regional_breakdown(records, year, &regions, &dataset.regions) {
                RegionalOutcome::Breakdown(rows) => encode(&reshape::melt_regional(&rows), format),
                RegionalOutcome::Empty | RegionalOutcome::Skipped => {
                    Ok(NO_REGIONAL_DATA_MESSAGE.to_string())
                }
            }
        }
        Command::Intensity {
            year,
            source,
            top,
            format,
        } => {
            let year = focus_year(dataset, year);
            encode(&reshape::intensity_ranking(records, year, source, top), format)
        }
        Command::Dashboard {
            start,
            end,
            year,
            regions,
            source,
            top,
        } => {
            let params = FilterParams {
                year_range: year_range(dataset, start, end),
                focus_year: focus_year(dataset, year),
                regions,
                intensity_source: source,
                top_n: top,
            };
            let dashboard = build_dashboard(records, &params, &dataset.regions);
            Ok(serde_json::to_string_pretty(&dashboard)?)
        }
        Command::ListRegions => Ok(dataset
            .regions
            .region_names()
            .map(|name| {
                let count = dataset.regions.countries(name).map_or(0, |c| c.len());
                format!("{} ({} countries)", name, count)
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn focus_year(dataset: &Dataset, year: Option<i32>) -> i32 {
    year.or_else(|| default_focus_year(&dataset.records)).unwrap_or(DEFAULT_END_YEAR)
}

fn year_range(dataset: &Dataset, start: Option<i32>, end: Option<i32>) -> YearRange {
    let fallback = default_year_range(&dataset.records)
        .unwrap_or_else(|| FilterParams::default().year_range);
    YearRange::new(start.unwrap_or(fallback.start), end.unwrap_or(fallback.end))
}

fn encode<T: Serialize>(rows: &[T], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            for row in rows {
                wtr.serialize(row)?;
            }
            finish_csv(wtr)
        }
    }
}

fn breakdown_csv(breakdown: &BTreeMap<Source, f64>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["source", "emissions"])?;
    for (source, value) in breakdown {
        wtr.serialize((source, value))?;
    }
    finish_csv(wtr)
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv output: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

use crate::{
    error::{Co2Error, Result},
    source::{Source, SourceValues},
};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

/// Embedded sample of the emissions-by-source table (2018-2021).
pub static SAMPLE_CSV: &str = include_str!("../../fixtures/emissions_sample.csv");

/// ISO codes the source dataset uses for aggregate (non-country) rows.
const AGGREGATE_CODES: [&str; 1] = ["WLD"];

/// One row of the emissions table: a country in a year.
///
/// All emission values are in million tonnes of CO2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    pub country: String,
    /// ISO 3166-1 alpha-3 code
    pub iso_code: String,
    pub year: i32,
    pub sources: SourceValues,
    /// Total as published; expected to be close to `sources.sum()`.
    pub total: f64,
}

/// Row layout of the emissions CSV. Blank numeric cells become `None`.
#[derive(Debug, Deserialize)]
struct EmissionRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "ISO 3166-1 alpha-3")]
    iso_code: Option<String>,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Coal")]
    coal: Option<f64>,
    #[serde(rename = "Oil")]
    oil: Option<f64>,
    #[serde(rename = "Gas")]
    gas: Option<f64>,
    #[serde(rename = "Cement")]
    cement: Option<f64>,
    #[serde(rename = "Flaring")]
    flaring: Option<f64>,
    #[serde(rename = "Other")]
    other: Option<f64>,
    #[serde(rename = "Total")]
    total: Option<f64>,
}

impl EmissionRow {
    /// `Ok(None)` for aggregate rows; an error for non-finite values.
    fn into_record(self) -> Result<Option<EmissionRecord>> {
        let iso_code = match self.iso_code {
            Some(code) => code.to_uppercase(),
            None => return Ok(None),
        };
        if iso_code.is_empty() || AGGREGATE_CODES.contains(&iso_code.as_str()) {
            return Ok(None);
        }
        let values = [
            self.coal,
            self.oil,
            self.gas,
            self.cement,
            self.flaring,
            self.other,
            self.total,
        ]
        .map(|v| v.unwrap_or_default());
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            let column = Source::ALL.get(position).map_or("Total", |s| s.name());
            return Err(Co2Error::InvalidFormat(format!(
                "{} {} has a non-finite {} value",
                iso_code, self.year, column
            )));
        }
        let [coal, oil, gas, cement, flaring, other, total] = values;
        Ok(Some(EmissionRecord {
            country: self.country,
            iso_code,
            year: self.year,
            sources: SourceValues([coal, oil, gas, cement, flaring, other]),
            total,
        }))
    }
}

impl EmissionRecord {
    /// Build a record from values given in canonical source order.
    pub fn new(country: &str, iso_code: &str, year: i32, sources: [f64; 6], total: f64) -> Self {
        EmissionRecord {
            country: country.to_string(),
            iso_code: iso_code.to_string(),
            year,
            sources: SourceValues(sources),
            total,
        }
    }

    pub fn source(&self, source: Source) -> f64 {
        self.sources.get(source)
    }

    /// Parse the embedded sample table.
    pub fn get_sample_vector() -> Result<Vec<EmissionRecord>> {
        EmissionRecord::parse_emissions_csv(SAMPLE_CSV)
    }

    /// Parse a CSV string of emissions data into records.
    ///
    /// Expected headers: `Country, ISO 3166-1 alpha-3, Year, Coal, Oil, Gas,
    /// Cement, Flaring, Other, Total`. Column order does not matter and extra
    /// columns are ignored. Aggregate rows (no ISO code, or `WLD`) are dropped.
    pub fn parse_emissions_csv(csv_object: &str) -> Result<Vec<EmissionRecord>> {
        EmissionRecord::read_records(csv_object.as_bytes())
    }

    /// Load an emissions CSV from disk.
    pub fn load_emissions_file<P: AsRef<Path>>(path: P) -> Result<Vec<EmissionRecord>> {
        let path = path.as_ref();
        debug!("Reading emissions table from {}", path.display());
        let file = File::open(path)?;
        EmissionRecord::read_records(file)
    }

    fn read_records<R: Read>(reader: R) -> Result<Vec<EmissionRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();
        let mut dropped = 0u32;
        for row in rdr.deserialize::<EmissionRow>() {
            match row?.into_record()? {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }
        info!(
            "Loaded {} emission records, dropped {} aggregate rows",
            records.len(),
            dropped
        );
        Ok(records)
    }
}

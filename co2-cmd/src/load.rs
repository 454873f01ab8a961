//! Loading the emissions table and region lookup for a command.

use anyhow::Context;
use clap::Args;
use co2_core::{EmissionRecord, RegionMap};
use log::info;
use std::path::PathBuf;

/// Where to read data from. Both default to the bundled fixtures.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Emissions CSV (defaults to the bundled 2018-2021 sample)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Region lookup CSV with `region,iso_code` rows
    #[arg(long, global = true)]
    pub regions_file: Option<PathBuf>,
}

/// The loaded emissions table and region lookup, read-only for the
/// lifetime of a command.
pub struct Dataset {
    pub records: Vec<EmissionRecord>,
    pub regions: RegionMap,
}

impl Dataset {
    pub fn load(args: &DataArgs) -> anyhow::Result<Dataset> {
        let records = match &args.data {
            Some(path) => EmissionRecord::load_emissions_file(path)
                .with_context(|| format!("failed to load emissions from {}", path.display()))?,
            None => {
                info!("No --data given, using bundled sample");
                EmissionRecord::get_sample_vector().context("bundled sample is unreadable")?
            }
        };
        let regions = match &args.regions_file {
            Some(path) => RegionMap::load_region_file(path)
                .with_context(|| format!("failed to load regions from {}", path.display()))?,
            None => RegionMap::builtin().clone(),
        };
        Ok(Dataset { records, regions })
    }
}

//! Command implementations for the CO2 emission sources CLI.
//!
//! Each subcommand loads the emissions table, runs one reshaping step
//! and prints the result as JSON or CSV.

use clap::{Subcommand, ValueEnum};
use co2_core::{config::TOP_N_COUNTRIES, Co2Error, Source};

pub mod load;
pub mod report;

pub use load::{DataArgs, Dataset};

/// Output encoding for tabular results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Global emissions by source for one year
    Breakdown {
        /// Focus year (defaults to the latest configured year in the data)
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Global emissions by source for each year of a range
    Trend {
        /// First year of the range
        #[arg(long)]
        start: Option<i32>,

        /// Last year of the range
        #[arg(long)]
        end: Option<i32>,

        /// Report each source as a share (%) of the yearly total
        #[arg(long)]
        percent: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Emissions by source for selected regions in one year
    Regions {
        #[arg(short, long)]
        year: Option<i32>,

        /// Region to include (repeatable)
        #[arg(short, long = "region", required = true)]
        regions: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Countries ranked by the share of one source in their total
    Intensity {
        #[arg(short, long)]
        year: Option<i32>,

        /// Emission source to rank by
        #[arg(short, long, value_parser = parse_source, default_value = "coal")]
        source: Source,

        /// Number of countries to return
        #[arg(short = 'n', long, default_value_t = TOP_N_COUNTRIES)]
        top: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Every dashboard view as one JSON document
    Dashboard {
        #[arg(long)]
        start: Option<i32>,

        #[arg(long)]
        end: Option<i32>,

        #[arg(short, long)]
        year: Option<i32>,

        /// Region to include (repeatable)
        #[arg(short, long = "region")]
        regions: Vec<String>,

        #[arg(short, long, value_parser = parse_source, default_value = "coal")]
        source: Source,

        #[arg(short = 'n', long, default_value_t = TOP_N_COUNTRIES)]
        top: usize,
    },

    /// List region names available to --region
    ListRegions,
}

fn parse_source(s: &str) -> Result<Source, String> {
    s.parse().map_err(|e: Co2Error| e.to_string())
}

pub fn run(data: &DataArgs, command: Command) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let output = report::render(&dataset, command)?;
    println!("{}", output);
    Ok(())
}

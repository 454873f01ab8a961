//! CO2 CLI - Command line tool for exploring CO2 emissions by source.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "co2-cli",
    version,
    about = "Global CO2 emissions by source: breakdowns, trends, regions and intensity rankings"
)]
struct Cli {
    #[command(flatten)]
    data: co2_cmd::DataArgs,

    #[command(subcommand)]
    command: co2_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Running {:?}", cli.command);
    co2_cmd::run(&cli.data, cli.command)
}

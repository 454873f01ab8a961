/// Error types for loading emissions and region data
use thiserror::Error;

/// Main error type for CO2 data operations
#[derive(Error, Debug)]
pub enum Co2Error {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to open or read a data file
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Source name outside the fixed set
    #[error("Unknown emission source: {0} (expected Coal, Oil, Gas, Cement, Flaring or Other)")]
    UnknownSource(String),
}

/// Type alias for Results using Co2Error
pub type Result<T> = std::result::Result<T, Co2Error>;

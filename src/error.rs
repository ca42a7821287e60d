use crate::models::Metric;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "Missing data source(s): {}. Make sure the data files ({}) are in place",
        .missing.join(", "),
        .expected.join(", ")
    )]
    MissingSource {
        missing: Vec<String>,
        expected: Vec<String>,
    },

    #[error("The required metric columns ({}) were not found in the loaded data", .candidates.join(", "))]
    SchemaMismatch { candidates: Vec<String> },

    #[error("{view} is unavailable: column(s) {} not found in the data", .missing.join(", "))]
    CapabilityUnavailable { view: String, missing: Vec<String> },

    #[error("Invalid metric range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Unknown metric: {0} (expected one of GHI, DNI, DHI)")]
    UnknownMetric(String),

    #[error("Metric {0} is not available in the loaded data")]
    MetricUnavailable(Metric),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

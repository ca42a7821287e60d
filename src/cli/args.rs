use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Metric;
use crate::utils::constants::{COMPRESSION_SNAPPY, DEFAULT_CHUNK_SIZE, DEFAULT_ROW_GROUP_SIZE};

#[derive(Parser)]
#[command(name = "solar-insights")]
#[command(about = "Explore solar radiation measurements for Benin, Sierra Leone and Togo")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Directory holding the source CSV files")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the loading spinner")]
    pub quiet: bool,
}

/// The filter controls: countries, metric and range.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        long = "country",
        value_name = "COUNTRY",
        help = "Country to include, repeatable [default: all]"
    )]
    pub countries: Vec<String>,

    #[arg(
        short,
        long,
        value_parser = parse_metric,
        help = "Metric to filter on: GHI, DNI or DHI [default: first available]"
    )]
    pub metric: Option<Metric>,

    #[arg(long, allow_hyphen_values = true, help = "Lower bound, inclusive [default: observed minimum]")]
    pub min: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Upper bound, inclusive [default: observed maximum]")]
    pub max: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Parquet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show loaded sources, available metrics and their observed ranges
    Info,

    /// Summary statistics of the selected metric by country
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Every view of the filtered data: box plot, histogram, scatter, summary, preview and map
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Histogram bins [default: from configuration]")]
        bins: Option<usize>,

        #[arg(long, help = "Preview rows [default: from configuration]")]
        rows: Option<usize>,
    },

    /// List coordinates of the filtered rows
    Map {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, default_value = "20", help = "Maximum points to print (0 = all)")]
        limit: usize,
    },

    /// Write the filtered rows to a CSV or Parquet file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(
            short,
            long,
            help = "Output file path [default: output/solar-filtered-{YYMMDD}.{csv|parquet}]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, default_value = COMPRESSION_SNAPPY, help = "Parquet compression")]
        compression: String,

        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, help = "Rows per Parquet record batch")]
        chunk_size: usize,

        #[arg(long, default_value_t = DEFAULT_ROW_GROUP_SIZE, help = "Maximum rows per Parquet row group")]
        row_group_size: usize,
    },
}

fn parse_metric(value: &str) -> Result<Metric, String> {
    value.parse::<Metric>().map_err(|e| e.to_string())
}

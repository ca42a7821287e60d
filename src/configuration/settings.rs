use crate::error::{DashboardError, Result};
use crate::models::{MetricRange, SourceConfig};
use crate::utils::constants::{
    CONFIG_FILE, DEFAULT_DATA_DIR, DEFAULT_HISTOGRAM_BINS, DEFAULT_PREVIEW_ROWS, ENV_PREFIX,
    FALLBACK_RANGE_MAX, FALLBACK_RANGE_MIN,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Range offered for a metric column that holds no values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackRange {
    pub min: f64,
    pub max: f64,
}

impl Default for FallbackRange {
    fn default() -> Self {
        Self {
            min: FALLBACK_RANGE_MIN,
            max: FALLBACK_RANGE_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "SourceConfig::defaults")]
    #[validate(length(min = 1), nested)]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub fallback_range: FallbackRange,

    /// Memory-map source files instead of buffered reads.
    #[serde(default)]
    pub use_mmap: bool,

    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    #[serde(default = "default_histogram_bins")]
    #[validate(range(min = 1))]
    pub histogram_bins: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sources: SourceConfig::defaults(),
            fallback_range: FallbackRange::default(),
            use_mmap: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl Settings {
    /// Layer built-in defaults, a TOML file and `SOLAR_*` environment variables.
    ///
    /// An explicit `path` must exist; otherwise `solar-insights.toml` in the
    /// working directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::with_name(CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.check()?;
        Ok(settings)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Field validation plus the cross-field rules derive cannot express.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.id.as_str()) {
                return Err(DashboardError::Config(format!(
                    "duplicate source id '{}'",
                    source.id
                )));
            }
        }

        self.fallback()?;
        Ok(())
    }

    pub fn fallback(&self) -> Result<MetricRange> {
        MetricRange::new(self.fallback_range.min, self.fallback_range.max)
    }

    pub fn locations(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .map(|s| s.location(&self.data_dir))
            .collect()
    }
}

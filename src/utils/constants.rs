/// Source identifiers
pub const BENIN_SOURCE: &str = "Benin";
pub const SIERRA_LEONE_SOURCE: &str = "Sierra Leone";
pub const TOGO_SOURCE: &str = "Togo";

/// File names
pub const BENIN_FILE: &str = "benin.csv";
pub const SIERRA_LEONE_FILE: &str = "sierraleone.csv";
pub const TOGO_FILE: &str = "togo.csv";
pub const CONFIG_FILE: &str = "solar-insights.toml";

/// Directory names
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Column names
pub const SOURCE_COLUMN: &str = "country";
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";
pub const LATITUDE_ALIASES: [&str; 2] = ["latitude", "lat"];
pub const LONGITUDE_ALIASES: [&str; 3] = ["longitude", "lon", "lng"];

/// Cell values treated as missing
pub const MISSING_VALUES: [&str; 5] = ["", "nan", "na", "n/a", "null"];

/// Timestamp layouts accepted in the Timestamp column
pub const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
pub const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Range used for a metric column with no values
pub const FALLBACK_RANGE_MIN: f64 = 0.0;
pub const FALLBACK_RANGE_MAX: f64 = 1000.0;

/// View defaults
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
pub const BOX_WHISKER_IQR: f64 = 1.5;

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "SOLAR";

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";

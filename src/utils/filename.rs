use chrono::{Datelike, Local};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_OUTPUT_DIR;

/// Generate default export filename with format: solar-filtered-{YYMMDD}.{extension}
pub fn generate_default_export_filename(extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "solar-filtered-{:02}{:02}{:02}.{}",
        year, month, day, extension
    );
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_export_filename() {
        let filename = generate_default_export_filename("csv");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));
        assert!(filename_str.ends_with(".csv"));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert!(file_part.starts_with("solar-filtered-"));
        // solar-filtered- + YYMMDD + .csv
        assert_eq!(file_part.len(), "solar-filtered-".len() + 6 + ".csv".len());
    }

    #[test]
    fn test_extension_follows_format() {
        let filename = generate_default_export_filename("parquet");
        assert_eq!(filename.extension().unwrap(), "parquet");
    }
}

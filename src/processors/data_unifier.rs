use crate::error::{DashboardError, Result};
use crate::models::{RecordSet, SourceConfig, TableSchema, UnifiedTable};
use crate::readers::SourceReader;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads every configured source and concatenates them into one table.
pub struct DataUnifier {
    use_mmap: bool,
}

impl DataUnifier {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Load all sources, in configuration order.
    ///
    /// Any unreadable location fails the whole load with
    /// [`DashboardError::MissingSource`]; a table holding only some of the
    /// sources is never returned. A table without any of the candidate
    /// metric columns fails with [`DashboardError::SchemaMismatch`].
    pub fn load(&self, data_dir: &Path, sources: &[SourceConfig]) -> Result<UnifiedTable> {
        let locations: Vec<PathBuf> = sources.iter().map(|s| s.location(data_dir)).collect();
        self.check_locations(&locations)?;

        let reader = SourceReader::with_mmap(self.use_mmap);
        let mut schema = TableSchema::default();
        let mut records = Vec::new();

        for (source, location) in sources.iter().zip(&locations) {
            let data = reader.read_source(&source.id, location)?;

            if data.records.is_empty() {
                warn!(source = %source.id, path = %location.display(), "source contributed no rows");
            } else {
                info!(
                    source = %source.id,
                    path = %location.display(),
                    rows = data.records.len(),
                    "loaded source"
                );
            }
            if data.unparsed_timestamps > 0 {
                debug!(
                    source = %source.id,
                    count = data.unparsed_timestamps,
                    "timestamps left unparsed"
                );
            }

            schema.merge(&data.schema);
            records.extend(data.records);
        }

        let source_ids = sources.iter().map(|s| s.id.clone()).collect();
        let table = UnifiedTable::from_records(source_ids, records, schema)?;

        info!(
            rows = table.len(),
            metrics = ?table.available_metrics(),
            "unified table ready"
        );

        Ok(table)
    }

    /// Every location must be a readable file before any of them is parsed.
    fn check_locations(&self, locations: &[PathBuf]) -> Result<()> {
        let missing: Vec<String> = locations
            .iter()
            .filter(|path| !path.is_file() || File::open(path).is_err())
            .map(|path| path.display().to_string())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(DashboardError::MissingSource {
            missing,
            expected: locations
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        })
    }
}

impl Default for DataUnifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::logging::capture_logs;
    use crate::models::Metric;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tracing::Level;

    fn write_source(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    fn three_sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig::new("Benin", "benin.csv"),
            SourceConfig::new("Sierra Leone", "sierraleone.csv"),
            SourceConfig::new("Togo", "togo.csv"),
        ]
    }

    #[test]
    fn test_load_concatenates_in_source_then_row_order() -> Result<()> {
        let dir = TempDir::new()?;
        write_source(&dir, "benin.csv", "GHI,DNI\n1,10\n2,20\n");
        write_source(&dir, "sierraleone.csv", "GHI,DNI\n3,30\n");
        write_source(&dir, "togo.csv", "GHI,DNI\n4,40\n5,50\n6,60\n");

        let table = DataUnifier::new().load(dir.path(), &three_sources())?;

        assert_eq!(table.len(), 2 + 1 + 3);
        let tagged: Vec<(&str, Option<f64>)> = table
            .records()
            .iter()
            .map(|r| (r.source.as_str(), r.ghi))
            .collect();
        assert_eq!(
            tagged,
            vec![
                ("Benin", Some(1.0)),
                ("Benin", Some(2.0)),
                ("Sierra Leone", Some(3.0)),
                ("Togo", Some(4.0)),
                ("Togo", Some(5.0)),
                ("Togo", Some(6.0)),
            ]
        );
        assert_eq!(table.available_metrics(), &[Metric::Ghi, Metric::Dni]);
        assert_eq!(table.source_ids(), &["Benin", "Sierra Leone", "Togo"]);

        Ok(())
    }

    #[test]
    fn test_one_missing_source_fails_whole_load() -> Result<()> {
        let dir = TempDir::new()?;
        write_source(&dir, "benin.csv", "GHI\n1\n");
        write_source(&dir, "togo.csv", "GHI\n2\n");

        let err = DataUnifier::new()
            .load(dir.path(), &three_sources())
            .unwrap_err();

        match err {
            DashboardError::MissingSource { missing, expected } => {
                assert_eq!(missing.len(), 1);
                assert!(missing[0].ends_with("sierraleone.csv"));
                assert_eq!(expected.len(), 3);
            }
            other => panic!("expected MissingSource, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn test_directory_location_counts_as_missing() -> Result<()> {
        let dir = TempDir::new()?;
        write_source(&dir, "benin.csv", "GHI\n1\n");
        write_source(&dir, "sierraleone.csv", "GHI\n2\n");
        std::fs::create_dir(dir.path().join("togo.csv"))?;

        let err = DataUnifier::new()
            .load(dir.path(), &three_sources())
            .unwrap_err();

        match err {
            DashboardError::MissingSource { missing, expected } => {
                assert_eq!(missing.len(), 1);
                assert!(missing[0].ends_with("togo.csv"));
                assert_eq!(expected.len(), 3);
            }
            other => panic!("expected MissingSource, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn test_unparsed_timestamps_traced_at_debug() {
        let dir = TempDir::new().unwrap();
        for source in three_sources() {
            write_source(
                &dir,
                source.file.to_str().unwrap(),
                "Timestamp,GHI\nyesterday,1\n2021-08-09 00:01,2\n",
            );
        }

        let load = || {
            let table = DataUnifier::new().load(dir.path(), &three_sources()).unwrap();
            assert!(table.records()[0].timestamp.is_none());
        };

        let warn_logs = capture_logs(Level::WARN, load);
        assert!(!warn_logs.contains("timestamps left unparsed"));

        let debug_logs = capture_logs(Level::DEBUG, load);
        assert!(debug_logs.contains("timestamps left unparsed"));
    }

    #[test]
    fn test_no_candidate_metric_is_schema_mismatch() -> Result<()> {
        let dir = TempDir::new()?;
        for source in three_sources() {
            write_source(&dir, source.file.to_str().unwrap(), "Tamb,RH\n25.0,80\n");
        }

        let result = DataUnifier::new().load(dir.path(), &three_sources());
        assert!(matches!(result, Err(DashboardError::SchemaMismatch { .. })));

        Ok(())
    }

    #[test]
    fn test_schema_is_union_across_sources() -> Result<()> {
        let dir = TempDir::new()?;
        write_source(&dir, "benin.csv", "GHI,latitude,longitude\n1,9.3,2.3\n");
        write_source(&dir, "sierraleone.csv", "DHI\n7\n");
        write_source(&dir, "togo.csv", "GHI\n2\n");

        let table = DataUnifier::with_mmap(true).load(dir.path(), &three_sources())?;

        assert_eq!(table.available_metrics(), &[Metric::Ghi, Metric::Dhi]);
        assert!(table.schema().has_coordinates());
        assert_eq!(table.records()[1].ghi, None);
        assert_eq!(table.records()[1].dhi, Some(7.0));

        Ok(())
    }
}

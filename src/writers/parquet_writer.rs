use crate::error::{DashboardError, Result};
use crate::models::{Record, RecordSet, TableSchema};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_CHUNK_SIZE, DEFAULT_ROW_GROUP_SIZE,
};
use crate::writers::layout::{export_columns, ExportColumn};
use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct ParquetExporter {
    compression: Compression,
    row_group_size: usize,
    batch_size: usize,
}

impl ParquetExporter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            batch_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(DashboardError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Write `table` in record batches. Returns `false` without creating
    /// the file when the table is empty.
    pub fn write_table<T: RecordSet + ?Sized>(&self, table: &T, path: &Path) -> Result<bool> {
        if table.is_empty() {
            return Ok(false);
        }

        let columns = export_columns(table.schema());
        let schema = self.create_schema(&columns);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        for chunk in table.records().chunks(self.batch_size) {
            let batch = self.records_to_batch(chunk, &columns, schema.clone())?;
            writer.write(&batch)?;
        }
        writer.close()?;

        info!(path = %path.display(), rows = table.len(), "wrote Parquet export");
        Ok(true)
    }

    /// Arrow schema for the columns present in `table_schema`.
    pub fn schema_for(&self, table_schema: &TableSchema) -> Arc<Schema> {
        self.create_schema(&export_columns(table_schema))
    }

    fn create_schema(&self, columns: &[ExportColumn]) -> Arc<Schema> {
        let fields: Vec<Field> = columns
            .iter()
            .map(|column| match column {
                ExportColumn::Source => Field::new(column.name(), DataType::Utf8, false),
                ExportColumn::Timestamp => Field::new(
                    column.name(),
                    DataType::Timestamp(TimeUnit::Millisecond, None),
                    true,
                ),
                ExportColumn::Metric(_) | ExportColumn::Latitude | ExportColumn::Longitude => {
                    Field::new(column.name(), DataType::Float64, true)
                }
                ExportColumn::Extra(_) => Field::new(column.name(), DataType::Utf8, true),
            })
            .collect();

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(
        &self,
        records: &[Record],
        columns: &[ExportColumn],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let arrays: Vec<ArrayRef> = columns
            .iter()
            .map(|column| -> ArrayRef {
                match column {
                    ExportColumn::Source => Arc::new(StringArray::from(
                        records.iter().map(|r| r.source.clone()).collect::<Vec<_>>(),
                    )),
                    ExportColumn::Timestamp => Arc::new(TimestampMillisecondArray::from(
                        records
                            .iter()
                            .map(|r| r.timestamp.map(|t| t.and_utc().timestamp_millis()))
                            .collect::<Vec<_>>(),
                    )),
                    ExportColumn::Metric(metric) => Arc::new(Float64Array::from(
                        records.iter().map(|r| r.metric(*metric)).collect::<Vec<_>>(),
                    )),
                    ExportColumn::Latitude => Arc::new(Float64Array::from(
                        records.iter().map(|r| r.latitude).collect::<Vec<_>>(),
                    )),
                    ExportColumn::Longitude => Arc::new(Float64Array::from(
                        records.iter().map(|r| r.longitude).collect::<Vec<_>>(),
                    )),
                    ExportColumn::Extra(name) => Arc::new(StringArray::from(
                        records
                            .iter()
                            .map(|r| r.extra.get(name).cloned())
                            .collect::<Vec<_>>(),
                    )),
                }
            })
            .collect();

        Ok(RecordBatch::try_new(schema, arrays)?)
    }

    /// Get file metadata information
    pub fn file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0,
            self.compression,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metric, UnifiedTable};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn table(rows: usize) -> UnifiedTable {
        let timestamp = NaiveDate::from_ymd_opt(2021, 8, 9)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let records = (0..rows)
            .map(|i| {
                let mut record = Record::new("Benin")
                    .with_metric(Metric::Ghi, i as f64)
                    .with_timestamp(timestamp)
                    .with_coordinates(9.3, 2.3);
                if i % 2 == 0 {
                    record.extra.insert("Cleaning".to_string(), "1".to_string());
                }
                record
            })
            .collect();

        UnifiedTable::from_records(
            vec!["Benin".into()],
            records,
            TableSchema::from_headers(["Timestamp", "GHI", "latitude", "longitude", "Cleaning"]),
        )
        .unwrap()
    }

    #[test]
    fn test_schema_fields() {
        let schema = ParquetExporter::new().schema_for(table(1).schema());
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();

        assert_eq!(
            names,
            vec!["country", "Timestamp", "GHI", "latitude", "longitude", "Cleaning"]
        );
        assert!(!schema.field(0).is_nullable());
        assert!(schema.field(2).is_nullable());
    }

    #[test]
    fn test_write_in_batches() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("filtered.parquet");

        let exporter = ParquetExporter::new().with_batch_size(7);
        assert!(exporter.write_table(&table(25), &path)?);

        let info = exporter.file_info(&path)?;
        assert_eq!(info.total_rows, 25);
        assert!(info.file_size > 0);

        Ok(())
    }

    #[test]
    fn test_row_group_size_splits_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("grouped.parquet");

        let exporter = ParquetExporter::new()
            .with_row_group_size(10)
            .with_batch_size(10);
        assert!(exporter.write_table(&table(25), &path)?);

        let info = exporter.file_info(&path)?;
        assert_eq!(info.total_rows, 25);
        assert_eq!(info.row_groups, 3);

        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let dir = TempDir::new()?;
        for compression in ["snappy", "gzip", "lz4", "zstd", "none"] {
            let path = dir.path().join(format!("{}.parquet", compression));
            let exporter = ParquetExporter::new().with_compression(compression)?;
            assert!(
                exporter.write_table(&table(3), &path)?,
                "Failed with compression: {}",
                compression
            );
        }

        assert!(ParquetExporter::new().with_compression("brotli-9").is_err());
        Ok(())
    }

    #[test]
    fn test_empty_table_writes_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.parquet");

        assert!(!ParquetExporter::new().write_table(&table(0), &path)?);
        assert!(!path.exists());

        Ok(())
    }
}

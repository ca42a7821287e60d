use crate::error::{DashboardError, Result};
use crate::models::{ColumnKind, Record, TableSchema};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, MISSING_VALUES, TIMESTAMP_FORMATS};
use chrono::NaiveDateTime;
use encoding_rs::{UTF_8, WINDOWS_1252};
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Records and column presence read from a single source file.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub records: Vec<Record>,
    pub schema: TableSchema,
    /// Non-empty Timestamp cells that matched none of the accepted layouts.
    pub unparsed_timestamps: usize,
}

pub struct SourceReader {
    use_mmap: bool,
}

impl SourceReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read a CSV file and tag every row with `source_id`.
    pub fn read_source(&self, source_id: &str, path: &Path) -> Result<SourceData> {
        let file = File::open(path)?;
        if self.use_mmap {
            self.read_mmap(source_id, path, &file)
        } else {
            self.read_buffered(source_id, path, file)
        }
    }

    fn read_buffered(&self, source_id: &str, path: &Path, file: File) -> Result<SourceData> {
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.parse_csv(source_id, &decode(&bytes), &path.display().to_string())
    }

    fn read_mmap(&self, source_id: &str, path: &Path, file: &File) -> Result<SourceData> {
        if file.metadata()?.len() == 0 {
            return Ok(SourceData::default());
        }
        let mmap = unsafe { Mmap::map(file)? };
        self.parse_csv(source_id, &decode(&mmap), &path.display().to_string())
    }

    /// Parse CSV text with a header row. `origin` names the input in errors.
    pub fn parse_csv(&self, source_id: &str, text: &str, origin: &str) -> Result<SourceData> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let kinds: Vec<ColumnKind> = headers.iter().map(ColumnKind::classify).collect();
        let schema = TableSchema::from_headers(headers.iter());

        let mut data = SourceData {
            records: Vec::new(),
            schema,
            unparsed_timestamps: 0,
        };

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let mut record = Record::new(source_id);

            for (kind, field) in kinds.iter().zip(row.iter()) {
                match kind {
                    ColumnKind::Metric(metric) => {
                        record.set_metric(*metric, parse_value(field, metric.column(), origin, line)?);
                    }
                    ColumnKind::Latitude => {
                        record.latitude = parse_value(field, "latitude", origin, line)?;
                    }
                    ColumnKind::Longitude => {
                        record.longitude = parse_value(field, "longitude", origin, line)?;
                    }
                    ColumnKind::Timestamp => {
                        if is_missing(field) {
                            continue;
                        }
                        record.timestamp = parse_timestamp(field);
                        if record.timestamp.is_none() {
                            data.unparsed_timestamps += 1;
                        }
                    }
                    ColumnKind::Source => {}
                    ColumnKind::Extra(name) => {
                        if !field.is_empty() {
                            record.extra.insert(name.clone(), field.to_string());
                        }
                    }
                }
            }

            data.records.push(record);
        }

        Ok(data)
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode as UTF-8 (dropping a BOM), falling back to Windows-1252.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

fn is_missing(field: &str) -> bool {
    MISSING_VALUES.contains(&field.trim().to_ascii_lowercase().as_str())
}

fn parse_value(field: &str, column: &str, origin: &str, line: u64) -> Result<Option<f64>> {
    if is_missing(field) {
        return Ok(None);
    }
    field.trim().parse::<f64>().map(Some).map_err(|_| {
        DashboardError::InvalidFormat(format!(
            "{}: line {}: invalid {} value '{}'",
            origin, line, column, field
        ))
    })
}

fn parse_timestamp(field: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(field.trim(), format).ok())
}

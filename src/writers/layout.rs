use crate::models::{Metric, Record, TableSchema};
use crate::utils::constants::{
    LATITUDE_COLUMN, LONGITUDE_COLUMN, SOURCE_COLUMN, TIMESTAMP_COLUMN, TIMESTAMP_OUTPUT_FORMAT,
};

/// One exported column and how to read it from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportColumn {
    Source,
    Timestamp,
    Metric(Metric),
    Latitude,
    Longitude,
    Extra(String),
}

impl ExportColumn {
    pub fn name(&self) -> &str {
        match self {
            ExportColumn::Source => SOURCE_COLUMN,
            ExportColumn::Timestamp => TIMESTAMP_COLUMN,
            ExportColumn::Metric(metric) => metric.column(),
            ExportColumn::Latitude => LATITUDE_COLUMN,
            ExportColumn::Longitude => LONGITUDE_COLUMN,
            ExportColumn::Extra(name) => name.as_str(),
        }
    }

    /// Cell text, empty when the record has no value.
    pub fn text(&self, record: &Record) -> String {
        match self {
            ExportColumn::Source => record.source.clone(),
            ExportColumn::Timestamp => record
                .timestamp
                .map(|t| t.format(TIMESTAMP_OUTPUT_FORMAT).to_string())
                .unwrap_or_default(),
            ExportColumn::Metric(metric) => format_number(record.metric(*metric)),
            ExportColumn::Latitude => format_number(record.latitude),
            ExportColumn::Longitude => format_number(record.longitude),
            ExportColumn::Extra(name) => record.extra.get(name).cloned().unwrap_or_default(),
        }
    }
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Column order for exports: source tag, timestamp, metrics, coordinates,
/// then the remaining columns in first-seen order. Absent columns are skipped.
pub fn export_columns(schema: &TableSchema) -> Vec<ExportColumn> {
    let mut columns = vec![ExportColumn::Source];
    if schema.has_timestamp() {
        columns.push(ExportColumn::Timestamp);
    }
    columns.extend(schema.metrics().iter().map(|m| ExportColumn::Metric(*m)));
    if schema.has_latitude() {
        columns.push(ExportColumn::Latitude);
    }
    if schema.has_longitude() {
        columns.push(ExportColumn::Longitude);
    }
    columns.extend(
        schema
            .extra_columns()
            .iter()
            .map(|name| ExportColumn::Extra(name.clone())),
    );
    columns
}

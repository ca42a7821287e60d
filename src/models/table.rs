use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{Metric, Record};
use crate::utils::constants::{
    LATITUDE_ALIASES, LATITUDE_COLUMN, LONGITUDE_ALIASES, LONGITUDE_COLUMN, SOURCE_COLUMN,
    TIMESTAMP_COLUMN,
};

/// How a CSV header maps onto a [`Record`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Metric(Metric),
    Timestamp,
    Latitude,
    Longitude,
    /// A column carrying the source tag; the ingestion tag always wins over it.
    Source,
    Extra(String),
}

impl ColumnKind {
    pub fn classify(header: &str) -> Self {
        let name = header.trim();
        if let Some(metric) = Metric::from_column(name) {
            return ColumnKind::Metric(metric);
        }

        let lower = name.to_ascii_lowercase();
        if lower == TIMESTAMP_COLUMN.to_ascii_lowercase() {
            ColumnKind::Timestamp
        } else if LATITUDE_ALIASES.contains(&lower.as_str()) {
            ColumnKind::Latitude
        } else if LONGITUDE_ALIASES.contains(&lower.as_str()) {
            ColumnKind::Longitude
        } else if lower == SOURCE_COLUMN {
            ColumnKind::Source
        } else {
            ColumnKind::Extra(name.to_string())
        }
    }
}

/// Column presence, fixed when the table is built.
///
/// Presence is the union over all sources: a column found in any source
/// counts as present, and rows from sources without it hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSchema {
    metrics: Vec<Metric>,
    has_timestamp: bool,
    has_latitude: bool,
    has_longitude: bool,
    extra_columns: Vec<String>,
}

impl TableSchema {
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut schema = TableSchema::default();
        for header in headers {
            schema.add_column(ColumnKind::classify(header));
        }
        schema
    }

    pub fn add_column(&mut self, kind: ColumnKind) {
        match kind {
            ColumnKind::Metric(metric) => {
                if !self.metrics.contains(&metric) {
                    self.metrics.push(metric);
                    self.metrics.sort();
                }
            }
            ColumnKind::Timestamp => self.has_timestamp = true,
            ColumnKind::Latitude => self.has_latitude = true,
            ColumnKind::Longitude => self.has_longitude = true,
            ColumnKind::Source => {}
            ColumnKind::Extra(name) => {
                if !self.extra_columns.contains(&name) {
                    self.extra_columns.push(name);
                }
            }
        }
    }

    /// Union of two schemas; extra columns keep first-seen order.
    pub fn merge(&mut self, other: &TableSchema) {
        for metric in &other.metrics {
            self.add_column(ColumnKind::Metric(*metric));
        }
        self.has_timestamp |= other.has_timestamp;
        self.has_latitude |= other.has_latitude;
        self.has_longitude |= other.has_longitude;
        for name in &other.extra_columns {
            self.add_column(ColumnKind::Extra(name.clone()));
        }
    }

    /// Candidate metrics present in the data, in candidate order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }

    pub fn has_timestamp(&self) -> bool {
        self.has_timestamp
    }

    pub fn has_latitude(&self) -> bool {
        self.has_latitude
    }

    pub fn has_longitude(&self) -> bool {
        self.has_longitude
    }

    /// Capability check for the geospatial view.
    pub fn has_coordinates(&self) -> bool {
        self.has_latitude && self.has_longitude
    }

    pub fn missing_coordinate_columns(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.has_latitude {
            missing.push(LATITUDE_COLUMN.to_string());
        }
        if !self.has_longitude {
            missing.push(LONGITUDE_COLUMN.to_string());
        }
        missing
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }
}

/// Read access shared by the unified table and every table derived from it.
pub trait RecordSet {
    fn records(&self) -> &[Record];

    fn schema(&self) -> &TableSchema;

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn head(&self, n: usize) -> &[Record] {
        let records = self.records();
        &records[..n.min(records.len())]
    }

    /// Observed `(min, max)` of a metric, or `None` if the column holds no values.
    fn metric_bounds(&self, metric: Metric) -> Option<(f64, f64)> {
        self.records()
            .iter()
            .filter_map(|r| r.metric(metric))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Every source's records, tagged and concatenated in configuration order.
///
/// Built once by [`crate::processors::DataUnifier`] and never mutated;
/// filtering always produces a new [`FilteredTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedTable {
    source_ids: Vec<String>,
    records: Vec<Record>,
    schema: TableSchema,
}

impl UnifiedTable {
    /// Build a table from already-tagged records.
    ///
    /// Fails if a record carries a source outside `source_ids`, or if the
    /// schema has none of the candidate metrics.
    pub fn from_records(
        source_ids: Vec<String>,
        records: Vec<Record>,
        schema: TableSchema,
    ) -> Result<Self> {
        if let Some(stray) = records.iter().find(|r| !source_ids.contains(&r.source)) {
            return Err(DashboardError::UnknownSource(stray.source.clone()));
        }

        if schema.metrics().is_empty() {
            return Err(DashboardError::SchemaMismatch {
                candidates: Metric::candidate_columns(),
            });
        }

        Ok(Self {
            source_ids,
            records,
            schema,
        })
    }

    /// Configured source ids, in configuration order.
    pub fn source_ids(&self) -> &[String] {
        &self.source_ids
    }

    pub fn available_metrics(&self) -> &[Metric] {
        self.schema.metrics()
    }

    pub fn source_count(&self, source: &str) -> usize {
        self.records.iter().filter(|r| r.source == source).count()
    }

    /// Earliest and latest timestamp seen for a source.
    pub fn time_span(&self, source: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.records
            .iter()
            .filter(|r| r.source == source)
            .filter_map(|r| r.timestamp)
            .fold(None, |acc, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }
}

impl RecordSet for UnifiedTable {
    fn records(&self) -> &[Record] {
        &self.records
    }

    fn schema(&self) -> &TableSchema {
        &self.schema
    }
}

/// Rows of a table matching one [`crate::models::FilterSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    records: Vec<Record>,
    schema: TableSchema,
    metric: Metric,
}

impl FilteredTable {
    pub(crate) fn new(records: Vec<Record>, schema: TableSchema, metric: Metric) -> Self {
        Self {
            records,
            schema,
            metric,
        }
    }

    /// The metric the range predicate was applied to.
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl RecordSet for FilteredTable {
    fn records(&self) -> &[Record] {
        &self.records
    }

    fn schema(&self) -> &TableSchema {
        &self.schema
    }
}

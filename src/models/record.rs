use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Metric;

/// One observation row, tagged with the source it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub source: String,
    pub timestamp: Option<NaiveDateTime>,
    pub ghi: Option<f64>,
    pub dni: Option<f64>,
    pub dhi: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Remaining non-empty columns, verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            timestamp: None,
            ghi: None,
            dni: None,
            dhi: None,
            latitude: None,
            longitude: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.set_metric(metric, Some(value));
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Ghi => self.ghi,
            Metric::Dni => self.dni,
            Metric::Dhi => self.dhi,
        }
    }

    pub fn set_metric(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::Ghi => self.ghi = value,
            Metric::Dni => self.dni = value,
            Metric::Dhi => self.dhi = value,
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

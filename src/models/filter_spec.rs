use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::{DashboardError, Result};
use crate::models::Metric;

/// Closed interval `[min, max]`, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRange {
    min: f64,
    max: f64,
}

impl MetricRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(DashboardError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The user's current selection: which sources, which metric, which range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    pub sources: BTreeSet<String>,
    pub metric: Metric,
    pub range: MetricRange,
}

impl FilterSpec {
    pub fn new<I, S>(sources: I, metric: Metric, range: MetricRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            metric,
            range,
        }
    }

    pub fn selects(&self, source: &str) -> bool {
        self.sources.contains(source)
    }
}

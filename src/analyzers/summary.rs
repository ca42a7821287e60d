use crate::models::{Metric, RecordSet};
use crate::utils::stats::{mean, median_sorted, sample_std_dev, sorted};
use serde::Serialize;
use std::collections::BTreeMap;

/// Descriptive statistics of one metric for one source.
///
/// `std_dev` is the sample deviation and stays `NaN` for a group with a
/// single value; every statistic is `NaN` when `count` is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub source: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl GroupSummary {
    fn from_values(source: String, values: &[f64]) -> Self {
        let sorted = sorted(values);
        Self {
            source,
            count: values.len(),
            mean: mean(values),
            median: median_sorted(&sorted),
            std_dev: sample_std_dev(values),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Per-source summary of a metric, groups ordered by source id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub metric: Metric,
    pub groups: Vec<GroupSummary>,
}

impl SummaryView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, source: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.source == source)
    }
}

/// Group rows by source and summarise `metric` over the non-missing values.
pub fn summarize<T: RecordSet + ?Sized>(table: &T, metric: Metric) -> SummaryView {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in table.records() {
        let values = grouped.entry(record.source.as_str()).or_default();
        if let Some(value) = record.metric(metric) {
            values.push(value);
        }
    }

    SummaryView {
        metric,
        groups: grouped
            .into_iter()
            .map(|(source, values)| GroupSummary::from_values(source.to_string(), &values))
            .collect(),
    }
}

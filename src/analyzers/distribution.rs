use crate::error::{DashboardError, Result};
use crate::models::{Metric, RecordSet};
use crate::utils::constants::BOX_WHISKER_IQR;
use crate::utils::stats::{median_sorted, quantile_sorted, sorted};
use serde::Serialize;
use std::collections::BTreeMap;

/// Box-plot statistics for one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub source: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Most extreme values within 1.5 IQR of the quartiles.
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub metric: Metric,
    /// `bins + 1` ascending edges; the last bin includes its upper edge.
    pub edges: Vec<f64>,
    pub counts: BTreeMap<String, Vec<usize>>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Counts summed over all sources, one per bin.
    pub fn totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.bins()];
        for counts in self.counts.values() {
            for (total, count) in totals.iter_mut().zip(counts) {
                *total += count;
            }
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub source: String,
    pub x: f64,
    pub y: f64,
}

fn values_by_source<T: RecordSet + ?Sized>(table: &T, metric: Metric) -> BTreeMap<&str, Vec<f64>> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in table.records() {
        if let Some(value) = record.metric(metric) {
            grouped.entry(record.source.as_str()).or_default().push(value);
        }
    }
    grouped
}

pub fn box_stats<T: RecordSet + ?Sized>(table: &T, metric: Metric) -> Vec<BoxStats> {
    values_by_source(table, metric)
        .into_iter()
        .map(|(source, values)| {
            let sorted = sorted(&values);
            let q1 = quantile_sorted(&sorted, 0.25);
            let q3 = quantile_sorted(&sorted, 0.75);
            let reach = BOX_WHISKER_IQR * (q3 - q1);
            let (low_fence, high_fence) = (q1 - reach, q3 + reach);

            let inside: Vec<f64> = sorted
                .iter()
                .copied()
                .filter(|v| (low_fence..=high_fence).contains(v))
                .collect();

            BoxStats {
                source: source.to_string(),
                count: sorted.len(),
                q1,
                median: median_sorted(&sorted),
                q3,
                lower_whisker: inside.first().copied().unwrap_or(q1),
                upper_whisker: inside.last().copied().unwrap_or(q3),
                outliers: sorted.len() - inside.len(),
            }
        })
        .collect()
}

/// Equal-width bins over the observed span of `metric`, counted per source.
pub fn histogram<T: RecordSet + ?Sized>(table: &T, metric: Metric, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(DashboardError::Config(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let Some((min, max)) = table.metric_bounds(metric) else {
        return Ok(Histogram {
            metric,
            edges: Vec::new(),
            counts: BTreeMap::new(),
        });
    };

    let bins = if max > min { bins } else { 1 };
    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + width * i as f64 })
        .collect();

    let mut counts: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (source, values) in values_by_source(table, metric) {
        let mut source_counts = vec![0; bins];
        for value in values {
            let index = if width > 0.0 {
                (((value - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            source_counts[index] += 1;
        }
        counts.insert(source.to_string(), source_counts);
    }

    Ok(Histogram {
        metric,
        edges,
        counts,
    })
}

/// Paired values of two metrics for rows holding both.
///
/// Fails with [`DashboardError::CapabilityUnavailable`] when either column
/// is absent from the schema.
pub fn scatter_pairs<T: RecordSet + ?Sized>(table: &T, x: Metric, y: Metric) -> Result<Vec<ScatterPoint>> {
    let schema = table.schema();
    let missing: Vec<String> = [x, y]
        .iter()
        .filter(|m| !schema.has_metric(**m))
        .map(|m| m.column().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::CapabilityUnavailable {
            view: format!("Scatter plot {} vs {}", x, y),
            missing,
        });
    }

    Ok(table
        .records()
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                source: r.source.clone(),
                x: r.metric(x)?,
                y: r.metric(y)?,
            })
        })
        .collect())
}

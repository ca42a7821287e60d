use crate::models::{FilterSpec, FilteredTable, Metric, MetricRange, RecordSet};
use tracing::debug;

/// Stateless filtering over any [`RecordSet`].
pub struct FilterEngine;

impl FilterEngine {
    /// Rows whose source is selected and whose metric lies in the range,
    /// both bounds inclusive. Rows missing the metric never match. An
    /// empty source selection yields an empty table.
    pub fn filter<T: RecordSet + ?Sized>(table: &T, spec: &FilterSpec) -> FilteredTable {
        let records: Vec<_> = table
            .records()
            .iter()
            .filter(|r| spec.selects(&r.source))
            .filter(|r| {
                r.metric(spec.metric)
                    .map_or(false, |value| spec.range.contains(value))
            })
            .cloned()
            .collect();

        debug!(
            metric = %spec.metric,
            min = spec.range.min(),
            max = spec.range.max(),
            sources = spec.sources.len(),
            input = table.len(),
            output = records.len(),
            "filter applied"
        );

        FilteredTable::new(records, table.schema().clone(), spec.metric)
    }

    /// Observed bounds of `metric` over `table`, or `fallback` when the
    /// column holds no values.
    pub fn default_range<T: RecordSet + ?Sized>(
        table: &T,
        metric: Metric,
        fallback: MetricRange,
    ) -> MetricRange {
        table
            .metric_bounds(metric)
            .and_then(|(min, max)| MetricRange::new(min, max).ok())
            .unwrap_or(fallback)
    }
}

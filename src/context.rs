use crate::configuration::Settings;
use crate::error::{DashboardError, Result};
use crate::models::{FilterSpec, FilteredTable, Metric, MetricRange, UnifiedTable};
use crate::processors::{DataUnifier, FilterEngine};

/// The loaded data, owned by whoever drives the dashboard.
///
/// Built once at start-up and handed by reference to every filter and
/// view; nothing mutates the table after construction.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    table: UnifiedTable,
    fallback: MetricRange,
}

impl DashboardContext {
    pub fn load(settings: &Settings) -> Result<Self> {
        settings.check()?;
        let table = DataUnifier::with_mmap(settings.use_mmap)
            .load(&settings.data_dir, &settings.sources)?;
        Ok(Self::from_table(table, settings.fallback()?))
    }

    pub fn from_table(table: UnifiedTable, fallback: MetricRange) -> Self {
        Self { table, fallback }
    }

    pub fn table(&self) -> &UnifiedTable {
        &self.table
    }

    pub fn available_metrics(&self) -> &[Metric] {
        self.table.available_metrics()
    }

    pub fn source_ids(&self) -> &[String] {
        self.table.source_ids()
    }

    /// The first available metric; the table always has at least one.
    pub fn default_metric(&self) -> Metric {
        self.available_metrics()
            .first()
            .copied()
            .unwrap_or(Metric::Ghi)
    }

    pub fn default_range(&self, metric: Metric) -> MetricRange {
        FilterEngine::default_range(&self.table, metric, self.fallback)
    }

    /// Build a [`FilterSpec`] from user selections.
    ///
    /// `None` for `sources` selects every source; `None` for `range` uses
    /// the metric's observed bounds over the full table.
    pub fn filter_spec(
        &self,
        sources: Option<Vec<String>>,
        metric: Option<Metric>,
        range: Option<MetricRange>,
    ) -> Result<FilterSpec> {
        let sources = match sources {
            Some(sources) => {
                if let Some(unknown) = sources.iter().find(|s| !self.source_ids().contains(s)) {
                    return Err(DashboardError::UnknownSource(unknown.clone()));
                }
                sources
            }
            None => self.source_ids().to_vec(),
        };

        let metric = metric.unwrap_or_else(|| self.default_metric());
        self.check_metric(metric)?;

        let range = range.unwrap_or_else(|| self.default_range(metric));
        Ok(FilterSpec::new(sources, metric, range))
    }

    pub fn filter(&self, spec: &FilterSpec) -> Result<FilteredTable> {
        self.check_metric(spec.metric)?;
        Ok(FilterEngine::filter(&self.table, spec))
    }

    fn check_metric(&self, metric: Metric) -> Result<()> {
        if self.available_metrics().contains(&metric) {
            Ok(())
        } else {
            Err(DashboardError::MetricUnavailable(metric))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, RecordSet, TableSchema};
    use pretty_assertions::assert_eq;

    fn context() -> DashboardContext {
        let records = vec![
            Record::new("Benin").with_metric(Metric::Dni, 12.0),
            Record::new("Togo").with_metric(Metric::Dni, 48.0),
        ];
        let table = UnifiedTable::from_records(
            vec!["Benin".into(), "Togo".into()],
            records,
            TableSchema::from_headers(["DNI", "DHI"]),
        )
        .unwrap();
        DashboardContext::from_table(table, MetricRange::new(0.0, 1000.0).unwrap())
    }

    #[test]
    fn test_filter_spec_defaults() {
        let ctx = context();
        let spec = ctx.filter_spec(None, None, None).unwrap();

        assert_eq!(spec.metric, Metric::Dni);
        assert_eq!(spec.range, MetricRange::new(12.0, 48.0).unwrap());
        assert_eq!(spec.sources.len(), 2);
        assert_eq!(ctx.filter(&spec).unwrap().len(), 2);
    }

    #[test]
    fn test_metric_without_values_uses_fallback_range() {
        let ctx = context();
        let spec = ctx.filter_spec(None, Some(Metric::Dhi), None).unwrap();

        assert_eq!(spec.range, MetricRange::new(0.0, 1000.0).unwrap());
        assert!(ctx.filter(&spec).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_unknown_selections() {
        let ctx = context();

        assert!(matches!(
            ctx.filter_spec(Some(vec!["Ghana".into()]), None, None),
            Err(DashboardError::UnknownSource(_))
        ));
        assert!(matches!(
            ctx.filter_spec(None, Some(Metric::Ghi), None),
            Err(DashboardError::MetricUnavailable(Metric::Ghi))
        ));
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let ctx = context();
        let spec = ctx.filter_spec(Some(vec![]), None, None).unwrap();

        assert!(ctx.filter(&spec).unwrap().is_empty());
    }
}

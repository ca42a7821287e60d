use crate::analyzers::{BoxStats, Histogram, ScatterPoint, SummaryView};
use crate::context::DashboardContext;
use crate::models::{FilterSpec, Metric, Record, RecordSet, TableSchema};
use crate::processors::GeoPoint;
use crate::writers::export_columns;
use std::collections::BTreeMap;

pub const NO_DATA_NOTICE: &str = "No data available for the selected filters.";
const HISTOGRAM_BAR_WIDTH: usize = 40;
const PREVIEW_CELL_WIDTH: usize = 19;

fn stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn section(title: &str) -> String {
    format!("\n{}\n{}", title, "=".repeat(title.chars().count()))
}

pub fn filter_header(spec: &FilterSpec) -> String {
    let sources: Vec<&str> = spec.sources.iter().map(String::as_str).collect();
    format!(
        "Analysis of {} ({})\nCountries: {}\nRange: {} to {} {}",
        spec.metric,
        spec.metric.display_name(),
        if sources.is_empty() {
            "(none)".to_string()
        } else {
            sources.join(", ")
        },
        stat(spec.range.min()),
        stat(spec.range.max()),
        spec.metric.units()
    )
}

pub fn info(ctx: &DashboardContext) -> String {
    let table = ctx.table();
    let mut out = format!("Loaded {} records from {} sources\n", table.len(), ctx.source_ids().len());

    out.push_str(&section("Sources"));
    for source in ctx.source_ids() {
        let span = match table.time_span(source) {
            Some((start, end)) => format!("{} to {}", start, end),
            None => "no timestamps".to_string(),
        };
        out.push_str(&format!(
            "\n- {}: {} records ({})",
            source,
            table.source_count(source),
            span
        ));
    }

    out.push_str(&section("Available metrics"));
    for metric in ctx.available_metrics() {
        let observed = match table.metric_bounds(*metric) {
            Some((min, max)) => format!("observed {} to {} {}", stat(min), stat(max), metric.units()),
            None => {
                let fallback = ctx.default_range(*metric);
                format!(
                    "no values, default range {} to {}",
                    stat(fallback.min()),
                    stat(fallback.max())
                )
            }
        };
        out.push_str(&format!("\n- {} ({}): {}", metric, metric.display_name(), observed));
    }

    let schema = table.schema();
    out.push_str(&section("Capabilities"));
    out.push_str(&format!(
        "\n- Map: {}",
        if schema.has_coordinates() {
            "available".to_string()
        } else {
            format!("unavailable (missing {})", schema.missing_coordinate_columns().join(", "))
        }
    ));
    out.push_str(&format!(
        "\n- Timestamps: {}",
        if schema.has_timestamp() { "yes" } else { "no" }
    ));
    out.push_str(&format!("\n- Other columns: {}", schema.extra_columns().len()));
    out
}

pub fn summary(view: &SummaryView) -> String {
    let mut out = format!(
        "Summary Statistics for {} by Country\n{:<16} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
        view.metric, "country", "count", "mean", "median", "std", "min", "max"
    );
    for group in &view.groups {
        out.push_str(&format!(
            "\n{:<16} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
            group.source,
            group.count,
            stat(group.mean),
            stat(group.median),
            stat(group.std_dev),
            stat(group.min),
            stat(group.max)
        ));
    }
    out
}

pub fn box_plot(stats: &[BoxStats], metric: Metric) -> String {
    let mut out = format!(
        "{} Boxplot by Country\n{:<16} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
        metric, "country", "low", "q1", "median", "q3", "high", "outliers"
    );
    for s in stats {
        out.push_str(&format!(
            "\n{:<16} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
            s.source,
            stat(s.lower_whisker),
            stat(s.q1),
            stat(s.median),
            stat(s.q3),
            stat(s.upper_whisker),
            s.outliers
        ));
    }
    out
}

pub fn histogram(hist: &Histogram) -> String {
    let totals = hist.totals();
    let peak = totals.iter().copied().max().unwrap_or(0).max(1);
    let sources: Vec<&String> = hist.counts.keys().collect();

    let mut out = format!(
        "Histogram of {} ({})",
        hist.metric,
        sources
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for (i, total) in totals.iter().enumerate() {
        let bar = "#".repeat(total * HISTOGRAM_BAR_WIDTH / peak);
        let per_source: Vec<String> = sources
            .iter()
            .map(|s| hist.counts[s.as_str()][i].to_string())
            .collect();
        out.push_str(&format!(
            "\n[{:>9}, {:>9}{} {:<width$} {} ({})",
            stat(hist.edges[i]),
            stat(hist.edges[i + 1]),
            if i + 1 == totals.len() { "]" } else { ")" },
            bar,
            total,
            per_source.join("/"),
            width = HISTOGRAM_BAR_WIDTH
        ));
    }
    out
}

pub fn scatter(points: &[ScatterPoint], x: Metric, y: Metric) -> String {
    let mut by_source: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
    for point in points {
        by_source.entry(point.source.as_str()).or_default().push(point);
    }

    let mut out = format!("Scatter Plot: {} vs {} ({} points)", x, y, points.len());
    for (source, points) in by_source {
        let bounds = |value: fn(&ScatterPoint) -> f64| {
            points.iter().map(|p| value(p)).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
        };
        let (x_min, x_max) = bounds(|p| p.x);
        let (y_min, y_max) = bounds(|p| p.y);
        out.push_str(&format!(
            "\n- {}: {} points, {} {}..{}, {} {}..{}",
            source,
            points.len(),
            x,
            stat(x_min),
            stat(x_max),
            y,
            stat(y_min),
            stat(y_max)
        ));
    }
    out
}

pub fn preview(records: &[Record], schema: &TableSchema) -> String {
    let columns = export_columns(schema);
    let cell = |text: &str| -> String {
        let clipped: String = text.chars().take(PREVIEW_CELL_WIDTH).collect();
        format!("{:<width$}", clipped, width = PREVIEW_CELL_WIDTH)
    };

    let mut out = columns
        .iter()
        .map(|c| cell(c.name()))
        .collect::<Vec<_>>()
        .join(" ");
    for record in records {
        out.push('\n');
        out.push_str(
            &columns
                .iter()
                .map(|c| cell(&c.text(record)))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    out
}

pub fn geo(points: &[GeoPoint], limit: usize) -> String {
    let shown = if limit == 0 { points.len() } else { limit.min(points.len()) };
    let mut out = format!("Map points: {} (showing {})", points.len(), shown);
    for point in &points[..shown] {
        out.push_str(&format!(
            "\n{:<16} {:>10.5} {:>11.5}",
            point.source, point.latitude, point.longitude
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{histogram as build_histogram, summarize};
    use crate::models::{MetricRange, UnifiedTable};

    fn table() -> UnifiedTable {
        UnifiedTable::from_records(
            vec!["Benin".into(), "Togo".into()],
            vec![
                Record::new("Benin").with_metric(Metric::Ghi, 15.0),
                Record::new("Benin").with_metric(Metric::Ghi, 25.0),
                Record::new("Togo").with_metric(Metric::Ghi, 100.0),
            ],
            crate::models::TableSchema::from_headers(["GHI"]),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_renders_nan_std() {
        let text = summary(&summarize(&table(), Metric::Ghi));

        assert!(text.starts_with("Summary Statistics for GHI by Country"));
        let togo = text.lines().find(|l| l.starts_with("Togo")).unwrap();
        assert!(togo.contains("100.00"));
        assert!(togo.contains("NaN"));
    }

    #[test]
    fn test_histogram_lines_per_bin() {
        let hist = build_histogram(&table(), Metric::Ghi, 3).unwrap();
        let text = histogram(&hist);

        assert_eq!(text.lines().count(), 1 + 3);
        assert!(text.lines().last().unwrap().contains("]"));
    }

    #[test]
    fn test_filter_header_lists_selection() {
        let spec = FilterSpec::new(["Togo"], Metric::Ghi, MetricRange::new(10.0, 150.0).unwrap());
        let text = filter_header(&spec);

        assert!(text.contains("Countries: Togo"));
        assert!(text.contains("10.00 to 150.00"));
    }

    #[test]
    fn test_geo_limit() {
        let points: Vec<GeoPoint> = (0..5)
            .map(|i| GeoPoint {
                source: "Benin".to_string(),
                latitude: 9.0 + i as f64,
                longitude: 2.0,
            })
            .collect();

        assert_eq!(geo(&points, 2).lines().count(), 3);
        assert_eq!(geo(&points, 0).lines().count(), 6);
    }
}

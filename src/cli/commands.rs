use crate::analyzers::{box_stats, histogram, scatter_pairs, summarize};
use crate::cli::args::{Cli, Commands, ExportFormat, FilterArgs, OutputFormat};
use crate::cli::logging::init_logging;
use crate::cli::render::{self, NO_DATA_NOTICE};
use crate::configuration::Settings;
use crate::context::DashboardContext;
use crate::error::Result;
use crate::models::{FilterSpec, FilteredTable, Metric, MetricRange, RecordSet};
use crate::processors::geo_points;
use crate::utils::filename::generate_default_export_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvExporter, ParquetExporter};
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        settings = settings.with_data_dir(data_dir);
    }
    debug!(?settings, "configuration loaded");

    let ctx = load_context(&settings, cli.quiet)?;

    match cli.command {
        Commands::Info => {
            println!("{}", render::info(&ctx));
        }

        Commands::Summary { filter, format } => {
            let (spec, filtered) = apply_filter(&ctx, &filter)?;
            let view = summarize(&filtered, spec.metric);

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Text => {
                    println!("{}\n", render::filter_header(&spec));
                    if filtered.is_empty() {
                        println!("{}", NO_DATA_NOTICE);
                    } else {
                        println!("{}", render::summary(&view));
                    }
                }
            }
        }

        Commands::Dashboard { filter, bins, rows } => {
            let (spec, filtered) = apply_filter(&ctx, &filter)?;
            let bins = bins.unwrap_or(settings.histogram_bins);
            let rows = rows.unwrap_or(settings.preview_rows);
            println!("{}", dashboard_report(&spec, &filtered, bins, rows)?);
        }

        Commands::Map { filter, limit } => {
            let (_, filtered) = apply_filter(&ctx, &filter)?;
            println!("{}", map_report(&filtered, limit)?);
        }

        Commands::Export {
            filter,
            output_file,
            format,
            compression,
            chunk_size,
            row_group_size,
        } => {
            let (spec, filtered) = apply_filter(&ctx, &filter)?;
            println!("{}\n", render::filter_header(&spec));

            if filtered.is_empty() {
                println!("{}", NO_DATA_NOTICE);
                return Ok(());
            }

            let output_file =
                output_file.unwrap_or_else(|| generate_default_export_filename(format.extension()));
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            println!(
                "Writing {} records to {}...",
                filtered.len(),
                output_file.display()
            );
            match format {
                ExportFormat::Csv => {
                    CsvExporter::new().write_table(&filtered, &output_file)?;
                }
                ExportFormat::Parquet => {
                    let exporter = ParquetExporter::new()
                        .with_compression(&compression)?
                        .with_batch_size(chunk_size)
                        .with_row_group_size(row_group_size);
                    exporter.write_table(&filtered, &output_file)?;
                    println!("\n{}", exporter.file_info(&output_file)?.summary());
                }
            }
            println!("Export complete!");
        }
    }

    Ok(())
}

/// Load the sources behind a spinner. A failure is returned for `main` to
/// report; it is only traced at debug level here.
fn load_context(settings: &Settings, quiet: bool) -> Result<DashboardContext> {
    let progress = ProgressReporter::new_spinner("Loading solar radiation data...", quiet);
    match DashboardContext::load(settings) {
        Ok(ctx) => {
            progress.finish_with_message(&format!("Loaded {} records", ctx.table().len()));
            Ok(ctx)
        }
        Err(e) => {
            progress.clear();
            debug!(error = %e, "data load failed");
            Err(e)
        }
    }
}

/// Turn the filter controls into a [`FilterSpec`] and apply it.
fn apply_filter(ctx: &DashboardContext, args: &FilterArgs) -> Result<(FilterSpec, FilteredTable)> {
    let sources = if args.countries.is_empty() {
        None
    } else {
        Some(args.countries.clone())
    };

    let metric = args.metric.unwrap_or_else(|| ctx.default_metric());
    let range = resolve_range(ctx, metric, args.min, args.max)?;

    let spec = ctx.filter_spec(sources, Some(metric), range)?;
    let filtered = ctx.filter(&spec)?;
    debug!(rows = filtered.len(), "filtered table ready");
    Ok((spec, filtered))
}

/// Fill a missing bound from the observed range of `metric`.
///
/// A filled bound never crosses the given one, so a lone `--min` above the
/// data selects nothing instead of failing. Two explicit bounds are taken
/// as given.
fn resolve_range(
    ctx: &DashboardContext,
    metric: Metric,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<Option<MetricRange>> {
    let observed = ctx.default_range(metric);
    let range = match (min, max) {
        (None, None) => return Ok(None),
        (Some(min), Some(max)) => MetricRange::new(min, max)?,
        (Some(min), None) => MetricRange::new(min, observed.max().max(min))?,
        (None, Some(max)) => MetricRange::new(observed.min().min(max), max)?,
    };
    Ok(Some(range))
}

/// Every dashboard section in page order, each with its own notice when
/// the filtered table is empty or lacks the columns it needs.
fn dashboard_report(spec: &FilterSpec, filtered: &FilteredTable, bins: usize, rows: usize) -> Result<String> {
    let metric = spec.metric;
    let empty = filtered.is_empty();
    let mut lines = vec![render::filter_header(spec)];

    lines.push(format!("\n{} Boxplot by Country", metric));
    lines.push(if empty {
        NO_DATA_NOTICE.to_string()
    } else {
        render::box_plot(&box_stats(filtered, metric), metric)
    });

    lines.push("\nAdditional Plots".to_string());
    if empty {
        lines.push(NO_DATA_NOTICE.to_string());
    } else {
        lines.push(render::histogram(&histogram(filtered, metric, bins)?));

        let schema = filtered.schema();
        if schema.has_metric(Metric::Ghi) && schema.has_metric(Metric::Dni) {
            let points = scatter_pairs(filtered, Metric::Ghi, Metric::Dni)?;
            lines.push(format!("\n{}", render::scatter(&points, Metric::Ghi, Metric::Dni)));
        } else {
            lines.push("\nCannot generate Scatter Plot: GHI or DNI columns not found in data.".to_string());
        }
    }

    lines.push("\nSummary Statistics".to_string());
    lines.push(if empty {
        NO_DATA_NOTICE.to_string()
    } else {
        render::summary(&summarize(filtered, metric))
    });

    lines.push("\nPreview of Filtered Data".to_string());
    lines.push(if empty {
        NO_DATA_NOTICE.to_string()
    } else {
        render::preview(filtered.head(rows), filtered.schema())
    });

    // The map always shows every point; `rows` only limits the preview.
    lines.push("\nGeospatial Data".to_string());
    lines.push(map_report(filtered, 0)?);

    Ok(lines.join("\n"))
}

fn map_report(filtered: &FilteredTable, limit: usize) -> Result<String> {
    let schema = filtered.schema();
    if !schema.has_coordinates() {
        Ok(format!(
            "Map unavailable: the data has no {} column.",
            schema.missing_coordinate_columns().join(" or ")
        ))
    } else if filtered.is_empty() {
        Ok(NO_DATA_NOTICE.to_string())
    } else {
        Ok(render::geo(&geo_points(filtered)?, limit))
    }
}

//! Command line front end: renders a CSV of daily temperatures to an HTML page.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use linked_radial::{AnyDate, ChartConfig, LinkedRadial, SeriesFlags};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linked-radial")]
#[command(about = "Render a year of daily temperatures as a linked radial chart")]
struct Args {
    /// CSV with date, recLow, recHigh, avgLow, avgHigh, min and max columns
    csv: PathBuf,

    /// Output HTML file
    #[arg(short, long, default_value = "linked_radial.html")]
    output: PathBuf,

    /// JSON chart config; command line flags override its values
    #[arg(short, long, env = "LINKED_RADIAL_CONFIG")]
    config: Option<PathBuf>,

    /// Year the data belongs to
    #[arg(long)]
    year: Option<i32>,

    /// Location shown in the title
    #[arg(long)]
    location: Option<String>,

    /// Replaces the generated title
    #[arg(long)]
    title: Option<String>,

    /// Series to draw, e.g. "record,actual" or "all"
    #[arg(long)]
    series: Option<SeriesFlags>,

    /// First day of the initial view (YYYY-MM-DD, YYYY-MM or YYYY)
    #[arg(long)]
    from: Option<String>,

    /// Last day of the initial view (YYYY-MM-DD, YYYY-MM or YYYY)
    #[arg(long)]
    to: Option<String>,

    /// Log level or filter directives, e.g. `debug`; overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --log-level; also captures the library's `log` records
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    let config = build_config(&args)?;
    let chart = LinkedRadial::from_csv(&args.csv)
        .config(config)
        .call()
        .with_context(|| format!("Failed to render {}", args.csv.display()))?;
    chart.write_to(&args.output)?;

    info!(output = %args.output.display(), "Done");
    Ok(())
}

fn build_config(args: &Args) -> Result<ChartConfig> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::default(),
    };
    if let Some(year) = args.year {
        config.year = year;
    }
    if let Some(location) = &args.location {
        config.location = location.clone();
    }
    if let Some(title) = &args.title {
        config.title = Some(title.clone());
    }
    if let Some(series) = args.series {
        config.series = series;
    }
    if let Some(from) = &args.from {
        let range = from
            .as_str()
            .get_date_range()
            .ok_or_else(|| anyhow!("Invalid --from date: {from}"))?;
        config.view_start = Some(range.start);
    }
    if let Some(to) = &args.to {
        let range = to
            .as_str()
            .get_date_range()
            .ok_or_else(|| anyhow!("Invalid --to date: {to}"))?;
        config.view_end = Some(range.end);
    }
    Ok(config)
}

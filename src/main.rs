//! Encounter Dashboard - headless host
//!
//! Loads an encounter CSV once and prints the dashboard panels for a year.

use anyhow::{Context, Result};
use clap::Parser;
use encounter_dashboard::charts::ColorTheme;
use encounter_dashboard::{Dashboard, DashboardConfig, DashboardSnapshot};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "encounter-dashboard", version, about = "Monthly border encounter dashboard")]
struct Cli {
    /// CSV with year, month and totalencounters columns
    csv: PathBuf,

    /// Year to show (defaults to the first year in the file)
    #[arg(short, long)]
    year: Option<i32>,

    /// Delta magnitude counted as a gain or loss
    #[arg(short, long)]
    threshold: Option<i64>,

    /// Heatmap color theme
    #[arg(long)]
    theme: Option<ColorTheme>,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(year) = cli.year {
        config = config.with_year(year);
    }
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(theme) = cli.theme {
        config = config.with_color_theme(theme);
    }
    let config = config.validate()?;

    let dashboard = Dashboard::open(&cli.csv, config)
        .with_context(|| format!("loading {}", cli.csv.display()))?;
    let snapshot = dashboard.snapshot();

    let warnings = dashboard.dataset().warnings();
    if !warnings.is_empty() {
        eprintln!("{} row(s) needed cleanup while loading", warnings.len());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_panels(&snapshot);
    }
    Ok(())
}

fn print_panels(snapshot: &DashboardSnapshot) {
    let year = snapshot
        .selected_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("Encounters {year} (theme: {})", snapshot.color_theme);
    println!();

    println!("Gains/Losses");
    for metric in [&snapshot.gain_metric, &snapshot.loss_metric] {
        println!("  {:<10} {:>10} {:>10}", metric.label, metric.value, metric.delta);
    }
    println!();

    println!("Month Encounters (threshold {})", snapshot.threshold);
    for donut in &snapshot.donuts {
        println!("  {:<28} {}", donut.label, donut.caption());
    }
    println!();

    println!("Top Months");
    for row in &snapshot.top_months.rows {
        println!("  {:<10} {:>12}", row.month, row.total_encounters);
    }
}

//! Workout Charts - desktop viewer and headless exporter.

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use workout_charts::charts::ColorPicker;
use workout_charts::config::{AppConfig, Cli};
use workout_charts::data::{DataLoader, DataProcessor};
use workout_charts::export::ReportExporter;
use workout_charts::gui::WorkoutChartsApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from(Cli::parse());

    if let Some(dir) = config.export_dir.clone() {
        return run_headless(&config, &dir);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Workout Charts"),
        ..Default::default()
    };

    // The creation hook is the page-ready signal: it starts the one load.
    eframe::run_native(
        "Workout Charts",
        options,
        Box::new(move |cc| Ok(Box::new(WorkoutChartsApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}

/// Load once, render both charts and the CSV into `dir`, then exit.
fn run_headless(config: &AppConfig, dir: &Path) -> anyhow::Result<()> {
    let dataset = DataLoader::new(config.source.clone())
        .load()
        .context("loading workout data")?;
    let chart_set =
        DataProcessor::build_chart_set(&dataset, &mut ColorPicker::from_seed_option(config.seed));
    let summary = ReportExporter::export_all(&chart_set, &dataset, dir)
        .with_context(|| format!("exporting to {}", dir.display()))?;

    tracing::info!(
        progress = %summary.progress_png.display(),
        volume = %summary.volume_png.display(),
        csv = %summary.csv.display(),
        "headless export finished"
    );
    Ok(())
}

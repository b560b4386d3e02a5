//! posture-tui: a terminal dashboard for simulated sitting-posture metrics
//!
//! Renders upright vs abnormal sitting time from a synthetic sensor feed as a
//! weekly histogram, a weekly heatmap, a live pie chart and a live heatmap.

mod app;
mod cli;
mod dashboard;
mod data;
mod logging;
mod report;
mod ui;

use anyhow::{Context, Result};
use cli::{AppConfig, Cli, Commands};
use dashboard::{DashboardView, RefreshPeriods};
use data::MetricsGenerator;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Show {
            seed,
            posture_interval_ms,
            grid_interval_ms,
            tab,
            log_file,
        } => {
            let config = AppConfig::from_show_command(
                seed,
                posture_interval_ms,
                grid_interval_ms,
                tab,
                log_file,
            )?;

            logging::init_file(&config.log_path)?;
            tracing::info!(log = %config.log_path.display(), seed = ?config.seed, "starting posture-tui");

            // Run the TUI application
            app::run(config)?;
        }
        Commands::Snapshot { seed, pretty } => {
            logging::init_stderr()?;

            let generator = match seed {
                Some(seed) => MetricsGenerator::seeded(seed),
                None => MetricsGenerator::from_entropy(),
            };
            let mut view = DashboardView::new(generator, RefreshPeriods::default());
            let json = report::render_json(&mut view, pretty).context("Failed to serialize snapshot")?;
            println!("{json}");
        }
    }

    Ok(())
}

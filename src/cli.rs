//! Command-line interface argument parsing for posture-tui.
//!
//! - `posture-tui show` runs the terminal dashboard
//! - `posture-tui show --seed 42 --tab live-heatmap`
//! - `posture-tui snapshot --pretty` prints one activation's data as JSON

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::dashboard::{RefreshPeriods, GRID_PERIOD, POSTURE_PERIOD};
use crate::ui::selector::ViewTab;

/// Environment variable overriding the default log file location
pub const LOG_ENV_VAR: &str = "POSTURE_TUI_LOG";

/// A terminal dashboard for simulated sitting-posture metrics.
#[derive(Parser, Debug)]
#[command(name = "posture-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the TUI dashboard
    Show {
        /// Seed for the simulated sensor feed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Live posture refresh period in milliseconds
        #[arg(long, default_value_t = POSTURE_PERIOD.as_millis() as u64)]
        posture_interval_ms: u64,

        /// Live heatmap refresh period in milliseconds
        #[arg(long, default_value_t = GRID_PERIOD.as_millis() as u64)]
        grid_interval_ms: u64,

        /// View shown at startup: overview, weekly-heatmap, live-pie, live-heatmap
        #[arg(short, long)]
        tab: Option<String>,

        /// Path of the log file
        /// Defaults to $POSTURE_TUI_LOG, then the user cache directory
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Print the data of a freshly activated view as JSON and exit
    Snapshot {
        /// Seed for the simulated sensor feed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Invalid combinations of command line options
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} refresh interval must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("unknown tab '{0}' (expected overview, weekly-heatmap, live-pie or live-heatmap)")]
    UnknownTab(String),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub periods: RefreshPeriods,
    pub initial_tab: ViewTab,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from the `show` command's options
    pub fn from_show_command(
        seed: Option<u64>,
        posture_interval_ms: u64,
        grid_interval_ms: u64,
        tab: Option<String>,
        log_file: Option<String>,
    ) -> Result<Self, ConfigError> {
        if posture_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("posture"));
        }
        if grid_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("heatmap"));
        }

        let initial_tab = match tab {
            Some(name) => ViewTab::from_name(&name).ok_or(ConfigError::UnknownTab(name))?,
            None => ViewTab::OverviewHistogram,
        };

        let log_path = log_file.map(PathBuf::from).unwrap_or_else(default_log_path);

        Ok(AppConfig {
            seed,
            periods: RefreshPeriods {
                posture: Duration::from_millis(posture_interval_ms),
                live_grid: Duration::from_millis(grid_interval_ms),
            },
            initial_tab,
            log_path,
        })
    }
}

/// Log file location when none is given on the command line
fn default_log_path() -> PathBuf {
    if let Ok(path) = std::env::var(LOG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("posture-tui")
        .join("posture-tui.log")
}

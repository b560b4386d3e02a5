//! Data layer for the simulated posture feed.
//!
//! Generates the synthetic readings and derives the display metrics
//! (upright share, warning flag, heat colors) shown by the dashboard.

mod generator;
mod metrics;
mod models;

pub use generator::MetricsGenerator;
pub use metrics::{heat_color, slice_percent, UprightShare};
pub use models::{DailySummary, PostureKind, PostureSnapshot, SensorGrid, GRID_SIZE};

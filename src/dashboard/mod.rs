//! View lifecycle and refresh scheduling for the posture dashboard.

mod controller;
mod scheduler;

pub use controller::{DashboardView, RefreshPeriods, SnapshotObserver};
pub use scheduler::{GRID_PERIOD, POSTURE_PERIOD};

//! JSON report of a single dashboard activation.

use std::time::Instant;

use rand::Rng;
use serde::Serialize;

use crate::dashboard::DashboardView;
use crate::data::{DailySummary, PostureSnapshot, SensorGrid, UprightShare};

/// Everything the dashboard would show right after activation
#[derive(Debug, Serialize)]
pub struct SnapshotReport<'a> {
    pub posture: &'a PostureSnapshot,
    pub upright_percent: UprightShare,
    pub warning: bool,
    pub daily_summaries: &'a [DailySummary; 5],
    pub live_grid: &'a SensorGrid,
    pub weekly_grid: &'a SensorGrid,
}

impl<'a> SnapshotReport<'a> {
    /// Collect the current data of an active view; None when inactive
    pub fn capture<R: Rng>(view: &'a DashboardView<R>) -> Option<Self> {
        let posture = view.posture()?;
        let share = posture.upright_share();
        Some(SnapshotReport {
            posture,
            upright_percent: share,
            warning: share.needs_warning(),
            daily_summaries: view.daily_summaries()?,
            live_grid: view.live_grid()?,
            weekly_grid: view.weekly_grid()?,
        })
    }
}

/// Activate `view`, serialize its data and tear it down again
pub fn render_json<R: Rng>(view: &mut DashboardView<R>, pretty: bool) -> serde_json::Result<String> {
    view.activate(Instant::now());
    let json = match SnapshotReport::capture(view) {
        Some(report) if pretty => serde_json::to_string_pretty(&report),
        Some(report) => serde_json::to_string(&report),
        None => Ok("null".to_string()),
    };
    view.deactivate();
    json
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::RefreshPeriods;
    use crate::data::MetricsGenerator;

    #[test]
    fn test_capture_requires_active_view() {
        let view = DashboardView::new(MetricsGenerator::seeded(1), RefreshPeriods::default());
        assert!(SnapshotReport::capture(&view).is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut view = DashboardView::new(MetricsGenerator::seeded(1), RefreshPeriods::default());
        let json = render_json(&mut view, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["upright_percent"], 60.0);
        assert_eq!(value["warning"], false);
        assert_eq!(value["posture"]["samples"][0]["name"], "Upright");
        assert_eq!(value["posture"]["samples"][0]["value"], 12);
        assert_eq!(value["daily_summaries"].as_array().unwrap().len(), 5);
        assert_eq!(value["daily_summaries"][0]["day"], "Monday");
        assert_eq!(value["live_grid"].as_array().unwrap().len(), 10);
        assert_eq!(value["weekly_grid"][9].as_array().unwrap().len(), 10);

        // The view is torn down afterwards
        assert!(!view.is_active());
    }

    #[test]
    fn test_same_seed_same_report() {
        let mut a = DashboardView::new(MetricsGenerator::seeded(77), RefreshPeriods::default());
        let mut b = DashboardView::new(MetricsGenerator::seeded(77), RefreshPeriods::default());
        assert_eq!(render_json(&mut a, true).unwrap(), render_json(&mut b, true).unwrap());
    }
}

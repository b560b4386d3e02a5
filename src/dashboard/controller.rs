//! The dashboard view controller.
//!
//! Owns every piece of view state for one activation: the live snapshots, the
//! session-scoped weekly data and the refresh timers. Deactivating (or
//! dropping) the view releases all of it at once.

use std::time::{Duration, Instant};

use rand::Rng;

use super::scheduler::{DueSeries, RefreshScheduler, GRID_PERIOD, POSTURE_PERIOD};
use crate::data::{DailySummary, MetricsGenerator, PostureSnapshot, SensorGrid, UprightShare};

/// Receives each live snapshot right after it replaces the previous one
pub trait SnapshotObserver {
    fn posture_refreshed(&mut self, _snapshot: &PostureSnapshot) {}
    fn live_grid_refreshed(&mut self, _grid: &SensorGrid) {}
}

/// Observer for callers that only read the controller's state
impl SnapshotObserver for () {}

/// Refresh periods of the two live series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPeriods {
    pub posture: Duration,
    pub live_grid: Duration,
}

impl Default for RefreshPeriods {
    fn default() -> Self {
        RefreshPeriods {
            posture: POSTURE_PERIOD,
            live_grid: GRID_PERIOD,
        }
    }
}

/// State that exists only while the view is active
#[derive(Debug)]
struct Session {
    posture: PostureSnapshot,
    live_grid: SensorGrid,
    daily_summaries: [DailySummary; 5],
    weekly_grid: SensorGrid,
    scheduler: RefreshScheduler,
}

/// Single owner of the dashboard's view state
#[derive(Debug)]
pub struct DashboardView<R> {
    generator: MetricsGenerator<R>,
    periods: RefreshPeriods,
    session: Option<Session>,
}

impl<R: Rng> DashboardView<R> {
    pub fn new(generator: MetricsGenerator<R>, periods: RefreshPeriods) -> Self {
        DashboardView {
            generator,
            periods,
            session: None,
        }
    }

    /// Activate the view at `now`.
    ///
    /// Generates the session-scoped data and the first live grid, and starts
    /// both refresh timers. Activating an already active view is a no-op, so
    /// the weekly data stays frozen for the whole activation.
    pub fn activate(&mut self, now: Instant) {
        if self.session.is_some() {
            return;
        }
        let daily_summaries = self.generator.generate_daily_summaries();
        let weekly_grid = self.generator.generate_weekly_aggregate_grid();
        let live_grid = self.generator.generate_sensor_grid();

        self.session = Some(Session {
            posture: PostureSnapshot::default(),
            live_grid,
            daily_summaries,
            weekly_grid,
            scheduler: RefreshScheduler::start(self.periods.posture, self.periods.live_grid, now),
        });
        tracing::info!(
            posture_ms = self.periods.posture.as_millis() as u64,
            grid_ms = self.periods.live_grid.as_millis() as u64,
            "dashboard view activated"
        );
    }

    /// Cancel both timers and discard all view data
    pub fn deactivate(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.scheduler.cancel_all();
            tracing::info!("dashboard view deactivated");
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Regenerate every live series whose timer is due at `now`.
    ///
    /// Each due series is replaced wholesale before its observer callback
    /// runs. Does nothing while the view is inactive.
    pub fn tick(&mut self, now: Instant, observer: &mut impl SnapshotObserver) -> DueSeries {
        let Some(session) = self.session.as_mut() else {
            return DueSeries::default();
        };
        let due = session.scheduler.due(now);

        if due.posture {
            session.posture = self.generator.generate_live_samples();
            tracing::trace!(
                upright = session.posture.upright(),
                abnormal = session.posture.abnormal(),
                "posture refreshed"
            );
            observer.posture_refreshed(&session.posture);
        }
        if due.live_grid {
            session.live_grid = self.generator.generate_sensor_grid();
            tracing::trace!("live grid refreshed");
            observer.live_grid_refreshed(&session.live_grid);
        }
        due
    }

    /// Earliest instant at which a live series needs refreshing
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.as_ref()?.scheduler.next_deadline()
    }

    pub fn posture(&self) -> Option<&PostureSnapshot> {
        self.session.as_ref().map(|s| &s.posture)
    }

    pub fn live_grid(&self) -> Option<&SensorGrid> {
        self.session.as_ref().map(|s| &s.live_grid)
    }

    pub fn daily_summaries(&self) -> Option<&[DailySummary; 5]> {
        self.session.as_ref().map(|s| &s.daily_summaries)
    }

    pub fn weekly_grid(&self) -> Option<&SensorGrid> {
        self.session.as_ref().map(|s| &s.weekly_grid)
    }

    pub fn upright_share(&self) -> Option<UprightShare> {
        self.posture().map(PostureSnapshot::upright_share)
    }
}

impl<R> Drop for DashboardView<R> {
    fn drop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.scheduler.cancel_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Recorder {
        postures: Vec<PostureSnapshot>,
        grids: usize,
    }

    impl SnapshotObserver for Recorder {
        fn posture_refreshed(&mut self, snapshot: &PostureSnapshot) {
            self.postures.push(*snapshot);
        }

        fn live_grid_refreshed(&mut self, _grid: &SensorGrid) {
            self.grids += 1;
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn make_view(seed: u64) -> DashboardView<StdRng> {
        DashboardView::new(MetricsGenerator::seeded(seed), RefreshPeriods::default())
    }

    #[test]
    fn test_inactive_view_exposes_nothing() {
        let view = make_view(1);
        assert!(!view.is_active());
        assert!(view.posture().is_none());
        assert!(view.live_grid().is_none());
        assert!(view.daily_summaries().is_none());
        assert!(view.weekly_grid().is_none());
        assert!(view.next_deadline().is_none());
    }

    #[test]
    fn test_activation_populates_all_series() {
        let mut view = make_view(1);
        view.activate(Instant::now());

        assert!(view.is_active());
        assert_eq!(view.posture(), Some(&PostureSnapshot::new(12, 8)));
        assert_eq!(view.upright_share().map(|s| s.to_string()), Some("60.0".into()));
        assert!(view.live_grid().is_some());
        assert_eq!(view.daily_summaries().map(|d| d.len()), Some(5));
        assert!(view.weekly_grid().is_some());
    }

    #[test]
    fn test_ticks_follow_each_period() {
        let t0 = Instant::now();
        let mut view = make_view(5);
        let mut recorder = Recorder::default();
        view.activate(t0);

        for step in 1..=20 {
            view.tick(t0 + ms(step * 100), &mut recorder);
        }

        assert_eq!(recorder.postures.len(), 1);
        assert_eq!(recorder.grids, 4);
        assert_eq!(view.posture(), recorder.postures.last());
        assert!(recorder.postures.iter().all(|p| p.total() == 20));
    }

    #[test]
    fn test_session_data_frozen_while_active() {
        let t0 = Instant::now();
        let mut view = make_view(9);
        view.activate(t0);

        let summaries = *view.daily_summaries().unwrap();
        let weekly = view.weekly_grid().unwrap().clone();

        // Re-activation and many ticks leave the weekly data untouched
        view.activate(t0 + ms(10));
        for step in 1..=30 {
            view.tick(t0 + ms(step * 500), &mut ());
        }

        assert_eq!(view.daily_summaries(), Some(&summaries));
        assert_eq!(view.weekly_grid(), Some(&weekly));
    }

    #[test]
    fn test_live_grid_replaced_on_tick() {
        let t0 = Instant::now();
        let mut view = make_view(13);
        view.activate(t0);

        let before = view.live_grid().unwrap().clone();
        let due = view.tick(t0 + GRID_PERIOD, &mut ());
        assert!(due.live_grid);
        assert!(!due.posture);
        assert_ne!(view.live_grid(), Some(&before));
    }

    #[test]
    fn test_no_publish_after_teardown() {
        let t0 = Instant::now();
        let mut view = make_view(21);
        let mut recorder = Recorder::default();
        view.activate(t0);
        view.tick(t0 + ms(2000), &mut recorder);
        assert_eq!(recorder.postures.len(), 1);

        view.deactivate();
        let postures = recorder.postures.len();
        let grids = recorder.grids;

        for step in 1..=20 {
            let due = view.tick(t0 + ms(2000 + step * 500), &mut recorder);
            assert!(!due.any());
        }

        assert_eq!(recorder.postures.len(), postures);
        assert_eq!(recorder.grids, grids);
        assert!(view.posture().is_none());
        assert!(view.live_grid().is_none());
    }

    #[test]
    fn test_reactivation_starts_fresh_session() {
        let t0 = Instant::now();
        let mut view = make_view(33);
        view.activate(t0);
        let first = *view.daily_summaries().unwrap();

        view.deactivate();
        view.activate(t0 + ms(100));

        assert_ne!(view.daily_summaries(), Some(&first));
        assert_eq!(view.posture(), Some(&PostureSnapshot::default()));
        assert_eq!(view.next_deadline(), Some(t0 + ms(100) + GRID_PERIOD));
    }
}

//! Periodic refresh timers for the live data series.
//!
//! Timers are plain deadlines polled from the event loop; nothing runs in the
//! background, so cancelling a timer is enough to guarantee it never fires again.

use std::time::{Duration, Instant};

/// Default period of the live posture refresh
pub const POSTURE_PERIOD: Duration = Duration::from_millis(2000);

/// Default period of the live sensor grid refresh
pub const GRID_PERIOD: Duration = Duration::from_millis(500);

/// A cancellable fixed-period timer
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    period: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl PeriodicTask {
    /// Start a timer whose first firing is one period after `start`.
    ///
    /// `period` must be non-zero.
    pub fn start(period: Duration, start: Instant) -> Self {
        debug_assert!(!period.is_zero(), "period must be non-zero");
        PeriodicTask {
            period,
            next_due: start + period,
            cancelled: false,
        }
    }

    /// Next firing time, or None once cancelled
    pub fn next_due(&self) -> Option<Instant> {
        (!self.cancelled).then_some(self.next_due)
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns true if the timer fired at `now`.
    ///
    /// Periods missed while the loop was busy collapse into one firing; the
    /// next deadline is the first period boundary after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        let overdue = now.duration_since(self.next_due);
        let skipped = overdue.as_nanos() / self.period.as_nanos();
        let advance = self.period.as_nanos() * (skipped + 1);
        self.next_due += Duration::from_nanos(advance as u64);
        true
    }
}

/// Which live series fired on a scheduler poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueSeries {
    pub posture: bool,
    pub live_grid: bool,
}

impl DueSeries {
    #[allow(dead_code)] // Used in tests
    pub fn any(self) -> bool {
        self.posture || self.live_grid
    }
}

/// The two live refresh timers owned by one dashboard session
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    posture: PeriodicTask,
    live_grid: PeriodicTask,
}

impl RefreshScheduler {
    pub fn start(posture_period: Duration, grid_period: Duration, start: Instant) -> Self {
        RefreshScheduler {
            posture: PeriodicTask::start(posture_period, start),
            live_grid: PeriodicTask::start(grid_period, start),
        }
    }

    pub fn due(&mut self, now: Instant) -> DueSeries {
        DueSeries {
            posture: self.posture.poll(now),
            live_grid: self.live_grid.poll(now),
        }
    }

    /// Earliest pending deadline across both timers
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.posture.next_due(), self.live_grid.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn cancel_all(&mut self) {
        self.posture.cancel();
        self.live_grid.cancel();
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_cancelled(&self) -> bool {
        self.posture.is_cancelled() && self.live_grid.is_cancelled()
    }
}

//! Synthetic metrics generator.
//!
//! Stands in for a real telemetry feed: every reading is drawn from an
//! injected random source, so a seeded generator replays the same session.

use std::ops::Range;

use chrono::Weekday;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::metrics::round_to_tenth;
use super::models::{DailySummary, PostureSnapshot, SensorGrid, GRID_SIZE, LIVE_SENSOR_COUNT};

/// Weekdays covered by the weekly overview
pub const SUMMARY_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Posture classifications sampled per simulated day
pub const TRIALS_PER_DAY: u32 = 240;

/// Range of a single simulated force reading
pub const SENSOR_RANGE: Range<u32> = 300..900;

/// Days averaged into each weekly heatmap cell
pub const WEEKLY_DRAWS: u32 = 5;

/// Produces the four data shapes shown on the dashboard
#[derive(Debug, Clone)]
pub struct MetricsGenerator<R> {
    rng: R,
}

impl MetricsGenerator<StdRng> {
    /// Deterministic generator for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        MetricsGenerator::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        MetricsGenerator::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> MetricsGenerator<R> {
    pub fn new(rng: R) -> Self {
        MetricsGenerator { rng }
    }

    /// Classify the 20 live sensors: upright count uniform in [0, 20].
    pub fn generate_live_samples(&mut self) -> PostureSnapshot {
        let upright = self.rng.random_range(0..=LIVE_SENSOR_COUNT);
        PostureSnapshot::new(upright, LIVE_SENSOR_COUNT - upright)
    }

    /// One summary per weekday, each from 240 fair coin flips.
    pub fn generate_daily_summaries(&mut self) -> [DailySummary; 5] {
        SUMMARY_DAYS.map(|day| {
            let upright_count = (0..TRIALS_PER_DAY)
                .filter(|_| self.rng.random_bool(0.5))
                .count();
            let upright = round_to_tenth(upright_count as f64 / TRIALS_PER_DAY as f64 * 100.0);
            DailySummary {
                day,
                upright,
                abnormal: round_to_tenth(100.0 - upright),
            }
        })
    }

    /// Fresh live grid; every cell independent in [300, 900).
    pub fn generate_sensor_grid(&mut self) -> SensorGrid {
        let mut cells = [[0; GRID_SIZE]; GRID_SIZE];
        for cell in cells.iter_mut().flatten() {
            *cell = self.draw_reading();
        }
        SensorGrid::from_cells(cells)
    }

    /// Weekly grid; every cell is the rounded mean of five readings.
    pub fn generate_weekly_aggregate_grid(&mut self) -> SensorGrid {
        let mut cells = [[0; GRID_SIZE]; GRID_SIZE];
        for cell in cells.iter_mut().flatten() {
            let sum: u32 = (0..WEEKLY_DRAWS).map(|_| self.draw_reading()).sum();
            *cell = (sum as f64 / WEEKLY_DRAWS as f64).round() as u32;
        }
        SensorGrid::from_cells(cells)
    }

    fn draw_reading(&mut self) -> u32 {
        self.rng.random_range(SENSOR_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_samples_sum_to_sensor_count() {
        let mut generator = MetricsGenerator::seeded(7);
        for _ in 0..500 {
            let snapshot = generator.generate_live_samples();
            assert_eq!(snapshot.total(), LIVE_SENSOR_COUNT);
            assert!(snapshot.upright() <= 20);
            assert!(snapshot.abnormal() <= 20);
        }
    }

    #[test]
    fn test_live_samples_reach_both_extremes() {
        let mut generator = MetricsGenerator::seeded(11);
        let uprights: Vec<u32> = (0..2000)
            .map(|_| generator.generate_live_samples().upright())
            .collect();
        assert!(uprights.contains(&0));
        assert!(uprights.contains(&20));
    }

    #[test]
    fn test_daily_summaries_are_complementary() {
        let mut generator = MetricsGenerator::seeded(3);
        for _ in 0..50 {
            let summaries = generator.generate_daily_summaries();
            for summary in summaries {
                assert!((summary.upright + summary.abnormal - 100.0).abs() <= 0.1);
                assert!((0.0..=100.0).contains(&summary.upright));
                // One decimal of precision
                assert_eq!(round_to_tenth(summary.upright), summary.upright);
            }
        }
    }

    #[test]
    fn test_daily_summaries_cover_weekdays_in_order() {
        let mut generator = MetricsGenerator::seeded(3);
        let labels: Vec<&str> = generator
            .generate_daily_summaries()
            .iter()
            .map(|s| s.day_label())
            .collect();
        assert_eq!(
            labels,
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
        );
    }

    #[test]
    fn test_sensor_grid_cells_in_range() {
        let mut generator = MetricsGenerator::seeded(42);
        for _ in 0..20 {
            let grid = generator.generate_sensor_grid();
            assert_eq!(grid.rows().len(), GRID_SIZE);
            assert!(grid.rows().iter().all(|row| row.len() == GRID_SIZE));
            assert!(grid.values().all(|v| SENSOR_RANGE.contains(&v)));
        }
    }

    #[test]
    fn test_weekly_grid_cells_in_range() {
        let mut generator = MetricsGenerator::seeded(42);
        for _ in 0..20 {
            let grid = generator.generate_weekly_aggregate_grid();
            assert!(grid.values().all(|v| SENSOR_RANGE.contains(&v)));
        }
    }

    #[test]
    fn test_weekly_grid_is_rounded_mean_of_five_readings() {
        let mut generator = MetricsGenerator::seeded(99);
        let mut replay = StdRng::seed_from_u64(99);
        let grid = generator.generate_weekly_aggregate_grid();

        for value in grid.values() {
            let sum: u32 = (0..WEEKLY_DRAWS)
                .map(|_| replay.random_range(SENSOR_RANGE))
                .sum();
            assert_eq!(value, (sum as f64 / 5.0).round() as u32);
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = MetricsGenerator::seeded(2024);
        let mut b = MetricsGenerator::seeded(2024);
        assert_eq!(a.generate_daily_summaries(), b.generate_daily_summaries());
        assert_eq!(a.generate_sensor_grid(), b.generate_sensor_grid());
        assert_eq!(a.generate_live_samples(), b.generate_live_samples());
    }
}

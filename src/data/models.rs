//! Data models for the simulated posture feed.

use chrono::Weekday;
use serde::{Serialize, Serializer};

/// Number of rows and columns in a sensor grid
pub const GRID_SIZE: usize = 10;

/// Number of seat sensors classified on every live refresh
pub const LIVE_SENSOR_COUNT: u32 = 20;

/// Binary posture classification of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostureKind {
    Upright,
    Abnormal,
}

impl PostureKind {
    pub fn label(self) -> &'static str {
        match self {
            PostureKind::Upright => "Upright",
            PostureKind::Abnormal => "Abnormal",
        }
    }
}

/// A count of sensors reporting one posture classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostureSample {
    pub name: PostureKind,
    pub value: u32,
}

/// The upright/abnormal pair published on every live posture refresh.
///
/// Built only through [`PostureSnapshot::new`], so the two samples always
/// describe the same refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostureSnapshot {
    samples: [PostureSample; 2],
}

impl PostureSnapshot {
    pub fn new(upright: u32, abnormal: u32) -> Self {
        PostureSnapshot {
            samples: [
                PostureSample {
                    name: PostureKind::Upright,
                    value: upright,
                },
                PostureSample {
                    name: PostureKind::Abnormal,
                    value: abnormal,
                },
            ],
        }
    }

    pub fn samples(&self) -> &[PostureSample; 2] {
        &self.samples
    }

    pub fn upright(&self) -> u32 {
        self.samples[0].value
    }

    pub fn abnormal(&self) -> u32 {
        self.samples[1].value
    }

    pub fn total(&self) -> u32 {
        self.upright() + self.abnormal()
    }
}

impl Default for PostureSnapshot {
    /// Value shown before the first live refresh fires
    fn default() -> Self {
        PostureSnapshot::new(12, 8)
    }
}

/// Upright vs abnormal share of one weekday
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySummary {
    #[serde(serialize_with = "serialize_weekday")]
    pub day: Weekday,
    pub upright: f64,
    pub abnormal: f64,
}

impl DailySummary {
    pub fn day_label(&self) -> &'static str {
        weekday_label(self.day)
    }
}

/// Full English name of a weekday
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_label(*day))
}

/// A 10x10 matrix of force readings across the seat surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SensorGrid {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl SensorGrid {
    pub fn from_cells(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        SensorGrid { cells }
    }

    pub fn rows(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Value at (row, col), or None when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    #[allow(dead_code)] // Used in tests
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }
}

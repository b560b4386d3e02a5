//! Derived display metrics: upright share, warning threshold, heat colors.

use std::fmt;

use ratatui::style::Color;
use serde::Serialize;

use super::models::PostureSnapshot;

/// Upright shares below this percentage raise the move-around warning
pub const WARNING_THRESHOLD: f64 = 50.0;

/// Force value mapped to the darkest shade of the heat scale
pub const HEAT_SCALE_MAX: f64 = 1024.0;

const HEAT_HUE: f64 = 210.0;
const HEAT_SATURATION: f64 = 100.0;
const HEAT_LIGHTNESS_TOP: f64 = 80.0;
const HEAT_LIGHTNESS_SPAN: f64 = 40.0;

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Live upright percentage, one decimal of precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UprightShare(f64);

impl UprightShare {
    #[allow(dead_code)] // Used in tests
    pub fn percent(self) -> f64 {
        self.0
    }

    pub fn needs_warning(self) -> bool {
        self.0 < WARNING_THRESHOLD
    }
}

impl fmt::Display for UprightShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Percentage of upright samples; an empty reading counts as 0.
pub fn upright_share(upright: u32, abnormal: u32) -> UprightShare {
    let total = upright + abnormal;
    if total == 0 {
        return UprightShare(0.0);
    }
    UprightShare(round_to_tenth(upright as f64 / total as f64 * 100.0))
}

impl PostureSnapshot {
    pub fn upright_share(&self) -> UprightShare {
        upright_share(self.upright(), self.abnormal())
    }
}

/// Whole-percent share used for pie slice labels
pub fn slice_percent(value: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (value as f64 / total as f64 * 100.0).round() as u32
}

/// An HSL color with saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Convert to a terminal RGB color.
    ///
    /// Channels saturate at 0 and 255; the lightness itself is left as mapped.
    pub fn to_color(self) -> Color {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::Rgb(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Map a force reading onto the blue heat scale.
///
/// The nominal domain is [0, 1024). Values outside it are not clamped and
/// land outside the 40%..80% lightness band.
pub fn heat_color(value: u32) -> Hsl {
    Hsl {
        hue: HEAT_HUE,
        saturation: HEAT_SATURATION,
        lightness: HEAT_LIGHTNESS_TOP - (value as f64 / HEAT_SCALE_MAX) * HEAT_LIGHTNESS_SPAN,
    }
}

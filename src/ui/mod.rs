//! Terminal User Interface components for posture-tui.

pub mod chart;
pub mod heatmap;
mod help;
pub mod pie;
pub mod selector;
mod theme;
pub mod widgets;

pub use help::HelpOverlay;
pub use theme::Theme;

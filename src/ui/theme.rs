//! Theme configuration for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub border: Color,
    pub title: Color,
    pub upright: Color,
    pub abnormal: Color,
    pub trend: Color,
    pub warning: Color,
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bg: Color::Reset,
            fg: Color::White,
            highlight_bg: Color::Rgb(60, 60, 80),
            highlight_fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            // #0088FE / #FF8042
            upright: Color::Rgb(0, 136, 254),
            abnormal: Color::Rgb(255, 128, 66),
            trend: Color::White,
            warning: Color::Red,
            cursor: Color::Yellow,
        }
    }
}

impl Theme {
    /// Base surface style used to paint widget backgrounds
    pub fn surface_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for normal text
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed text for descriptions and hints
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.border).add_modifier(Modifier::DIM)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Color of a posture series
    pub fn posture_color(&self, kind: crate::data::PostureKind) -> Color {
        match kind {
            crate::data::PostureKind::Upright => self.upright,
            crate::data::PostureKind::Abnormal => self.abnormal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PostureKind;

    #[test]
    fn test_posture_colors_are_distinct() {
        let theme = Theme::default();
        assert_ne!(
            theme.posture_color(PostureKind::Upright),
            theme.posture_color(PostureKind::Abnormal)
        );
    }

    #[test]
    fn test_posture_colors_are_not_gray() {
        let theme = Theme::default();
        let gray_colors = [Color::Gray, Color::DarkGray, Color::White, Color::Black];
        for kind in [PostureKind::Upright, PostureKind::Abnormal] {
            let color = theme.posture_color(kind);
            assert!(
                !gray_colors.contains(&color),
                "{} color should not be a gray shade: {:?}",
                kind.label(),
                color
            );
        }
    }
}

//! Help overlay widget showing keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use crate::data::{heat_color, PostureKind};

/// Help overlay showing all keyboard shortcuts
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        HelpOverlay { theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Center the help popup
        let popup_area = centered_rect(65, 80, area);

        // Clear the background
        frame.render_widget(Clear, popup_area);

        const DESCRIPTION: &str = "A terminal dashboard for simulated sitting-posture metrics. Live panels refresh on their own timers; the weekly overview is generated once per session.";

        let shortcuts = [
            ("Views", vec![
                ("1-4", "Select view by number"),
                ("Tab", "Next view"),
                ("Shift+Tab", "Previous view"),
            ]),
            ("Heatmaps", vec![
                ("h j k l / arrows", "Move the cell cursor"),
            ]),
            ("General", vec![
                ("p", "Pause / resume live refresh"),
                ("?", "Toggle this help"),
                ("q", "Quit"),
            ]),
        ];

        let mut lines: Vec<Line> = Vec::new();

        // Add description as a single wrapped line
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {DESCRIPTION}"),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));

        // Add keyboard shortcuts sections
        for (section, items) in shortcuts {
            lines.push(Line::from(Span::styled(
                format!("  {section} "),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            lines.push(Line::from(""));

            for (key, desc) in items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{key:<18}"),
                        Style::default().fg(self.theme.title),
                    ),
                    Span::raw(desc),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.extend(self.legend_lines());

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" posture-tui Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style())
                    .title_style(self.theme.title_style())
                    .style(self.theme.surface_style()),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false })
            .style(self.theme.surface_style());

        frame.render_widget(paragraph, popup_area);
    }
}

impl HelpOverlay<'_> {
    /// Color key for the posture series and the heatmap scale
    fn legend_lines(&self) -> Vec<Line<'static>> {
        let heading = Line::from(Span::styled(
            "  Legend ",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
        ));

        let series = Line::from(
            [PostureKind::Upright, PostureKind::Abnormal]
                .into_iter()
                .flat_map(|kind| {
                    [
                        Span::styled("    ██ ", Style::default().fg(self.theme.posture_color(kind))),
                        Span::raw(kind.label()),
                    ]
                })
                .collect::<Vec<_>>(),
        );

        let mut scale = vec![Span::raw("    ")];
        for value in HEAT_LEGEND_STEPS {
            scale.push(Span::styled(
                format!("{value:^5}"),
                Style::default().bg(heat_color(value).to_color()).fg(Color::Black),
            ));
        }
        scale.push(Span::raw("  sensor force"));

        vec![heading, Line::from(""), series, Line::from(scale)]
    }
}

/// Readings shown on the heat scale legend
const HEAT_LEGEND_STEPS: [u32; 6] = [300, 420, 540, 660, 780, 900];

/// Create a centered rect for popup dialogs
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_darkens_with_force() {
        let theme = Theme::default();
        let lines = HelpOverlay::new(&theme).legend_lines();
        let scale = &lines[3];
        let swatches: Vec<_> = scale.spans[1..=HEAT_LEGEND_STEPS.len()]
            .iter()
            .map(|span| span.style.bg)
            .collect();
        assert_eq!(swatches.first(), Some(&Some(heat_color(300).to_color())));
        assert_eq!(swatches.last(), Some(&Some(heat_color(900).to_color())));
        assert!(lines[2].to_string().contains("Upright"));
        assert!(lines[2].to_string().contains("Abnormal"));
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}

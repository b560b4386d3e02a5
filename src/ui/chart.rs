//! Weekly overview histogram: stacked upright/abnormal bars with a trend line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::data::DailySummary;

/// Half-width of a day's bar in x-axis units
const BAR_HALF_WIDTH: f64 = 0.3;

/// Columns sampled across each bar
const BAR_COLUMNS: usize = 13;

/// Stacked histogram of the session's daily summaries
pub struct WeeklyHistogram<'a> {
    summaries: &'a [DailySummary],
    theme: &'a Theme,
}

impl<'a> WeeklyHistogram<'a> {
    pub fn new(summaries: &'a [DailySummary], theme: &'a Theme) -> Self {
        WeeklyHistogram { summaries, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Weekly Overview Histogram ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title_style(self.theme.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Description
                Constraint::Min(5),    // Chart
                Constraint::Length(1), // Per-day values
            ])
            .split(inner);

        let description = Paragraph::new(
            "Proportion of upright (blue) vs abnormal (orange) sitting time over the past 5 days.",
        )
        .style(self.theme.dimmed_style());
        frame.render_widget(description, chunks[0]);

        // The abnormal bar spans the whole column; the upright bar is painted
        // over its lower part, which leaves the stack reading bottom-up.
        let abnormal_bars = bar_points(self.summaries, |s| s.upright + s.abnormal);
        let upright_bars = bar_points(self.summaries, |s| s.upright);
        let trend = trend_points(self.summaries);

        let datasets = vec![
            Dataset::default()
                .name("Abnormal")
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(self.theme.abnormal))
                .data(&abnormal_bars),
            Dataset::default()
                .name("Upright")
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(self.theme.upright))
                .data(&upright_bars),
            Dataset::default()
                .name("Upright Trend")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.trend))
                .data(&trend),
        ];

        let max_x = self.summaries.len().saturating_sub(1) as f64 + 0.5;
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(self.theme.normal_style())
                    .bounds([-0.5, max_x])
                    .labels(day_labels(self.summaries)),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("%", Style::default().add_modifier(Modifier::DIM)))
                    .style(self.theme.normal_style())
                    .bounds([0.0, 100.0])
                    .labels(["0%", "25%", "50%", "75%", "100%"]),
            );
        frame.render_widget(chart, chunks[1]);

        let values: Vec<Span> = self
            .summaries
            .iter()
            .flat_map(|s| {
                vec![
                    Span::styled(format!("{} ", short_day(s)), self.theme.dimmed_style()),
                    Span::styled(
                        format!("{}%", s.upright),
                        Style::default().fg(self.theme.upright),
                    ),
                    Span::raw("/"),
                    Span::styled(
                        format!("{}%  ", s.abnormal),
                        Style::default().fg(self.theme.abnormal),
                    ),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(values)), chunks[2]);
    }
}

fn short_day(summary: &DailySummary) -> &'static str {
    &summary.day_label()[..3]
}

/// Bar columns for every day, centred on the day's index
fn bar_points(summaries: &[DailySummary], height: impl Fn(&DailySummary) -> f64) -> Vec<(f64, f64)> {
    summaries
        .iter()
        .enumerate()
        .flat_map(|(i, s)| {
            let top = height(s);
            (0..BAR_COLUMNS).map(move |c| {
                let offset = -BAR_HALF_WIDTH
                    + 2.0 * BAR_HALF_WIDTH * c as f64 / (BAR_COLUMNS - 1) as f64;
                (i as f64 + offset, top)
            })
        })
        .collect()
}

fn trend_points(summaries: &[DailySummary]) -> Vec<(f64, f64)> {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.upright))
        .collect()
}

/// Axis labels at every half step from -0.5, so day names land on bar centres
fn day_labels(summaries: &[DailySummary]) -> Vec<String> {
    let mut labels = vec![String::new()];
    for s in summaries {
        labels.push(short_day(s).to_string());
        labels.push(String::new());
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn summaries() -> Vec<DailySummary> {
        [(Weekday::Mon, 40.0), (Weekday::Tue, 62.5)]
            .into_iter()
            .map(|(day, upright)| DailySummary {
                day,
                upright,
                abnormal: 100.0 - upright,
            })
            .collect()
    }

    #[test]
    fn test_bar_points_centred_on_day() {
        let points = bar_points(&summaries(), |s| s.upright);
        assert_eq!(points.len(), 2 * BAR_COLUMNS);
        let (first_x, first_y) = points[0];
        let (last_x, last_y) = points[BAR_COLUMNS - 1];
        assert!((first_x + BAR_HALF_WIDTH).abs() < 1e-9);
        assert!((last_x - BAR_HALF_WIDTH).abs() < 1e-9);
        assert_eq!(first_y, 40.0);
        assert_eq!(last_y, 40.0);
        assert_eq!(points[BAR_COLUMNS].1, 62.5);
    }

    #[test]
    fn test_stacked_top_is_full_height() {
        let points = bar_points(&summaries(), |s| s.upright + s.abnormal);
        assert!(points.iter().all(|&(_, y)| (y - 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_day_labels_alternate_with_blanks() {
        assert_eq!(day_labels(&summaries()), vec!["", "Mon", "", "Tue", ""]);
    }

    #[test]
    fn test_trend_follows_upright() {
        assert_eq!(trend_points(&summaries()), vec![(0.0, 40.0), (1.0, 62.5)]);
    }
}

//! Live posture pie chart drawn on a braille canvas.

use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::theme::Theme;
use crate::data::{slice_percent, PostureKind, PostureSnapshot};

/// Sampling step over the unit square when filling the disc
const FILL_STEP: f64 = 0.02;

/// Live upright/abnormal pie
pub struct PosturePie<'a> {
    snapshot: &'a PostureSnapshot,
    theme: &'a Theme,
}

impl<'a> PosturePie<'a> {
    pub fn new(snapshot: &'a PostureSnapshot, theme: &'a Theme) -> Self {
        PosturePie { snapshot, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Live Pie Chart ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title_style(self.theme.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Description
                Constraint::Min(6),    // Pie
                Constraint::Length(1), // Legend
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(
                "Proportion of time sitting upright vs abnormal over the past 10 seconds.",
            )
            .style(self.theme.dimmed_style()),
            chunks[0],
        );

        let upright_fraction = upright_fraction(self.snapshot);
        let (upright, abnormal) = disc_points(upright_fraction);
        let theme = self.theme;
        // Terminal cells are about twice as tall as wide
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-2.0, 2.0])
            .y_bounds([-1.0, 1.0])
            .paint(move |ctx| {
                ctx.draw(&Points {
                    coords: &upright,
                    color: theme.upright,
                });
                ctx.draw(&Points {
                    coords: &abnormal,
                    color: theme.abnormal,
                });
            });
        frame.render_widget(canvas, chunks[1]);

        frame.render_widget(Paragraph::new(self.legend()).centered(), chunks[2]);
    }

    fn legend(&self) -> Line<'static> {
        let total = self.snapshot.total();
        let spans: Vec<Span> = self
            .snapshot
            .samples()
            .iter()
            .map(|sample| {
                Span::styled(
                    format!(
                        "■ {}: {}% ({})   ",
                        sample.name.label(),
                        slice_percent(sample.value, total),
                        sample.value
                    ),
                    Style::default().fg(self.theme.posture_color(sample.name)),
                )
            })
            .collect();
        Line::from(spans)
    }
}

fn upright_fraction(snapshot: &PostureSnapshot) -> f64 {
    match snapshot.total() {
        0 => 0.0,
        total => snapshot.upright() as f64 / total as f64,
    }
}

/// Which slice a point of the unit disc belongs to.
///
/// Slices start at twelve o'clock and run clockwise, upright first.
fn slice_at(x: f64, y: f64, upright_fraction: f64) -> PostureKind {
    let angle = x.atan2(y).rem_euclid(TAU);
    if angle < upright_fraction * TAU {
        PostureKind::Upright
    } else {
        PostureKind::Abnormal
    }
}

/// Points filling the unit disc, split by slice
fn disc_points(upright_fraction: f64) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut upright = Vec::new();
    let mut abnormal = Vec::new();
    let steps = (2.0 / FILL_STEP) as i32;
    for i in 0..=steps {
        let y = -1.0 + i as f64 * FILL_STEP;
        for j in 0..=steps {
            let x = -1.0 + j as f64 * FILL_STEP;
            if x * x + y * y > 1.0 {
                continue;
            }
            // Stretch x to compensate for the canvas aspect ratio
            let point = (x * 2.0, y);
            match slice_at(x, y, upright_fraction) {
                PostureKind::Upright => upright.push(point),
                PostureKind::Abnormal => abnormal.push(point),
            }
        }
    }
    (upright, abnormal)
}

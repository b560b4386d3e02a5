//! Heatmap widget for 10x10 sensor grids.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::selector::GridCursor;
use super::theme::Theme;
use crate::data::{heat_color, SensorGrid};

/// Terminal cells per grid cell; 4 columns by 2 rows is roughly square
const CELL_WIDTH: usize = 4;
const CELL_HEIGHT: usize = 2;

/// A titled heatmap card
pub struct Heatmap<'a> {
    grid: &'a SensorGrid,
    title: &'a str,
    description: &'a str,
    cursor: Option<GridCursor>,
    theme: &'a Theme,
}

impl<'a> Heatmap<'a> {
    pub fn new(grid: &'a SensorGrid, title: &'a str, description: &'a str, theme: &'a Theme) -> Self {
        Heatmap {
            grid,
            title,
            description,
            cursor: None,
            theme,
        }
    }

    pub fn with_cursor(mut self, cursor: GridCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title_style(self.theme.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.description).style(self.theme.dimmed_style()),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(self.lines()).alignment(Alignment::Center),
            chunks[1],
        );
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (r, row) in self.grid.rows().iter().enumerate() {
            for sub_row in 0..CELL_HEIGHT {
                let spans: Vec<Span> = row
                    .iter()
                    .enumerate()
                    .map(|(c, &value)| {
                        let selected = self.cursor == Some(GridCursor { row: r, col: c });
                        cell_span(value, selected && sub_row == 0, self.theme)
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
        }
        lines
    }
}

fn cell_span(value: u32, marked: bool, theme: &Theme) -> Span<'static> {
    let bg = heat_color(value).to_color();
    if marked {
        Span::styled(
            format!("{:^width$}", "[]", width = CELL_WIDTH),
            Style::default()
                .bg(bg)
                .fg(theme.cursor)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" ".repeat(CELL_WIDTH), Style::default().bg(bg))
    }
}

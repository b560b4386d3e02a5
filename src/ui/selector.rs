//! Tab selection and heatmap cell cursor state and widgets.
//!
//! The dashboard shows one of four views at a time. Heatmap views also carry
//! a cell cursor so a single reading can be inspected from the status bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::Theme;
use crate::data::GRID_SIZE;

/// The four dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    OverviewHistogram,
    WeeklyHeatmap,
    LivePie,
    LiveHeatmap,
}

impl ViewTab {
    pub const ALL: [ViewTab; 4] = [
        ViewTab::OverviewHistogram,
        ViewTab::WeeklyHeatmap,
        ViewTab::LivePie,
        ViewTab::LiveHeatmap,
    ];

    /// Label shown in the tab bar
    pub fn title(self) -> &'static str {
        match self {
            ViewTab::OverviewHistogram => "Overview Histogram",
            ViewTab::WeeklyHeatmap => "Overview Heatmap",
            ViewTab::LivePie => "Live Pie Chart",
            ViewTab::LiveHeatmap => "Live Heatmap",
        }
    }

    /// Name accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            ViewTab::OverviewHistogram => "overview",
            ViewTab::WeeklyHeatmap => "weekly-heatmap",
            ViewTab::LivePie => "live-pie",
            ViewTab::LiveHeatmap => "live-heatmap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        ViewTab::ALL.into_iter().find(|tab| tab.name() == name)
    }

    pub fn index(self) -> usize {
        match self {
            ViewTab::OverviewHistogram => 0,
            ViewTab::WeeklyHeatmap => 1,
            ViewTab::LivePie => 2,
            ViewTab::LiveHeatmap => 3,
        }
    }

    /// Tab for a 1-based number key
    pub fn from_number(n: u32) -> Option<Self> {
        let idx = (n as usize).checked_sub(1)?;
        ViewTab::ALL.get(idx).copied()
    }

    pub fn next(self) -> Self {
        ViewTab::ALL[(self.index() + 1) % ViewTab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        ViewTab::ALL[(self.index() + ViewTab::ALL.len() - 1) % ViewTab::ALL.len()]
    }

    pub fn is_heatmap(self) -> bool {
        matches!(self, ViewTab::WeeklyHeatmap | ViewTab::LiveHeatmap)
    }
}

/// Selected cell of a heatmap view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    pub row: usize,
    pub col: usize,
}

impl GridCursor {
    pub fn up(&mut self) {
        self.row = self.row.checked_sub(1).unwrap_or(GRID_SIZE - 1);
    }

    pub fn down(&mut self) {
        self.row = (self.row + 1) % GRID_SIZE;
    }

    pub fn left(&mut self) {
        self.col = self.col.checked_sub(1).unwrap_or(GRID_SIZE - 1);
    }

    pub fn right(&mut self) {
        self.col = (self.col + 1) % GRID_SIZE;
    }
}

/// Tab bar widget
pub struct TabSelector<'a> {
    active: ViewTab,
    theme: &'a Theme,
}

impl<'a> TabSelector<'a> {
    pub fn new(active: ViewTab, theme: &'a Theme) -> Self {
        TabSelector { active, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spans: Vec<Span> = ViewTab::ALL
            .iter()
            .flat_map(|&tab| {
                let num = format!("[{}] ", tab.index() + 1);
                let style = if tab == self.active {
                    self.theme.highlight_style()
                } else {
                    self.theme.normal_style()
                };
                vec![
                    Span::styled(num, Style::default().add_modifier(Modifier::DIM)),
                    Span::styled(format!("{}  ", tab.title()), style),
                ]
            })
            .collect();

        let paragraph = Paragraph::new(Line::from(spans)).style(self.theme.normal_style());
        frame.render_widget(paragraph, area);
    }
}

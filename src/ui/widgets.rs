//! UI widgets for the posture dashboard.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::data::UprightShare;

/// Text surfaced when the upright share drops below the threshold
pub const WARNING_TEXT: &str = "Warning: Please stand up or move around!";

/// Top card showing the live upright share
pub struct UprightCard<'a> {
    share: UprightShare,
    theme: &'a Theme,
}

impl<'a> UprightCard<'a> {
    pub fn new(share: UprightShare, theme: &'a Theme) -> Self {
        UprightCard { share, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Live proportion over the past 10 seconds",
                self.theme.dimmed_style(),
            )),
            Line::from(Span::styled(format!("{}%", self.share), self.theme.title_style())),
        ];
        if self.share.needs_warning() {
            lines.push(Line::from(Span::styled(WARNING_TEXT, self.theme.warning_style())));
        }

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(" Upright Sit Time ")
                .borders(Borders::ALL)
                .border_style(self.theme.border_style())
                .title_style(self.theme.title_style()),
        );
        frame.render_widget(paragraph, area);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    tab: &'a str,
    updated: Option<DateTime<Local>>,
    paused: bool,
    cell_value: Option<u32>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(tab: &'a str, updated: Option<DateTime<Local>>, theme: &'a Theme) -> Self {
        StatusBar {
            tab,
            updated,
            paused: false,
            cell_value: None,
            theme,
        }
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn cell_value(mut self, value: Option<u32>) -> Self {
        self.cell_value = value;
        self
    }

    fn text(&self) -> String {
        let mut parts = vec![format!("posture-tui: {}", self.tab)];
        if let Some(value) = self.cell_value {
            parts.push(format!("Value: {value}"));
        }
        match self.updated {
            Some(at) => parts.push(format!("updated {}", at.format("%H:%M:%S"))),
            None => parts.push("waiting for data".to_string()),
        }
        if self.paused {
            parts.push("PAUSED".to_string());
        }
        parts.push("[p] Pause [?] Help [q] Quit".to_string());
        parts.join(" | ")
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.text())
            .style(self.theme.normal_style())
            .block(Block::default().borders(Borders::TOP).border_style(self.theme.border_style()));

        frame.render_widget(paragraph, area);
    }
}

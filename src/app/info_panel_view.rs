use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};

use crate::constants::{INFO_LINES, PALETTE};

use super::{App, view_style};

impl App {
    pub(super) fn render_info_panel(&self, f: &mut Frame, terminal_size: Rect) {
        let panel_rect = self.info_rect(terminal_size);
        let dots = [PALETTE.done, PALETTE.missed, PALETTE.unmarked];

        let lines: Vec<Line> = INFO_LINES
            .iter()
            .zip(dots)
            .map(|(text, color)| {
                Line::from(vec![
                    view_style::dot_span(color),
                    Span::styled(*text, Style::default().fg(Color::White)),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(Span::styled(
                " How it works ",
                Style::default().fg(Color::White),
            )))
            .title_alignment(ratatui::layout::Alignment::Center)
            .border_style(Style::default().fg(PALETTE.today))
            .padding(Padding::uniform(1));

        f.render_widget(Clear, panel_rect);
        f.render_widget(Paragraph::new(lines).block(block), panel_rect);
    }
}

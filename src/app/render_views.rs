use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{
        Block, BorderType, Borders, Padding, Paragraph,
        block::{Position, Title},
    },
};

use crate::{
    constants::{PALETTE, WEEKDAY_HEADERS},
    month_view::{Cell, MonthGrid, MonthStats},
};

use super::{App, ui_helpers, view_style};

const CELL_WIDTH: u16 = 5;
const COLUMN_WIDTH: u16 = CELL_WIDTH * 7 + 4;

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let column = ui_helpers::centered_column(size, COLUMN_WIDTH);

        let grid = self.tracker.grid(self.today);
        let stats = self.tracker.stats();
        let row_count = grid.rows().count() as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(row_count + 4),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(column);

        self.render_header(f, chunks[0]);
        self.render_stats(f, chunks[1], &stats);
        self.render_calendar(f, chunks[2], &grid);
        render_legend(f, chunks[3]);
        render_help(f, full_width(size, chunks[4]));
        self.render_warning(f, full_width(size, chunks[5]));

        if self.show_info {
            self.render_info_panel(f, size);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Habits",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Consistency is key.",
                Style::default().fg(PALETTE.muted),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_stats(&self, f: &mut Frame, area: Rect, stats: &MonthStats) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let counters = [
            ("SUCCESS", stats.done_count, PALETTE.done),
            ("MISSED", stats.missed_count, PALETTE.missed),
        ];
        for ((label, count, color), slot) in counters.into_iter().zip(halves.iter()) {
            let line = Line::from(vec![
                Span::styled(format!("{} ", label), Style::default().fg(PALETTE.muted)),
                Span::styled(
                    count.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));
            f.render_widget(Paragraph::new(line).block(block), *slot);
        }
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect, grid: &MonthGrid) {
        let header = Line::from(
            WEEKDAY_HEADERS
                .iter()
                .map(|label| {
                    Span::styled(
                        format!(" {:>2}  ", label),
                        Style::default()
                            .fg(PALETTE.muted)
                            .add_modifier(Modifier::BOLD),
                    )
                })
                .collect::<Vec<_>>(),
        );

        let mut lines = vec![header, Line::from("")];
        for row in grid.rows() {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|cell| match cell {
                    Cell::Pad => [Span::raw("    "), Span::raw(" ")],
                    Cell::Day(day) => [
                        Span::styled(
                            format!(" {:>2} ", day.day),
                            view_style::day_cell_style(day, day.day == self.cursor_day),
                        ),
                        Span::raw(" "),
                    ],
                })
                .collect();
            lines.push(Line::from(spans));
        }

        let selected = grid
            .day(self.cursor_day)
            .map(|cell| {
                Line::from(vec![
                    Span::styled(format!(" {} ", cell.key), Style::default().fg(PALETTE.muted)),
                    Span::styled(
                        format!("{} ", cell.status.token()),
                        Style::default().fg(view_style::status_color(cell.status)),
                    ),
                ])
            })
            .unwrap_or_default();

        let arrow_style = Style::default().fg(PALETTE.muted);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(Span::styled(" ‹ ", arrow_style)).alignment(Alignment::Left))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.tracker.label()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title(Line::from(Span::styled(" › ", arrow_style)).alignment(Alignment::Right))
            .title(
                Title::from(selected)
                    .position(Position::Bottom)
                    .alignment(Alignment::Center),
            )
            .border_style(Style::default().fg(PALETTE.muted))
            .padding(Padding::horizontal(1));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_warning(&self, f: &mut Frame, area: Rect) {
        let Some((warning, _)) = &self.warning else {
            return;
        };
        let line = Line::from(Span::styled(
            warning.as_str(),
            Style::default().fg(PALETTE.warning),
        ));
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

fn full_width(screen: Rect, row: Rect) -> Rect {
    Rect::new(screen.x, row.y, screen.width, row.height)
}

fn render_legend(f: &mut Frame, area: Rect) {
    let label_style = Style::default()
        .fg(PALETTE.muted)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        view_style::dot_span(PALETTE.done),
        Span::styled("DONE    ", label_style),
        view_style::dot_span(PALETTE.missed),
        Span::styled("MISSED", label_style),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "arrows move  space mark  [ ] month  t today  i info  q quit",
        Style::default().fg(PALETTE.muted),
    ));
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

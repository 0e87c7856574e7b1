use ratatui::{
    prelude::Span,
    style::{Color, Modifier, Style},
};

use crate::{constants::PALETTE, domain::Status, month_view::DayCell};

pub(super) fn status_color(status: Status) -> Color {
    match status {
        Status::Done => PALETTE.done,
        Status::Missed => PALETTE.missed,
        Status::None => PALETTE.unmarked,
    }
}

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

pub(super) fn day_cell_style(cell: &DayCell, is_cursor: bool) -> Style {
    let mut style = if cell.status.is_marked() {
        let bg = status_color(cell.status);
        Style::default()
            .bg(bg)
            .fg(text_color_for_bg(bg))
            .add_modifier(Modifier::BOLD)
    } else if cell.is_today {
        Style::default()
            .fg(PALETTE.today)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(PALETTE.unmarked)
    };

    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

pub(super) fn dot_span(color: Color) -> Span<'static> {
    Span::styled("● ", Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_color_contrasts_with_background() {
        assert_eq!(text_color_for_bg(Color::Rgb(255, 255, 255)), Color::Black);
        assert_eq!(text_color_for_bg(Color::Rgb(0, 0, 0)), Color::White);
        assert_eq!(text_color_for_bg(Color::Red), Color::White);
    }

    #[test]
    fn test_unmarked_today_is_highlighted() {
        let cell = DayCell {
            day: 15,
            key: "2024-02-15".parse().unwrap(),
            status: Status::None,
            is_today: true,
        };
        let style = day_cell_style(&cell, false);
        assert_eq!(style.fg, Some(PALETTE.today));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }
}

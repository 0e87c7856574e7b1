use std::{
    io,
    path::Path,
    time::{Duration, Instant},
};

use chrono::{Datelike, Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    constants::TIME_SETTINGS,
    date_math::YearMonth,
    storage::{self, HabitStore},
    tracker::{HabitTracker, MonthStep},
};

mod event_handlers;
mod info_panel_view;
mod render_views;
mod ui_helpers;
mod view_style;

struct App {
    tracker: HabitTracker,
    today: NaiveDate,
    cursor_day: u32,
    show_info: bool,
    warning: Option<(String, Instant)>,
    render_needed: bool,
}

impl App {
    fn new(tracker: HabitTracker, today: NaiveDate) -> Self {
        Self {
            tracker,
            today,
            cursor_day: today.day(),
            show_info: false,
            warning: None,
            render_needed: true,
        }
    }

    fn toggle_cursor_day(&mut self) {
        if self.tracker.toggle_day(self.cursor_day).is_some()
            && let Some(warning) = self.tracker.take_warning()
        {
            self.warning = Some((warning, Instant::now()));
        }
        self.render_needed = true;
    }

    fn select_month(&mut self, step: MonthStep) {
        let month = self.tracker.select_month(step);
        self.cursor_day = ui_helpers::clamp_day(self.cursor_day, month.days());
        self.render_needed = true;
    }

    fn jump_to_today(&mut self) {
        self.tracker.jump_to(YearMonth::from_date(self.today));
        self.cursor_day = self.today.day();
        self.render_needed = true;
    }

    fn move_cursor(&mut self, delta: i32) {
        let days = self.tracker.month().days();
        self.cursor_day = ui_helpers::shift_day(self.cursor_day, delta, days);
        self.render_needed = true;
    }

    fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
        self.render_needed = true;
    }

    fn refresh_clock(&mut self, now: NaiveDate) {
        if now != self.today {
            info!("Date changed to {}", now);
            self.today = now;
            self.render_needed = true;
        }

        let ttl = Duration::from_secs(TIME_SETTINGS.warning_ttl_secs);
        if self
            .warning
            .as_ref()
            .is_some_and(|(_, shown_at)| shown_at.elapsed() >= ttl)
        {
            self.warning = None;
            self.render_needed = true;
        }
    }

    fn info_rect(&self, terminal_size: Rect) -> Rect {
        ui_helpers::centered_rect(terminal_size, 40, 7)
    }
}

pub fn run_ui(data_dir: Option<&Path>) -> Result<(), io::Error> {
    let store = HabitStore::in_dir(&storage::get_data_dir(data_dir));
    let today = Local::now().date_naive();
    let tracker = HabitTracker::open(store, today);
    let mut app = App::new(tracker, today);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let poll_rate = Duration::from_millis(TIME_SETTINGS.poll_ms);

    loop {
        app.refresh_clock(Local::now().date_naive());

        if app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
        }

        if event::poll(poll_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

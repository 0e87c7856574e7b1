use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tracker::MonthStep;

use super::App;

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.show_info {
            self.handle_info_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_info_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => true,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('?') => {
                self.toggle_info();
                false
            }
            _ => false,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_cursor(-1);
                false
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_cursor(1);
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-7);
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(7);
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_cursor_day();
                false
            }
            KeyCode::Char('[') | KeyCode::Char('<') | KeyCode::PageUp => {
                self.select_month(MonthStep::Previous);
                false
            }
            KeyCode::Char(']') | KeyCode::Char('>') | KeyCode::PageDown => {
                self.select_month(MonthStep::Next);
                false
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.jump_to_today();
                false
            }
            KeyCode::Char('i') | KeyCode::Char('?') => {
                self.toggle_info();
                false
            }
            _ => false,
        }
    }
}

use chrono::NaiveDate;
use log::{info, warn};

use crate::{
    date_math::{DayKey, YearMonth},
    domain::{HabitRecord, Status},
    month_view::{self, MonthGrid, MonthStats},
    storage::HabitStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

/// Owns the habit record for one session of the app.
///
/// The record is loaded before the tracker exists, so no toggle can run
/// against an unloaded record. Every toggle is saved right after it is
/// applied; a failed save leaves the in-memory record authoritative and
/// keeps the error as a warning for the UI.
pub struct HabitTracker {
    store: HabitStore,
    record: HabitRecord,
    month: YearMonth,
    warning: Option<String>,
}

impl HabitTracker {
    pub fn open(store: HabitStore, today: NaiveDate) -> Self {
        let record = store.load();
        if record.is_empty() {
            info!("Starting with an empty record at {}", store.path().display());
        } else {
            info!(
                "Loaded {} marked days from {}",
                record.len(),
                store.path().display()
            );
        }

        HabitTracker {
            store,
            record,
            month: YearMonth::from_date(today),
            warning: None,
        }
    }

    pub fn record(&self) -> &HabitRecord {
        &self.record
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn label(&self) -> String {
        self.month.label()
    }

    pub fn select_month(&mut self, step: MonthStep) -> YearMonth {
        let (year, month) = (self.month.year(), self.month.month());
        let (year, month) = match step {
            MonthStep::Previous => month_view::previous_month(year, month),
            MonthStep::Next => month_view::next_month(year, month),
        };
        self.month = YearMonth::new(year, month as i32);
        self.month
    }

    pub fn jump_to(&mut self, month: YearMonth) {
        self.month = month;
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        month_view::build_grid(
            &self.record,
            self.month.year(),
            self.month.month(),
            today,
        )
    }

    pub fn stats(&self) -> MonthStats {
        month_view::compute_stats(&self.record, self.month.year(), self.month.month())
    }

    /// Toggles `day` of the selected month. Returns `None` when the month
    /// has no such day.
    pub fn toggle_day(&mut self, day: u32) -> Option<Status> {
        let key = self.month.key(day)?;
        Some(self.toggle_key(key))
    }

    pub fn toggle_key(&mut self, key: DayKey) -> Status {
        self.record = self.record.toggled(key);
        let status = self.record.status(&key);
        info!("{} -> {}", key, status.token());
        self.persist();
        status
    }

    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    fn persist(&mut self) {
        match self.store.save(&self.record) {
            Ok(()) => self.warning = None,
            Err(e) => {
                warn!("Could not save {}: {}", self.store.path().display(), e);
                self.warning = Some(format!("Not saved: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use super::*;

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = PathBuf::from(format!("/tmp/{}_{}", prefix, now));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn feb_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    #[test]
    fn test_toggle_is_written_through() {
        let dir = unique_dir("habits_tracker_write");
        let store = HabitStore::in_dir(&dir);

        let mut tracker = HabitTracker::open(store.clone(), feb_15());
        assert_eq!(tracker.toggle_day(10), Some(Status::Done));
        assert_eq!(tracker.toggle_day(11), Some(Status::Done));
        assert_eq!(tracker.toggle_day(11), Some(Status::Missed));
        assert!(tracker.take_warning().is_none());

        let reopened = HabitTracker::open(store, feb_15());
        assert_eq!(reopened.record(), tracker.record());
        assert_eq!(
            reopened.stats(),
            MonthStats {
                done_count: 1,
                missed_count: 1
            }
        );

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_failed_save_keeps_state_and_warns() {
        let dir = unique_dir("habits_tracker_fail");
        let blocker = dir.join("blocker");
        fs::write(&blocker, "file").unwrap();

        let mut tracker = HabitTracker::open(HabitStore::in_dir(&blocker), feb_15());
        assert_eq!(tracker.toggle_day(3), Some(Status::Done));
        assert_eq!(tracker.stats().done_count, 1);

        assert!(tracker.take_warning().is_some());
        assert!(tracker.take_warning().is_none());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_toggle_day_outside_month_is_ignored() {
        let dir = unique_dir("habits_tracker_range");
        let mut tracker = HabitTracker::open(HabitStore::in_dir(&dir), feb_15());

        assert_eq!(tracker.toggle_day(30), None);
        assert_eq!(tracker.toggle_day(0), None);
        assert!(tracker.record().is_empty());
        assert!(!HabitStore::in_dir(&dir).path().exists());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_month_selection_rolls_over() {
        let dir = unique_dir("habits_tracker_nav");
        let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut tracker = HabitTracker::open(HabitStore::in_dir(&dir), jan_31);

        assert_eq!(tracker.label(), "January 2024");
        assert_eq!(tracker.select_month(MonthStep::Next), YearMonth::new(2024, 1));
        tracker.jump_to(YearMonth::new(2024, 0));
        assert_eq!(
            tracker.select_month(MonthStep::Previous),
            YearMonth::new(2023, 11)
        );

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_grid_reflects_toggles() {
        let dir = unique_dir("habits_tracker_grid");
        let mut tracker = HabitTracker::open(HabitStore::in_dir(&dir), feb_15());
        tracker.toggle_day(15);

        let grid = tracker.grid(feb_15());
        let today = grid.day(15).unwrap();
        assert!(today.is_today);
        assert_eq!(today.status, Status::Done);

        fs::remove_dir_all(dir).ok();
    }
}

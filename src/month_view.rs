use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    date_math::{DayKey, YearMonth},
    domain::{HabitRecord, Status},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Pad,
    Day(DayCell),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub key: DayKey,
    pub status: Status,
    pub is_today: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub cells: Vec<Cell>,
}

impl MonthGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(7)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.day_cells().find(|cell| cell.day == day)
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Day(day) => Some(day),
            Cell::Pad => None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonthStats {
    pub done_count: usize,
    pub missed_count: usize,
}

impl MonthStats {
    pub fn unmarked(&self, days_in_month: u32) -> usize {
        (days_in_month as usize).saturating_sub(self.done_count + self.missed_count)
    }
}

/// Leading pad cells up to the weekday of the 1st, then one cell per day.
pub fn build_grid(record: &HabitRecord, year: i32, month: u32, today: NaiveDate) -> MonthGrid {
    let month = YearMonth::new(year, month as i32);
    let pads = (0..month.first_weekday_offset()).map(|_| Cell::Pad);
    let days = (1..=month.days()).filter_map(|day| {
        let key = month.key(day)?;
        Some(Cell::Day(DayCell {
            day,
            key,
            status: record.status(&key),
            is_today: key.date() == today,
        }))
    });

    MonthGrid {
        month,
        cells: pads.chain(days).collect(),
    }
}

pub fn compute_stats(record: &HabitRecord, year: i32, month: u32) -> MonthStats {
    let counts = record
        .in_month(YearMonth::new(year, month as i32))
        .map(|(_, status)| status)
        .counts();

    MonthStats {
        done_count: counts.get(&Status::Done).copied().unwrap_or(0),
        missed_count: counts.get(&Status::Missed).copied().unwrap_or(0),
    }
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    let previous = YearMonth::new(year, month as i32).previous();
    (previous.year(), previous.month())
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    let next = YearMonth::new(year, month as i32).next();
    (next.year(), next.month())
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::date_math::{DayKey, YearMonth};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    None,
    Done,
    Missed,
}

impl Status {
    /// None -> Done -> Missed -> None.
    pub fn next(self) -> Status {
        match self {
            Status::None => Status::Done,
            Status::Done => Status::Missed,
            Status::Missed => Status::None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Status::None => "none",
            Status::Done => "done",
            Status::Missed => "missed",
        }
    }

    pub fn from_token(token: &str) -> Option<Status> {
        match token {
            "none" => Some(Status::None),
            "done" => Some(Status::Done),
            "missed" => Some(Status::Missed),
            _ => None,
        }
    }

    pub fn is_marked(self) -> bool {
        self != Status::None
    }
}

/// Per-day habit outcomes. Only marked days are stored; a missing key reads
/// as [`Status::None`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HabitRecord {
    days: BTreeMap<DayKey, Status>,
}

impl HabitRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, key: &DayKey) -> Status {
        self.days.get(key).copied().unwrap_or_default()
    }

    /// Returns a copy of the record with `key` advanced one step along the
    /// status cycle. `self` is left untouched.
    pub fn toggled(&self, key: DayKey) -> HabitRecord {
        let mut next = self.clone();
        next.toggle(key);
        next
    }

    pub fn toggle(&mut self, key: DayKey) -> Status {
        let status = self.status(&key).next();
        if status.is_marked() {
            self.days.insert(key, status);
        } else {
            self.days.remove(&key);
        }
        status
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, Status)> {
        self.days.iter().map(|(key, status)| (key, *status))
    }

    pub fn in_month(&self, month: YearMonth) -> impl Iterator<Item = (&DayKey, Status)> {
        self.iter().filter(move |(key, _)| month.contains(key))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(DayKey, Status)> for HabitRecord {
    fn from_iter<I: IntoIterator<Item = (DayKey, Status)>>(iter: I) -> Self {
        HabitRecord {
            days: iter
                .into_iter()
                .filter(|(_, status)| status.is_marked())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> DayKey {
        raw.parse().unwrap()
    }

    #[test]
    fn test_status_cycle_closes_after_three_steps() {
        for status in [Status::None, Status::Done, Status::Missed] {
            assert_eq!(status.next().next().next(), status);
            assert_eq!(status.next(), status.next());
        }
    }

    #[test]
    fn test_status_cycle_order() {
        assert_eq!(Status::None.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Missed);
        assert_eq!(Status::Missed.next(), Status::None);
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let record = HabitRecord::new();
        assert_eq!(record.status(&key("2024-02-10")), Status::None);
    }

    #[test]
    fn test_toggle_three_times_from_empty() {
        let day = key("2024-02-10");
        let first = HabitRecord::new().toggled(day);
        let second = first.toggled(day);
        let third = second.toggled(day);

        assert_eq!(first.status(&day), Status::Done);
        assert_eq!(second.status(&day), Status::Missed);
        assert_eq!(third.status(&day), Status::None);
        assert!(third.is_empty());
    }

    #[test]
    fn test_toggled_leaves_other_entries_and_source_untouched() {
        let record: HabitRecord = [
            (key("2024-02-10"), Status::Done),
            (key("2024-02-11"), Status::Missed),
        ]
        .into_iter()
        .collect();

        let next = record.toggled(key("2024-02-10"));

        assert_eq!(next.status(&key("2024-02-10")), Status::Missed);
        assert_eq!(next.status(&key("2024-02-11")), Status::Missed);
        assert_eq!(record.status(&key("2024-02-10")), Status::Done);
    }

    #[test]
    fn test_collect_drops_unmarked_entries() {
        let record: HabitRecord = [
            (key("2024-02-10"), Status::None),
            (key("2024-02-11"), Status::Done),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.len(), 1);
        assert_eq!(record.status(&key("2024-02-10")), Status::None);
    }

    #[test]
    fn test_status_tokens() {
        for status in [Status::None, Status::Done, Status::Missed] {
            assert_eq!(Status::from_token(status.token()), Some(status));
        }
        assert_eq!(Status::from_token("skipped"), None);
    }
}

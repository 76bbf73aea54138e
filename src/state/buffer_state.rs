//! BufferState - Ordered Day Entry Buffer
//!
//! Single owner of the materialized agenda rows. Entries are kept in
//! ascending day order; new runs are spliced at either end and the far end
//! is trimmed after each load so the buffer stays a few windows wide.
//!
//! Lookups are linear scans. The buffer is bounded to roughly four times the
//! configured buffer size, so a scan stays cheap.

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::DayEntry;

/// Structural change applied to the buffer, reported to the rendering engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferDiff {
    /// Entries inserted before the first entry
    Prepended { count: usize },
    /// Entries inserted after the last entry
    Appended { count: usize },
    /// Entries removed from the front
    TrimmedFront { count: usize },
    /// Entries removed from the back
    TrimmedBack { count: usize },
    /// Every entry removed
    Cleared,
}

/// Read-only view of the buffer handed to the rendering engine
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSnapshot(Arc<[DayEntry]>);

impl BufferSnapshot {
    /// Index of the first entry on `day`
    pub fn index_of_day(&self, day: NaiveDate) -> Option<usize> {
        self.0.iter().position(|e| e.day == day)
    }
}

impl Deref for BufferSnapshot {
    type Target = [DayEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Ordered, day-ascending buffer of agenda rows
#[derive(Debug, Clone, Default)]
pub struct BufferState {
    entries: VecDeque<DayEntry>,
}

impl BufferState {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Getters ====================

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get entry by index (0 = earliest)
    pub fn get(&self, index: usize) -> Option<&DayEntry> {
        self.entries.get(index)
    }

    /// Get an iterator over the entries (earliest to latest)
    pub fn iter(&self) -> impl Iterator<Item = &DayEntry> {
        self.entries.iter()
    }

    /// Day of the first entry
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.entries.front().map(|e| e.day)
    }

    /// Day of the last entry
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.entries.back().map(|e| e.day)
    }

    /// Index of the first entry on `day`
    pub fn index_of_day(&self, day: NaiveDate) -> Option<usize> {
        self.entries.iter().position(|e| e.day == day)
    }

    /// Index of the first entry on or after `day`
    pub fn insertion_index(&self, day: NaiveDate) -> usize {
        self.entries.partition_point(|e| e.day < day)
    }

    /// Take a read-only snapshot of the current entries
    pub fn snapshot(&self) -> BufferSnapshot {
        let entries: Vec<DayEntry> = self.entries.iter().cloned().collect();
        BufferSnapshot(entries.into())
    }

    // ==================== Mutations ====================

    /// Insert a run of entries before the first entry
    ///
    /// The run must be ascending and end before the current first day.
    pub fn splice_front(&mut self, run: Vec<DayEntry>) -> BufferDiff {
        let count = run.len();
        for entry in run.into_iter().rev() {
            self.entries.push_front(entry);
        }
        tracing::debug!(count, len = self.entries.len(), "Spliced entries at front");
        BufferDiff::Prepended { count }
    }

    /// Insert a run of entries after the last entry
    ///
    /// The run must be ascending and start after the current last day.
    pub fn splice_back(&mut self, run: Vec<DayEntry>) -> BufferDiff {
        let count = run.len();
        self.entries.extend(run);
        tracing::debug!(count, len = self.entries.len(), "Spliced entries at back");
        BufferDiff::Appended { count }
    }

    /// Remove up to `count` entries from the front
    pub fn trim_front(&mut self, count: usize) -> BufferDiff {
        let count = count.min(self.entries.len());
        self.entries.drain(..count);
        tracing::debug!(count, len = self.entries.len(), "Trimmed entries at front");
        BufferDiff::TrimmedFront { count }
    }

    /// Remove up to `count` entries from the back
    pub fn trim_back(&mut self, count: usize) -> BufferDiff {
        let count = count.min(self.entries.len());
        self.entries.truncate(self.entries.len() - count);
        tracing::debug!(count, len = self.entries.len(), "Trimmed entries at back");
        BufferDiff::TrimmedBack { count }
    }

    /// Remove every entry
    pub fn clear(&mut self) -> BufferDiff {
        self.entries.clear();
        BufferDiff::Cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn empty_days(start: NaiveDate, count: i64) -> Vec<DayEntry> {
        (0..count)
            .map(|i| DayEntry::empty_day(start + chrono::Duration::days(i)))
            .collect()
    }

    fn is_sorted(buffer: &BufferState) -> bool {
        let days: Vec<NaiveDate> = buffer.iter().map(|e| e.day).collect();
        days.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_splice_both_ends_keeps_order() {
        let mut buffer = BufferState::new();
        buffer.splice_back(empty_days(date(2024, 1, 10), 5));
        let diff = buffer.splice_front(empty_days(date(2024, 1, 5), 5));
        assert_eq!(diff, BufferDiff::Prepended { count: 5 });
        buffer.splice_back(empty_days(date(2024, 1, 15), 3));

        assert_eq!(buffer.len(), 13);
        assert_eq!(buffer.first_day(), Some(date(2024, 1, 5)));
        assert_eq!(buffer.last_day(), Some(date(2024, 1, 17)));
        assert!(is_sorted(&buffer));
    }

    #[test]
    fn test_index_of_day_returns_first_row() {
        let mut buffer = BufferState::new();
        buffer.splice_back(empty_days(date(2024, 1, 1), 2));
        buffer.splice_back(DayEntry::rows_for_day(
            date(2024, 1, 3),
            vec![json!(1), json!(2)],
        ));
        buffer.splice_back(empty_days(date(2024, 1, 4), 1));

        assert_eq!(buffer.index_of_day(date(2024, 1, 3)), Some(2));
        assert_eq!(buffer.index_of_day(date(2024, 1, 4)), Some(4));
        assert_eq!(buffer.index_of_day(date(2024, 2, 1)), None);
        assert_eq!(buffer.snapshot().index_of_day(date(2024, 1, 3)), Some(2));
    }

    #[test]
    fn test_trim_is_bounded_by_len() {
        let mut buffer = BufferState::new();
        buffer.splice_back(empty_days(date(2024, 1, 1), 10));

        assert_eq!(buffer.trim_front(3), BufferDiff::TrimmedFront { count: 3 });
        assert_eq!(buffer.first_day(), Some(date(2024, 1, 4)));
        assert_eq!(buffer.trim_back(2), BufferDiff::TrimmedBack { count: 2 });
        assert_eq!(buffer.last_day(), Some(date(2024, 1, 8)));
        assert_eq!(buffer.trim_back(100), BufferDiff::TrimmedBack { count: 5 });
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_insertion_index() {
        let mut buffer = BufferState::new();
        buffer.splice_back(empty_days(date(2024, 1, 1), 3));
        buffer.splice_back(empty_days(date(2024, 1, 6), 3));

        assert_eq!(buffer.insertion_index(date(2023, 12, 1)), 0);
        assert_eq!(buffer.insertion_index(date(2024, 1, 4)), 3);
        assert_eq!(buffer.insertion_index(date(2024, 2, 1)), 6);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut buffer = BufferState::new();
        buffer.splice_back(empty_days(date(2024, 1, 1), 3));
        let snapshot = buffer.snapshot();
        assert_eq!(buffer.clear(), BufferDiff::Cleared);
        assert_eq!(snapshot.len(), 3);
        assert!(buffer.is_empty());
    }
}

//! DayEntry - One Displayable Agenda Row
//!
//! A fetched day turns into one or more rows: one row per reservation, or a
//! single placeholder row when the day is confirmed empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DATE_KEY_FORMAT;
use crate::error::{Error, Result};

/// Format a day as its canonical `yyyy-MM-dd` key
pub fn day_key(day: NaiveDate) -> String {
    day.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a canonical `yyyy-MM-dd` key
///
/// Keys that parse but are not in canonical form (e.g. `2024-1-5`) are
/// rejected so that key order always matches day order.
pub fn parse_day_key(key: &str) -> Result<NaiveDate> {
    let day = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).map_err(|_| Error::InvalidDateKey {
        key: key.to_string(),
    })?;

    if day_key(day) != key {
        return Err(Error::InvalidDateKey {
            key: key.to_string(),
        });
    }

    Ok(day)
}

/// Move a day by a signed number of days, saturating at the calendar limits
pub fn shift_days(day: NaiveDate, days: i64) -> NaiveDate {
    let shifted = chrono::Duration::try_days(days).and_then(|delta| day.checked_add_signed(delta));
    match shifted {
        Some(shifted) => shifted,
        None if days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// How a row should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// First reservation of a day, carries the date label
    DayHeader,
    /// Further reservation on the same day
    Continuation,
    /// Placeholder for a day confirmed to have no reservations
    EmptyDay,
}

/// A single row in the agenda buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Calendar day of the row
    pub day: NaiveDate,
    /// Canonical day key, shared by every row of the same day
    pub id: String,
    /// True only for the first row of a day
    pub is_date_header: bool,
    /// Caller-owned reservation data, absent for an empty day
    pub reservation: Option<Value>,
}

impl DayEntry {
    /// Placeholder row for a day without reservations
    pub fn empty_day(day: NaiveDate) -> Self {
        Self {
            day,
            id: day_key(day),
            is_date_header: true,
            reservation: None,
        }
    }

    /// Row carrying a reservation payload
    pub fn reservation(day: NaiveDate, reservation: Value, is_date_header: bool) -> Self {
        Self {
            day,
            id: day_key(day),
            is_date_header,
            reservation: Some(reservation),
        }
    }

    /// Expand a confirmed day into its rows
    pub fn rows_for_day(day: NaiveDate, reservations: Vec<Value>) -> Vec<DayEntry> {
        if reservations.is_empty() {
            return vec![Self::empty_day(day)];
        }

        reservations
            .into_iter()
            .enumerate()
            .map(|(i, reservation)| Self::reservation(day, reservation, i == 0))
            .collect()
    }

    /// Row presentation kind
    pub fn kind(&self) -> RowKind {
        match (&self.reservation, self.is_date_header) {
            (None, _) => RowKind::EmptyDay,
            (Some(_), true) => RowKind::DayHeader,
            (Some(_), false) => RowKind::Continuation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_day_key_is_zero_padded() {
        assert_eq!(day_key(date(2024, 1, 5)), "2024-01-05");
    }

    #[test]
    fn test_parse_day_key_rejects_non_canonical() {
        assert_eq!(parse_day_key("2024-01-05").expect("parse"), date(2024, 1, 5));
        assert!(matches!(
            parse_day_key("2024-1-5"),
            Err(Error::InvalidDateKey { .. })
        ));
        assert!(matches!(
            parse_day_key("not-a-date"),
            Err(Error::InvalidDateKey { .. })
        ));
    }

    #[test]
    fn test_shift_days_crosses_year_boundary() {
        assert_eq!(shift_days(date(2024, 1, 15), -30), date(2023, 12, 16));
        assert_eq!(shift_days(date(2023, 12, 17), 60), date(2024, 2, 15));
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_empty_day_produces_single_placeholder() {
        let rows = DayEntry::rows_for_day(date(2024, 3, 1), Vec::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind(), RowKind::EmptyDay);
        assert!(rows[0].is_date_header);
        assert_eq!(rows[0].id, "2024-03-01");
    }

    #[test]
    fn test_only_first_reservation_is_header() {
        let rows = DayEntry::rows_for_day(
            date(2024, 3, 1),
            vec![json!({"name": "a"}), json!({"name": "b"}), json!({"name": "c"})],
        );
        let kinds: Vec<RowKind> = rows.iter().map(DayEntry::kind).collect();
        assert_eq!(
            kinds,
            vec![RowKind::DayHeader, RowKind::Continuation, RowKind::Continuation]
        );
        assert!(rows.iter().all(|r| r.id == "2024-03-01"));
    }
}

//! RawDayMap - Fetch Result Shape
//!
//! Mapping from a `yyyy-MM-dd` key to the reservations of that day. An empty
//! sequence confirms an empty day; a `null` value is a contract violation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::day_entry::{DayEntry, day_key, parse_day_key};
use crate::error::{Error, Result};

/// Raw result of a day range fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDayMap(BTreeMap<String, Option<Vec<Value>>>);

impl RawDayMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmed day with its reservations
    pub fn insert_day(&mut self, day: NaiveDate, reservations: Vec<Value>) {
        self.0.insert(day_key(day), Some(reservations));
    }

    /// Record a raw key/value pair exactly as a collaborator produced it
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Option<Vec<Value>>) {
        self.0.insert(key.into(), value);
    }

    /// Number of days in the map
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into ascending day entries
    ///
    /// The whole batch is rejected if any key is not a canonical date or any
    /// value is absent, so a bad batch never reaches the buffer.
    pub fn into_entries(self) -> Result<Vec<DayEntry>> {
        let mut days = Vec::with_capacity(self.0.len());
        for (key, value) in self.0 {
            let day = parse_day_key(&key)?;
            let Some(reservations) = value else {
                return Err(Error::MalformedBatch { key });
            };
            days.push((day, reservations));
        }

        Ok(days
            .into_iter()
            .flat_map(|(day, reservations)| DayEntry::rows_for_day(day, reservations))
            .collect())
    }
}

impl FromIterator<(NaiveDate, Vec<Value>)> for RawDayMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Vec<Value>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (day, reservations) in iter {
            map.insert_day(day, reservations);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_are_ordered_by_day() {
        let raw: RawDayMap = serde_json::from_value(json!({
            "2024-01-03": [],
            "2024-01-01": [{"title": "standup"}, {"title": "review"}],
            "2024-01-02": [],
        }))
        .expect("deserialize");

        let entries = raw.into_entries().expect("valid batch");
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["2024-01-01", "2024-01-01", "2024-01-02", "2024-01-03"]
        );
        assert!(entries[0].is_date_header);
        assert!(!entries[1].is_date_header);
    }

    #[test]
    fn test_null_value_rejects_batch() {
        let raw: RawDayMap = serde_json::from_value(json!({
            "2024-01-01": [],
            "2024-01-02": null,
        }))
        .expect("deserialize");

        match raw.into_entries() {
            Err(Error::MalformedBatch { key }) => assert_eq!(key, "2024-01-02"),
            other => panic!("expected malformed batch, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_key_rejects_batch() {
        let mut raw = RawDayMap::new();
        raw.insert_raw("2024-01-01", Some(Vec::new()));
        raw.insert_raw("tomorrow", Some(Vec::new()));
        assert!(matches!(
            raw.into_entries(),
            Err(Error::InvalidDateKey { .. })
        ));
    }
}

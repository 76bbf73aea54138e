//! In-Memory Fetcher
//!
//! Reference fetch collaborator backed by a day -> reservations map. Every
//! day in the requested range is confirmed, so the buffer never has gaps.
//!
//! Range rule:
//! - `PAST`:   `[anchor - window, anchor - 1]`
//! - `FUTURE`: `[anchor + 1, anchor + window]`

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::domain::{LoadDirection, RawDayMap};
use crate::error::Result;
use crate::services::fetcher::{DayFetcher, FetchRequest};

/// Fetcher serving reservations from memory
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    reservations: BTreeMap<NaiveDate, Vec<Value>>,
    latency: Option<Duration>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl InMemoryFetcher {
    /// Create a fetcher with no reservations
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reservation on `day`
    pub fn with_reservation(mut self, day: NaiveDate, reservation: Value) -> Self {
        self.insert(day, reservation);
        self
    }

    /// Simulate network latency (requires a tokio runtime)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add a reservation on `day`
    pub fn insert(&mut self, day: NaiveDate, reservation: Value) {
        self.reservations.entry(day).or_default().push(reservation);
    }

    /// Number of reservations stored
    pub fn reservation_count(&self) -> usize {
        self.reservations.values().map(Vec::len).sum()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Build the result for a request
    pub fn day_range(&self, request: &FetchRequest) -> Result<RawDayMap> {
        let anchor = request.anchor_day()?;
        let window = i64::from(request.window_size);
        let (first, last) = match request.direction {
            LoadDirection::Past => (-window, -1),
            LoadDirection::Future => (1, window),
        };

        Ok((first..=last)
            .filter_map(|offset| anchor.checked_add_signed(chrono::Duration::days(offset)))
            .map(|day| {
                let reservations = self.reservations.get(&day).cloned().unwrap_or_default();
                (day, reservations)
            })
            .collect())
    }
}

impl DayFetcher for InMemoryFetcher {
    fn fetch_day_range(&self, request: FetchRequest) -> BoxFuture<'static, Result<RawDayMap>> {
        tracing::debug!(
            anchor = %request.anchor,
            window = request.window_size,
            direction = %request.direction,
            "Serving day range from memory"
        );
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let result = self.day_range(&request);
        match self.latency {
            Some(latency) => async move {
                tokio::time::sleep(latency).await;
                result
            }
            .boxed(),
            None => futures::future::ready(result).boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::day_key;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn keys(map: RawDayMap) -> Vec<String> {
        map.into_entries()
            .expect("valid batch")
            .into_iter()
            .map(|e| e.id)
            .collect()
    }

    #[test]
    fn test_future_range_starts_after_anchor() {
        let fetcher = InMemoryFetcher::new();
        let request = FetchRequest::new(date(2024, 1, 31), 3, LoadDirection::Future);
        let map = fetcher.day_range(&request).expect("range");
        assert_eq!(keys(map), vec!["2024-02-01", "2024-02-02", "2024-02-03"]);
    }

    #[test]
    fn test_past_range_ends_before_anchor() {
        let fetcher = InMemoryFetcher::new();
        let request = FetchRequest::new(date(2024, 1, 1), 2, LoadDirection::Past);
        let map = fetcher.day_range(&request).expect("range");
        assert_eq!(keys(map), vec!["2023-12-30", "2023-12-31"]);
    }

    #[test]
    fn test_fetch_records_request_and_serves_reservations() {
        let fetcher = InMemoryFetcher::new()
            .with_reservation(date(2024, 1, 2), json!({"title": "dentist"}))
            .with_reservation(date(2024, 1, 2), json!({"title": "gym"}));
        assert_eq!(fetcher.reservation_count(), 2);

        let request = FetchRequest::new(date(2024, 1, 1), 2, LoadDirection::Future);
        let map = futures::executor::block_on(fetcher.fetch_day_range(request.clone()))
            .expect("fetch");
        let entries = map.into_entries().expect("valid batch");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, day_key(date(2024, 1, 2)));
        assert!(entries[0].is_date_header);
        assert!(!entries[1].is_date_header);
        assert!(entries[2].reservation.is_none());
        assert_eq!(fetcher.requests(), vec![request]);
    }
}

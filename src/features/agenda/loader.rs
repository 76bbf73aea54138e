//! Load Controller
//!
//! Decides the reference day and window of each fetch, enforces a single
//! fetch in flight, splices results into the buffer and trims the far end.

use chrono::NaiveDate;

use crate::constants::{BOOTSTRAP_WINDOW_FACTOR, TRIM_DISTANCE_FACTOR};
use crate::domain::{DayEntry, LoadDirection, RawDayMap, shift_days};
use crate::error::{Error, Result};
use crate::eventing::AgendaEvent;
use crate::services::{FetchHandle, FetchOutcome, FetchRequest, PendingFetch};
use crate::state::{BufferDiff, BufferSnapshot, LoadPhase};

use super::window::AgendaWindow;

/// Follow-up run after a load has been applied
pub enum OnComplete {
    /// Scroll to the first row of a day once it is buffered
    ScrollToDay(NaiveDate),
    /// Caller-supplied hook, given a snapshot of the updated buffer
    Callback(Box<dyn FnOnce(&BufferSnapshot) + Send>),
}

impl std::fmt::Debug for OnComplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScrollToDay(day) => f.debug_tuple("ScrollToDay").field(day).finish(),
            Self::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// Bookkeeping for the fetch currently in flight
#[derive(Debug)]
pub(super) struct InFlight {
    pub(super) id: u64,
    pub(super) direction: LoadDirection,
    pub(super) reference_day: NaiveDate,
    pub(super) handle: FetchHandle,
    pub(super) on_complete: Option<OnComplete>,
}

impl AgendaWindow {
    /// Issue the bootstrap load
    ///
    /// Without a fetcher this does nothing; the warning was logged when the
    /// window was created.
    pub fn mount(&mut self) -> Option<PendingFetch> {
        if !self.has_fetcher() {
            return None;
        }
        self.load_more(LoadDirection::Future, None)
    }

    /// Request more days in `direction`
    ///
    /// Returns `None` without touching any state if a fetch is already in
    /// flight, if no fetcher is assigned, or for a `PAST` load on an empty
    /// buffer. Otherwise the returned fetch must be awaited and its outcome
    /// passed to [`AgendaWindow::complete_fetch`].
    pub fn load_more(
        &mut self,
        direction: LoadDirection,
        on_complete: Option<OnComplete>,
    ) -> Option<PendingFetch> {
        let fetcher = self.fetcher.clone()?;

        if self.phase.is_loading() {
            tracing::debug!(
                requested = %direction,
                in_flight = ?self.phase,
                "Fetch already in flight, dropping load request"
            );
            return None;
        }

        let buffer_size = self.config.buffer_size;
        let (reference_day, window_size) = match direction {
            LoadDirection::Past => {
                let Some(first_day) = self.buffer.first_day() else {
                    tracing::warn!("PAST load requested on an empty buffer, ignoring");
                    return None;
                };
                (first_day, buffer_size)
            }
            LoadDirection::Future => match self.buffer.last_day() {
                Some(last_day) => (last_day, buffer_size),
                None => (
                    shift_days(self.selected_day, -i64::from(buffer_size)),
                    buffer_size.saturating_mul(BOOTSTRAP_WINDOW_FACTOR),
                ),
            },
        };

        let id = self.next_fetch_id;
        self.next_fetch_id += 1;

        let request = FetchRequest::new(reference_day, window_size, direction);
        tracing::info!(
            id,
            anchor = %request.anchor,
            window = window_size,
            direction = %direction,
            "Loading days"
        );

        self.phase = LoadPhase::loading(direction);
        self.emit(AgendaEvent::LoadingChanged {
            position: direction.position(),
            loading: true,
        });

        let future = fetcher.fetch_day_range(request.clone());
        let pending = PendingFetch::new(id, request, future);
        self.in_flight = Some(InFlight {
            id,
            direction,
            reference_day,
            handle: pending.handle(),
            on_complete,
        });

        Some(pending)
    }

    /// Apply the outcome of a fetch
    ///
    /// Outcomes of fetches that are no longer in flight are discarded. A
    /// failed or malformed result leaves the buffer untouched and returns
    /// the window to idle.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> Result<()> {
        let id = outcome.id;
        let Some(in_flight) = self.in_flight.take_if(|f| f.id == id) else {
            tracing::debug!(id, "Discarding stale fetch result");
            return Ok(());
        };
        let direction = in_flight.direction;

        let entries = match outcome.result.and_then(RawDayMap::into_entries) {
            Ok(entries) => entries,
            Err(Error::FetchCancelled) => {
                tracing::info!(id, direction = %direction, "Fetch cancelled");
                self.finish_loading(direction);
                return Err(Error::FetchCancelled);
            }
            Err(e) => {
                tracing::error!(id, direction = %direction, "Rejected fetch result: {}", e);
                self.finish_loading(direction);
                self.emit(AgendaEvent::FetchFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        self.apply_entries(direction, in_flight.reference_day, entries);
        self.finish_loading(direction);

        if !self.initialized {
            self.initialized = true;
            self.emit(AgendaEvent::Initialized);
        }

        match in_flight.on_complete {
            Some(OnComplete::ScrollToDay(day)) => match self.buffer.index_of_day(day) {
                Some(index) => self.scroll_to_index(index),
                None => tracing::warn!(day = %day, "Reloaded buffer does not contain target day"),
            },
            Some(OnComplete::Callback(callback)) => callback(&self.buffer.snapshot()),
            None => {}
        }

        Ok(())
    }

    /// Abort the fetch in flight, if any
    pub fn cancel_fetch(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };
        in_flight.handle.cancel();
        self.finish_loading(in_flight.direction);
        tracing::info!(id = in_flight.id, direction = %in_flight.direction, "Cancelled fetch");
        true
    }

    fn finish_loading(&mut self, direction: LoadDirection) {
        self.phase = LoadPhase::Idle;
        self.emit(AgendaEvent::LoadingChanged {
            position: direction.position(),
            loading: false,
        });
    }

    /// Splice a fetched run and trim the far end of an existing buffer
    fn apply_entries(
        &mut self,
        direction: LoadDirection,
        reference_day: NaiveDate,
        entries: Vec<DayEntry>,
    ) {
        let had_entries = !self.buffer.is_empty();
        let count = entries.len();

        let diff = match direction {
            LoadDirection::Past => self.buffer.splice_front(entries),
            LoadDirection::Future => self.buffer.splice_back(entries),
        };
        self.emit(AgendaEvent::BufferChanged(diff));

        if had_entries {
            if let Some(diff) = self.trim_far_end(direction, reference_day) {
                self.emit(AgendaEvent::BufferChanged(diff));
            }
        }

        tracing::info!(
            count,
            direction = %direction,
            len = self.buffer.len(),
            first_day = ?self.buffer.first_day(),
            last_day = ?self.buffer.last_day(),
            "Applied loaded days"
        );
    }

    /// Drop rows more than two windows away from the reference day, on the
    /// side opposite to the load
    fn trim_far_end(&mut self, direction: LoadDirection, reference_day: NaiveDate) -> Option<BufferDiff> {
        let distance = TRIM_DISTANCE_FACTOR * i64::from(self.config.buffer_size);

        match direction {
            LoadDirection::Past => {
                let boundary = shift_days(reference_day, distance);
                let index = self.buffer.index_of_day(boundary)?;
                let count = self.buffer.len() - index;
                (count > 0).then(|| self.buffer.trim_back(count))
            }
            LoadDirection::Future => {
                let boundary = shift_days(reference_day, -distance);
                let index = self.buffer.index_of_day(boundary)?;
                (index > 0).then(|| self.buffer.trim_front(index))
            }
        }
    }
}

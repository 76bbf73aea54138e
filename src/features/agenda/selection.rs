//! Selection Synchronizer
//!
//! Keeps the selected day, the scroll position and the buffer consistent.
//! Two triggers drive it: an external selection change and a visible-range
//! report from the rendering engine.

use chrono::NaiveDate;

use crate::domain::LoadDirection;
use crate::eventing::AgendaEvent;
use crate::services::PendingFetch;

use super::loader::OnComplete;
use super::window::AgendaWindow;

impl AgendaWindow {
    /// Select a day from outside, scrolling to it
    ///
    /// Returns the fetch issued to bring the day (or its neighbourhood) into
    /// the buffer, if any.
    pub fn set_selected_day(&mut self, day: NaiveDate) -> Option<PendingFetch> {
        self.select_day(day, true)
    }

    fn select_day(&mut self, day: NaiveDate, scroll: bool) -> Option<PendingFetch> {
        if day == self.selected_day {
            return None;
        }

        tracing::debug!(from = %self.selected_day, to = %day, scroll, "Selecting day");
        self.selected_day = day;

        if let Some(index) = self.buffer.index_of_day(day) {
            if scroll {
                self.scroll_to_index(index);
            }
            return self.prefetch_near_edge(index);
        }

        let buffer_size = i64::from(self.config.buffer_size);
        let (Some(first_day), Some(last_day)) = (self.buffer.first_day(), self.buffer.last_day()) else {
            return self.wipe_and_reload(day);
        };

        if day < first_day {
            if (first_day - day).num_days() >= buffer_size {
                return self.wipe_and_reload(day);
            }
            self.scroll_to_index(0);
            return self
                .load_more(LoadDirection::Past, None)
                .or_else(|| self.prefetch_near_edge(0));
        }

        if day > last_day {
            if (day - last_day).num_days() >= buffer_size {
                return self.wipe_and_reload(day);
            }
            self.scroll_to_end();
            let last_index = self.buffer.len().saturating_sub(1);
            return self
                .load_more(LoadDirection::Future, None)
                .or_else(|| self.prefetch_near_edge(last_index));
        }

        // Inside the buffered range but not materialized; land on its neighbour
        let index = self.buffer.insertion_index(day);
        if scroll {
            self.scroll_to_index(index);
        }
        self.prefetch_near_edge(index)
    }

    /// Drop the buffer and bootstrap around `day`
    fn wipe_and_reload(&mut self, day: NaiveDate) -> Option<PendingFetch> {
        tracing::info!(day = %day, "Selected day is far from the buffer, reloading");
        self.cancel_fetch();
        let diff = self.buffer.clear();
        self.emit(AgendaEvent::BufferChanged(diff));
        self.load_more(LoadDirection::Future, Some(OnComplete::ScrollToDay(day)))
    }

    /// Read ahead or behind when `index` is close to a buffer edge
    fn prefetch_near_edge(&mut self, index: usize) -> Option<PendingFetch> {
        if self.phase.is_loading() {
            return None;
        }

        let threshold = self.config.data_load_threshold;
        if index < threshold {
            self.load_more(LoadDirection::Past, None)
        } else if index + threshold > self.buffer.len() {
            self.load_more(LoadDirection::Future, None)
        } else {
            None
        }
    }

    /// Handle a visible-range report from the rendering engine
    ///
    /// Reports are ignored while tracking is paused and while an echo of our
    /// own programmatic scroll may still be arriving.
    pub fn on_visible_range_changed(&mut self, first_visible_index: usize) -> Option<PendingFetch> {
        let day = self.buffer.get(first_visible_index)?.day;
        if day == self.selected_day {
            return None;
        }

        if !self.scroll.accepts_report(self.time.now()) {
            tracing::trace!(index = first_visible_index, "Ignoring scroll echo");
            return None;
        }

        let pending = self.select_day(day, false);
        self.emit(AgendaEvent::DayChanged { day });
        pending
    }

    /// A genuine touch or drag on the list
    pub fn on_user_touch(&mut self) {
        self.scroll.on_user_gesture();
    }

    /// Stop following visible-range reports until the next user touch
    pub fn pause_scroll_tracking(&mut self) {
        self.scroll.pause_tracking();
    }
}

//! Agenda Window
//!
//! Owns the buffer, the single-flight load state and the selection state.
//! Loading lives in `loader.rs`, selection syncing in `selection.rs`; both
//! are `impl` blocks on [`AgendaWindow`].
//!
//! The window is single-threaded: every mutation happens in one of its
//! `&mut self` methods, and fetch results come back through
//! [`AgendaWindow::complete_fetch`].

use std::time::Duration;

use chrono::NaiveDate;
use crossbeam_channel::{Receiver, Sender};

use crate::domain::{AgendaConfig, DayEntry, LoadingPosition};
use crate::error::{Error, Result};
use crate::eventing::{AgendaEvent, ScrollOptions};
use crate::services::{FetchHandle, SharedFetcher, SharedTimeSource, SystemTimeSource};
use crate::state::{BufferSnapshot, BufferState, LoadPhase, ScrollState};

use super::loader::InFlight;

/// Windowed agenda list controller
pub struct AgendaWindow {
    pub(super) config: AgendaConfig,
    pub(super) buffer: BufferState,
    pub(super) phase: LoadPhase,
    pub(super) in_flight: Option<InFlight>,
    pub(super) next_fetch_id: u64,
    pub(super) selected_day: NaiveDate,
    pub(super) scroll: ScrollState,
    pub(super) initialized: bool,
    pub(super) fetcher: Option<SharedFetcher>,
    pub(super) time: SharedTimeSource,
    tx: Sender<AgendaEvent>,
    rx: Receiver<AgendaEvent>,
}

impl AgendaWindow {
    /// Create a new agenda window
    ///
    /// A missing fetcher is reported once here; the window then never loads.
    pub fn new(
        config: AgendaConfig,
        fetcher: Option<SharedFetcher>,
        time: SharedTimeSource,
    ) -> Result<Self> {
        config.validate()?;

        if fetcher.is_none() {
            tracing::warn!("{}", Error::MissingFetcher);
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        let selected_day = config.selected_day.unwrap_or_else(|| time.today());
        let scroll = ScrollState::new(Duration::from_millis(config.scroll_echo_window_ms));

        tracing::info!(
            selected_day = %selected_day,
            buffer_size = config.buffer_size,
            threshold = config.data_load_threshold,
            "Agenda window created"
        );

        Ok(Self {
            config,
            buffer: BufferState::new(),
            phase: LoadPhase::Idle,
            in_flight: None,
            next_fetch_id: 1,
            selected_day,
            scroll,
            initialized: false,
            fetcher,
            time,
            tx,
            rx,
        })
    }

    /// Create a window on the system clock
    pub fn with_fetcher(config: AgendaConfig, fetcher: SharedFetcher) -> Result<Self> {
        Self::new(config, Some(fetcher), SystemTimeSource::shared())
    }

    // ==================== Getters ====================

    /// Get the event receiver for collaborators
    pub fn events(&self) -> Receiver<AgendaEvent> {
        self.rx.clone()
    }

    /// Get the configuration
    pub fn config(&self) -> &AgendaConfig {
        &self.config
    }

    /// Currently selected day
    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    /// Read access to the buffer
    pub fn buffer(&self) -> &BufferState {
        &self.buffer
    }

    /// Number of rows in the buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Row at `index`
    pub fn entry(&self, index: usize) -> Option<&DayEntry> {
        self.buffer.get(index)
    }

    /// Read-only snapshot for the rendering engine
    pub fn snapshot(&self) -> BufferSnapshot {
        self.buffer.snapshot()
    }

    /// Current load phase
    pub fn load_phase(&self) -> LoadPhase {
        self.phase
    }

    /// Check if a fetch is in flight in either direction
    pub fn is_fetch_in_flight(&self) -> bool {
        self.phase.is_loading()
    }

    /// Check if the past loader row is shown
    pub fn is_loading_past(&self) -> bool {
        self.phase.is_loading_at(LoadingPosition::Top)
    }

    /// Check if the future loader row is shown
    pub fn is_loading_future(&self) -> bool {
        self.phase.is_loading_at(LoadingPosition::Bottom)
    }

    /// Check if the loader row at `position` is shown
    pub fn is_loading_at(&self, position: LoadingPosition) -> bool {
        self.phase.is_loading_at(position)
    }

    /// Cancellation handle of the in-flight fetch
    pub fn in_flight_handle(&self) -> Option<FetchHandle> {
        self.in_flight.as_ref().map(|f| f.handle.clone())
    }

    /// Check if the first load has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Check if a fetch collaborator is assigned
    pub fn has_fetcher(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Row the list should start at after the first render
    pub fn initial_scroll_index(&self) -> Option<usize> {
        self.buffer.index_of_day(self.selected_day)
    }

    /// Check if scroll tracking is enabled
    pub fn is_scroll_tracking_enabled(&self) -> bool {
        self.scroll.is_tracking_enabled()
    }

    // ==================== Output ====================

    pub(super) fn emit(&self, event: AgendaEvent) {
        let _ = self.tx.send(event);
    }

    /// Scroll to a row and arm the scroll-echo token
    pub(super) fn scroll_to_index(&mut self, index: usize) {
        self.scroll.mark_programmatic_scroll(self.time.now());
        tracing::debug!(index, "Scrolling to index");
        self.emit(AgendaEvent::ScrollToIndex {
            index,
            options: ScrollOptions {
                animated: self.config.animated_scroll,
                view_offset: self.config.scroll_view_offset,
            },
        });
    }

    /// Scroll to the last row and arm the scroll-echo token
    pub(super) fn scroll_to_end(&mut self) {
        self.scroll.mark_programmatic_scroll(self.time.now());
        tracing::debug!("Scrolling to end");
        self.emit(AgendaEvent::ScrollToEnd {
            options: ScrollOptions {
                animated: self.config.animated_scroll,
                view_offset: 0,
            },
        });
    }
}

impl std::fmt::Debug for AgendaWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgendaWindow")
            .field("selected_day", &self.selected_day)
            .field("len", &self.buffer.len())
            .field("first_day", &self.buffer.first_day())
            .field("last_day", &self.buffer.last_day())
            .field("phase", &self.phase)
            .field("initialized", &self.initialized)
            .finish()
    }
}

//! AgendaEvent - Window Output Events
//!
//! Everything the agenda window asks of its collaborators: scroll commands
//! for the rendering engine, buffer diffs, loader visibility, and day-change
//! notifications for the owner of the selected day.

use chrono::NaiveDate;

use crate::domain::LoadingPosition;
use crate::state::BufferDiff;

/// Options for a programmatic scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    /// Whether the scroll animates
    pub animated: bool,
    /// Pixel offset applied to the target row
    pub view_offset: i32,
}

/// Events emitted by the agenda window
#[derive(Debug, Clone, PartialEq)]
pub enum AgendaEvent {
    /// Scroll the list so `index` is the first visible row
    ScrollToIndex {
        index: usize,
        options: ScrollOptions,
    },

    /// Scroll the list to its last row
    ScrollToEnd { options: ScrollOptions },

    /// Scroll tracking decided the effectively-selected day changed
    DayChanged { day: NaiveDate },

    /// Loader row shown or hidden
    LoadingChanged {
        position: LoadingPosition,
        loading: bool,
    },

    /// Buffer mutated; take a fresh snapshot
    BufferChanged(BufferDiff),

    /// A fetch result was rejected or the fetch failed
    FetchFailed { message: String },

    /// First load completed; the list has data to render
    Initialized,
}

impl AgendaEvent {
    /// Check if this event is a programmatic scroll command
    pub fn is_scroll(&self) -> bool {
        matches!(self, Self::ScrollToIndex { .. } | Self::ScrollToEnd { .. })
    }
}

//! Config - Agenda Window Configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_DATA_LOAD_THRESHOLD, SCROLL_ECHO_WINDOW_MS, SCROLL_VIEW_OFFSET,
};
use crate::error::{Error, Result};

/// Agenda window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Entries from a buffer edge that trigger a prefetch
    pub data_load_threshold: usize,
    /// Days requested per fetch
    pub buffer_size: u32,
    /// Initially selected day (today when unset)
    pub selected_day: Option<NaiveDate>,
    /// How long visible-range reports are ignored after a programmatic scroll
    pub scroll_echo_window_ms: u64,
    /// View offset for programmatic scrolls to an index
    pub scroll_view_offset: i32,
    /// Whether programmatic scrolls animate
    pub animated_scroll: bool,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            data_load_threshold: DEFAULT_DATA_LOAD_THRESHOLD,
            buffer_size: DEFAULT_BUFFER_SIZE,
            selected_day: None,
            scroll_echo_window_ms: SCROLL_ECHO_WINDOW_MS,
            scroll_view_offset: SCROLL_VIEW_OFFSET,
            animated_scroll: true,
        }
    }
}

impl AgendaConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::Invalid {
                message: "buffer_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the data load threshold
    pub fn with_data_load_threshold(mut self, threshold: usize) -> Self {
        self.data_load_threshold = threshold;
        self
    }

    /// Set the buffer size
    pub fn with_buffer_size(mut self, buffer_size: u32) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set the initially selected day
    pub fn with_selected_day(mut self, day: NaiveDate) -> Self {
        self.selected_day = Some(day);
        self
    }
}

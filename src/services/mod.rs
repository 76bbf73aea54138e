//! Service Layer
//!
//! Collaborators injected into the agenda window: the day fetcher, the
//! clock, and the tokio runtime that drives fetches.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                AgendaWindow                  │
//! │  ┌─────────────┐  ┌────────────┐             │
//! │  │ DayFetcher  │  │ TimeSource │             │
//! │  │ (day data)  │  │ (debounce) │             │
//! │  └─────────────┘  └────────────┘             │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼ AgendaEvent
//! ┌──────────────────────────────────────────────┐
//! │          Rendering engine / owner            │
//! └──────────────────────────────────────────────┘
//! ```

mod fetcher;
mod memory_fetcher;
mod runtime;
mod time_source;

pub use fetcher::*;
pub use memory_fetcher::*;
pub use runtime::*;
pub use time_source::*;

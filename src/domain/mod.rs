//! Domain - Pure Data Structures
//!
//! These types carry no window state and represent the agenda data model.

pub mod config;
pub mod day_entry;
pub mod direction;
pub mod raw_day_map;

pub use config::AgendaConfig;
pub use day_entry::{DayEntry, RowKind, day_key, parse_day_key, shift_days};
pub use direction::{LoadDirection, LoadingPosition};
pub use raw_day_map::RawDayMap;

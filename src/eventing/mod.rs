//! Eventing - Window Output

mod agenda_event;

pub use agenda_event::*;

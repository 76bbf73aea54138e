//! Agenda Window Library
//!
//! Data loading and list synchronization for a windowed, bidirectionally
//! infinite agenda: a bounded buffer of days around a selected day that grows
//! on demand toward either edge while the far edge is trimmed.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod services;
pub mod state;

pub use error::{Error, Result};
pub use features::agenda::{AgendaDriver, AgendaHandle, AgendaWindow};

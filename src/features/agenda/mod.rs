//! Agenda - Windowed Day List
//!
//! [`AgendaWindow`] keeps a bounded, day-ordered buffer around the selected
//! day and extends it on demand in either direction.

mod driver;
mod loader;
mod selection;
mod window;

pub use driver::{AgendaCommand, AgendaDriver, AgendaHandle};
pub use loader::OnComplete;
pub use window::AgendaWindow;

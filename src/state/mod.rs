//! State - Mutable Window State
//!
//! Each state module owns one concern of the agenda window, so the loader
//! and the selection synchronizer never share a flag.

pub mod buffer_state;
pub mod load_state;
pub mod scroll_state;

pub use buffer_state::{BufferDiff, BufferSnapshot, BufferState};
pub use load_state::LoadPhase;
pub use scroll_state::ScrollState;

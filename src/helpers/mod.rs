//! Helper Utilities

mod config_store;
mod fs;

pub use config_store::*;
pub use fs::*;

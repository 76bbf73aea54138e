//! Agenda Constants
//!
//! Centralized defaults for the windowed data loading.

/// Entries from a buffer edge that trigger a prefetch
pub const DEFAULT_DATA_LOAD_THRESHOLD: usize = 15;

/// Days requested per fetch
pub const DEFAULT_BUFFER_SIZE: u32 = 30;

/// The bootstrap load covers past, selected and future windows in one request
pub const BOOTSTRAP_WINDOW_FACTOR: u32 = 3;

/// Trim boundary distance, in buffer sizes, from the reference day of a load
pub const TRIM_DISTANCE_FACTOR: i64 = 2;

/// Visible-range reports are ignored this long after a programmatic scroll
pub const SCROLL_ECHO_WINDOW_MS: u64 = 3000;

/// View offset applied to programmatic scrolls to an index
pub const SCROLL_VIEW_OFFSET: i32 = -10;

/// Canonical date key format for day entries and fetch anchors
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Config file name inside the application config directory
pub const CONFIG_FILE_NAME: &str = "agenda.toml";

/// Command channel capacity for the async driver
pub const DRIVER_COMMAND_CAPACITY: usize = 64;

//! Error types for the agenda window
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// No fetch collaborator was supplied
    #[snafu(display("No day fetcher assigned, the agenda will not receive any data"))]
    MissingFetcher,

    /// A fetch result key is not a `yyyy-MM-dd` date
    #[snafu(display("Invalid date key in fetch result: {key}"))]
    InvalidDateKey { key: String },

    /// A fetch result key maps to an absent value instead of a sequence
    #[snafu(display("Malformed fetch result: day {key} has no value"))]
    MalformedBatch { key: String },

    /// The fetch collaborator reported a failure
    #[snafu(display("Fetch failed: {message}"))]
    FetchFailed { message: String },

    /// The fetch was aborted through its cancellation handle
    #[snafu(display("Fetch cancelled"))]
    FetchCancelled,

    /// Channel send error
    #[snafu(display("Channel send error: {message}"))]
    ChannelSend { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

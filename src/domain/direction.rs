//! Load Direction and Loader Position

use serde::{Deserialize, Serialize};

/// Direction of a load relative to the buffered window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadDirection {
    /// Days before the first buffered day
    Past,
    /// Days after the last buffered day
    Future,
}

impl LoadDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadDirection::Past => "PAST",
            LoadDirection::Future => "FUTURE",
        }
    }

    /// Loader row shown while loading in this direction
    pub fn position(&self) -> LoadingPosition {
        match self {
            LoadDirection::Past => LoadingPosition::Top,
            LoadDirection::Future => LoadingPosition::Bottom,
        }
    }
}

impl std::fmt::Display for LoadDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loader row location in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadingPosition {
    Top,
    Bottom,
}

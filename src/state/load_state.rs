//! LoadPhase - Single-Flight Fetch State
//!
//! One enum guards every fetch, so "loading in the past" and "loading in the
//! future" can never be true at the same time.

use crate::domain::{LoadDirection, LoadingPosition};

/// Fetch state of the agenda window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// No fetch in flight
    #[default]
    Idle,
    /// Fetching days before the buffer
    LoadingPast,
    /// Fetching days after the buffer (or the bootstrap window)
    LoadingFuture,
}

impl LoadPhase {
    /// Phase for a fetch in the given direction
    pub fn loading(direction: LoadDirection) -> Self {
        match direction {
            LoadDirection::Past => Self::LoadingPast,
            LoadDirection::Future => Self::LoadingFuture,
        }
    }

    /// Check if any fetch is in flight
    pub fn is_loading(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Direction of the in-flight fetch
    pub fn direction(&self) -> Option<LoadDirection> {
        match self {
            Self::Idle => None,
            Self::LoadingPast => Some(LoadDirection::Past),
            Self::LoadingFuture => Some(LoadDirection::Future),
        }
    }

    /// Check if the loader row at `position` should be shown
    pub fn is_loading_at(&self, position: LoadingPosition) -> bool {
        self.direction().map(|d| d.position()) == Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_flags_never_disagree() {
        let past = LoadPhase::loading(LoadDirection::Past);
        assert!(past.is_loading());
        assert!(past.is_loading_at(LoadingPosition::Top));
        assert!(!past.is_loading_at(LoadingPosition::Bottom));

        let idle = LoadPhase::default();
        assert!(!idle.is_loading());
        assert_eq!(idle.direction(), None);
        assert!(!idle.is_loading_at(LoadingPosition::Top));
        assert!(!idle.is_loading_at(LoadingPosition::Bottom));
    }
}

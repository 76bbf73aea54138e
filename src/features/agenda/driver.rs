//! Agenda Driver
//!
//! Runs an [`AgendaWindow`] on a single tokio task. Commands arrive on an
//! mpsc channel, the fetch in flight is polled alongside them, and every
//! mutation of the window happens inside the loop.
//!
//! ```text
//! AgendaHandle ──► mpsc ──► AgendaDriver::run ──► AgendaWindow
//!                                 ▲                    │
//!                                 └── PendingFetch ◄───┘
//! ```

use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::constants::DRIVER_COMMAND_CAPACITY;
use crate::domain::LoadDirection;
use crate::error::{Error, Result};
use crate::services::{FetchOutcome, PendingFetch};

use super::window::AgendaWindow;

/// Commands accepted by the driver loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaCommand {
    SelectDay(NaiveDate),
    VisibleRangeChanged(usize),
    UserTouch,
    PauseScrollTracking,
    LoadMore(LoadDirection),
    CancelFetch,
    Shutdown,
}

/// Cloneable sender for driver commands
#[derive(Debug, Clone)]
pub struct AgendaHandle {
    tx: mpsc::Sender<AgendaCommand>,
}

impl AgendaHandle {
    /// Send a raw command
    pub async fn send(&self, command: AgendaCommand) -> Result<()> {
        self.tx.send(command).await.map_err(|e| Error::ChannelSend {
            message: format!("agenda driver stopped, dropped {:?}", e.0),
        })
    }

    pub async fn select_day(&self, day: NaiveDate) -> Result<()> {
        self.send(AgendaCommand::SelectDay(day)).await
    }

    pub async fn visible_range_changed(&self, first_visible_index: usize) -> Result<()> {
        self.send(AgendaCommand::VisibleRangeChanged(first_visible_index))
            .await
    }

    pub async fn user_touch(&self) -> Result<()> {
        self.send(AgendaCommand::UserTouch).await
    }

    pub async fn load_more(&self, direction: LoadDirection) -> Result<()> {
        self.send(AgendaCommand::LoadMore(direction)).await
    }

    pub async fn cancel_fetch(&self) -> Result<()> {
        self.send(AgendaCommand::CancelFetch).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(AgendaCommand::Shutdown).await
    }

    /// Check if the driver loop has exited
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Single-task event loop around an agenda window
#[derive(Debug)]
pub struct AgendaDriver {
    window: AgendaWindow,
    pending: Option<PendingFetch>,
    rx: mpsc::Receiver<AgendaCommand>,
}

impl AgendaDriver {
    /// Wrap a window and create the handle that feeds it
    pub fn new(window: AgendaWindow) -> (Self, AgendaHandle) {
        let (tx, rx) = mpsc::channel(DRIVER_COMMAND_CAPACITY);
        let driver = Self {
            window,
            pending: None,
            rx,
        };
        (driver, AgendaHandle { tx })
    }

    /// Mount the window and process commands until shutdown
    ///
    /// Returns the window so its final state can be inspected. The loop
    /// also ends when every handle has been dropped.
    pub async fn run(mut self) -> AgendaWindow {
        tracing::info!("Agenda driver started");
        let mounted = self.window.mount();
        self.track(mounted);

        loop {
            tokio::select! {
                biased;

                outcome = next_outcome(&mut self.pending) => {
                    self.pending = None;
                    match self.window.complete_fetch(outcome) {
                        Ok(()) => {}
                        Err(Error::FetchCancelled) => {}
                        Err(e) => tracing::warn!("Fetch result not applied: {}", e),
                    }
                }
                command = self.rx.recv() => {
                    match command {
                        Some(AgendaCommand::Shutdown) | None => break,
                        Some(command) => self.handle_command(command),
                    }
                }
            }
        }

        self.window.cancel_fetch();
        tracing::info!("Agenda driver stopped");
        self.window
    }

    fn handle_command(&mut self, command: AgendaCommand) {
        tracing::debug!(?command, "Agenda command");
        let issued = match command {
            AgendaCommand::SelectDay(day) => self.window.set_selected_day(day),
            AgendaCommand::VisibleRangeChanged(index) => self.window.on_visible_range_changed(index),
            AgendaCommand::UserTouch => {
                self.window.on_user_touch();
                None
            }
            AgendaCommand::PauseScrollTracking => {
                self.window.pause_scroll_tracking();
                None
            }
            AgendaCommand::LoadMore(direction) => self.window.load_more(direction, None),
            AgendaCommand::CancelFetch => {
                if self.window.cancel_fetch() {
                    self.pending = None;
                }
                None
            }
            AgendaCommand::Shutdown => None,
        };
        self.track(issued);
    }

    /// Replace the polled fetch; a superseded one was already cancelled
    fn track(&mut self, issued: Option<PendingFetch>) {
        if let Some(pending) = issued {
            self.pending = Some(pending);
        }
    }
}

/// Resolve the fetch in flight, or never when there is none
async fn next_outcome(pending: &mut Option<PendingFetch>) -> FetchOutcome {
    match pending.as_mut() {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AgendaConfig;
    use crate::eventing::AgendaEvent;
    use crate::services::{InMemoryFetcher, ManualTimeSource, SharedFetcher};
    use std::sync::Arc;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn window(fetcher: InMemoryFetcher) -> AgendaWindow {
        let fetcher: SharedFetcher = Arc::new(fetcher);
        let config = AgendaConfig::default().with_selected_day(date(2024, 1, 15));
        AgendaWindow::new(config, Some(fetcher), ManualTimeSource::shared(date(2024, 1, 15)))
            .expect("window")
    }

    #[tokio::test]
    async fn test_driver_mounts_and_jumps() {
        let window = window(InMemoryFetcher::new());
        let events = window.events();
        let (driver, handle) = AgendaDriver::new(window);
        let task = tokio::spawn(driver.run());

        handle.select_day(date(2024, 6, 1)).await.expect("send");
        handle.shutdown().await.expect("send");
        let window = task.await.expect("driver task");

        assert!(window.is_initialized());
        assert_eq!(window.selected_day(), date(2024, 6, 1));
        assert!(window.buffer().index_of_day(date(2024, 6, 1)).is_some());
        assert!(!window.is_fetch_in_flight());
        assert!(
            events
                .try_iter()
                .any(|e| e == AgendaEvent::BufferChanged(crate::state::BufferDiff::Cleared))
        );
    }

    #[tokio::test]
    async fn test_driver_cancels_slow_fetch() {
        let window = window(InMemoryFetcher::new().with_latency(Duration::from_secs(60)));
        let (driver, handle) = AgendaDriver::new(window);
        let task = tokio::spawn(driver.run());

        handle.cancel_fetch().await.expect("send");
        handle.load_more(LoadDirection::Past).await.expect("send");
        handle.shutdown().await.expect("send");
        let window = task.await.expect("driver task");

        assert!(window.is_empty());
        assert!(!window.is_initialized());
        assert!(!window.is_fetch_in_flight());
    }

    #[tokio::test]
    async fn test_handle_errors_after_driver_stops() {
        let window = window(InMemoryFetcher::new());
        let (driver, handle) = AgendaDriver::new(window);
        let task = tokio::spawn(driver.run());

        handle.shutdown().await.expect("send");
        task.await.expect("driver task");

        assert!(handle.is_closed());
        assert!(matches!(
            handle.user_touch().await,
            Err(Error::ChannelSend { .. })
        ));
    }
}

//! Day Fetcher
//!
//! The fetch collaborator that supplies reservation data. A fetch is handed
//! out as an awaitable [`PendingFetch`] with a [`FetchHandle`] that can abort
//! it. There is no timeout: a collaborator that never resolves keeps the
//! window loading until the fetch is cancelled.
//!
//! ## Pattern
//!
//! ```text
//! AgendaWindow::load_more()
//!       │
//!       ▼
//! DayFetcher::fetch_day_range(request)  ──►  BoxFuture<RawDayMap>
//!       │
//!       ▼
//! PendingFetch (abortable, tagged with fetch id)
//!       │ .await
//!       ▼
//! AgendaWindow::complete_fetch(outcome)
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::NaiveDate;
use futures::future::{AbortHandle, Abortable, BoxFuture};

use crate::domain::{LoadDirection, RawDayMap, day_key, parse_day_key};
use crate::error::{Error, Result};

/// Parameters of a day range fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Reference day as `yyyy-MM-dd`
    pub anchor: String,
    /// Number of days requested
    pub window_size: u32,
    /// Side of the buffer the days extend
    pub direction: LoadDirection,
}

impl FetchRequest {
    pub fn new(anchor: NaiveDate, window_size: u32, direction: LoadDirection) -> Self {
        Self {
            anchor: day_key(anchor),
            window_size,
            direction,
        }
    }

    /// Parse the anchor back into a date
    pub fn anchor_day(&self) -> Result<NaiveDate> {
        parse_day_key(&self.anchor)
    }
}

/// Collaborator that supplies reservation data for a day range
///
/// The returned future must resolve exactly once. Every day it reports must
/// map to a sequence (possibly empty); days outside the requested side of
/// the buffer must not be reported.
pub trait DayFetcher: Send + Sync + 'static {
    fn fetch_day_range(&self, request: FetchRequest) -> BoxFuture<'static, Result<RawDayMap>>;
}

/// Type alias for a shared fetcher
pub type SharedFetcher = Arc<dyn DayFetcher>;

/// Cancellation handle for an in-flight fetch
#[derive(Debug, Clone)]
pub struct FetchHandle {
    id: u64,
    abort: AbortHandle,
}

impl FetchHandle {
    /// Fetch id this handle controls
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Abort the fetch; its outcome resolves to `Error::FetchCancelled`
    pub fn cancel(&self) {
        self.abort.abort();
    }
}

/// Result of a fetch, tagged with the fetch id
#[derive(Debug)]
pub struct FetchOutcome {
    pub id: u64,
    pub result: Result<RawDayMap>,
}

/// An issued fetch awaiting its result
pub struct PendingFetch {
    handle: FetchHandle,
    request: FetchRequest,
    future: Abortable<BoxFuture<'static, Result<RawDayMap>>>,
}

impl PendingFetch {
    pub(crate) fn new(
        id: u64,
        request: FetchRequest,
        future: BoxFuture<'static, Result<RawDayMap>>,
    ) -> Self {
        let (abort, registration) = AbortHandle::new_pair();
        Self {
            handle: FetchHandle { id, abort },
            request,
            future: Abortable::new(future, registration),
        }
    }

    /// Fetch id
    pub fn id(&self) -> u64 {
        self.handle.id
    }

    /// Cancellation handle
    pub fn handle(&self) -> FetchHandle {
        self.handle.clone()
    }

    /// Request that was sent to the collaborator
    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

impl Future for PendingFetch {
    type Output = FetchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let id = self.handle.id;
        match Pin::new(&mut self.future).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(FetchOutcome { id, result }),
            Poll::Ready(Err(_aborted)) => Poll::Ready(FetchOutcome {
                id,
                result: Err(Error::FetchCancelled),
            }),
        }
    }
}

impl std::fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("id", &self.handle.id)
            .field("request", &self.request)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_pending_fetch_resolves_with_id() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let request = FetchRequest::new(day, 30, LoadDirection::Future);
        let future = async { Ok::<_, Error>(RawDayMap::new()) }.boxed();

        let pending = PendingFetch::new(7, request, future);
        assert_eq!(pending.request().anchor, "2024-01-01");

        let outcome = futures::executor::block_on(pending);
        assert_eq!(outcome.id, 7);
        assert!(outcome.result.expect("ok").is_empty());
    }

    #[test]
    fn test_cancelled_fetch_resolves_to_cancelled() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let request = FetchRequest::new(day, 30, LoadDirection::Past);
        let future = futures::future::pending::<Result<RawDayMap>>().boxed();

        let pending = PendingFetch::new(1, request, future);
        pending.handle().cancel();

        let outcome = futures::executor::block_on(pending);
        assert!(matches!(outcome.result, Err(Error::FetchCancelled)));
    }
}

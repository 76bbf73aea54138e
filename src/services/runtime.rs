//! Tokio Runtime Bridge
//!
//! The agenda window itself is synchronous; fetches are futures that need an
//! executor. This module owns the process-wide tokio runtime used by the demo
//! binary to drive an [`AgendaDriver`](crate::features::agenda::AgendaDriver).

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Runtime::new()?;
    Ok(TOKIO_RUNTIME.get_or_init(|| runtime))
}

/// Spawn a named task in the tokio runtime
pub fn spawn_named<F>(name: &'static str, future: F) -> Result<JoinHandle<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    Ok(get_runtime()?.spawn(async move {
        let output = future.await;
        tracing::debug!("Tokio task completed: {}", name);
        output
    }))
}

/// Block on a future synchronously
///
/// **Warning**: This blocks the current thread. Use only from `main` or
/// other synchronous entry points, never from inside the runtime.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}

/// Await a spawned task, turning a panic or abort into an error
pub async fn join<T>(handle: JoinHandle<T>) -> Result<T> {
    handle.await.map_err(|e| Error::Invalid {
        message: format!("task failed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_join() {
        let value = block_on(async {
            let handle = spawn_named("answer", async { 21 * 2 }).expect("spawn");
            join(handle).await
        })
        .expect("runtime")
        .expect("join");
        assert_eq!(value, 42);
    }
}

//! Worker pool for concurrent per-ID processing with backpressure.
//!
//! Spawns N persistent tokio tasks that pull work items from a bounded
//! async-channel. Each item runs in its own spawned task so that a panic or
//! a hang is contained to that item: the worker reports it through the
//! caller's `on_failure` mapping and moves on. Results arrive on an
//! unbounded channel.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Why an item produced no result of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    /// The processing task panicked; carries the panic message if it was a string.
    Panicked(String),
    /// The processing task ran past the per-item timeout and was aborted.
    TimedOut(Duration),
}

impl std::fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Panicked(msg) => write!(f, "panicked: {}", msg),
            Self::TimedOut(d) => write!(f, "timed out after {}s", d.as_secs()),
        }
    }
}

/// A pool of worker tasks that process items concurrently.
///
/// Every submitted item yields exactly one result: either the value of
/// `process_fn`, or `on_failure(item, failure)` when processing panicked or
/// timed out.
///
/// # Example
///
/// ```ignore
/// let mut pool = WorkerPool::start(4, timeout, ids, |id| async move {
///     process(id).await
/// }, |id, failure| Outcome::failed(id, failure));
///
/// while let Some(result) = pool.recv().await {
///     handle(result);
/// }
/// ```
pub struct WorkerPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<R>,
    _handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn `n` workers, submit all items, and return a pool for receiving
    /// results.
    ///
    /// Submission happens in a background task so the caller can start
    /// receiving results immediately.
    pub fn start<W, F, Fut, E>(
        n: usize,
        item_timeout: Duration,
        items: Vec<W>,
        process_fn: F,
        on_failure: E,
    ) -> Self
    where
        W: Clone + Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        E: Fn(W, TaskFailure) -> R + Send + Sync + 'static,
    {
        let n = n.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<W>(n);
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
        let process_fn = Arc::new(process_fn);
        let on_failure = Arc::new(on_failure);

        let handles: Vec<JoinHandle<()>> = (0..n)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process_fn = process_fn.clone();
                let on_failure = on_failure.clone();
                tokio::spawn(async move {
                    while let Ok(item) = work_rx.recv().await {
                        let mut task = tokio::spawn(process_fn(item.clone()));
                        let result = match tokio::time::timeout(item_timeout, &mut task).await {
                            Ok(Ok(r)) => r,
                            Ok(Err(join_err)) => {
                                let failure = TaskFailure::Panicked(panic_message(join_err));
                                log::warn!("Worker pool: item {}", failure);
                                on_failure(item, failure)
                            }
                            Err(_) => {
                                task.abort();
                                let failure = TaskFailure::TimedOut(item_timeout);
                                log::warn!("Worker pool: item {}", failure);
                                on_failure(item, failure)
                            }
                        };
                        if result_tx.send(result).is_err() {
                            break; // Receiver dropped
                        }
                    }
                })
            })
            .collect();

        // Channel closes once every worker has finished.
        drop(result_tx);

        tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        Self {
            result_rx,
            _handles: handles,
        }
    }

    /// Receive the next result. Returns `None` when all items have been
    /// processed and all workers have shut down.
    pub async fn recv(&mut self) -> Option<R> {
        self.result_rx.recv().await
    }
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "tests/worker_pool_tests.rs"]
mod tests;

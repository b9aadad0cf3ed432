//! Running a library task while a frontend consumes its events.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// How long to keep draining events once the task has finished. Guards
/// against a sender clone that outlives the task.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Drive `task` to completion, handing every event from `event_rx` to
/// `on_event`, then drain whatever is still queued. Returns the task's
/// output.
pub async fn run_with_events<F, E, R>(
    task: F,
    mut event_rx: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);
    let mut seen: u64 = 0;

    let output = loop {
        tokio::select! {
            r = &mut task => break r,
            event = event_rx.recv() => match event {
                Some(e) => {
                    seen += 1;
                    on_event(e);
                }
                None => {
                    log::debug!("Event channel closed after {} events; awaiting task", seen);
                    return task.await;
                }
            },
        }
    };

    let deadline = Instant::now() + DRAIN_TIMEOUT;
    loop {
        match tokio::time::timeout_at(deadline, event_rx.recv()).await {
            Ok(Some(e)) => {
                seen += 1;
                on_event(e);
            }
            Ok(None) => break,
            Err(_) => {
                log::warn!(
                    "Stopped draining events after {}s; a sender is still alive",
                    DRAIN_TIMEOUT.as_secs()
                );
                break;
            }
        }
    }
    log::debug!("Task finished, {} events handled", seen);
    output
}

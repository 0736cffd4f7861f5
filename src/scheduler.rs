//! Cancellable scheduling for bot thinking delays.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
struct Scheduled {
    turn_version: u64,
    handle: JoinHandle<()>,
}

/// Schedules a bot's move after its artificial thinking delay, bound to a
/// turn version number.
///
/// Cancellation on a stale turn is a correctness requirement, not an
/// optimization: if the turn advances before the timer fires (the human moved
/// in the same instant the bot was scheduled, or the screen went away), the
/// pending task must never run, or a duplicate move lands on an
/// already-advanced turn and corrupts rotation. Stale tasks are invalidated
/// by aborting them — the task body carries no self-checks.
///
/// One scheduler belongs to one game session; it holds at most one pending
/// task at a time.
#[derive(Debug, Default)]
pub struct BotScheduler {
    current: Option<Scheduled>,
}

impl BotScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to run after `delay`, replacing (and aborting) any
    /// previously scheduled task.
    ///
    /// `turn_version` identifies the turn this task was scheduled against;
    /// pass the same value to [`BotScheduler::invalidate`] when that turn is
    /// no longer current.
    pub fn schedule<F>(&mut self, turn_version: u64, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        debug!(turn_version, ?delay, "scheduling bot move");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        self.current = Some(Scheduled {
            turn_version,
            handle,
        });
    }

    /// Aborts the pending task if it was scheduled against `turn_version`.
    ///
    /// Call on every turn change with the version that just ended; a task
    /// scheduled against a newer version is left alone.
    pub fn invalidate(&mut self, turn_version: u64) {
        if let Some(scheduled) = &self.current {
            if scheduled.turn_version == turn_version {
                debug!(turn_version, "invalidating stale bot move");
                scheduled.handle.abort();
                self.current = None;
            }
        }
    }

    /// Aborts any pending task unconditionally.
    pub fn cancel(&mut self) {
        if let Some(scheduled) = self.current.take() {
            scheduled.handle.abort();
        }
    }

    /// Whether a task is currently scheduled.
    pub fn is_scheduled(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|scheduled| !scheduled.handle.is_finished())
    }
}

impl Drop for BotScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

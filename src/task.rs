//! Task polling utilities
//!
//! Provides a generic helper for polling async tasks spawned on the tokio runtime,
//! plus `TaskSlot`, an owned slot whose task is dropped when the owner goes away.

use std::future::Future;

use futures::FutureExt;
use tokio::task::JoinHandle;

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, tokio::task::JoinError>),
}

/// Poll an optional task handle and return its result if finished.
///
/// # Returns
/// - `PollResult::NoTask` if task is None
/// - `PollResult::Pending` if task is still running
/// - `PollResult::Complete(result)` if task is finished
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(handle) = task else {
        return PollResult::NoTask;
    };

    if !handle.is_finished() {
        return PollResult::Pending;
    }

    let Some(handle) = task.take() else {
        return PollResult::NoTask;
    };
    match handle.now_or_never() {
        Some(result) => PollResult::Complete(result),
        None => {
            // Shouldn't happen since we checked is_finished()
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}

/// A single in-flight task owned by a screen.
///
/// Abandoning the slot (explicitly or by dropping it) aborts the task, so a
/// completion that arrives after the owner is gone is never observed.
pub struct TaskSlot<T> {
    task: Option<JoinHandle<T>>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T: Send + 'static> TaskSlot<T> {
    /// Spawn a future into the slot, abandoning whatever was running before.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.abandon();
        self.task = Some(tokio::spawn(future));
    }
}

impl<T> TaskSlot<T> {
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn poll(&mut self) -> PollResult<T> {
        poll_task(&mut self.task)
    }

    /// Drop the task without waiting for it.
    pub fn abandon(&mut self) {
        if let Some(handle) = self.task.take() {
            if !handle.is_finished() {
                tracing::debug!("Abandoning in-flight task");
            }
            handle.abort();
        }
    }
}

impl<T> Drop for TaskSlot<T> {
    fn drop(&mut self) {
        self.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_poll_empty_slot() {
        let mut slot: TaskSlot<u32> = TaskSlot::default();
        assert!(matches!(slot.poll(), PollResult::NoTask));
        assert!(!slot.is_running());
    }

    #[tokio::test]
    async fn test_poll_completes() {
        let mut slot = TaskSlot::default();
        slot.spawn(async { 7u32 });

        let mut value = None;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            if let PollResult::Complete(Ok(v)) = slot.poll() {
                value = Some(v);
                break;
            }
        }
        assert_eq!(value, Some(7));
        assert!(!slot.is_running());
    }

    #[tokio::test]
    async fn test_abandoned_completion_is_dropped() {
        let mut slot = TaskSlot::default();
        slot.spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            1u32
        });
        assert!(slot.is_running());

        slot.abandon();
        assert!(!slot.is_running());
        assert!(matches!(slot.poll(), PollResult::NoTask));
    }
}

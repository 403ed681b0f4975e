//! One-shot result delivery for submitted tasks.

use crossbeam_channel::{Receiver, TryRecvError};
use thiserror::Error;

/// Why a task failed to produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The unit of work panicked on a worker thread. Carries the panic
    /// payload's message.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The result channel closed without a value. Seen only when a worker
    /// thread died abnormally, or when polling a future that has already
    /// been taken.
    #[error("task result was lost")]
    Lost,
}

/// Submission was rejected because the executor has shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task queue is closed")]
pub struct TaskQueueClosed;

/// Pending result of one submitted task.
///
/// Each submission produces exactly one future, and each future yields
/// exactly one outcome: the task's return value or its failure. Poll with
/// [`try_take`](TaskFuture::try_take) from a loop that must not block, or
/// consume with [`wait`](TaskFuture::wait) at an explicit blocking point.
#[derive(Debug)]
pub struct TaskFuture<T> {
    receiver: Receiver<Result<T, TaskError>>,
}

impl<T> TaskFuture<T> {
    pub(super) fn new(receiver: Receiver<Result<T, TaskError>>) -> Self {
        TaskFuture { receiver }
    }

    /// Non-blocking poll.
    ///
    /// # Returns
    /// `None` while the task is still queued or running, otherwise the
    /// task's outcome. The outcome is delivered once; polling again after
    /// taking it reports [`TaskError::Lost`].
    pub fn try_take(&mut self) -> Option<Result<T, TaskError>> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TaskError::Lost)),
        }
    }

    /// Blocks until the task resolves and takes its outcome.
    pub fn wait(self) -> Result<T, TaskError> {
        match self.receiver.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(TaskError::Lost),
        }
    }
}

//! # Async Task Executor
//!
//! A fixed-size pool of worker threads draining one shared FIFO queue of
//! boxed units of work. Each submission returns a [`TaskFuture`] that
//! resolves with the closure's result, or with [`TaskError::Panicked`] when
//! the closure panicked on its worker.
//!
//! ## Guarantees
//!
//! * Submitted work executes at most once; a worker consumes each job from
//!   the queue exactly once.
//! * After [`shutdown`](TaskPool::shutdown), new submissions fail with
//!   [`TaskQueueClosed`], but work already accepted is drained before the
//!   workers exit.
//! * Dropping the pool blocks until every worker thread has exited. No
//!   detached threads, no leaked handles.
//!
//! The pool itself knows nothing about chunks; the streaming controller
//! submits generation and meshing closures and polls the returned futures
//! once per tick.

pub mod future;

pub use future::{TaskError, TaskFuture, TaskQueueClosed};

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;

use crate::config::ConfigError;

/// A queued unit of work.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed pool of named worker threads behind a shared FIFO queue.
pub struct TaskPool {
    /// Queue handle; `None` once the pool has shut down.
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskPool {
    /// Spawns the worker threads.
    ///
    /// # Arguments
    /// * `worker_count` - Number of worker threads; must be at least one.
    ///
    /// # Returns
    /// The running pool, or [`ConfigError::NoWorkers`] for a zero count.
    pub fn new(worker_count: usize) -> Result<Self, ConfigError> {
        if worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }

        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let mut workers = Vec::with_capacity(worker_count);

        for index in 0..worker_count {
            let receiver = receiver.clone();
            let worker = thread::Builder::new()
                .name(format!("voxel-worker-{index}"))
                .spawn(move || {
                    log::debug!("worker thread started");
                    // recv fails once the queue is closed and drained.
                    while let Ok(job) = receiver.recv() {
                        job();
                    }
                    log::debug!("worker thread exiting");
                })
                .expect("failed to spawn worker thread");
            workers.push(worker);
        }

        log::info!("task pool running with {worker_count} workers");
        Ok(TaskPool {
            sender: Some(sender),
            workers,
        })
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Queues a unit of work.
    ///
    /// # Arguments
    /// * `work` - The closure to run on a worker thread. Panics inside it
    ///   are caught and reported through the future.
    ///
    /// # Returns
    /// A future for the closure's result, or [`TaskQueueClosed`] when the
    /// pool has shut down.
    pub fn submit<T, F>(&self, work: F) -> Result<TaskFuture<T>, TaskQueueClosed>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(TaskQueueClosed)?;
        let (result_sender, result_receiver) = crossbeam_channel::bounded(1);

        let job: Job = Box::new(move || {
            let outcome = catch_unwind(AssertUnwindSafe(work))
                .map_err(|payload| TaskError::Panicked(panic_message(payload.as_ref())));
            // A closed receiver means the submitter lost interest in the
            // result; the work itself still ran.
            let _ = result_sender.send(outcome);
        });

        sender.send(job).map_err(|_| TaskQueueClosed)?;
        Ok(TaskFuture::new(result_receiver))
    }

    /// Closes the queue.
    ///
    /// Later submissions fail with [`TaskQueueClosed`]. Work accepted
    /// before the call is still drained; use [`Drop`] or join manually to
    /// wait for it.
    pub fn shutdown(&mut self) {
        if self.sender.take().is_some() {
            log::info!("task pool shutting down");
        }
    }

    /// Whether [`shutdown`](TaskPool::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.sender.is_none()
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::error!("worker thread terminated abnormally");
            }
        }
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn every_submission_resolves_with_its_own_result() {
        let pool = TaskPool::new(4).unwrap();

        let futures: Vec<_> = (0..100u64)
            .map(|i| pool.submit(move || i * i).unwrap())
            .collect();

        for (i, future) in futures.into_iter().enumerate() {
            assert_eq!(future.wait().unwrap(), (i * i) as u64);
        }
    }

    #[test]
    fn overlapping_submissions_from_multiple_threads_all_resolve() {
        let pool = Arc::new(TaskPool::new(3).unwrap());

        let submitters: Vec<_> = (0..4u64)
            .map(|thread_id| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    (0..25u64)
                        .map(|i| {
                            let value = thread_id * 1000 + i;
                            (value, pool.submit(move || value + 7).unwrap())
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for submitter in submitters {
            for (value, future) in submitter.join().unwrap() {
                assert_eq!(future.wait().unwrap(), value + 7);
            }
        }
    }

    #[test]
    fn tasks_run_exactly_once() {
        let pool = TaskPool::new(2).unwrap();
        let runs = Arc::new(AtomicUsize::new(0));

        let futures: Vec<_> = (0..64)
            .map(|_| {
                let runs = Arc::clone(&runs);
                pool.submit(move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap()
            })
            .collect();

        for future in futures {
            future.wait().unwrap();
        }
        assert_eq!(runs.load(Ordering::SeqCst), 64);
    }

    #[test]
    fn submission_after_shutdown_is_rejected() {
        let mut pool = TaskPool::new(1).unwrap();
        pool.shutdown();

        assert!(pool.is_shut_down());
        assert_eq!(pool.submit(|| 1).unwrap_err(), TaskQueueClosed);
    }

    #[test]
    fn accepted_work_drains_through_shutdown() {
        let mut pool = TaskPool::new(1).unwrap();

        let futures: Vec<_> = (0..8u32)
            .map(|i| {
                pool.submit(move || {
                    thread::sleep(Duration::from_millis(2));
                    i
                })
                .unwrap()
            })
            .collect();

        pool.shutdown();
        for (i, future) in futures.into_iter().enumerate() {
            assert_eq!(future.wait().unwrap(), i as u32);
        }
    }

    #[test]
    fn panics_surface_through_the_future() {
        let pool = TaskPool::new(1).unwrap();

        let future = pool.submit(|| -> u32 { panic!("boom in worker") }).unwrap();
        match future.wait() {
            Err(TaskError::Panicked(message)) => assert!(message.contains("boom in worker")),
            other => panic!("expected a panic report, got {other:?}"),
        }

        // The worker that caught the panic keeps serving jobs.
        assert_eq!(pool.submit(|| 5).unwrap().wait().unwrap(), 5);
    }

    #[test]
    fn drop_joins_workers_after_draining() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let pool = TaskPool::new(2).unwrap();
            for _ in 0..32 {
                let runs = Arc::clone(&runs);
                pool.submit(move || {
                    thread::sleep(Duration::from_millis(1));
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            }
            // Futures dropped on purpose: results are discarded, the work
            // itself is not.
        }
        assert_eq!(runs.load(Ordering::SeqCst), 32);
    }

    #[test]
    fn try_take_polls_without_blocking() {
        let pool = TaskPool::new(1).unwrap();
        let (gate_sender, gate_receiver) = crossbeam_channel::bounded::<()>(1);

        let mut future = pool
            .submit(move || {
                gate_receiver.recv().ok();
                42
            })
            .unwrap();

        assert!(future.try_take().is_none());
        gate_sender.send(()).unwrap();

        let outcome = loop {
            if let Some(outcome) = future.try_take() {
                break outcome;
            }
            thread::yield_now();
        };
        assert_eq!(outcome.unwrap(), 42);
    }
}

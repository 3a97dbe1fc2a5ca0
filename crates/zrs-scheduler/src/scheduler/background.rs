// Copyright (c) 2025-2026 Zensical and contributors

// SPDX-License-Identifier: MIT
// All contributions are certified under the DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Background scheduler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use zrs_disposable::Disposable;
use zrs_executor::Executor;
use zrs_executor::strategy::WorkSharing;
use zrs_lock::Lock;

use super::timer::Timers;
use super::{RecurringWork, Schedule, Work, spent};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Background scheduler.
///
/// Work is dispatched onto a work-sharing pool of worker threads, so
/// independently scheduled work may execute concurrently and in any order.
/// Delayed and recurring work is armed on the shared [`Timers`] thread and
/// submitted to the pool when due.
///
/// Disposing returned disposables cancels work that has not yet started;
/// work that a worker already picked up runs to completion.
#[derive(Debug)]
pub struct Background {
    /// Worker pool, taken on shutdown.
    executor: Lock<Option<Executor<WorkSharing>>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Background {
    /// Creates a background scheduler with the default pool size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            executor: Lock::new(Some(Executor::default())),
        }
    }

    /// Returns a handle to the worker pool, unless shut down.
    fn executor(&self) -> Option<Executor<WorkSharing>> {
        self.executor.lock().clone()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Schedule for Background {
    /// Submits the work to the worker pool.
    fn schedule(&self, work: Work) -> Disposable {
        let Some(executor) = self.executor() else {
            return spent();
        };

        // Check cancellation right before the work starts
        let token = Disposable::new_empty();
        let guard = token.clone();
        let _ = executor.submit(move || {
            if !guard.is_disposed() {
                work();
            }
        });
        token
    }

    /// Arms a timer that submits the work to the worker pool when due.
    fn schedule_after(&self, delay: Duration, work: Work) -> Disposable {
        let Some(executor) = self.executor() else {
            return spent();
        };

        // The token guards the start of the work, the timer guards the
        // submission, and disposal must cancel whichever is still ahead
        let token = Disposable::new_empty();
        let guard = token.clone();
        let timer = Timers::shared().once(Instant::now() + delay, move || {
            let guard = guard.clone();
            let _ = executor.submit(move || {
                if !guard.is_disposed() {
                    work();
                }
            });
        });
        Disposable::new(move || {
            token.dispose();
            timer.dispose();
        })
    }

    /// Arms a recurring timer that submits each tick to the worker pool.
    ///
    /// The work is guarded by a lock, so ticks never run concurrently even
    /// when the pool picks them up on different workers.
    fn schedule_recurring(
        &self,
        interval: Duration,
        work: RecurringWork,
    ) -> Disposable {
        let Some(executor) = self.executor() else {
            return spent();
        };

        let work = Arc::new(Lock::new(work));
        Timers::shared().every(interval, move || {
            let work = Arc::clone(&work);
            let _ = executor.submit(move || {
                (*work.lock())();
            });
        })
    }

    /// Returns whether the scheduler executes work in FIFO order.
    #[inline]
    fn is_serial(&self) -> bool {
        false
    }

    /// Tears the scheduler down, draining and joining the worker pool.
    fn shutdown(&self) {
        let executor = self.executor.lock().take();
        drop(executor);
    }
}

// ----------------------------------------------------------------------------

impl Default for Background {
    /// Creates a background scheduler with the default pool size.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod schedule {
        use std::thread;
        use std::time::Duration;

        use crossbeam::channel::bounded;

        use crate::Scheduler;

        #[test]
        fn handles_thread_hop() {
            let scheduler = Scheduler::background();
            let (sender, receiver) = bounded(1);

            // Work must run off the calling thread
            let caller = thread::current().id();
            scheduler.schedule(move || {
                sender.send(thread::current().id()).unwrap();
            });
            let worker =
                receiver.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_ne!(caller, worker);
        }

        #[test]
        fn handles_cancellation() {
            let scheduler = Scheduler::background();
            let (sender, receiver) = bounded(1);

            // Cancelled delayed work must not run
            let disposable = scheduler
                .schedule_after(Duration::from_millis(50), move || {
                    sender.send(()).unwrap();
                });
            disposable.dispose();
            assert!(
                receiver.recv_timeout(Duration::from_millis(200)).is_err()
            );
        }
    }

    mod schedule_after {
        use std::time::{Duration, Instant};

        use crossbeam::channel::bounded;

        use crate::Scheduler;

        #[test]
        fn handles_delay() {
            let scheduler = Scheduler::background();
            let (sender, receiver) = bounded(1);

            // Work must fire no earlier than the deadline
            let start = Instant::now();
            scheduler.schedule_after(Duration::from_millis(20), move || {
                sender.send(Instant::now()).unwrap();
            });
            let fired = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(fired - start >= Duration::from_millis(20));
        }
    }
}

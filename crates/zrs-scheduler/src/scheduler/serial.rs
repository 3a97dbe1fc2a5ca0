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

//! Serial scheduler.

use crossbeam::channel::{Sender, unbounded};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use std::time::{Duration, Instant};

use zrs_disposable::Disposable;
use zrs_lock::Lock;

use super::timer::Timers;
use super::{RecurringWork, Schedule, Work, spent};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Serial scheduler.
///
/// Work is executed in FIFO order on one dedicated thread, which is what the
/// process-wide main scheduler is an instance of. Delayed and recurring work
/// is armed on the shared [`Timers`] thread and enqueued when due, so it
/// interleaves with directly scheduled work in deadline order.
///
/// If a unit of work panics, it doesn't take the scheduler thread with it.
#[derive(Debug)]
pub struct Serial {
    /// Scheduler thread state, taken on shutdown.
    state: Lock<Option<State>>,
}

// ----------------------------------------------------------------------------

/// Scheduler thread state.
#[derive(Debug)]
struct State {
    /// Work submission sender.
    sender: Sender<Work>,
    /// Join handle of the scheduler thread.
    thread: JoinHandle<()>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Serial {
    /// Creates a serial scheduler with the given thread name.
    ///
    /// The scheduler thread is spawned immediately before the method
    /// returns.
    ///
    /// # Panics
    ///
    /// Panics if thread creation fails.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let (sender, receiver) = unbounded::<Work>();

        // We deliberately use unwrap here, as the capability to spawn
        // threads is a fundamental requirement of the scheduler
        let thread = Builder::new()
            .name(name.into())
            .spawn(move || {
                while let Ok(work) = receiver.recv() {
                    let _ = panic::catch_unwind(AssertUnwindSafe(work));
                }
            })
            .unwrap();

        Self {
            state: Lock::new(Some(State { sender, thread })),
        }
    }

    /// Returns the submission sender, unless shut down.
    fn sender(&self) -> Option<Sender<Work>> {
        self.state.lock().as_ref().map(|state| state.sender.clone())
    }

    /// Enqueues work guarded by the given cancellation token.
    fn enqueue(sender: &Sender<Work>, token: &Disposable, work: Work) {
        let guard = token.clone();
        let _ = sender.send(Box::new(move || {
            if !guard.is_disposed() {
                work();
            }
        }));
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Schedule for Serial {
    /// Enqueues the work on the scheduler thread.
    fn schedule(&self, work: Work) -> Disposable {
        let Some(sender) = self.sender() else {
            return spent();
        };

        let token = Disposable::new_empty();
        Self::enqueue(&sender, &token, work);
        token
    }

    /// Arms a timer that enqueues the work when due.
    fn schedule_after(&self, delay: Duration, work: Work) -> Disposable {
        let Some(sender) = self.sender() else {
            return spent();
        };

        let token = Disposable::new_empty();
        let timer = {
            let token = token.clone();
            Timers::shared().once(Instant::now() + delay, move || {
                Self::enqueue(&sender, &token, work);
            })
        };
        Disposable::new(move || {
            token.dispose();
            timer.dispose();
        })
    }

    /// Arms a recurring timer that enqueues each tick when due.
    fn schedule_recurring(
        &self,
        interval: Duration,
        work: RecurringWork,
    ) -> Disposable {
        let Some(sender) = self.sender() else {
            return spent();
        };

        let work = Arc::new(Lock::new(work));
        Timers::shared().every(interval, move || {
            let work = Arc::clone(&work);
            let _ = sender.send(Box::new(move || {
                (*work.lock())();
            }));
        })
    }

    /// Returns whether the scheduler executes work in FIFO order.
    #[inline]
    fn is_serial(&self) -> bool {
        true
    }

    /// Tears the scheduler down, joining the scheduler thread.
    ///
    /// Work that was already enqueued is drained and executed before the
    /// thread exits.
    fn shutdown(&self) {
        let state = self.state.lock().take();
        if let Some(state) = state {
            drop(state.sender);
            let _ = state.thread.join();
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod schedule {
        use std::time::Duration;

        use crossbeam::channel::unbounded;

        use crate::{Scheduler, Serial};

        #[test]
        fn handles_fifo_order() {
            let scheduler = Scheduler::new(Serial::new("zrs/test"));
            let (sender, receiver) = unbounded();

            // Work must execute in submission order
            for index in 0..16 {
                let sender = sender.clone();
                scheduler.schedule(move || {
                    sender.send(index).unwrap();
                });
            }
            let order: Vec<_> = receiver.iter().take(16).collect();
            assert_eq!(order, (0..16).collect::<Vec<_>>());
        }

        #[test]
        fn handles_cancellation() {
            let serial = Serial::new("zrs/test");
            let (sender, receiver) = unbounded();

            // Cancelled work must not run
            let scheduler = Scheduler::new(serial);
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
}

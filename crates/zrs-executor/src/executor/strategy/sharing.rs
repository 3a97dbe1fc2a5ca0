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

//! Work-sharing execution strategy.

use crossbeam::channel::{Sender, unbounded};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, Builder, JoinHandle};
use std::{cmp, fmt, panic};

use crate::executor::error::Result;
use crate::executor::strategy::Strategy;
use crate::executor::task::Task;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Work-sharing execution strategy.
///
/// This strategy manages its tasks centrally in a single unbounded
/// [`crossbeam`] channel, from which the worker threads pull tasks and
/// execute them, repeating the process until they are terminated. Tasks are
/// picked up in the exact same order they were submitted, albeit they might
/// not finish in the same order.
///
/// The channel is unbounded, as the schedulers built on top of this pool
/// have no way to surface backpressure to their callers: scheduling work
/// must always succeed. Submission only fails once the strategy is shutting
/// down.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use zrs_executor::strategy::{Strategy, WorkSharing};
///
/// // Create strategy and submit task
/// let strategy = WorkSharing::default();
/// strategy.submit(Box::new(|| println!("Task")))?;
/// # Ok(())
/// # }
/// ```
pub struct WorkSharing {
    /// Task submission sender.
    sender: Option<Sender<Box<dyn Task>>>,
    /// Join handles of worker threads.
    threads: Vec<JoinHandle<()>>,
    /// Counter for running tasks.
    running: Arc<AtomicUsize>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl WorkSharing {
    /// Creates a work-sharing execution strategy.
    ///
    /// This method creates a strategy with the given number of worker
    /// threads, which are spawned immediately before the method returns.
    ///
    /// # Panics
    ///
    /// Panics if thread creation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_executor::strategy::WorkSharing;
    ///
    /// // Create strategy
    /// let strategy = WorkSharing::new(4);
    /// ```
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        let (sender, receiver) = unbounded::<Box<dyn Task>>();

        // Keep track of running tasks
        let running = Arc::new(AtomicUsize::new(0));

        // Initialize worker threads
        let iter = (0..num_workers).map(|index| {
            let receiver = receiver.clone();

            // Create worker thread and poll the receiver until the sender is
            // dropped, automatically exiting the loop. Additionally, we keep
            // track of the number of running tasks to provide a simple way to
            // monitor the load of the thread pool. Panics are caught, as
            // we're running user-land code that might be sloppy, but the
            // executor has no way of reporting them, so tasks that care must
            // wrap execution themselves.
            let running = Arc::clone(&running);
            let h = move || {
                while let Ok(task) = receiver.recv() {
                    running.fetch_add(1, Ordering::Release);
                    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                        task.execute();
                    }));

                    // Update number of running tasks
                    running.fetch_sub(1, Ordering::Acquire);
                }
            };

            // We deliberately use unwrap here, as the capability to spawn
            // threads is a fundamental requirement of the executor
            Builder::new()
                .name(format!("zrs/executor/{}", index + 1))
                .spawn(h)
                .unwrap()
        });

        // Create worker threads and return strategy
        let threads = iter.collect();
        Self {
            sender: Some(sender),
            threads,
            running,
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Strategy for WorkSharing {
    /// Submits a task.
    ///
    /// This method submits a [`Task`], which is executed by one of the worker
    /// threads as soon as possible.
    ///
    /// # Errors
    ///
    /// If the task cannot be submitted, [`Error::Submit`][] is returned,
    /// which can only happen once the channel is disconnected during
    /// shutdown.
    ///
    /// [`Error::Submit`]: crate::Error::Submit
    fn submit(&self, task: Box<dyn Task>) -> Result {
        match self.sender.as_ref() {
            Some(sender) => Ok(sender.send(task)?),
            None => unreachable!(),
        }
    }

    /// Returns the number of workers.
    #[inline]
    fn num_workers(&self) -> usize {
        self.threads.len()
    }

    /// Returns the number of running tasks.
    #[inline]
    fn num_tasks_running(&self) -> usize {
        self.running.load(Ordering::Relaxed)
    }

    /// Returns the number of pending tasks.
    #[inline]
    fn num_tasks_pending(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }
}

// ----------------------------------------------------------------------------

impl Default for WorkSharing {
    /// Creates a work-sharing execution strategy using all CPUs - 1.
    ///
    /// The number of workers is determined by the number of logical CPUs
    /// minus one, which reserves one core for the thread that orchestrates
    /// the work. If the number of logical CPUs is fewer than 1, the strategy
    /// defaults to a single worker thread.
    #[inline]
    fn default() -> Self {
        Self::new(cmp::max(
            thread::available_parallelism()
                .map(|num| num.get().saturating_sub(1))
                .unwrap_or(1),
            1,
        ))
    }
}

impl Drop for WorkSharing {
    /// Terminates and joins all worker threads.
    ///
    /// This method drains and executes all pending tasks before the worker
    /// threads exit, as receivers only terminate once the channel is both
    /// disconnected and empty. All worker threads are joined before the
    /// method returns.
    fn drop(&mut self) {
        // Dropping the sender causes all receivers to terminate
        if let Some(sender) = self.sender.take() {
            drop(sender);
        }

        // Join all worker threads without panicking on errors
        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }
}

// ----------------------------------------------------------------------------

impl fmt::Debug for WorkSharing {
    /// Formats the execution strategy for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WorkSharing")
            .field("workers", &self.num_workers())
            .field("running", &self.num_tasks_running())
            .field("pending", &self.num_tasks_pending())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod submit {
        use std::time::Duration;

        use crossbeam::channel::{bounded, unbounded};

        use crate::Executor;
        use crate::strategy::WorkSharing;

        #[test]
        fn handles_tasks() {
            let executor = Executor::new(WorkSharing::new(2));
            let (sender, receiver) = unbounded();
            for index in 0..16 {
                let sender = sender.clone();
                executor
                    .submit(move || sender.send(index).unwrap())
                    .unwrap();
            }

            // All tasks must run to completion
            let received = receiver.iter().take(16).count();
            assert_eq!(received, 16);
        }

        #[test]
        fn handles_panics() {
            let executor = Executor::new(WorkSharing::new(1));
            executor.submit(|| panic!("boom")).unwrap();

            // Worker must survive the panic
            let (sender, receiver) = bounded(1);
            executor.submit(move || sender.send(()).unwrap()).unwrap();
            assert!(receiver.recv_timeout(Duration::from_secs(5)).is_ok());
        }
    }
}

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

//! Immediate scheduler.

use std::thread;
use std::time::Duration;

use zrs_disposable::Disposable;

use super::timer::Timers;
use super::{RecurringWork, Schedule, Work, spent};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Immediate scheduler.
///
/// Work runs synchronously on the calling thread, so by the time a method
/// returns, the work has already executed and the returned disposable is
/// spent. Delayed work parks the calling thread until the deadline.
///
/// Recurring work is the exception: the calling thread cannot be parked
/// indefinitely, so it is hosted on the shared [`Timers`] thread and remains
/// cancellable like any other timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Schedule for Immediate {
    /// Executes the work synchronously.
    fn schedule(&self, work: Work) -> Disposable {
        work();
        spent()
    }

    /// Parks the calling thread, then executes the work.
    fn schedule_after(&self, delay: Duration, work: Work) -> Disposable {
        thread::sleep(delay);
        work();
        spent()
    }

    /// Hosts the recurring work on the shared timer thread.
    fn schedule_recurring(
        &self,
        interval: Duration,
        work: RecurringWork,
    ) -> Disposable {
        Timers::shared().every(interval, work)
    }

    /// Returns whether the scheduler executes work in FIFO order.
    #[inline]
    fn is_serial(&self) -> bool {
        true
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod schedule {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use crate::Scheduler;

        #[test]
        fn handles_synchronous_execution() {
            let scheduler = Scheduler::immediate();

            // Work must have run by the time the method returns
            let ran = Arc::new(AtomicBool::new(false));
            let disposable = scheduler.schedule({
                let ran = Arc::clone(&ran);
                move || ran.store(true, Ordering::SeqCst)
            });
            assert!(ran.load(Ordering::SeqCst));
            assert!(disposable.is_disposed());
        }
    }
}

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

//! Scheduler.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use zrs_disposable::Disposable;

mod background;
mod immediate;
mod serial;
pub mod timer;

pub use background::Background;
pub use immediate::Immediate;
pub use serial::Serial;

use timer::Timers;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Scheduling behavior.
///
/// This trait is the seam between the cheap [`Scheduler`] handle and the
/// execution context it dispatches onto. All scheduled work is cancellable:
/// disposing the returned disposable prevents the work from starting if it
/// has not yet begun, and is best effort otherwise.
pub trait Schedule: Send + Sync {
    /// Schedules work for execution as soon as possible.
    fn schedule(&self, work: Work) -> Disposable;

    /// Schedules work for execution no earlier than after the given delay.
    ///
    /// Late firing is permitted; the work stays cancellable until execution
    /// begins.
    fn schedule_after(&self, delay: Duration, work: Work) -> Disposable;

    /// Schedules work for repeated execution with the given interval.
    ///
    /// Periods are measured from the nominal deadline, not from the end of
    /// the previous run, so execution time does not skew the cadence. Ticks
    /// are never coalesced: a scheduler that falls behind fires the missed
    /// ticks in quick succession.
    fn schedule_recurring(
        &self,
        interval: Duration,
        work: RecurringWork,
    ) -> Disposable;

    /// Returns whether the scheduler executes work in FIFO order.
    fn is_serial(&self) -> bool;

    /// Tears the scheduler down, joining any threads it owns.
    fn shutdown(&self) {}
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Scheduler.
///
/// Schedulers are cheap clonable handles to a [`Schedule`] implementation,
/// which allows operators to capture them in per-subscription closures
/// without borrowing issues.
///
/// # Examples
///
/// ```
/// use zrs_scheduler::Scheduler;
///
/// // Schedule work on the calling thread
/// let scheduler = Scheduler::immediate();
/// scheduler.schedule(|| println!("Work"));
/// ```
#[derive(Clone)]
pub struct Scheduler {
    /// Shared scheduling behavior.
    inner: Arc<dyn Schedule>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Scheduler {
    /// Creates a scheduler from scheduling behavior.
    #[must_use]
    pub fn new<S>(inner: S) -> Self
    where
        S: Schedule + 'static,
    {
        Self { inner: Arc::new(inner) }
    }

    /// Returns the immediate scheduler.
    ///
    /// Work runs synchronously on the calling thread. Delayed work parks the
    /// calling thread until the deadline; recurring work is hosted on the
    /// shared timer thread, as the calling thread cannot be parked
    /// indefinitely.
    #[must_use]
    pub fn immediate() -> Self {
        static IMMEDIATE: OnceLock<Scheduler> = OnceLock::new();
        IMMEDIATE.get_or_init(|| Self::new(Immediate)).clone()
    }

    /// Returns the background scheduler.
    ///
    /// Work is dispatched onto a process-wide worker pool, which initialises
    /// on first use. This scheduler is not serial: independently scheduled
    /// work may execute in any order.
    #[must_use]
    pub fn background() -> Self {
        background().clone()
    }

    /// Returns the main scheduler.
    ///
    /// Work is serialised in FIFO order on one dedicated thread, which
    /// initialises on first use. Hosts that own a UI context should drain
    /// this scheduler's work onto it instead.
    #[must_use]
    pub fn main() -> Self {
        main().clone()
    }

    /// Schedules work for execution as soon as possible.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all)
    )]
    pub fn schedule<F>(&self, work: F) -> Disposable
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.schedule(Box::new(work))
    }

    /// Schedules work for execution no earlier than after the given delay.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(delay = ?delay))
    )]
    pub fn schedule_after<F>(&self, delay: Duration, work: F) -> Disposable
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.schedule_after(delay, Box::new(work))
    }

    /// Schedules work for repeated execution with the given interval.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(interval = ?interval))
    )]
    pub fn schedule_recurring<F>(
        &self,
        interval: Duration,
        work: F,
    ) -> Disposable
    where
        F: FnMut() + Send + 'static,
    {
        self.inner.schedule_recurring(interval, Box::new(work))
    }

    /// Returns whether the scheduler executes work in FIFO order.
    #[inline]
    #[must_use]
    pub fn is_serial(&self) -> bool {
        self.inner.is_serial()
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Tears down the process-wide schedulers.
///
/// This function should be called once on process exit. It joins the main
/// scheduler thread, drains and joins the background worker pool, and stops
/// the shared timer thread, dropping timers that have not yet fired. Named
/// schedulers acquired after teardown silently drop all scheduled work.
pub fn shutdown() {
    if let Some(scheduler) = MAIN.get() {
        scheduler.inner.shutdown();
    }
    if let Some(scheduler) = BACKGROUND.get() {
        scheduler.inner.shutdown();
    }
    Timers::shutdown_shared();
}

/// Returns the process-wide background scheduler.
fn background() -> &'static Scheduler {
    BACKGROUND.get_or_init(|| Scheduler::new(Background::new()))
}

/// Returns the process-wide main scheduler.
fn main() -> &'static Scheduler {
    MAIN.get_or_init(|| Scheduler::new(Serial::new("zrs/main")))
}

/// Returns a disposable for work that can no longer be cancelled.
pub(crate) fn spent() -> Disposable {
    let disposable = Disposable::new_empty();
    disposable.dispose();
    disposable
}

// ----------------------------------------------------------------------------
// Statics
// ----------------------------------------------------------------------------

/// Process-wide background scheduler.
static BACKGROUND: OnceLock<Scheduler> = OnceLock::new();

/// Process-wide main scheduler.
static MAIN: OnceLock<Scheduler> = OnceLock::new();

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Debug for Scheduler {
    /// Formats the scheduler for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("serial", &self.is_serial())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Unit of schedulable work.
pub type Work = Box<dyn FnOnce() + Send>;

/// Unit of recurring schedulable work.
pub type RecurringWork = Box<dyn FnMut() + Send>;

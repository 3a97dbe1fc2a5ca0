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

//! Timer service.

use crossbeam::channel::{Receiver, Sender, at, never, unbounded};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::OnceLock;
use std::thread::{Builder, JoinHandle};
use std::time::{Duration, Instant};

use zrs_disposable::Disposable;
use zrs_lock::Lock;

use super::{RecurringWork, Work};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Timer service.
///
/// This service manages all delayed and recurring work on a single dedicated
/// thread, ordered by deadline in a queue. The thread blocks on a channel of
/// incoming timers and an `at(deadline)` receiver for the earliest pending
/// timer, whichever is ready first.
///
/// Timer work runs inline on the timer thread, which makes every consumer of
/// this service serial and order-preserving: timers with the same deadline
/// fire in submission order. Work that takes long should re-schedule onto a
/// worker pool, as it would otherwise delay later timers.
///
/// Recurring timers fire at `deadline + interval`, so execution time does
/// not skew the cadence. Ticks are never coalesced: when the timer thread
/// falls behind, the missed ticks fire in quick succession.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use zrs_scheduler::Timers;
///
/// // Schedule a timer on the shared service
/// let timers = Timers::shared();
/// timers.once(Instant::now() + Duration::from_millis(10), || {
///     println!("Fired");
/// });
/// ```
#[derive(Debug)]
pub struct Timers {
    /// Timer thread state.
    state: Lock<Option<State>>,
}

// ----------------------------------------------------------------------------

/// Timer thread state.
#[derive(Debug)]
struct State {
    /// Timer submission sender.
    sender: Sender<Pending>,
    /// Join handle of the timer thread.
    thread: JoinHandle<()>,
}

/// Pending timer.
struct Pending {
    /// Deadline at which the timer is due.
    due: Instant,
    /// Submission sequence number.
    seq: u64,
    /// Timer behavior.
    kind: Kind,
    /// Cancellation token.
    token: Disposable,
}

/// Timer behavior.
enum Kind {
    /// One-shot timer.
    Once(Work),
    /// Recurring timer.
    Every(Duration, RecurringWork),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Timers {
    /// Creates a timer service.
    ///
    /// The timer thread is spawned immediately before the method returns.
    /// Most callers should use [`Timers::shared`] instead, which returns the
    /// process-wide service all named schedulers dispatch onto.
    ///
    /// # Panics
    ///
    /// Panics if thread creation fails.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded::<Pending>();

        // We deliberately use unwrap here, as the capability to spawn
        // threads is a fundamental requirement of the timer service
        let thread = Builder::new()
            .name("zrs/timer".into())
            .spawn(move || Self::run(&receiver))
            .unwrap();

        Self {
            state: Lock::new(Some(State { sender, thread })),
        }
    }

    /// Returns the process-wide timer service.
    pub fn shared() -> &'static Self {
        TIMERS.get_or_init(Self::new)
    }

    /// Schedules a one-shot timer for the given deadline.
    ///
    /// Disposing the returned disposable cancels the timer if it has not yet
    /// fired. A deadline in the past fires as soon as the timer thread gets
    /// to it.
    pub fn once<F>(&self, deadline: Instant, work: F) -> Disposable
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(deadline, Kind::Once(Box::new(work)))
    }

    /// Schedules a recurring timer with the given interval.
    ///
    /// The first tick fires after one interval. Disposing the returned
    /// disposable cancels the current and all future ticks.
    pub fn every<F>(&self, interval: Duration, work: F) -> Disposable
    where
        F: FnMut() + Send + 'static,
    {
        self.submit(
            Instant::now() + interval,
            Kind::Every(interval, Box::new(work)),
        )
    }

    /// Tears the timer service down, joining the timer thread.
    ///
    /// Timers that have not yet fired are dropped. Submissions after
    /// teardown return an already disposed disposable.
    pub fn shutdown(&self) {
        let state = self.state.lock().take();
        if let Some(state) = state {
            drop(state.sender);
            let _ = state.thread.join();
        }
    }

    /// Tears down the process-wide timer service, if initialised.
    pub(crate) fn shutdown_shared() {
        if let Some(timers) = TIMERS.get() {
            timers.shutdown();
        }
    }

    /// Submits a timer.
    fn submit(&self, due: Instant, kind: Kind) -> Disposable {
        let token = Disposable::new_empty();
        let pending = Pending {
            due,
            seq: 0,
            kind,
            token: token.clone(),
        };

        // Reject submissions after teardown
        let state = self.state.lock();
        match state.as_ref() {
            Some(state) if state.sender.send(pending).is_ok() => token,
            _ => {
                token.dispose();
                token
            }
        }
    }

    /// Runs the timer loop.
    ///
    /// The loop blocks on the submission channel and on an `at` receiver for
    /// the earliest pending timer, and exits when the channel disconnects.
    /// Sequence numbers are assigned on arrival, so timers with the same
    /// deadline fire in submission order.
    fn run(receiver: &Receiver<Pending>) {
        let mut queue = BinaryHeap::<Pending>::new();
        let mut seq = 0_u64;
        loop {
            let wakeup =
                queue.peek().map_or_else(never, |pending| at(pending.due));

            // Wait for a submission or the earliest deadline
            crossbeam::select! {
                recv(receiver) -> message => match message {
                    Ok(mut pending) => {
                        seq += 1;
                        pending.seq = seq;
                        queue.push(pending);
                    }
                    Err(_) => break,
                },
                recv(wakeup) -> _ => {
                    if let Some(pending) = queue.pop() {
                        if let Some(next) = pending.fire() {
                            queue.push(next);
                        }
                    }
                }
            }
        }
    }
}

impl Pending {
    /// Fires the timer, returning its successor, if recurring.
    ///
    /// Cancelled timers are dropped without running. Recurring timers are
    /// re-queued at `due + interval`, keeping the nominal cadence.
    fn fire(self) -> Option<Self> {
        let Self { due, seq, kind, token } = self;
        if token.is_disposed() {
            return None;
        }
        match kind {
            Kind::Once(work) => {
                work();
                None
            }
            Kind::Every(interval, mut work) => {
                work();

                // Cancellation from within the work must stick
                if token.is_disposed() {
                    return None;
                }
                Some(Self {
                    due: due + interval,
                    seq,
                    kind: Kind::Every(interval, work),
                    token,
                })
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Statics
// ----------------------------------------------------------------------------

/// Process-wide timer service.
static TIMERS: OnceLock<Timers> = OnceLock::new();

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Timers {
    /// Creates a timer service.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------

impl Ord for Pending {
    /// Compares two pending timers by deadline, inverted.
    ///
    /// The queue is a max-heap, so the comparison is inverted to pop the
    /// earliest deadline first, with the sequence number breaking ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    /// Compares two pending timers by deadline, inverted.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    /// Compares two pending timers for equality.
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod once {
        use std::time::{Duration, Instant};

        use crossbeam::channel::bounded;

        use crate::Timers;

        #[test]
        fn handles_deadline() {
            let timers = Timers::new();
            let (sender, receiver) = bounded(1);

            // Timer must fire no earlier than the deadline
            let start = Instant::now();
            timers.once(start + Duration::from_millis(20), move || {
                sender.send(Instant::now()).unwrap();
            });
            let fired = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(fired - start >= Duration::from_millis(20));
        }

        #[test]
        fn handles_cancellation() {
            let timers = Timers::new();
            let (sender, receiver) = bounded(1);

            // Cancelled timers must not fire
            let disposable = timers
                .once(Instant::now() + Duration::from_millis(50), move || {
                    sender.send(()).unwrap();
                });
            disposable.dispose();
            assert!(
                receiver.recv_timeout(Duration::from_millis(200)).is_err()
            );
        }

        #[test]
        fn handles_submission_order() {
            let timers = Timers::new();
            let (sender, receiver) = bounded(2);

            // Timers with the same deadline fire in submission order
            let deadline = Instant::now() + Duration::from_millis(20);
            for index in 0..2 {
                let sender = sender.clone();
                timers.once(deadline, move || {
                    sender.send(index).unwrap();
                });
            }
            let order: Vec<_> = receiver.iter().take(2).collect();
            assert_eq!(order, vec![0, 1]);
        }
    }

    mod every {
        use std::time::Duration;

        use crossbeam::channel::unbounded;

        use crate::Timers;

        #[test]
        fn handles_ticks() {
            let timers = Timers::new();
            let (sender, receiver) = unbounded();

            // Recurring timers must keep firing until disposed
            let disposable =
                timers.every(Duration::from_millis(10), move || {
                    let _ = sender.send(());
                });
            let ticks = receiver.iter().take(3).count();
            disposable.dispose();
            assert_eq!(ticks, 3);
        }
    }
}

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

//! Constructors.

use std::time::Duration;

use zrs_disposable::Disposable;
use zrs_scheduler::Scheduler;

use crate::event::Error;
use crate::subject::Multicast;
use crate::subject::replay::ReplaySubject;
use crate::subscriber::Subscriber;

use super::Subscribable;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a subscribable that emits the given value, then completes.
    ///
    /// Both events are sent synchronously on subscription.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Create subscribable and read its only value
    /// let subscribable = Subscribable::just(42);
    /// assert_eq!(subscribable.first(), Some(42));
    /// ```
    #[must_use]
    pub fn just(value: T) -> Self {
        Self::create(move |subscriber| {
            subscriber.send_next(value.clone());
            subscriber.send_completed();
            Disposable::new_empty()
        })
    }

    /// Creates a subscribable that emits the given values, then completes.
    ///
    /// The values are sent synchronously on subscription, checking for
    /// disposal before each send, so a subscriber can cut the sequence
    /// short.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        Self::create(move |subscriber| {
            for value in &values {
                if !subscriber.is_active() {
                    return Disposable::new_empty();
                }
                subscriber.send_next(value.clone());
            }
            subscriber.send_completed();
            Disposable::new_empty()
        })
    }

    /// Creates a subscribable that completes without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Self::create(|subscriber| {
            subscriber.send_completed();
            Disposable::new_empty()
        })
    }

    /// Creates a subscribable that errors without emitting.
    #[must_use]
    pub fn error(error: Error) -> Self {
        Self::create(move |subscriber| {
            subscriber.send_error(error.clone());
            Disposable::new_empty()
        })
    }

    /// Creates a subscribable that never emits and never terminates.
    ///
    /// Subscriptions only end through disposal.
    #[must_use]
    pub fn never() -> Self {
        Self::create(|_| Disposable::new_empty())
    }

    /// Creates a subscribable that defers producer creation.
    ///
    /// On each subscription, the factory is invoked to obtain a fresh source
    /// to subscribe to, which turns anything the factory captures into a
    /// cold sequence.
    #[must_use]
    pub fn defer<F>(factory: F) -> Self
    where
        F: Fn() -> Subscribable<T> + Send + Sync + 'static,
    {
        Self::create(move |subscriber| factory().subscribe(subscriber))
    }

    /// Creates a subscribable generating values from their predecessor.
    ///
    /// On the given scheduler, `start` is emitted first; after each send
    /// returns, the generator is asked for the successor of the value just
    /// sent, emitting it if `Some` and completing if `None`. Generation is
    /// demand-paced: the subscriber receives each value and has the chance
    /// to dispose of the subscription before the next value is produced, as
    /// disposal is checked on every iteration.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_scheduler::Scheduler;
    /// use zrs_stream::Subscribable;
    ///
    /// // Generate a bounded sequence
    /// let subscribable = Subscribable::generator(
    ///     &Scheduler::immediate(),
    ///     0,
    ///     |x| if *x < 5 { Some(x + 1) } else { None },
    /// );
    /// assert_eq!(subscribable.to_array(), vec![0, 1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn generator<F>(scheduler: &Scheduler, start: T, next: F) -> Self
    where
        F: Fn(&T) -> Option<T> + Clone + Send + Sync + 'static,
    {
        let scheduler = scheduler.clone();
        Self::create(move |subscriber| {
            let subscriber = subscriber.clone();
            let next = next.clone();
            let start = start.clone();
            scheduler.schedule(move || {
                let mut current = start;
                loop {
                    if !subscriber.is_active() {
                        return;
                    }
                    subscriber.send_next(current.clone());
                    if !subscriber.is_active() {
                        return;
                    }
                    match next(&current) {
                        Some(value) => current = value,
                        None => {
                            subscriber.send_completed();
                            return;
                        }
                    }
                }
            })
        })
    }

    /// Creates a subscribable repeatedly emitting the same value.
    ///
    /// This is the degenerate generator without a successor function: the
    /// start value is emitted over and over on the given scheduler until the
    /// subscription is disposed.
    #[must_use]
    pub fn generator_repeating(scheduler: &Scheduler, start: T) -> Self {
        Self::generator(scheduler, start, |value| Some(value.clone()))
    }

    /// Creates a subscribable running a fallible block once.
    ///
    /// The block is scheduled immediately, not on subscription, and its
    /// outcome is replayed to all current and future subscribers: the value
    /// followed by completion on success, or the error on failure. This is
    /// the one hot constructor.
    #[must_use]
    pub fn start<F>(scheduler: &Scheduler, block: F) -> Self
    where
        F: FnOnce() -> Result<T, Error> + Send + 'static,
    {
        let subject = ReplaySubject::unbounded();
        let sink = subject.subscriber();
        scheduler.schedule(move || match block() {
            Ok(value) => {
                sink.send_next(value);
                sink.send_completed();
            }
            Err(error) => sink.send_error(error),
        });
        Self::create(move |subscriber| subject.attach(subscriber))
    }
}

impl Subscribable<()> {
    /// Creates a subscribable ticking with the given period.
    ///
    /// Each subscription arms its own recurring timer on the background
    /// scheduler, with the first tick after one full period. The sequence is
    /// infinite; it ends through disposal, most commonly via [`take`][].
    ///
    /// [`take`]: Subscribable::take
    #[must_use]
    pub fn interval(period: Duration) -> Self {
        Self::create(move |subscriber: &Subscriber<()>| {
            let subscriber = subscriber.clone();
            Scheduler::background()
                .schedule_recurring(period, move || subscriber.send_next(()))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod just {
        use crate::Subscribable;

        #[test]
        fn handles_value() {
            assert_eq!(Subscribable::just(42).first(), Some(42));
        }
    }

    mod from_values {
        use crate::Subscribable;

        #[test]
        fn handles_order() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3]);
            assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
        }

        #[test]
        fn handles_empty_input() {
            let subscribable = Subscribable::<i32>::from_values(vec![]);
            assert_eq!(subscribable.to_array(), Vec::<i32>::new());
        }
    }

    mod empty {
        use crate::Subscribable;

        #[test]
        fn handles_completion() {
            assert_eq!(Subscribable::<i32>::empty().to_array(), vec![]);
        }
    }

    mod error {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_failure() {
            let subscribable = Subscribable::<i32>::error(Error::failed("x"));
            assert_eq!(
                subscribable.try_first(), // fmt
                Err(Error::failed("x"))
            );
        }
    }

    mod defer {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::Subscribable;

        #[test]
        fn handles_fresh_sources() {
            let calls = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::defer({
                let calls = Arc::clone(&calls);
                move || {
                    let call = calls.fetch_add(1, Ordering::SeqCst);
                    Subscribable::just(call)
                }
            });

            // The factory must run once per subscription
            assert_eq!(subscribable.first(), Some(0));
            assert_eq!(subscribable.first(), Some(1));
        }
    }

    mod generator {
        use zrs_scheduler::Scheduler;

        use crate::Subscribable;

        #[test]
        fn handles_bounded_sequence() {
            let subscribable = Subscribable::generator(
                &Scheduler::immediate(),
                0,
                |x| if *x < 5 { Some(x + 1) } else { None },
            );
            assert_eq!(subscribable.to_array(), vec![0, 1, 2, 3, 4, 5]);
        }

        #[test]
        fn handles_demand_pacing() {
            let subscribable = Subscribable::generator(
                &Scheduler::immediate(),
                0_u64,
                |x| Some(x + 1),
            );

            // Disposal must end the otherwise infinite sequence
            assert_eq!(subscribable.take(4).to_array(), vec![0, 1, 2, 3]);
        }
    }

    mod start {
        use zrs_scheduler::Scheduler;

        use crate::{Error, Subscribable};

        #[test]
        fn handles_success() {
            let subscribable =
                Subscribable::start(&Scheduler::background(), || Ok(42));
            assert_eq!(subscribable.first(), Some(42));
        }

        #[test]
        fn handles_failure() {
            let subscribable = Subscribable::<i32>::start(
                &Scheduler::background(),
                || Err(Error::failed("boom")),
            );
            assert_eq!(subscribable.try_first(), Err(Error::failed("boom")));
        }
    }

    mod interval {
        use std::time::{Duration, Instant};

        use crate::Subscribable;

        #[test]
        fn handles_ticks() {
            let start = Instant::now();
            let ticks = Subscribable::interval(Duration::from_millis(10))
                .take(3)
                .to_array();

            // Three ticks need at least three full periods
            assert_eq!(ticks.len(), 3);
            assert!(start.elapsed() >= Duration::from_millis(30));
        }
    }
}

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

//! Aggregate operator.

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Folds all values into an accumulator, emitted on completion.
    ///
    /// Only the final accumulator is emitted, right before the completion is
    /// forwarded. Use [`scan`][] to observe every intermediate step.
    ///
    /// [`scan`]: Subscribable::scan
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Fold into a sum
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3]);
    /// assert_eq!(subscribable.aggregate(0, |sum, x| sum + x).first(), Some(6));
    /// ```
    #[must_use]
    pub fn aggregate<U, F>(&self, start: U, combine: F) -> Subscribable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Clone + Send + Sync + 'static,
    {
        let start = move || start.clone();
        self.aggregate_with_factory(start, combine)
    }

    /// Folds all values into an accumulator created per subscription.
    ///
    /// The factory is invoked once per subscription to obtain a fresh start
    /// value, which matters for accumulators with interior state.
    #[must_use]
    pub fn aggregate_with_factory<U, S, F>(
        &self,
        factory: S,
        combine: F,
    ) -> Subscribable<U>
    where
        U: Clone + Send + 'static,
        S: Fn() -> U + Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let combine = combine.clone();
            let mut running = Some(factory());
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if let Some(current) = running.take() {
                        running = Some(combine(current, value));
                    }
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => {
                    if let Some(current) = running.take() {
                        downstream.send_next(current);
                    }
                    downstream.send_completed();
                }
            }))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod aggregate {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_final_value() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3]);
            assert_eq!(
                subscribable.aggregate(0, |sum, x| sum + x).first(),
                Some(6)
            );
        }

        #[test]
        fn handles_error_without_emission() {
            let subscribable = Subscribable::from_values(vec![1, 2])
                .concat_with(&Subscribable::error(Error::failed("x")));

            // Errors discard the accumulator
            assert_eq!(
                subscribable.aggregate(0, |sum, x| sum + x).try_first(),
                Err(Error::failed("x"))
            );
        }
    }

    mod aggregate_with_factory {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::Subscribable;

        #[test]
        fn handles_fresh_start_per_subscription() {
            let calls = Arc::new(AtomicUsize::new(0));
            let aggregated = Subscribable::from_values(vec![1, 2, 3])
                .aggregate_with_factory(
                    {
                        let calls = Arc::clone(&calls);
                        move || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            0
                        }
                    },
                    |sum, x| sum + x,
                );

            // The factory must run once per subscription
            assert_eq!(aggregated.first(), Some(6));
            assert_eq!(aggregated.first(), Some(6));
            assert_eq!(calls.load(Ordering::SeqCst), 2);
        }
    }
}

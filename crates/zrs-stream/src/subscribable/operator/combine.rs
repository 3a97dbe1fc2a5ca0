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

//! Combine operators.

use std::sync::Arc;

use zrs_disposable::{CompositeDisposable, Disposable};
use zrs_lock::Lock;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Combine state.
struct State<T> {
    /// Latest value per source.
    latest: Vec<Option<T>>,
    /// Number of sources that have not yet completed.
    remaining: usize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Combines the latest values of all given sources.
    ///
    /// Once every source has emitted at least once, each further value from
    /// any source emits the vector of latest values, in source order. The
    /// result completes when all sources completed, and errors on the first
    /// upstream error.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Combine three synchronous sources
    /// let subscribable = Subscribable::combine_latest(vec![
    ///     Subscribable::just(1),
    ///     Subscribable::just(2),
    ///     Subscribable::just(3),
    /// ]);
    /// assert_eq!(subscribable.first(), Some(vec![1, 2, 3]));
    /// ```
    #[must_use]
    pub fn combine_latest(
        sources: Vec<Subscribable<T>>,
    ) -> Subscribable<Vec<T>> {
        Subscribable::create(move |subscriber| {
            if sources.is_empty() {
                subscriber.send_completed();
                return Disposable::new_empty();
            }
            let state = Arc::new(Lock::new(State {
                latest: vec![None; sources.len()],
                remaining: sources.len(),
            }));
            let composite = CompositeDisposable::new();
            for (index, source) in sources.iter().enumerate() {
                let downstream = subscriber.clone();
                let state = Arc::clone(&state);
                composite.add(source.subscribe(&Subscriber::new(
                    move |event| match event {
                        Event::Next(value) => {
                            let values = {
                                let mut state = state.lock();
                                state.latest[index] = Some(value);
                                state
                                    .latest
                                    .iter()
                                    .cloned()
                                    .collect::<Option<Vec<T>>>()
                            };

                            // Emit only once every source has a value
                            if let Some(values) = values {
                                downstream.send_next(values);
                            }
                        }
                        Event::Error(error) => downstream.send_error(error),
                        Event::Completed => {
                            let done = {
                                let mut state = state.lock();
                                state.remaining -= 1;
                                state.remaining == 0
                            };
                            if done {
                                downstream.send_completed();
                            }
                        }
                    },
                )));
            }
            composite.to_disposable()
        })
    }

    /// Combines the latest values of all given sources, reduced.
    ///
    /// Behaves like [`Subscribable::combine_latest`], but each combination
    /// is passed through the reduce function before being emitted.
    #[must_use]
    pub fn combine_latest_with<U, F>(
        sources: Vec<Subscribable<T>>,
        reduce: F,
    ) -> Subscribable<U>
    where
        U: Clone + Send + 'static,
        F: Fn(&[T]) -> U + Clone + Send + Sync + 'static,
    {
        Self::combine_latest(sources).select(move |values| reduce(&values))
    }

    /// Emits a unit value once every source has emitted, then completes.
    ///
    /// Errors from any source propagate before the unit value was emitted.
    #[must_use]
    pub fn when_all(sources: Vec<Subscribable<T>>) -> Subscribable<()> {
        Self::combine_latest(sources).take(1).select(|_| ())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod combine_latest {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::{Subject, Subscribable};

        #[test]
        fn handles_synchronous_sources() {
            let subscribable = Subscribable::combine_latest(vec![
                Subscribable::just(1),
                Subscribable::just(2),
                Subscribable::just(3),
            ]);
            assert_eq!(subscribable.first(), Some(vec![1, 2, 3]));
        }

        #[test]
        fn handles_latest_values() {
            let a = Subject::new();
            let b = Subject::new();
            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                Subscribable::combine_latest(vec![
                    a.to_subscribable(),
                    b.to_subscribable(),
                ])
                .subscribe_next(move |combined| {
                    values.lock().push(combined);
                });
            }

            // Nothing is emitted until every source has a value
            a.send_next(1);
            assert!(values.lock().is_empty());
            b.send_next(10);
            a.send_next(2);
            assert_eq!(*values.lock(), vec![vec![1, 10], vec![2, 10]]);
        }
    }

    mod when_all {
        use crate::Subscribable;

        #[test]
        fn handles_unit_emission() {
            let subscribable = Subscribable::when_all(vec![
                Subscribable::just(1),
                Subscribable::just(2),
            ]);
            assert_eq!(subscribable.to_array(), vec![()]);
        }
    }
}

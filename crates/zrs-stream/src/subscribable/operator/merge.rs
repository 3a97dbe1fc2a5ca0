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

//! Merge operators.

use std::sync::Arc;

use zrs_disposable::CompositeDisposable;
use zrs_lock::Lock;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Merge state.
struct State {
    /// Whether the outer sequence completed.
    outer_done: bool,
    /// Number of live inner subscriptions.
    active: usize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Interleaves the values of all given sources.
    ///
    /// The result completes once every source completed, and errors as soon
    /// as any source errors. Values from different sources may interleave in
    /// any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Merge two synchronous sources
    /// let subscribable = Subscribable::merge(vec![
    ///     Subscribable::from_values(vec![1, 2]),
    ///     Subscribable::from_values(vec![3]),
    /// ]);
    /// assert_eq!(subscribable.to_array().len(), 3);
    /// ```
    #[must_use]
    pub fn merge(sources: Vec<Subscribable<T>>) -> Subscribable<T> {
        Subscribable::from_values(sources).merge_all()
    }

    /// Interleaves the values of this and the given source.
    #[must_use]
    pub fn merge_with(&self, other: &Subscribable<T>) -> Subscribable<T> {
        Self::merge(vec![self.clone(), other.clone()])
    }
}

impl<T> Subscribable<Subscribable<T>>
where
    T: Clone + Send + 'static,
{
    /// Flattens a sequence of subscribables with unbounded concurrency.
    ///
    /// Every inner subscribable is subscribed as soon as it arrives, and
    /// their values are interleaved downstream. The result completes once
    /// the outer sequence and all inner subscribables completed; the first
    /// error from any of them terminates the result.
    #[must_use]
    pub fn merge_all(&self) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let state = Arc::new(Lock::new(State {
                outer_done: false,
                active: 0,
            }));
            let composite = CompositeDisposable::new();

            let outer = {
                let composite = composite.clone();
                let state = Arc::clone(&state);
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event: Event<Subscribable<T>>| match event {
                    Event::Next(inner) => {
                        state.lock().active += 1;
                        let downstream = downstream.clone();
                        let state = Arc::clone(&state);
                        composite.add(inner.subscribe(&Subscriber::new(
                            move |event: Event<T>| match event {
                                Event::Next(value) => {
                                    downstream.send_next(value);
                                }
                                Event::Error(error) => {
                                    downstream.send_error(error);
                                }
                                Event::Completed => {
                                    let done = {
                                        let mut state = state.lock();
                                        state.active -= 1;
                                        state.outer_done && state.active == 0
                                    };
                                    if done {
                                        downstream.send_completed();
                                    }
                                }
                            },
                        )));
                    }
                    Event::Error(error) => downstream.send_error(error),
                    Event::Completed => {
                        let done = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            state.active == 0
                        };
                        if done {
                            downstream.send_completed();
                        }
                    }
                }))
            };
            composite.add(outer);
            composite.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod merge {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_interleaving() {
            let subscribable = Subscribable::merge(vec![
                Subscribable::from_values(vec![1, 2]),
                Subscribable::from_values(vec![3]),
            ]);
            let mut values = subscribable.to_array();
            values.sort_unstable();
            assert_eq!(values, vec![1, 2, 3]);
        }

        #[test]
        fn handles_completion_after_all() {
            let subscribable = Subscribable::merge(vec![
                Subscribable::<i32>::empty(),
                Subscribable::from_values(vec![1]),
            ]);
            assert_eq!(subscribable.to_array(), vec![1]);
        }

        #[test]
        fn handles_first_error() {
            let subscribable = Subscribable::merge(vec![
                Subscribable::just(1),
                Subscribable::error(Error::failed("x")),
            ]);
            assert_eq!(
                subscribable.try_to_array(),
                Err(Error::failed("x"))
            );
        }

        #[test]
        fn handles_empty_sources() {
            let subscribable = Subscribable::<i32>::merge(vec![]);
            assert_eq!(subscribable.to_array(), Vec::<i32>::new());
        }
    }

    mod merge_all {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use zrs_lock::Lock;

        use crate::{Subject, Subscribable};

        #[test]
        fn handles_late_inner_completion() {
            let inner = Subject::new();
            let subscribable = Subscribable::from_values(vec![
                inner.to_subscribable(),
                Subscribable::just(1),
            ])
            .merge_all();

            let values = Arc::new(Lock::new(Vec::new()));
            let completed = Arc::new(AtomicBool::new(false));
            {
                let values = Arc::clone(&values);
                let completed = Arc::clone(&completed);
                subscribable.subscribe_with(
                    move |value| values.lock().push(value),
                    |_| {},
                    move || completed.store(true, Ordering::SeqCst),
                );
            }

            // The result only completes once the last inner does
            assert!(!completed.load(Ordering::SeqCst));
            inner.send_next(2);
            inner.send_completed();
            assert!(completed.load(Ordering::SeqCst));
            assert_eq!(*values.lock(), vec![1, 2]);
        }
    }
}

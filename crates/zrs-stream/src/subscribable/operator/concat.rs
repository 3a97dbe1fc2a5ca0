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

//! Concat operators.

use std::collections::VecDeque;
use std::sync::Arc;

use zrs_disposable::CompositeDisposable;
use zrs_lock::Lock;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

use super::resubscribe::Attempts;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Concat state.
struct State<T> {
    /// Inner subscribables waiting for their turn.
    queue: VecDeque<Subscribable<T>>,
    /// Whether the outer sequence completed.
    outer_done: bool,
    /// Whether an inner subscription is live.
    inner_active: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Chains the given sources one after another.
    ///
    /// Each source is only subscribed once its predecessor completed, so the
    /// relative order of all values is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Chain two sources
    /// let subscribable = Subscribable::concat(vec![
    ///     Subscribable::from_values(vec![1, 2]),
    ///     Subscribable::from_values(vec![3]),
    /// ]);
    /// assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn concat(sources: Vec<Subscribable<T>>) -> Subscribable<T> {
        Subscribable::from_values(sources).concat_all()
    }

    /// Chains the given source after this one.
    #[must_use]
    pub fn concat_with(&self, other: &Subscribable<T>) -> Subscribable<T> {
        Self::concat(vec![self.clone(), other.clone()])
    }
}

impl<T> Subscribable<Subscribable<T>>
where
    T: Clone + Send + 'static,
{
    /// Flattens a sequence of subscribables one at a time.
    ///
    /// Inner subscribables are queued and subscribed serially: the next one
    /// starts only after the current one completed. The result completes
    /// once the outer sequence completed and the queue drained; any error
    /// terminates the result immediately.
    #[must_use]
    pub fn concat_all(&self) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let state = Arc::new(Lock::new(State {
                queue: VecDeque::new(),
                outer_done: false,
                inner_active: false,
            }));
            let attempts = Attempts::new();
            let composite = CompositeDisposable::new();

            let outer = {
                let state = Arc::clone(&state);
                let attempts = attempts.clone();
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event| match event {
                    Event::Next(inner) => {
                        state.lock().queue.push_back(inner);
                        drain(&state, &downstream, &attempts);
                    }
                    Event::Error(error) => downstream.send_error(error),
                    Event::Completed => {
                        state.lock().outer_done = true;
                        drain(&state, &downstream, &attempts);
                    }
                }))
            };
            composite.add(outer);
            composite.add(attempts.to_disposable());
            composite.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Subscribes the next queued inner subscribable, if idle.
///
/// Completion of an inner subscription re-enters this function, which is
/// what serialises the chain. The result completes once the outer sequence
/// is done and no inner subscription remains.
fn drain<T>(
    state: &Arc<Lock<State<T>>>,
    downstream: &Subscriber<T>,
    attempts: &Attempts,
) where
    T: Clone + Send + 'static,
{
    let inner = {
        let mut guard = state.lock();
        if guard.inner_active {
            return;
        }
        match guard.queue.pop_front() {
            Some(inner) => {
                guard.inner_active = true;
                inner
            }
            None => {
                if !guard.outer_done {
                    return;
                }
                drop(guard);
                downstream.send_completed();
                return;
            }
        }
    };

    let id = attempts.begin();
    let subscription = {
        let state = Arc::clone(state);
        let downstream = downstream.clone();
        let attempts = attempts.clone();
        inner.subscribe(&Subscriber::new(move |event| match event {
            Event::Next(value) => downstream.send_next(value),
            Event::Error(error) => downstream.send_error(error),
            Event::Completed => {
                state.lock().inner_active = false;
                drain(&state, &downstream, &attempts);
            }
        }))
    };
    attempts.store(id, subscription);
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod concat {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_order() {
            let subscribable = Subscribable::concat(vec![
                Subscribable::from_values(vec![1, 2]),
                Subscribable::from_values(vec![3, 4]),
            ]);
            assert_eq!(subscribable.to_array(), vec![1, 2, 3, 4]);
        }

        #[test]
        fn handles_error_propagation() {
            let subscribable = Subscribable::concat(vec![
                Subscribable::just(1),
                Subscribable::error(Error::failed("x")),
                Subscribable::just(2),
            ]);

            // The error terminates the chain
            assert_eq!(subscribable.to_array(), vec![1]);
            assert_eq!(
                subscribable.try_to_array(),
                Err(Error::failed("x"))
            );
        }
    }

    mod concat_all {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::{Subject, Subscribable};

        #[test]
        fn handles_serial_subscription() {
            let gate = Subject::new();
            let subscribable = Subscribable::from_values(vec![
                gate.to_subscribable(),
                Subscribable::just(9),
            ])
            .concat_all();

            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                subscribable.subscribe_next(move |value| {
                    values.lock().push(value);
                });
            }

            // The second inner must wait for the first to complete
            gate.send_next(1);
            assert_eq!(*values.lock(), vec![1]);
            gate.send_completed();
            assert_eq!(*values.lock(), vec![1, 9]);
        }
    }
}

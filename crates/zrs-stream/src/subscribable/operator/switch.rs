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

//! Switch operator.

use std::sync::Arc;

use zrs_disposable::{CompositeDisposable, SerialDisposable};
use zrs_lock::Lock;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Switch state.
struct State {
    /// Number of the newest inner subscription.
    epoch: u64,
    /// Whether the outer sequence completed.
    outer_done: bool,
    /// Whether the newest inner subscription is live.
    inner_active: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<Subscribable<T>>
where
    T: Clone + Send + 'static,
{
    /// Forwards values from the latest inner subscribable only.
    ///
    /// Each arriving inner subscribable replaces the previous one, whose
    /// subscription is disposed. The result completes once the outer
    /// sequence completed and the latest inner completed; errors from the
    /// outer sequence or the current inner terminate the result.
    #[must_use]
    pub fn switch(&self) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let state = Arc::new(Lock::new(State {
                epoch: 0,
                outer_done: false,
                inner_active: false,
            }));
            let serial = SerialDisposable::new();
            let composite = CompositeDisposable::new();

            let outer = {
                let state = Arc::clone(&state);
                let serial = serial.clone();
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event: Event<Subscribable<T>>| match event {
                    Event::Next(inner) => {
                        let id = {
                            let mut state = state.lock();
                            state.epoch += 1;
                            state.inner_active = true;
                            state.epoch
                        };
                        let subscription = {
                            let state = Arc::clone(&state);
                            let downstream = downstream.clone();
                            inner.subscribe(&Subscriber::new(move |event| {
                                match event {
                                    Event::Next(value) => {
                                        downstream.send_next(value);
                                    }
                                    Event::Error(error) => {
                                        downstream.send_error(error);
                                    }
                                    Event::Completed => {
                                        let done = {
                                            let mut state = state.lock();
                                            if state.epoch != id {
                                                return;
                                            }
                                            state.inner_active = false;
                                            state.outer_done
                                        };
                                        if done {
                                            downstream.send_completed();
                                        }
                                    }
                                }
                            }))
                        };

                        // Replacing disposes the previous inner subscription
                        if state.lock().epoch == id {
                            serial.set(subscription);
                        } else {
                            subscription.dispose();
                        }
                    }
                    Event::Error(error) => downstream.send_error(error),
                    Event::Completed => {
                        let done = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            !state.inner_active
                        };
                        if done {
                            downstream.send_completed();
                        }
                    }
                }))
            };
            composite.add(outer);
            composite.add(serial.to_disposable());
            composite.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod switch {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::{Subject, Subscribable};

        #[test]
        fn handles_latest_inner() {
            let outer = Subject::<Subscribable<i32>>::new();
            let first = Subject::new();
            let second = Subject::new();

            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                outer.to_subscribable().switch().subscribe_next(
                    move |value| {
                        values.lock().push(value);
                    },
                );
            }

            // Only the latest inner may deliver
            outer.send_next(first.to_subscribable());
            first.send_next(1);
            outer.send_next(second.to_subscribable());
            first.send_next(2);
            second.send_next(3);
            assert_eq!(*values.lock(), vec![1, 3]);
        }

        #[test]
        fn handles_completion() {
            let outer = Subject::<Subscribable<i32>>::new();
            let inner = Subject::new();

            let completed = Arc::new(Lock::new(false));
            {
                let completed = Arc::clone(&completed);
                outer.to_subscribable().switch().subscribe_completed(
                    move || {
                        *completed.lock() = true;
                    },
                );
            }

            // Both the outer and the current inner must complete
            outer.send_next(inner.to_subscribable());
            outer.send_completed();
            assert!(!*completed.lock());
            inner.send_completed();
            assert!(*completed.lock());
        }
    }
}

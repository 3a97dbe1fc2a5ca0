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

//! Take operators.

use std::collections::VecDeque;

use zrs_disposable::{CompositeDisposable, Disposable};

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
    /// Forwards the first `count` values, then completes.
    ///
    /// Completion after the last value cancels the upstream subscription,
    /// which is what bounds otherwise infinite sequences.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_scheduler::Scheduler;
    /// use zrs_stream::Subscribable;
    ///
    /// // Bound an infinite sequence
    /// let subscribable =
    ///     Subscribable::generator(&Scheduler::immediate(), 0, |x| Some(x + 1));
    /// assert_eq!(subscribable.take(3).to_array(), vec![0, 1, 2]);
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            if count == 0 {
                subscriber.send_completed();
                return Disposable::new_empty();
            }
            let downstream = subscriber.clone();
            let mut remaining = count;
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    remaining -= 1;
                    downstream.send_next(value);
                    if remaining == 0 {
                        downstream.send_completed();
                    }
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => downstream.send_completed(),
            }))
        })
    }

    /// Forwards values while the predicate returns `true`.
    ///
    /// The first value failing the predicate is dropped and the result
    /// completes, cancelling the upstream subscription.
    #[must_use]
    pub fn take_while<F>(&self, predicate: F) -> Subscribable<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let predicate = predicate.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if predicate(&value) {
                        downstream.send_next(value);
                    } else {
                        downstream.send_completed();
                    }
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => downstream.send_completed(),
            }))
        })
    }

    /// Forwards values until the predicate returns `true`.
    ///
    /// The first value matching the predicate is dropped and the result
    /// completes, cancelling the upstream subscription.
    #[must_use]
    pub fn take_until<F>(&self, predicate: F) -> Subscribable<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        self.take_while(move |value| !predicate(value))
    }

    /// Forwards values until the trigger emits its first value.
    ///
    /// The result completes as soon as the trigger emits or completes,
    /// cancelling both subscriptions.
    #[must_use]
    pub fn take_until_signal<U>(
        &self,
        trigger: &Subscribable<U>,
    ) -> Subscribable<T>
    where
        U: Clone + Send + 'static,
    {
        let source = self.clone();
        let trigger = trigger.clone();
        Subscribable::create(move |subscriber| {
            let composite = CompositeDisposable::new();

            // The trigger cuts the sequence short by completing downstream
            let downstream = subscriber.clone();
            composite.add(trigger.subscribe(&Subscriber::new(
                move |event: Event<U>| match event {
                    Event::Next(_) | Event::Completed => {
                        downstream.send_completed();
                    }
                    Event::Error(error) => downstream.send_error(error),
                },
            )));

            let downstream = subscriber.clone();
            composite.add(source.subscribe(&Subscriber::new(
                move |event| downstream.send_event(event),
            )));
            composite.to_disposable()
        })
    }

    /// Buffers the most recent `count` values, emitted on completion.
    ///
    /// On upstream completion, the buffered values are emitted in arrival
    /// order, followed by the completion. Errors discard the buffer.
    #[must_use]
    pub fn take_last(&self, count: usize) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let mut buffer = VecDeque::with_capacity(count);
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if count == 0 {
                        return;
                    }
                    if buffer.len() == count {
                        buffer.pop_front();
                    }
                    buffer.push_back(value);
                }
                Event::Error(error) => {
                    buffer.clear();
                    downstream.send_error(error);
                }
                Event::Completed => {
                    for value in buffer.drain(..) {
                        downstream.send_next(value);
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

    mod take {
        use zrs_scheduler::Scheduler;

        use crate::Subscribable;

        #[test]
        fn handles_infinite_source() {
            let subscribable = Subscribable::generator(
                &Scheduler::immediate(),
                0,
                |x| Some(x + 1),
            );

            // The sequence must be cut after the given count
            assert_eq!(subscribable.take(3).to_array(), vec![0, 1, 2]);
        }

        #[test]
        fn handles_zero() {
            let subscribable = Subscribable::from_values(vec![1, 2]);
            assert_eq!(subscribable.take(0).to_array(), Vec::<i32>::new());
        }

        #[test]
        fn handles_short_source() {
            let subscribable = Subscribable::from_values(vec![1, 2]);
            assert_eq!(subscribable.take(5).to_array(), vec![1, 2]);
        }
    }

    mod take_while {
        use crate::Subscribable;

        #[test]
        fn handles_first_failure() {
            let subscribable =
                Subscribable::from_values(vec![1, 2, 3, 1, 2]);
            assert_eq!(
                subscribable.take_while(|x| *x < 3).to_array(),
                vec![1, 2]
            );
        }
    }

    mod take_until {
        use crate::Subscribable;

        #[test]
        fn handles_first_match() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3, 4]);
            assert_eq!(
                subscribable.take_until(|x| *x > 2).to_array(),
                vec![1, 2]
            );
        }
    }

    mod take_until_signal {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::Subject;

        #[test]
        fn handles_trigger() {
            let subject = Subject::new();
            let trigger = Subject::<()>::new();
            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                subject
                    .to_subscribable()
                    .take_until_signal(&trigger.to_subscribable())
                    .subscribe_next(move |value| {
                        values.lock().push(value);
                    });
            }

            // Values after the trigger must not be forwarded
            subject.send_next(1);
            trigger.send_next(());
            subject.send_next(2);
            assert_eq!(*values.lock(), vec![1]);
        }
    }

    mod take_last {
        use crate::Subscribable;

        #[test]
        fn handles_buffering() {
            let subscribable =
                Subscribable::from_values(vec![1, 2, 3, 4, 5]);
            assert_eq!(subscribable.take_last(2).to_array(), vec![4, 5]);
        }
    }
}

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

//! Quantifier operators.

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
    /// Emits whether the source emits any value at all.
    ///
    /// Emits `true` on the first value and completes, cancelling the
    /// upstream subscription; emits `false` when the source completes
    /// without a value.
    #[must_use]
    pub fn any(&self) -> Subscribable<bool> {
        self.any_where(|_| true)
    }

    /// Emits whether any value passes the predicate.
    ///
    /// Emits `true` on the first passing value and completes, cancelling
    /// the upstream subscription; emits `false` when the source completes
    /// without one.
    #[must_use]
    pub fn any_where<F>(&self, predicate: F) -> Subscribable<bool>
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
                        downstream.send_next(true);
                        downstream.send_completed();
                    }
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => {
                    downstream.send_next(false);
                    downstream.send_completed();
                }
            }))
        })
    }

    /// Emits whether all values pass the predicate.
    ///
    /// Emits `false` on the first failing value and completes, cancelling
    /// the upstream subscription; emits `true` when the source completes
    /// without one.
    #[must_use]
    pub fn all<F>(&self, predicate: F) -> Subscribable<bool>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let predicate = predicate.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if !predicate(&value) {
                        downstream.send_next(false);
                        downstream.send_completed();
                    }
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => {
                    downstream.send_next(true);
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

    mod any {
        use crate::Subscribable;

        #[test]
        fn handles_values() {
            assert_eq!(Subscribable::just(1).any().first(), Some(true));
            assert_eq!(
                Subscribable::<i32>::empty().any().first(),
                Some(false)
            );
        }
    }

    mod any_where {
        use zrs_scheduler::Scheduler;

        use crate::Subscribable;

        #[test]
        fn handles_first_match() {
            let subscribable = Subscribable::generator(
                &Scheduler::immediate(),
                0,
                |x| Some(x + 1),
            );

            // The match must cut the infinite sequence short
            assert_eq!(
                subscribable.any_where(|x| *x > 2).first(),
                Some(true)
            );
        }

        #[test]
        fn handles_no_match() {
            let subscribable = Subscribable::from_values(vec![1, 2]);
            assert_eq!(
                subscribable.any_where(|x| *x > 5).first(),
                Some(false)
            );
        }
    }

    mod all {
        use crate::Subscribable;

        #[test]
        fn handles_counterexample() {
            let subscribable = Subscribable::from_values(vec![2, 4, 5]);
            assert_eq!(
                subscribable.all(|x| x % 2 == 0).first(),
                Some(false)
            );
        }

        #[test]
        fn handles_all_passing() {
            let subscribable = Subscribable::from_values(vec![2, 4]);
            assert_eq!(
                subscribable.all(|x| x % 2 == 0).first(),
                Some(true)
            );
        }
    }
}

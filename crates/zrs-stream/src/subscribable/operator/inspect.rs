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

//! Inspection operators.

use crate::event::{Error, Event};
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Runs a side effect on each value, then forwards it.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Log values as they pass through
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3])
    ///     .do_next(|x| println!("{x}"));
    /// subscribable.to_array();
    /// ```
    #[must_use]
    pub fn do_next<F>(&self, block: F) -> Subscribable<T>
    where
        F: Fn(&T) + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let block = block.clone();
            source.subscribe(&Subscriber::new(move |event| {
                if let Event::Next(value) = &event {
                    block(value);
                }
                downstream.send_event(event);
            }))
        })
    }

    /// Runs a side effect on the terminal error, then forwards it.
    #[must_use]
    pub fn do_error<F>(&self, block: F) -> Subscribable<T>
    where
        F: Fn(&Error) + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let block = block.clone();
            source.subscribe(&Subscriber::new(move |event| {
                if let Event::Error(error) = &event {
                    block(error);
                }
                downstream.send_event(event);
            }))
        })
    }

    /// Runs a side effect on completion, then forwards it.
    #[must_use]
    pub fn do_completed<F>(&self, block: F) -> Subscribable<T>
    where
        F: Fn() + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let block = block.clone();
            source.subscribe(&Subscriber::new(move |event| {
                if matches!(event, Event::Completed) {
                    block();
                }
                downstream.send_event(event);
            }))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod do_next {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::Subscribable;

        #[test]
        fn handles_side_effect() {
            let sum = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::from_values(vec![1_usize, 2, 3])
                .do_next({
                    let sum = Arc::clone(&sum);
                    move |x| {
                        sum.fetch_add(*x, Ordering::SeqCst);
                    }
                });

            // The side effect must not alter the sequence
            assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
            assert_eq!(sum.load(Ordering::SeqCst), 6);
        }
    }

    mod do_error {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Error, Subscribable};

        #[test]
        fn handles_side_effect() {
            let errors = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::<i32>::error(Error::failed("x"))
                .do_error({
                    let errors = Arc::clone(&errors);
                    move |_| {
                        errors.fetch_add(1, Ordering::SeqCst);
                    }
                });

            // The error must still be forwarded
            assert_eq!(subscribable.try_first(), Err(Error::failed("x")));
            assert_eq!(errors.load(Ordering::SeqCst), 1);
        }
    }

    mod do_completed {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::Subscribable;

        #[test]
        fn handles_side_effect() {
            let completions = Arc::new(AtomicUsize::new(0));
            let subscribable =
                Subscribable::<i32>::empty().do_completed({
                    let completions = Arc::clone(&completions);
                    move || {
                        completions.fetch_add(1, Ordering::SeqCst);
                    }
                });

            subscribable.to_array();
            assert_eq!(completions.load(Ordering::SeqCst), 1);
        }
    }
}

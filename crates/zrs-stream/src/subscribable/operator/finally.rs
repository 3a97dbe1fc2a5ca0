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

//! Finally operator.

use zrs_disposable::Disposable;

use crate::subscribable::Subscribable;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Runs a block exactly once when the subscription ends.
    ///
    /// The block runs on every exit path: after a terminal error, after
    /// completion, and on disposal before a terminal. It is installed as a
    /// disposable in the subscriber's composite, which is disposed on all
    /// three paths, so the exactly-once guarantee holds by construction.
    ///
    /// The block runs after the terminal was forwarded downstream.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Release a resource when the subscription ends
    /// let subscribable = Subscribable::from_values(vec![1, 2])
    ///     .finally(|| println!("done"));
    /// subscribable.to_array();
    /// ```
    #[must_use]
    pub fn finally<F>(&self, block: F) -> Subscribable<T>
    where
        F: Fn() + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let block = block.clone();
            subscriber.attach(Disposable::new(move || block()));
            source.subscribe(subscriber)
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod finally {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Error, Subject, Subscribable};

        #[test]
        fn handles_completion() {
            let runs = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::from_values(vec![1, 2]).finally({
                let runs = Arc::clone(&runs);
                move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                }
            });

            subscribable.to_array();
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn handles_error() {
            let runs = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::<i32>::error(Error::failed("x"))
                .finally({
                    let runs = Arc::clone(&runs);
                    move || {
                        runs.fetch_add(1, Ordering::SeqCst);
                    }
                });

            let _ = subscribable.try_first();
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn handles_disposal_before_terminal() {
            let runs = Arc::new(AtomicUsize::new(0));
            let subject = Subject::<i32>::new();
            let disposable = subject
                .to_subscribable()
                .finally({
                    let runs = Arc::clone(&runs);
                    move || {
                        runs.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .subscribe_next(|_| {});

            // Disposal without a terminal must still run the block, once
            disposable.dispose();
            disposable.dispose();
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        }
    }
}

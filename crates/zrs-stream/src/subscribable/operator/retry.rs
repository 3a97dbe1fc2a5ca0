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

//! Retry operator.

use crate::event::Event;
use crate::subscribable::Subscribable;

use super::resubscribe::{Attempts, resubscribe};

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Resubscribes to the source when it errors.
    ///
    /// After `count` resubscriptions that still error, the final error is
    /// forwarded. Completion always passes through.
    ///
    /// __Warning__: a `count` of zero does not disable retrying, it retries
    /// without bound, so the result can only error if a later attempt is cut
    /// off by disposal.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::{Error, Subscribable};
    ///
    /// // Give up after two attempts
    /// let subscribable =
    ///     Subscribable::<i32>::error(Error::failed("boom")).retry(2);
    /// assert_eq!(subscribable.try_first(), Err(Error::failed("boom")));
    /// ```
    #[must_use]
    pub fn retry(&self, count: usize) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let attempts = Attempts::new();
            resubscribe(
                &source,
                subscriber,
                &attempts,
                0,
                move |event, resubscriptions| {
                    matches!(event, Event::Error(_))
                        && (count == 0 || resubscriptions < count)
                },
            );
            attempts.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod retry {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Error, Subscribable};

        #[test]
        fn handles_recovery() {
            let subscriptions = Arc::new(AtomicUsize::new(0));
            let source = Subscribable::defer({
                let subscriptions = Arc::clone(&subscriptions);
                move || {
                    if subscriptions.fetch_add(1, Ordering::SeqCst) < 2 {
                        Subscribable::error(Error::failed("flaky"))
                    } else {
                        Subscribable::just(42)
                    }
                }
            });

            // The third attempt succeeds within the retry budget
            assert_eq!(source.retry(2).first(), Some(42));
            assert_eq!(subscriptions.load(Ordering::SeqCst), 3);
        }

        #[test]
        fn handles_exhausted_budget() {
            let subscriptions = Arc::new(AtomicUsize::new(0));
            let source = Subscribable::<i32>::defer({
                let subscriptions = Arc::clone(&subscriptions);
                move || {
                    subscriptions.fetch_add(1, Ordering::SeqCst);
                    Subscribable::error(Error::failed("boom"))
                }
            });

            // One initial attempt plus two resubscriptions
            assert_eq!(
                source.retry(2).try_first(),
                Err(Error::failed("boom"))
            );
            assert_eq!(subscriptions.load(Ordering::SeqCst), 3);
        }

        #[test]
        fn handles_completion_passthrough() {
            let subscribable = Subscribable::just(1).retry(3);
            assert_eq!(subscribable.to_array(), vec![1]);
        }
    }
}

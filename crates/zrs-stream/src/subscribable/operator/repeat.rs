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

//! Repeat operator.

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
    /// Resubscribes to the source whenever it completes.
    ///
    /// The resulting sequence only terminates with an error or through
    /// disposal. A source that completes synchronously therefore loops
    /// without bound; cut it with [`take`][].
    ///
    /// [`take`]: Subscribable::take
    #[must_use]
    pub fn repeat(&self) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let attempts = Attempts::new();
            resubscribe(&source, subscriber, &attempts, 0, |event, _| {
                matches!(event, Event::Completed)
            });
            attempts.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod repeat {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Error, Subject, Subscribable};

        #[test]
        fn handles_resubscription() {
            let subscriptions = Arc::new(AtomicUsize::new(0));
            let source = Subscribable::defer({
                let subscriptions = Arc::clone(&subscriptions);
                move || {
                    subscriptions.fetch_add(1, Ordering::SeqCst);
                    Subscribable::just(1)
                }
            });

            // Each completion must trigger a fresh subscription
            assert_eq!(source.repeat().take(3).to_array(), vec![1, 1, 1]);
            assert!(subscriptions.load(Ordering::SeqCst) >= 3);
        }

        #[test]
        fn handles_error_propagation() {
            let subject = Subject::<i32>::new();
            let repeated = subject.to_subscribable().repeat();
            let errors = Arc::new(AtomicUsize::new(0));
            repeated.subscribe_error({
                let errors = Arc::clone(&errors);
                move |_| {
                    errors.fetch_add(1, Ordering::SeqCst);
                }
            });

            // Errors must pass through instead of resubscribing
            subject.send_error(Error::failed("x"));
            assert_eq!(errors.load(Ordering::SeqCst), 1);
        }
    }
}

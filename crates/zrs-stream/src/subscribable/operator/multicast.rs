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

//! Multicast operators.

use crate::connectable::ConnectableSubscribable;
use crate::connectable::cancelable::CancelableSubscribable;
use crate::subject::replay::ReplaySubject;
use crate::subject::{Multicast, Subject};
use crate::subscribable::Subscribable;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Shares one upstream subscription through the given hub.
    ///
    /// Returns a connectable: downstream subscribers attach to the hub, and
    /// the source is subscribed once [`connect`][] is called.
    ///
    /// [`connect`]: ConnectableSubscribable::connect
    #[must_use]
    pub fn multicast<M>(&self, subject: M) -> ConnectableSubscribable<T>
    where
        M: Multicast<T> + 'static,
    {
        ConnectableSubscribable::new(self.clone(), subject)
    }

    /// Shares one upstream subscription through a plain subject.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Share one upstream subscription
    /// let connectable = Subscribable::from_values(vec![1, 2, 3]).publish();
    /// connectable.to_subscribable().subscribe_next(|x| println!("{x}"));
    /// connectable.connect();
    /// ```
    #[must_use]
    pub fn publish(&self) -> ConnectableSubscribable<T> {
        self.multicast(Subject::new())
    }

    /// Passes a shared view of this source to the given block.
    ///
    /// The block derives a new subscribable from the shared view; however
    /// many times the derivation uses the view, the source is subscribed
    /// exactly once per subscription to the result, connected after the
    /// derived subscription is installed.
    #[must_use]
    pub fn with_shared<U, F>(&self, block: F) -> Subscribable<U>
    where
        U: Clone + Send + 'static,
        F: Fn(&Subscribable<T>) -> Subscribable<U>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let connectable = source.publish();
            let derived = block(&connectable.to_subscribable());
            let _ = derived.subscribe(subscriber);
            connectable.connect()
        })
    }

    /// Shares this source through a replay subject with cancellation.
    #[must_use]
    pub fn as_cancelable(&self) -> CancelableSubscribable<T> {
        self.as_cancelable_with(|| {})
    }

    /// Shares this source with an externally triggerable cancellation.
    ///
    /// The source is connected eagerly through an unbounded replay subject;
    /// the block runs once when the cancelable is cancelled.
    #[must_use]
    pub fn as_cancelable_with<F>(&self, block: F) -> CancelableSubscribable<T>
    where
        F: FnOnce() + Send + 'static,
    {
        self.as_cancelable_to_subject(ReplaySubject::unbounded(), block)
    }

    /// Shares this source through the given hub with cancellation.
    #[must_use]
    pub fn as_cancelable_to_subject<M, F>(
        &self,
        subject: M,
        block: F,
    ) -> CancelableSubscribable<T>
    where
        M: Multicast<T> + 'static,
        F: FnOnce() + Send + 'static,
    {
        CancelableSubscribable::new(self.clone(), subject, block)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod with_shared {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use zrs_disposable::Disposable;

        use crate::Subscribable;

        #[test]
        fn handles_single_upstream_subscription() {
            let invocations = Arc::new(AtomicUsize::new(0));
            let source = Subscribable::create({
                let invocations = Arc::clone(&invocations);
                move |subscriber| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                    subscriber.send_next(1);
                    subscriber.send_completed();
                    Disposable::new_empty()
                }
            });

            // The derivation uses the shared view twice
            let shared = source.with_shared(|shared| {
                shared.merge_with(&shared.select(|x| x * 10))
            });
            let mut values = shared.to_array();
            values.sort_unstable();
            assert_eq!(values, vec![1, 10]);
            assert_eq!(invocations.load(Ordering::SeqCst), 1);
        }
    }

    mod publish {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use zrs_disposable::Disposable;

        use crate::Subscribable;

        #[test]
        fn handles_cold_source_until_connect() {
            let invocations = Arc::new(AtomicUsize::new(0));
            let source = Subscribable::<i32>::create({
                let invocations = Arc::clone(&invocations);
                move |_| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                    Disposable::new_empty()
                }
            });

            // Without connect, the source stays untouched
            let connectable = source.publish();
            connectable.to_subscribable().subscribe_next(|_| {});
            assert_eq!(invocations.load(Ordering::SeqCst), 0);
            connectable.connect();
            assert_eq!(invocations.load(Ordering::SeqCst), 1);
        }
    }
}

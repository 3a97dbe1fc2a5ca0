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

//! Cancelable subscribable.

use std::fmt;

use zrs_disposable::Disposable;

use crate::subject::Multicast;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

use super::ConnectableSubscribable;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Cancelable subscribable.
///
/// A cancelable composes a connectable with an externally triggerable
/// cancellation block. The shared upstream subscription is established
/// eagerly on construction; calling [`CancelableSubscribable::cancel`] runs
/// the block exactly once and severs the shared subscription, cutting off
/// all observers.
pub struct CancelableSubscribable<T> {
    /// Underlying connectable.
    connectable: ConnectableSubscribable<T>,
    /// Cancellation, runs the block and severs the connection.
    cancellation: Disposable,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> CancelableSubscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a cancelable from a source, a hub and a cancellation block.
    ///
    /// The source is connected to the hub before the method returns.
    #[must_use]
    pub fn new<M, F>(source: Subscribable<T>, subject: M, block: F) -> Self
    where
        M: Multicast<T> + 'static,
        F: FnOnce() + Send + 'static,
    {
        let connectable = ConnectableSubscribable::new(source, subject);
        let connection = connectable.connect();
        Self {
            connectable,
            cancellation: Disposable::new(move || {
                block();
                connection.dispose();
            }),
        }
    }

    /// Cancels the shared subscription.
    ///
    /// The cancellation block runs exactly once, on the first call; all
    /// further calls are no-ops.
    pub fn cancel(&self) {
        self.cancellation.dispose();
    }

    /// Returns whether the cancelable was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_disposed()
    }

    /// Subscribes the given subscriber to the hub.
    pub fn subscribe(&self, subscriber: &Subscriber<T>) -> Disposable {
        self.connectable.subscribe(subscriber)
    }

    /// Returns a subscribable view of the hub.
    #[must_use]
    pub fn to_subscribable(&self) -> Subscribable<T> {
        self.connectable.to_subscribable()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Clone for CancelableSubscribable<T> {
    /// Clones the cancelable, sharing the cancellation.
    fn clone(&self) -> Self {
        Self {
            connectable: self.connectable.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}

impl<T> fmt::Debug for CancelableSubscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Formats the cancelable for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CancelableSubscribable")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod cancel {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Subject, Subscribable};

        #[test]
        fn handles_cancellation_block() {
            let subject = Subject::<i32>::new();
            let cancellations = Arc::new(AtomicUsize::new(0));
            let cancelable = subject.to_subscribable().as_cancelable_with({
                let cancellations = Arc::clone(&cancellations);
                move || {
                    cancellations.fetch_add(1, Ordering::SeqCst);
                }
            });

            // The block must run exactly once
            cancelable.cancel();
            cancelable.cancel();
            assert_eq!(cancellations.load(Ordering::SeqCst), 1);
            assert!(cancelable.is_cancelled());
        }

        #[test]
        fn handles_severed_delivery() {
            let subject = Subject::new();
            let cancelable = subject.to_subscribable().as_cancelable();
            let values = Arc::new(AtomicUsize::new(0));
            cancelable.to_subscribable().subscribe_next({
                let values = Arc::clone(&values);
                move |_: i32| {
                    values.fetch_add(1, Ordering::SeqCst);
                }
            });

            // Events after cancellation must not reach observers
            subject.send_next(1);
            cancelable.cancel();
            subject.send_next(2);
            assert_eq!(values.load(Ordering::SeqCst), 1);
        }
    }
}

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

//! Subscribable.

use std::fmt;
use std::sync::Arc;

use zrs_disposable::Disposable;

use crate::event::{Error, Event};
use crate::subscriber::Subscriber;

pub mod blocking;
pub mod constructor;
pub mod operator;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Subscribable.
///
/// A subscribable is a producer of an event sequence, defined by a single
/// primitive: a function that is invoked with a fresh [`Subscriber`] on each
/// subscription and returns a [`Disposable`] cleaning up whatever resources
/// the subscription acquired. Everything else, from the constructors to the
/// entire operator catalog, is derived from this primitive.
///
/// Subscribables are cold: every subscriber triggers its own producer
/// invocation and observes an independent event sequence. Multicast sharing
/// is opt-in through [`publish`][], [`multicast`][] and [`with_shared`][].
///
/// Handles are cheap to clone and share the producer.
///
/// [`publish`]: Subscribable::publish
/// [`multicast`]: Subscribable::multicast
/// [`with_shared`]: Subscribable::with_shared
///
/// # Examples
///
/// ```
/// use zrs_disposable::Disposable;
/// use zrs_stream::Subscribable;
///
/// // Create subscribable and subscribe to it
/// let subscribable = Subscribable::create(|subscriber| {
///     subscriber.send_next(1);
///     subscriber.send_completed();
///     Disposable::new_empty()
/// });
/// subscribable.subscribe_next(|value| println!("{value}"));
/// ```
pub struct Subscribable<T> {
    /// Producer invoked on each subscription.
    did_subscribe: Arc<DidSubscribeFn<T>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Send + 'static,
{
    /// Creates a subscribable from a producer.
    ///
    /// The producer is invoked with a fresh subscriber on each subscription,
    /// and its returned disposable is attached to the subscriber's composite
    /// disposable, so it runs on termination as well as on disposal.
    #[must_use]
    pub fn create<F>(did_subscribe: F) -> Self
    where
        F: Fn(&Subscriber<T>) -> Disposable + Send + Sync + 'static,
    {
        Self { did_subscribe: Arc::new(did_subscribe) }
    }

    /// Subscribes the given subscriber.
    ///
    /// Returns a disposable severing the subscription: disposing it stops
    /// all event delivery and releases the resources the producer acquired.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all)
    )]
    pub fn subscribe(&self, subscriber: &Subscriber<T>) -> Disposable {
        let did_subscribe = self.did_subscribe.as_ref();
        let disposable = did_subscribe(subscriber);

        // If the producer terminated synchronously, the subscriber is
        // already disposed and the attach disposes the cleanup in turn
        subscriber.attach(disposable);
        subscriber.to_disposable()
    }

    /// Subscribes with callbacks for all three event kinds.
    pub fn subscribe_with<N, E, C>(
        &self,
        mut next: N,
        mut error: E,
        mut completed: C,
    ) -> Disposable
    where
        N: FnMut(T) + Send + 'static,
        E: FnMut(Error) + Send + 'static,
        C: FnMut() + Send + 'static,
    {
        self.subscribe(&Subscriber::new(move |event| match event {
            Event::Next(value) => next(value),
            Event::Error(err) => error(err),
            Event::Completed => completed(),
        }))
    }

    /// Subscribes with a callback for values.
    pub fn subscribe_next<N>(&self, next: N) -> Disposable
    where
        N: FnMut(T) + Send + 'static,
    {
        self.subscribe_with(next, |_| {}, || {})
    }

    /// Subscribes with a callback for the terminal error.
    pub fn subscribe_error<E>(&self, error: E) -> Disposable
    where
        E: FnMut(Error) + Send + 'static,
    {
        self.subscribe_with(|_| {}, error, || {})
    }

    /// Subscribes with a callback for the terminal completion.
    pub fn subscribe_completed<C>(&self, completed: C) -> Disposable
    where
        C: FnMut() + Send + 'static,
    {
        self.subscribe_with(|_| {}, |_| {}, completed)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Clone for Subscribable<T> {
    /// Clones the subscribable.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            did_subscribe: Arc::clone(&self.did_subscribe),
        }
    }
}

impl<T> fmt::Debug for Subscribable<T> {
    /// Formats the subscribable for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Subscribable")
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Producer invoked on each subscription.
type DidSubscribeFn<T> =
    dyn Fn(&Subscriber<T>) -> Disposable + Send + Sync;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod subscribe {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use zrs_disposable::Disposable;

        use crate::Subscribable;

        #[test]
        fn handles_cold_subscriptions() {
            let invocations = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::create({
                let invocations = Arc::clone(&invocations);
                move |subscriber| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                    subscriber.send_next(1);
                    subscriber.send_completed();
                    Disposable::new_empty()
                }
            });

            // Every subscription must invoke the producer again
            assert_eq!(subscribable.to_array(), vec![1]);
            assert_eq!(subscribable.to_array(), vec![1]);
            assert_eq!(invocations.load(Ordering::SeqCst), 2);
        }

        #[test]
        fn handles_cleanup_on_termination() {
            let cleanups = Arc::new(AtomicUsize::new(0));
            let subscribable = Subscribable::<i32>::create({
                let cleanups = Arc::clone(&cleanups);
                move |subscriber| {
                    subscriber.send_completed();
                    Disposable::new({
                        let cleanups = Arc::clone(&cleanups);
                        move || {
                            cleanups.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                }
            });

            // Synchronous termination must still run the cleanup
            subscribable.subscribe_next(|_| {});
            assert_eq!(cleanups.load(Ordering::SeqCst), 1);
        }
    }
}

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

//! Connectable subscribable.

use std::fmt;
use std::sync::Arc;

use zrs_disposable::Disposable;
use zrs_lock::Lock;

use crate::subject::Multicast;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

pub mod cancelable;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Connectable subscribable.
///
/// A connectable pairs a source with a multicast hub. Downstream
/// subscriptions attach to the hub only; the source is not subscribed until
/// [`ConnectableSubscribable::connect`] is called, at which point one shared
/// upstream subscription feeds all current and future observers.
///
/// Connecting twice is idempotent: while a connection is live, `connect`
/// returns the same disposable. Disposing it severs the shared upstream
/// subscription, after which `connect` establishes a fresh one.
///
/// # Examples
///
/// ```
/// use zrs_stream::Subscribable;
///
/// // Share one upstream subscription between two observers
/// let connectable = Subscribable::from_values(vec![1, 2, 3]).publish();
/// connectable.to_subscribable().subscribe_next(|x| println!("a: {x}"));
/// connectable.to_subscribable().subscribe_next(|x| println!("b: {x}"));
/// connectable.connect();
/// ```
pub struct ConnectableSubscribable<T> {
    /// Source subscribed on connect.
    source: Subscribable<T>,
    /// Multicast hub observers attach to.
    subject: Arc<dyn Multicast<T>>,
    /// Live connection, if any.
    connection: Arc<Lock<Option<Disposable>>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> ConnectableSubscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a connectable from a source and a multicast hub.
    #[must_use]
    pub fn new<M>(source: Subscribable<T>, subject: M) -> Self
    where
        M: Multicast<T> + 'static,
    {
        Self {
            source,
            subject: Arc::new(subject),
            connection: Arc::new(Lock::new(None)),
        }
    }

    /// Connects the source to the hub.
    ///
    /// The first call subscribes the source; subsequent calls while the
    /// connection is live return the same disposable. Disposing it ends the
    /// shared subscription for all observers.
    pub fn connect(&self) -> Disposable {
        let mut connection = self.connection.lock();
        if let Some(disposable) = connection.as_ref() {
            if !disposable.is_disposed() {
                return disposable.clone();
            }
        }

        // A source that terminates synchronously is fine: the subject
        // records the terminal and replays it to late observers
        let disposable = self.source.subscribe(&self.subject.subscriber());
        *connection = Some(disposable.clone());
        disposable
    }

    /// Subscribes the given subscriber to the hub.
    pub fn subscribe(&self, subscriber: &Subscriber<T>) -> Disposable {
        let disposable = self.subject.attach(subscriber);
        subscriber.attach(disposable);
        subscriber.to_disposable()
    }

    /// Returns a subscribable view of the hub.
    #[must_use]
    pub fn to_subscribable(&self) -> Subscribable<T> {
        let subject = Arc::clone(&self.subject);
        Subscribable::create(move |subscriber| subject.attach(subscriber))
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Clone for ConnectableSubscribable<T> {
    /// Clones the connectable, sharing the connection.
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            subject: Arc::clone(&self.subject),
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<T> fmt::Debug for ConnectableSubscribable<T> {
    /// Formats the connectable for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let connected = self
            .connection
            .lock()
            .as_ref()
            .is_some_and(|disposable| !disposable.is_disposed());
        f.debug_struct("ConnectableSubscribable")
            .field("connected", &connected)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod connect {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use zrs_disposable::Disposable;
        use zrs_lock::Lock;

        use crate::Subscribable;

        #[test]
        fn handles_shared_subscription() {
            let invocations = Arc::new(AtomicUsize::new(0));
            let source = Subscribable::create({
                let invocations = Arc::clone(&invocations);
                move |subscriber| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                    for value in 1..=3 {
                        subscriber.send_next(value);
                    }
                    subscriber.send_completed();
                    Disposable::new_empty()
                }
            });

            // Both observers share a single upstream subscription
            let connectable = source.publish();
            let a = Arc::new(Lock::new(Vec::new()));
            let b = Arc::new(Lock::new(Vec::new()));
            for values in [&a, &b] {
                let values = Arc::clone(values);
                connectable.to_subscribable().subscribe_next(move |value| {
                    values.lock().push(value);
                });
            }
            connectable.connect();
            assert_eq!(*a.lock(), vec![1, 2, 3]);
            assert_eq!(*b.lock(), vec![1, 2, 3]);
            assert_eq!(invocations.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn handles_idempotent_connection() {
            let connectable = Subscribable::<i32>::never().publish();
            let first = connectable.connect();
            let second = connectable.connect();

            // While connected, the same disposable is returned
            assert!(first.ptr_eq(&second));
            first.dispose();
        }
    }
}

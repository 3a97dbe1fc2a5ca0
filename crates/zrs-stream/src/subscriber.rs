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

//! Subscriber.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use zrs_disposable::{CompositeDisposable, Disposable};
use zrs_lock::Lock;

use crate::event::{Error, Event};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Subscriber.
///
/// Subscribers are the sinks events are pushed into. Every subscription owns
/// exactly one subscriber, which holds the event sink and a composite
/// disposable tying the lifetime of all upstream resources to it.
///
/// Two rules make delivery safe to drive from multiple threads:
///
/// - The terminal latch: once [`Subscriber::send_error`] or
///   [`Subscriber::send_completed`] ran, every further send is silently
///   dropped, and the composite disposable is disposed automatically.
/// - Per-subscriber serialisation: values are delivered while holding the
///   subscriber's own lock, so sends racing from multiple threads never
///   interleave, and no value can race past a terminal. The flip side is
///   that a sink must not send to itself from within its own handler.
///
/// Disposing the subscriber's composite disposable clears the sink, turning
/// all future sends into no-ops.
///
/// # Examples
///
/// ```
/// use zrs_stream::{Event, Subscriber};
///
/// // Create subscriber and send events
/// let subscriber = Subscriber::new(|event: Event<i32>| {
///     println!("{event:?}");
/// });
/// subscriber.send_next(1);
/// subscriber.send_completed();
/// ```
pub struct Subscriber<T> {
    /// Shared subscriber state.
    inner: Arc<Inner<T>>,
}

// ----------------------------------------------------------------------------

/// Subscriber state.
struct Inner<T> {
    /// Event sink, cleared on terminal or disposal.
    sink: Lock<Option<EventFn<T>>>,
    /// Kill flag, set on disposal without taking the sink lock.
    ///
    /// Disposal can be triggered from within an event handler that is
    /// currently holding the sink lock, e.g. when a terminal sent downstream
    /// tears the whole pipeline down. The flag lets disposal succeed without
    /// re-entering the lock; the sink itself is cleared by whoever holds it.
    dead: AtomicBool,
    /// Resources owned by the subscription.
    disposable: CompositeDisposable,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscriber<T>
where
    T: Send + 'static,
{
    /// Creates a subscriber from an event sink.
    ///
    /// The subscriber's composite disposable clears the sink when disposed,
    /// which is what severs a subscription from the outside.
    #[must_use]
    pub fn new<F>(sink: F) -> Self
    where
        F: FnMut(Event<T>) + Send + 'static,
    {
        let inner = Arc::new(Inner {
            sink: Lock::new(Some(Box::new(sink) as EventFn<T>)),
            dead: AtomicBool::new(false),
            disposable: CompositeDisposable::new(),
        });

        // Clearing the sink through a weak handle keeps the ownership a
        // tree: the composite owns the action, never the subscriber itself
        let weak = Arc::downgrade(&inner);
        inner.disposable.add(Disposable::new(move || {
            Self::clear(&weak);
        }));
        Self { inner }
    }

    /// Sends a value.
    ///
    /// The value is dropped if the subscription is already terminated or
    /// disposed. Delivery holds the sink lock, which serialises sends racing
    /// from multiple threads.
    pub fn send_next(&self, value: T) {
        let mut slot = self.inner.sink.lock();
        if self.inner.dead.load(Ordering::Acquire) {
            slot.take();
            return;
        }
        if let Some(sink) = slot.as_mut() {
            sink(Event::Next(value));

            // The handler may have torn the subscription down
            if self.inner.dead.load(Ordering::Acquire) {
                slot.take();
            }
        }
    }

    /// Sends a terminal error.
    ///
    /// The first terminal wins: the sink is taken before the event is
    /// delivered, so concurrent sends observe a terminated subscription and
    /// drop their events. Afterwards, the composite disposable is disposed.
    pub fn send_error(&self, error: Error) {
        self.terminate(Event::Error(error));
    }

    /// Sends a terminal completion.
    pub fn send_completed(&self) {
        self.terminate(Event::Completed);
    }

    /// Sends an event, dispatching on its kind.
    pub fn send_event(&self, event: Event<T>) {
        match event {
            Event::Next(value) => self.send_next(value),
            event => self.terminate(event),
        }
    }

    /// Delivers a terminal event and disposes the subscription.
    fn terminate(&self, event: Event<T>) {
        let sink = self.inner.sink.lock().take();
        if self.inner.dead.load(Ordering::Acquire) {
            return;
        }
        if let Some(mut sink) = sink {
            sink(event);

            // Terminals tear the subscription down automatically
            self.inner.disposable.dispose();
        }
    }

    /// Kills the subscription behind the given handle, if still alive.
    ///
    /// The sink is cleared right away when its lock is free; otherwise the
    /// holder of the lock observes the kill flag and clears it.
    fn clear(inner: &Weak<Inner<T>>) {
        if let Some(inner) = inner.upgrade() {
            inner.dead.store(true, Ordering::Release);
            if let Some(mut slot) = inner.sink.try_lock() {
                slot.take();
            }
        }
    }
}

impl<T> Subscriber<T> {
    /// Returns whether the subscription still accepts events.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.inner.dead.load(Ordering::Acquire)
            && self.inner.sink.lock().is_some()
    }

    /// Adds a disposable to the subscription's resources.
    ///
    /// If the subscription is already terminated or disposed, the disposable
    /// is disposed immediately.
    pub fn attach(&self, disposable: Disposable) {
        self.inner.disposable.add(disposable);
    }

    /// Returns a disposable handle severing this subscription.
    #[must_use]
    pub fn to_disposable(&self) -> Disposable {
        self.inner.disposable.to_disposable()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Clone for Subscriber<T> {
    /// Clones the subscriber.
    ///
    /// Clones share the sink and the composite disposable, which allows a
    /// producer to hand the subscriber to multiple threads.
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    /// Formats the subscriber for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("active", &self.is_active())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Event sink.
type EventFn<T> = Box<dyn FnMut(Event<T>) + Send>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod send_next {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::{Event, Subscriber};

        #[test]
        fn handles_values() {
            let values = Arc::new(Lock::new(Vec::new()));
            let subscriber = Subscriber::new({
                let values = Arc::clone(&values);
                move |event| {
                    if let Event::Next(value) = event {
                        values.lock().push(value);
                    }
                }
            });

            subscriber.send_next(1);
            subscriber.send_next(2);
            assert_eq!(*values.lock(), vec![1, 2]);
        }

        #[test]
        fn handles_disposal() {
            let values = Arc::new(Lock::new(Vec::new()));
            let subscriber = Subscriber::new({
                let values = Arc::clone(&values);
                move |event| {
                    if let Event::Next(value) = event {
                        values.lock().push(value);
                    }
                }
            });

            // Disposal must turn sends into no-ops
            subscriber.to_disposable().dispose();
            subscriber.send_next(1);
            assert!(values.lock().is_empty());
            assert!(!subscriber.is_active());
        }
    }

    mod send_completed {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Error, Event, Subscriber};

        #[test]
        fn handles_terminal_latch() {
            let terminals = Arc::new(AtomicUsize::new(0));
            let subscriber = Subscriber::<i32>::new({
                let terminals = Arc::clone(&terminals);
                move |event| {
                    if event.is_terminal() {
                        terminals.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });

            // Only the first terminal must be delivered
            subscriber.send_completed();
            subscriber.send_error(Error::failed("boom"));
            subscriber.send_next(1);
            assert_eq!(terminals.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn handles_automatic_disposal() {
            let subscriber = Subscriber::<i32>::new(|_| {});
            let disposable = subscriber.to_disposable();

            // Terminals must dispose the subscription
            subscriber.send_completed();
            assert!(disposable.is_disposed());
        }
    }
}

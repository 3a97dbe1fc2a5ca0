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

//! Replay subject.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};

use slab::Slab;

use zrs_disposable::Disposable;
use zrs_lock::Lock;

use crate::event::{Error, Event};
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

use super::{Multicast, Terminal};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Replay subject.
///
/// A replay subject is a [`Subject`][] that buffers the most recent values
/// up to its capacity, replaying them to every new observer before live
/// delivery begins. An unbounded replay subject replays the entire history,
/// a capacity of one replays only the latest value.
///
/// Unlike plain broadcasting, replay happens under the subject's lock, so
/// attaching an observer and a concurrent send cannot duplicate or drop a
/// value for that observer. An observer must therefore not feed the same
/// subject from within its own replay.
///
/// [`Subject`]: crate::Subject
///
/// # Examples
///
/// ```
/// use zrs_stream::ReplaySubject;
///
/// // Values sent before subscription are replayed
/// let subject = ReplaySubject::unbounded();
/// subject.send_next(1);
/// subject.send_next(2);
/// subject.send_completed();
/// assert_eq!(subject.to_subscribable().to_array(), vec![1, 2]);
/// ```
pub struct ReplaySubject<T> {
    /// Shared subject state.
    inner: Arc<Inner<T>>,
}

// ----------------------------------------------------------------------------

/// Replay subject state.
struct Inner<T> {
    /// Observers, buffer and recorded terminal.
    state: Lock<State<T>>,
    /// Buffer capacity, unbounded if `None`.
    capacity: Option<usize>,
}

/// Observer set, buffer and terminal.
struct State<T> {
    /// Current observers.
    observers: Slab<Subscriber<T>>,
    /// Buffered values.
    buffer: VecDeque<T>,
    /// Recorded terminal event.
    terminal: Option<Terminal>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> ReplaySubject<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a replay subject buffering the entire history.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::bounded(None)
    }

    /// Creates a replay subject buffering only the latest value.
    #[must_use]
    pub fn last() -> Self {
        Self::bounded(Some(1))
    }

    /// Creates a replay subject buffering the given number of values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::bounded(Some(capacity))
    }

    /// Creates a replay subject with an optional buffer bound.
    #[must_use]
    fn bounded(capacity: Option<usize>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Lock::new(State {
                    observers: Slab::new(),
                    buffer: VecDeque::new(),
                    terminal: None,
                }),
                capacity,
            }),
        }
    }

    /// Broadcasts a value, adding it to the replay buffer.
    ///
    /// When the buffer is at capacity, the oldest value is evicted. Values
    /// sent after a terminal are dropped.
    pub fn send_next(&self, value: T) {
        let snapshot: Vec<_> = {
            let mut state = self.inner.state.lock();
            if state.terminal.is_some() {
                return;
            }
            state.buffer.push_back(value.clone());
            if let Some(capacity) = self.inner.capacity {
                while state.buffer.len() > capacity {
                    state.buffer.pop_front();
                }
            }
            state.observers.iter().map(|(_, s)| s.clone()).collect()
        };

        // Deliver outside the critical section
        for observer in snapshot {
            observer.send_next(value.clone());
        }
    }

    /// Broadcasts a terminal error, clearing the observer set.
    pub fn send_error(&self, error: Error) {
        self.terminate(Terminal::Error(error));
    }

    /// Broadcasts a terminal completion, clearing the observer set.
    pub fn send_completed(&self) {
        self.terminate(Terminal::Completed);
    }

    /// Returns a subscribable view of this subject.
    #[must_use]
    pub fn to_subscribable(&self) -> Subscribable<T> {
        let subject = self.clone();
        Subscribable::create(move |subscriber| subject.attach(subscriber))
    }

    /// Records a terminal, then broadcasts it to the drained observers.
    fn terminate(&self, terminal: Terminal) {
        let snapshot: Vec<_> = {
            let mut state = self.inner.state.lock();
            if state.terminal.is_some() {
                return;
            }
            state.terminal = Some(terminal.clone());
            state.observers.drain().collect()
        };
        for observer in snapshot {
            terminal.replay_to(&observer);
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Multicast<T> for ReplaySubject<T>
where
    T: Clone + Send + 'static,
{
    /// Returns a subscriber view feeding this subject.
    fn subscriber(&self) -> Subscriber<T> {
        let subject = self.clone();
        Subscriber::new(move |event| match event {
            Event::Next(value) => subject.send_next(value),
            Event::Error(error) => subject.send_error(error),
            Event::Completed => subject.send_completed(),
        })
    }

    /// Attaches an observer, replaying the buffered history first.
    fn attach(&self, subscriber: &Subscriber<T>) -> Disposable {
        let mut state = self.inner.state.lock();
        for value in &state.buffer {
            subscriber.send_next(value.clone());
        }
        if let Some(terminal) = state.terminal.clone() {
            drop(state);
            terminal.replay_to(subscriber);
            return Disposable::new_empty();
        }
        let key = state.observers.insert(subscriber.clone());
        drop(state);

        // Withdraw the observer on disposal
        let weak = Arc::downgrade(&self.inner);
        Disposable::new(move || Self::withdraw(&weak, key))
    }
}

impl<T> ReplaySubject<T> {
    /// Withdraws the observer behind the given key, if still registered.
    fn withdraw(inner: &Weak<Inner<T>>, key: usize) {
        if let Some(inner) = inner.upgrade() {
            inner.state.lock().observers.try_remove(key);
        }
    }
}

// ----------------------------------------------------------------------------

impl<T> Clone for ReplaySubject<T> {
    /// Clones the replay subject.
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> fmt::Debug for ReplaySubject<T> {
    /// Formats the replay subject for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ReplaySubject")
            .field("observers", &state.observers.len())
            .field("buffered", &state.buffer.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod attach {
        use crate::ReplaySubject;

        #[test]
        fn handles_replay() {
            let subject = ReplaySubject::unbounded();
            subject.send_next(1);
            subject.send_next(2);
            subject.send_completed();

            // Late subscribers must see the full history
            assert_eq!(subject.to_subscribable().to_array(), vec![1, 2]);
        }

        #[test]
        fn handles_latest_value() {
            let subject = ReplaySubject::last();
            subject.send_next(1);
            subject.send_next(2);
            subject.send_completed();

            // Only the latest value must be replayed
            assert_eq!(subject.to_subscribable().to_array(), vec![2]);
        }
    }
}

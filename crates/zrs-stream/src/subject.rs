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

//! Subject.

use std::fmt;
use std::sync::{Arc, Weak};

use slab::Slab;

use zrs_disposable::Disposable;
use zrs_lock::Lock;

use crate::event::{Error, Event};
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

pub mod replay;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Multicast hub.
///
/// This trait is the seam between a subject implementation and the machinery
/// sharing one upstream subscription among many observers, most notably
/// [`ConnectableSubscribable`][]. A hub has two sides: a [`Subscriber`] view
/// feeding events into it, and an attach primitive wiring observers to it.
///
/// [`ConnectableSubscribable`]: crate::ConnectableSubscribable
pub trait Multicast<T>: Send + Sync {
    /// Returns a subscriber view feeding this hub.
    ///
    /// Each call returns a fresh subscriber with its own lifecycle, so one
    /// feed can be severed without terminating the hub.
    fn subscriber(&self) -> Subscriber<T>;

    /// Attaches an observer, returning its registration.
    ///
    /// Disposing the returned disposable withdraws the observer without
    /// affecting the hub or other observers.
    fn attach(&self, subscriber: &Subscriber<T>) -> Disposable;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Subject.
///
/// Subjects are both subscribable and subscriber: events sent into a subject
/// are broadcast to the observers subscribed at that moment. Broadcasting
/// takes a snapshot of the observers under the subject's lock and delivers
/// outside of it, so observer callbacks never run inside the critical
/// section.
///
/// A terminal event is recorded, clears the observer set, and is replayed
/// immediately to anyone subscribing afterwards. Values sent before a
/// subscription are not replayed; see [`ReplaySubject`][] for that.
///
/// [`ReplaySubject`]: crate::ReplaySubject
///
/// # Examples
///
/// ```
/// use zrs_stream::Subject;
///
/// // Create subject and broadcast to its observers
/// let subject = Subject::new();
/// subject.to_subscribable().subscribe_next(|x| println!("{x}"));
/// subject.send_next(1);
/// subject.send_completed();
/// ```
pub struct Subject<T> {
    /// Shared subject state.
    inner: Arc<Inner<T>>,
}

// ----------------------------------------------------------------------------

/// Subject state.
struct Inner<T> {
    /// Observers and recorded terminal.
    state: Lock<State<T>>,
}

/// Observer set and terminal.
struct State<T> {
    /// Current observers.
    observers: Slab<Subscriber<T>>,
    /// Recorded terminal event.
    terminal: Option<Terminal>,
}

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Recorded terminal event.
#[derive(Clone, Debug)]
pub(crate) enum Terminal {
    /// Terminal failure.
    Error(Error),
    /// Terminal completion.
    Completed,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subject<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a subject.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Lock::new(State {
                    observers: Slab::new(),
                    terminal: None,
                }),
            }),
        }
    }

    /// Broadcasts a value to the current observers.
    ///
    /// Values sent after a terminal are dropped.
    pub fn send_next(&self, value: T) {
        let snapshot: Vec<_> = {
            let state = self.inner.state.lock();
            if state.terminal.is_some() {
                return;
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

impl Terminal {
    /// Replays the terminal to the given subscriber.
    pub(crate) fn replay_to<T>(&self, subscriber: &Subscriber<T>)
    where
        T: Send + 'static,
    {
        match self {
            Self::Error(error) => subscriber.send_error(error.clone()),
            Self::Completed => subscriber.send_completed(),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Multicast<T> for Subject<T>
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

    /// Attaches an observer.
    ///
    /// If the subject is already terminated, the recorded terminal is
    /// replayed immediately and no registration takes place. Otherwise, the
    /// returned disposable withdraws the observer through a weak handle, so
    /// a forgotten registration cannot keep the subject alive.
    fn attach(&self, subscriber: &Subscriber<T>) -> Disposable {
        let mut state = self.inner.state.lock();
        if let Some(terminal) = state.terminal.clone() {
            drop(state);

            // Replay the terminal outside the critical section
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

impl<T> Subject<T> {
    /// Withdraws the observer behind the given key, if still registered.
    fn withdraw(inner: &Weak<Inner<T>>, key: usize) {
        if let Some(inner) = inner.upgrade() {
            inner.state.lock().observers.try_remove(key);
        }
    }
}

// ----------------------------------------------------------------------------

impl<T> Clone for Subject<T> {
    /// Clones the subject.
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Default for Subject<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a subject.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    /// Formats the subject for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Subject")
            .field("observers", &state.observers.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod send_next {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::Subject;

        #[test]
        fn handles_broadcast() {
            let subject = Subject::new();
            let a = Arc::new(Lock::new(Vec::new()));
            let b = Arc::new(Lock::new(Vec::new()));
            for values in [&a, &b] {
                let values = Arc::clone(values);
                subject.to_subscribable().subscribe_next(move |value| {
                    values.lock().push(value);
                });
            }

            // All current observers must receive the value
            subject.send_next(1);
            subject.send_next(2);
            assert_eq!(*a.lock(), vec![1, 2]);
            assert_eq!(*b.lock(), vec![1, 2]);
        }

        #[test]
        fn handles_withdrawal() {
            let subject = Subject::new();
            let values = Arc::new(Lock::new(Vec::new()));
            let disposable = {
                let values = Arc::clone(&values);
                subject.to_subscribable().subscribe_next(move |value| {
                    values.lock().push(value);
                })
            };

            // Disposed observers must not receive further values
            subject.send_next(1);
            disposable.dispose();
            subject.send_next(2);
            assert_eq!(*values.lock(), vec![1]);
        }
    }

    mod send_completed {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::Subject;

        #[test]
        fn handles_terminal_replay() {
            let subject = Subject::<i32>::new();
            subject.send_completed();

            // Late subscribers must receive the stored terminal
            let completions = Arc::new(AtomicUsize::new(0));
            subject.to_subscribable().subscribe_completed({
                let completions = Arc::clone(&completions);
                move || {
                    completions.fetch_add(1, Ordering::SeqCst);
                }
            });
            assert_eq!(completions.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn handles_post_terminal_values() {
            let subject = Subject::new();
            let values = Arc::new(AtomicUsize::new(0));
            subject.to_subscribable().subscribe_next({
                let values = Arc::clone(&values);
                move |_: i32| {
                    values.fetch_add(1, Ordering::SeqCst);
                }
            });

            // Values after the terminal must be dropped
            subject.send_completed();
            subject.send_next(1);
            assert_eq!(values.load(Ordering::SeqCst), 0);
        }
    }
}

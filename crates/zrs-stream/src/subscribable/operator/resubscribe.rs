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

//! Resubscription machinery.
//!
//! Shared by the resubscribing operators, `repeat` and `retry`. Attempts are
//! numbered: a subscription is only stored as the current attempt if no
//! newer attempt has begun in the meantime, which closes the race between a
//! synchronously terminating attempt and the frame that started it.

use std::sync::Arc;

use zrs_disposable::Disposable;
use zrs_lock::Lock;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Attempt tracker.
///
/// Tracks the current attempt's subscription and hands out a disposable that
/// severs the current and all future attempts.
pub(crate) struct Attempts {
    /// Shared attempt state.
    state: Arc<Lock<State>>,
}

/// Attempt state.
#[derive(Default)]
struct State {
    /// Number of the newest attempt.
    epoch: u64,
    /// Subscription of the current attempt.
    current: Option<Disposable>,
    /// Disposal flag.
    disposed: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Attempts {
    /// Creates an attempt tracker.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Lock::new(State::default())),
        }
    }

    /// Begins an attempt, returning its number.
    pub fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        state.epoch += 1;
        state.epoch
    }

    /// Stores the subscription of the given attempt.
    ///
    /// The subscription is only stored while its attempt is still the newest
    /// and the tracker is not disposed; otherwise it is disposed, as it can
    /// only belong to an attempt that already terminated.
    pub fn store(&self, id: u64, subscription: Disposable) {
        let stale = {
            let mut state = self.state.lock();
            if state.disposed || state.epoch != id {
                Some(subscription)
            } else {
                state.current.replace(subscription)
            }
        };

        // Dispose outside the critical section
        if let Some(stale) = stale {
            stale.dispose();
        }
    }

    /// Returns a disposable severing the current and all future attempts.
    pub fn to_disposable(&self) -> Disposable {
        let state = Arc::clone(&self.state);
        Disposable::new(move || {
            let current = {
                let mut state = state.lock();
                state.disposed = true;
                state.current.take()
            };
            if let Some(current) = current {
                current.dispose();
            }
        })
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Clone for Attempts {
    /// Clones the attempt tracker.
    #[inline]
    fn clone(&self) -> Self {
        Self { state: Arc::clone(&self.state) }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Subscribes an attempt, resubscribing on matching terminals.
///
/// Values always pass through. When a terminal arrives, the decision
/// function is asked whether to resubscribe, given the number of
/// resubscriptions so far; if it declines, the terminal is forwarded.
pub(crate) fn resubscribe<T, F>(
    source: &Subscribable<T>,
    downstream: &Subscriber<T>,
    attempts: &Attempts,
    resubscriptions: usize,
    decide: F,
) where
    T: Clone + Send + 'static,
    F: Fn(&Event<T>, usize) -> bool + Clone + Send + Sync + 'static,
{
    let id = attempts.begin();
    let subscription = {
        let origin = source.clone();
        let downstream = downstream.clone();
        let attempts = attempts.clone();
        let decide = decide.clone();
        source.subscribe(&Subscriber::new(move |event| {
            if event.is_terminal() && decide(&event, resubscriptions) {
                resubscribe(
                    &origin,
                    &downstream,
                    &attempts,
                    resubscriptions + 1,
                    decide.clone(),
                );
            } else {
                downstream.send_event(event);
            }
        }))
    };
    attempts.store(id, subscription);
}

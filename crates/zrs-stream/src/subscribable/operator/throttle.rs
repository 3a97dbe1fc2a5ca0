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

//! Throttle operator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use zrs_disposable::{CompositeDisposable, SerialDisposable};
use zrs_lock::Lock;
use zrs_scheduler::Timers;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Throttle state.
struct State<T> {
    /// Value waiting for its quiet period.
    pending: Option<T>,
    /// Number of the newest pending value.
    epoch: u64,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Forwards a value only after a quiet period without newer values.
    ///
    /// Each arriving value is held back for the given interval; if another
    /// value arrives first, the held value is discarded and the timer is
    /// re-armed. Completion flushes a held value immediately before the
    /// completion is forwarded; an error discards it.
    #[must_use]
    pub fn throttle(&self, interval: Duration) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let state = Arc::new(Lock::new(State {
                pending: None,
                epoch: 0,
            }));
            let serial = SerialDisposable::new();
            let composite = CompositeDisposable::new();

            let upstream = {
                let state = Arc::clone(&state);
                let serial = serial.clone();
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event| match event {
                    Event::Next(value) => {
                        let id = {
                            let mut state = state.lock();
                            state.pending = Some(value);
                            state.epoch += 1;
                            state.epoch
                        };

                        // Re-arming disposes the previous timer
                        let state = Arc::clone(&state);
                        let downstream = downstream.clone();
                        serial.set(Timers::shared().once(
                            Instant::now() + interval,
                            move || {
                                let value = {
                                    let mut state = state.lock();
                                    if state.epoch == id {
                                        state.pending.take()
                                    } else {
                                        None
                                    }
                                };
                                if let Some(value) = value {
                                    downstream.send_next(value);
                                }
                            },
                        ));
                    }
                    Event::Error(error) => {
                        state.lock().pending = None;
                        downstream.send_error(error);
                    }
                    Event::Completed => {
                        let value = state.lock().pending.take();
                        if let Some(value) = value {
                            downstream.send_next(value);
                        }
                        downstream.send_completed();
                    }
                }))
            };
            composite.add(upstream);
            composite.add(serial.to_disposable());
            composite.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod throttle {
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        use zrs_lock::Lock;

        use crate::Subject;

        #[test]
        fn handles_quiet_period() {
            let subject = Subject::new();
            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                subject
                    .to_subscribable()
                    .throttle(Duration::from_millis(20))
                    .subscribe_next(move |value| {
                        values.lock().push(value);
                    });
            }

            // Rapid values collapse into the newest one
            subject.send_next(1);
            subject.send_next(2);
            thread::sleep(Duration::from_millis(100));
            assert_eq!(*values.lock(), vec![2]);
        }

        #[test]
        fn handles_flush_on_completion() {
            let subject = Subject::new();
            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                subject
                    .to_subscribable()
                    .throttle(Duration::from_millis(50))
                    .subscribe_next(move |value| {
                        values.lock().push(value);
                    });
            }

            // Completion flushes the held value immediately
            subject.send_next(1);
            subject.send_completed();
            assert_eq!(*values.lock(), vec![1]);
        }
    }
}

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

//! Timeout operator.

use std::time::{Duration, Instant};

use zrs_disposable::{CompositeDisposable, SerialDisposable};
use zrs_scheduler::Timers;

use crate::event::{Error, Event};
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Errors with [`Error::TimedOut`] when the source goes quiet.
    ///
    /// The timer is armed on subscription and re-armed on every value. When
    /// it fires before the next value or terminal, the error is sent from
    /// the timer thread and the upstream subscription is disposed through
    /// the downstream teardown.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use zrs_stream::{Error, Subscribable};
    ///
    /// // A silent source times out
    /// let subscribable =
    ///     Subscribable::<i32>::never().timeout(Duration::from_millis(10));
    /// assert_eq!(subscribable.try_first(), Err(Error::TimedOut));
    /// ```
    #[must_use]
    pub fn timeout(&self, interval: Duration) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let serial = SerialDisposable::new();
            let composite = CompositeDisposable::new();

            // Re-arming disposes the previous timer
            let arm = {
                let serial = serial.clone();
                let downstream = downstream.clone();
                move || {
                    let downstream = downstream.clone();
                    serial.set(Timers::shared().once(
                        Instant::now() + interval,
                        move || downstream.send_error(Error::TimedOut),
                    ));
                }
            };
            arm();

            let upstream = {
                let serial = serial.clone();
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event| match event {
                    Event::Next(value) => {
                        arm();
                        downstream.send_next(value);
                    }
                    event => {
                        serial.dispose();
                        downstream.send_event(event);
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

    mod timeout {
        use std::thread;
        use std::time::Duration;

        use crate::{Error, Subject, Subscribable};

        #[test]
        fn handles_quiet_source() {
            let subscribable = Subscribable::<i32>::never()
                .timeout(Duration::from_millis(10));
            assert_eq!(subscribable.try_first(), Err(Error::TimedOut));
        }

        #[test]
        fn handles_reset_on_values() {
            let subject = Subject::new();
            let subscribable = subject
                .to_subscribable()
                .timeout(Duration::from_millis(60));

            // Values keep resetting the timer
            let handle = thread::spawn(move || {
                for value in 0..3 {
                    thread::sleep(Duration::from_millis(20));
                    subject.send_next(value);
                }
                thread::sleep(Duration::from_millis(20));
                subject.send_completed();
            });
            assert_eq!(subscribable.try_to_array(), Ok(vec![0, 1, 2]));
            handle.join().unwrap();
        }

        #[test]
        fn handles_fast_termination() {
            let subscribable =
                Subscribable::just(1).timeout(Duration::from_millis(50));
            assert_eq!(subscribable.try_first(), Ok(Some(1)));
        }
    }
}

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

//! Delay operator.

use std::time::{Duration, Instant};

use zrs_scheduler::Timers;

use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Re-delivers every event after the given interval.
    ///
    /// All events are delayed, terminals included, and their relative order
    /// is preserved: delayed delivery runs on the shared timer thread, which
    /// fires equal deadlines in submission order. Disposal stops delivery
    /// through the downstream subscriber; timers still pending at that point
    /// fire into a severed subscription and are dropped there.
    #[must_use]
    pub fn delay(&self, interval: Duration) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            source.subscribe(&Subscriber::new(move |event| {
                let downstream = downstream.clone();
                Timers::shared().once(Instant::now() + interval, move || {
                    downstream.send_event(event);
                });
            }))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod delay {
        use std::time::{Duration, Instant};

        use crate::Subscribable;

        #[test]
        fn handles_deferred_delivery() {
            let start = Instant::now();
            let values = Subscribable::from_values(vec![1, 2, 3])
                .delay(Duration::from_millis(20))
                .to_array();

            // Order is preserved across the delay
            assert_eq!(values, vec![1, 2, 3]);
            assert!(start.elapsed() >= Duration::from_millis(20));
        }
    }
}

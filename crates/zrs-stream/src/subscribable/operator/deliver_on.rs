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

//! Deliver-on operator.

use zrs_scheduler::Scheduler;

use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Re-delivers every event as a job on the given scheduler.
    ///
    /// A serial scheduler preserves the relative order of events; a
    /// non-serial scheduler, like the background pool, may reorder
    /// independently scheduled deliveries. Use the main scheduler when
    /// ordering matters.
    #[must_use]
    pub fn deliver_on(&self, scheduler: &Scheduler) -> Subscribable<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let scheduler = scheduler.clone();
            source.subscribe(&Subscriber::new(move |event| {
                let downstream = downstream.clone();
                scheduler.schedule(move || downstream.send_event(event));
            }))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod deliver_on {
        use std::thread;
        use std::time::Duration;

        use crossbeam::channel::bounded;

        use zrs_scheduler::Scheduler;

        use crate::Subscribable;

        #[test]
        fn handles_serial_ordering() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3])
                .deliver_on(&Scheduler::main());

            // A serial scheduler preserves event order
            assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
        }

        #[test]
        fn handles_thread_hop() {
            let (sender, receiver) = bounded(1);
            {
                let sender = sender.clone();
                Subscribable::just(1)
                    .deliver_on(&Scheduler::main())
                    .subscribe_next(move |_| {
                        let _ = sender.try_send(thread::current().id());
                    });
            }

            // Delivery must happen off the subscribing thread
            let observer =
                receiver.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_ne!(observer, thread::current().id());
        }
    }
}

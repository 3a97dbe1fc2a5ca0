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

//! Subscribe-on operator.

use zrs_scheduler::Scheduler;

use crate::subscribable::Subscribable;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Runs the subscription side effect on the given scheduler.
    ///
    /// The producer invocation, and with it any synchronous work it does,
    /// happens as a job on the scheduler instead of on the subscribing
    /// thread. Disposing before the job ran cancels the subscription before
    /// it ever reaches the source.
    #[must_use]
    pub fn subscribe_on(&self, scheduler: &Scheduler) -> Subscribable<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Subscribable::create(move |subscriber| {
            let source = source.clone();
            let downstream = subscriber.clone();
            scheduler.schedule(move || {
                let _ = source.subscribe(&downstream);
            })
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod subscribe_on {
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        use crossbeam::channel::bounded;

        use zrs_disposable::Disposable;
        use zrs_scheduler::Scheduler;

        use crate::Subscribable;

        #[test]
        fn handles_thread_hop() {
            let (sender, receiver) = bounded(1);
            let source = Subscribable::<()>::create(move |subscriber| {
                let _ = sender.try_send(thread::current().id());
                subscriber.send_completed();
                Disposable::new_empty()
            });

            // The producer must run off the subscribing thread
            source.subscribe_on(&Scheduler::background()).to_array();
            let producer =
                receiver.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_ne!(producer, thread::current().id());
        }

        #[test]
        fn handles_values() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3])
                .subscribe_on(&Scheduler::background());
            assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
        }
    }
}

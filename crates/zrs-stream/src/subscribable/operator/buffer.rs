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

//! Buffer operators.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use zrs_disposable::CompositeDisposable;
use zrs_lock::Lock;
use zrs_scheduler::Timers;

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Collects values into batches of the given size.
    ///
    /// A batch is emitted whenever it reaches `count` values; a partial
    /// batch is flushed on completion. Errors discard the current batch.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Collect pairs, flushing the rest
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3]).buffer(2);
    /// assert_eq!(subscribable.to_array(), vec![vec![1, 2], vec![3]]);
    /// ```
    #[must_use]
    pub fn buffer(&self, count: usize) -> Subscribable<Vec<T>> {
        assert!(count > 0, "buffer size must be positive");
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let mut batch = Vec::with_capacity(count);
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    batch.push(value);
                    if batch.len() == count {
                        let full = mem::replace(
                            &mut batch,
                            Vec::with_capacity(count),
                        );
                        downstream.send_next(full);
                    }
                }
                Event::Error(error) => {
                    batch.clear();
                    downstream.send_error(error);
                }
                Event::Completed => {
                    if !batch.is_empty() {
                        downstream.send_next(mem::take(&mut batch));
                    }
                    downstream.send_completed();
                }
            }))
        })
    }

    /// Collects values into batches emitted at a fixed interval.
    ///
    /// Every tick emits the batch accumulated since the previous tick, an
    /// empty one included. On completion, a non-empty remainder is flushed
    /// before the completion is forwarded; errors discard it.
    #[must_use]
    pub fn buffer_with_time(
        &self,
        interval: Duration,
    ) -> Subscribable<Vec<T>> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let batch = Arc::new(Lock::new(Vec::new()));
            let composite = CompositeDisposable::new();

            // Each tick cuts the current batch
            let timer = {
                let batch = Arc::clone(&batch);
                let downstream = downstream.clone();
                Timers::shared().every(interval, move || {
                    let full = mem::take(&mut *batch.lock());
                    downstream.send_next(full);
                })
            };

            let upstream = {
                let batch = Arc::clone(&batch);
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event| match event {
                    Event::Next(value) => batch.lock().push(value),
                    Event::Error(error) => {
                        batch.lock().clear();
                        downstream.send_error(error);
                    }
                    Event::Completed => {
                        let rest = mem::take(&mut *batch.lock());
                        if !rest.is_empty() {
                            downstream.send_next(rest);
                        }
                        downstream.send_completed();
                    }
                }))
            };
            composite.add(upstream);
            composite.add(timer);
            composite.to_disposable()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod buffer {
        use crate::Subscribable;

        #[test]
        fn handles_batches() {
            let subscribable =
                Subscribable::from_values(vec![1, 2, 3, 4]).buffer(2);
            assert_eq!(
                subscribable.to_array(),
                vec![vec![1, 2], vec![3, 4]]
            );
        }

        #[test]
        fn handles_partial_flush() {
            let subscribable =
                Subscribable::from_values(vec![1, 2, 3]).buffer(2);
            assert_eq!(subscribable.to_array(), vec![vec![1, 2], vec![3]]);
        }
    }

    mod buffer_with_time {
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        use zrs_lock::Lock;

        use crate::Subject;

        #[test]
        fn handles_timed_batches() {
            let subject = Subject::new();
            let batches = Arc::new(Lock::new(Vec::new()));
            {
                let batches = Arc::clone(&batches);
                subject
                    .to_subscribable()
                    .buffer_with_time(Duration::from_millis(25))
                    .subscribe_next(move |batch| {
                        batches.lock().push(batch);
                    });
            }

            // Values accumulated before the tick land in one batch
            subject.send_next(1);
            subject.send_next(2);
            thread::sleep(Duration::from_millis(100));
            let batches = batches.lock();
            assert_eq!(batches.first(), Some(&vec![1, 2]));
        }

        #[test]
        fn handles_flush_on_completion() {
            let subject = Subject::new();
            let batches = Arc::new(Lock::new(Vec::new()));
            {
                let batches = Arc::clone(&batches);
                subject
                    .to_subscribable()
                    .buffer_with_time(Duration::from_secs(60))
                    .subscribe_next(move |batch| {
                        batches.lock().push(batch);
                    });
            }

            // The remainder flushes without waiting for the tick
            subject.send_next(1);
            subject.send_completed();
            assert_eq!(*batches.lock(), vec![vec![1]]);
        }
    }
}

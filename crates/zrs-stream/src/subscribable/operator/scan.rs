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

//! Scan operator.

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
    /// Combines values with a running accumulator, emitting every step.
    ///
    /// The accumulator starts at `start` and is folded with each incoming
    /// value; the updated accumulator is emitted on every value. Use
    /// [`aggregate`][] to only emit the final accumulator on completion.
    ///
    /// [`aggregate`]: Subscribable::aggregate
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Emit running sums
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3]);
    /// assert_eq!(
    ///     subscribable.scan(0, |sum, x| sum + x).to_array(),
    ///     vec![1, 3, 6]
    /// );
    /// ```
    #[must_use]
    pub fn scan<U, F>(&self, start: U, combine: F) -> Subscribable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let combine = combine.clone();
            let mut running = start.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    running = combine(running.clone(), value);
                    downstream.send_next(running.clone());
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => downstream.send_completed(),
            }))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod scan {
        use crate::Subscribable;

        #[test]
        fn handles_running_value() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3]);
            assert_eq!(
                subscribable.scan(0, |sum, x| sum + x).to_array(),
                vec![1, 3, 6]
            );
        }

        #[test]
        fn handles_fresh_state_per_subscription() {
            let scanned = Subscribable::from_values(vec![1, 1])
                .scan(0, |sum, x| sum + x);

            // Each subscription must fold from the start value
            assert_eq!(scanned.to_array(), vec![1, 2]);
            assert_eq!(scanned.to_array(), vec![1, 2]);
        }
    }
}

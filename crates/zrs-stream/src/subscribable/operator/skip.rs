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

//! Skip operators.

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
    /// Drops the first `count` values, forwarding the rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Skip the first two values
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3, 4]);
    /// assert_eq!(subscribable.skip(2).to_array(), vec![3, 4]);
    /// ```
    #[must_use]
    pub fn skip(&self, count: usize) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let mut remaining = count;
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if remaining == 0 {
                        downstream.send_next(value);
                    } else {
                        remaining -= 1;
                    }
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => downstream.send_completed(),
            }))
        })
    }

    /// Drops values while the predicate returns `true`.
    ///
    /// Once the predicate returns `false` for a value, that value and all
    /// following values are forwarded without further predicate calls.
    #[must_use]
    pub fn skip_while<F>(&self, predicate: F) -> Subscribable<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let predicate = predicate.clone();
            let mut skipping = true;
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if skipping && predicate(&value) {
                        return;
                    }
                    skipping = false;
                    downstream.send_next(value);
                }
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => downstream.send_completed(),
            }))
        })
    }

    /// Drops values until the predicate returns `true`.
    ///
    /// The first value for which the predicate returns `true` is forwarded,
    /// along with everything after it.
    #[must_use]
    pub fn skip_until<F>(&self, predicate: F) -> Subscribable<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        self.skip_while(move |value| !predicate(value))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod skip {
        use crate::Subscribable;

        #[test]
        fn handles_count() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3, 4]);
            assert_eq!(subscribable.skip(2).to_array(), vec![3, 4]);
        }

        #[test]
        fn handles_excessive_count() {
            let subscribable = Subscribable::from_values(vec![1, 2]);
            assert_eq!(subscribable.skip(5).to_array(), Vec::<i32>::new());
        }
    }

    mod skip_while {
        use crate::Subscribable;

        #[test]
        fn handles_prefix() {
            let subscribable =
                Subscribable::from_values(vec![1, 2, 3, 1, 2]);

            // Once forwarding starts, it never stops again
            assert_eq!(
                subscribable.skip_while(|x| *x < 3).to_array(),
                vec![3, 1, 2]
            );
        }
    }

    mod skip_until {
        use crate::Subscribable;

        #[test]
        fn handles_first_match() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3, 4]);
            assert_eq!(
                subscribable.skip_until(|x| x % 3 == 0).to_array(),
                vec![3, 4]
            );
        }
    }
}

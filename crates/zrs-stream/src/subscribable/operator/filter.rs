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

//! Filter operator.

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
    /// Forwards only the values for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Keep even values
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3, 4]);
    /// assert_eq!(subscribable.filter(|x| x % 2 == 0).to_array(), vec![2, 4]);
    /// ```
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Subscribable<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let predicate = predicate.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if predicate(&value) {
                        downstream.send_next(value);
                    }
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

    mod filter {
        use crate::Subscribable;

        #[test]
        fn handles_predicate() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3, 4]);
            assert_eq!(
                subscribable.filter(|x| x % 2 == 0).to_array(),
                vec![2, 4]
            );
        }

        #[test]
        fn handles_conjunction() {
            let subscribable = Subscribable::from_values(1..=20);

            // Filtering twice must equal filtering the conjunction
            let twice = subscribable
                .filter(|x| x % 2 == 0)
                .filter(|x| x % 3 == 0)
                .to_array();
            let conjoined = subscribable
                .filter(|x| x % 2 == 0 && x % 3 == 0)
                .to_array();
            assert_eq!(twice, conjoined);
        }
    }
}

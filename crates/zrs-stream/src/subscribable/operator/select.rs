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

//! Select operator.

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
    /// Transforms each value with the given function.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Map each value
    /// let subscribable = Subscribable::just(42).select(|x| x + 1);
    /// assert_eq!(subscribable.first(), Some(43));
    /// ```
    #[must_use]
    pub fn select<U, F>(&self, f: F) -> Subscribable<U>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let f = f.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => downstream.send_next(f(value)),
                Event::Error(error) => downstream.send_error(error),
                Event::Completed => downstream.send_completed(),
            }))
        })
    }

    /// Transforms each value into a subscribable and merges the results.
    ///
    /// Inner subscribables run with unbounded concurrency; the result
    /// completes once the source and all inner subscribables completed.
    #[must_use]
    pub fn select_many<U, F>(&self, f: F) -> Subscribable<U>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> Subscribable<U> + Clone + Send + Sync + 'static,
    {
        self.select(f).merge_all()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod select {
        use crate::Subscribable;

        #[test]
        fn handles_transformation() {
            let subscribable = Subscribable::just(42).select(|x| x + 1);
            assert_eq!(subscribable.first(), Some(43));
        }

        #[test]
        fn handles_composition() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3]);

            // Mapping twice must equal mapping the composition
            let twice =
                subscribable.select(|x| x * 2).select(|x| x + 1).to_array();
            let composed = subscribable.select(|x| x * 2 + 1).to_array();
            assert_eq!(twice, composed);
        }

        #[test]
        fn handles_order() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3]);
            assert_eq!(
                subscribable.select(|x| x * 10).to_array(),
                vec![10, 20, 30]
            );
        }
    }

    mod select_many {
        use crate::Subscribable;

        #[test]
        fn handles_flattening() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3])
                .select_many(|x| Subscribable::from_values(vec![x, x * 10]));
            let mut values = subscribable.to_array();
            values.sort_unstable();
            assert_eq!(values, vec![1, 2, 3, 10, 20, 30]);
        }
    }
}

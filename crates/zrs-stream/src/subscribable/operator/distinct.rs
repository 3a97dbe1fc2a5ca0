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

//! Distinct-until-changed operator.

use crate::event::Event;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Forwards values that differ from the previously forwarded value.
    ///
    /// The first value is always forwarded; afterwards, a value only passes
    /// when it compares unequal to the last one that did.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Collapse consecutive duplicates
    /// let subscribable = Subscribable::from_values(vec![1, 1, 2, 2, 1]);
    /// assert_eq!(
    ///     subscribable.distinct_until_changed().to_array(),
    ///     vec![1, 2, 1]
    /// );
    /// ```
    #[must_use]
    pub fn distinct_until_changed(&self) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let mut last: Option<T> = None;
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    if last.as_ref() != Some(&value) {
                        last = Some(value.clone());
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

    mod distinct_until_changed {
        use crate::Subscribable;

        #[test]
        fn handles_consecutive_duplicates() {
            let subscribable = Subscribable::from_values(vec![1, 1, 2, 2, 1]);
            assert_eq!(
                subscribable.distinct_until_changed().to_array(),
                vec![1, 2, 1]
            );
        }

        #[test]
        fn handles_first_value() {
            let subscribable = Subscribable::from_values(vec![7, 7]);
            assert_eq!(
                subscribable.distinct_until_changed().to_array(),
                vec![7]
            );
        }
    }
}

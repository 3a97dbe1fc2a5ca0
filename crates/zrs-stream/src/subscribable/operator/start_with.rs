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

//! Start-with operator.

use crate::subscribable::Subscribable;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Emits the given value synchronously before forwarding the source.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Prepend an initial value
    /// let subscribable = Subscribable::from_values(vec![2, 3]).start_with(1);
    /// assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn start_with(&self, value: T) -> Subscribable<T> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            subscriber.send_next(value.clone());
            source.subscribe(subscriber)
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod start_with {
        use crate::Subscribable;

        #[test]
        fn handles_initial_value() {
            let subscribable =
                Subscribable::from_values(vec![2, 3]).start_with(1);
            assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
        }
    }
}

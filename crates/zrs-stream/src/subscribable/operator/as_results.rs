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

//! As-results operator.

use crate::event::{Error, Event};
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Reifies values and errors into [`Result`] values.
    ///
    /// Every value becomes `Ok`, and an upstream error becomes one `Err`
    /// value followed by completion, so the result never errors downstream.
    /// This turns error handling into ordinary value handling.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::{Error, Subscribable};
    ///
    /// // Observe the error as a value
    /// let subscribable = Subscribable::<i32>::error(Error::failed("boom"));
    /// assert_eq!(
    ///     subscribable.as_results().to_array(),
    ///     vec![Err(Error::failed("boom"))]
    /// );
    /// ```
    #[must_use]
    pub fn as_results(&self) -> Subscribable<Result<T, Error>> {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => downstream.send_next(Ok(value)),
                Event::Error(error) => {
                    downstream.send_next(Err(error));
                    downstream.send_completed();
                }
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

    mod as_results {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_values() {
            let subscribable = Subscribable::from_values(vec![1, 2]);
            assert_eq!(
                subscribable.as_results().to_array(),
                vec![Ok(1), Ok(2)]
            );
        }

        #[test]
        fn handles_error_reification() {
            let subscribable = Subscribable::just(1)
                .concat_with(&Subscribable::error(Error::failed("boom")));

            // The error becomes a value, followed by completion
            assert_eq!(
                subscribable.as_results().try_to_array(),
                Ok(vec![Ok(1), Err(Error::failed("boom"))])
            );
        }
    }
}

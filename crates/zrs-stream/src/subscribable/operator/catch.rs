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

//! Catch operators.

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
    /// Replaces an upstream error with a replacement subscribable.
    ///
    /// On error, the handler is invoked with the error and the result
    /// switches over to the subscribable it returns; values and completion
    /// pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::{Error, Subscribable};
    ///
    /// // Recover from the error
    /// let subscribable = Subscribable::<i32>::error(Error::failed("x"))
    ///     .catch(|_| Subscribable::just(7));
    /// assert_eq!(subscribable.first(), Some(7));
    /// ```
    #[must_use]
    pub fn catch<F>(&self, handler: F) -> Subscribable<T>
    where
        F: Fn(Error) -> Subscribable<T> + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let handler = handler.clone();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Error(error) => {
                    // The erroring subscription tore itself down, so the
                    // replacement is tied to the downstream subscriber
                    let replacement = handler(error);
                    let forward = downstream.clone();
                    downstream.attach(replacement.subscribe(
                        &Subscriber::new(move |event| {
                            forward.send_event(event);
                        }),
                    ));
                }
                event => downstream.send_event(event),
            }))
        })
    }

    /// Replaces an upstream error with a constant replacement.
    #[must_use]
    pub fn catch_to(&self, replacement: &Subscribable<T>) -> Subscribable<T> {
        let replacement = replacement.clone();
        self.catch(move |_| replacement.clone())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod catch {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_replacement() {
            let subscribable = Subscribable::just(1)
                .concat_with(&Subscribable::error(Error::failed("x")))
                .catch(|_| Subscribable::from_values(vec![8, 9]));
            assert_eq!(subscribable.to_array(), vec![1, 8, 9]);
        }

        #[test]
        fn handles_error_access() {
            let subscribable = Subscribable::<String>::error(
                Error::failed("boom"),
            )
            .catch(|error| Subscribable::just(error.to_string()));
            assert_eq!(subscribable.first(), Some("boom".into()));
        }
    }

    mod catch_to {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_constant_replacement() {
            let subscribable = Subscribable::<i32>::error(Error::failed("x"))
                .catch_to(&Subscribable::just(7));
            assert_eq!(subscribable.first(), Some(7));
        }

        #[test]
        fn handles_errorless_source() {
            let subscribable = Subscribable::just(1)
                .catch_to(&Subscribable::just(7));

            // Without an error, the replacement never subscribes
            assert_eq!(subscribable.to_array(), vec![1]);
        }
    }
}

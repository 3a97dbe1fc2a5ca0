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

//! Blocking accessors.

use crossbeam::channel::{Receiver, unbounded};

use zrs_disposable::Disposable;

use crate::event::{Error, Event};
use crate::subscriber::Subscriber;

use super::Subscribable;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Blocks until the first value or terminal event.
    ///
    /// Returns the first value, or `None` if the sequence terminates without
    /// one. The subscription is disposed as soon as the outcome is known. On
    /// a sequence that never emits and never terminates, this call blocks
    /// forever.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Block for the first value
    /// let subscribable = Subscribable::just(42).select(|x| x + 1);
    /// assert_eq!(subscribable.first(), Some(43));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.try_first().ok().flatten()
    }

    /// Blocks until the first value, falling back to the given default.
    #[must_use]
    pub fn first_or_default(&self, default: T) -> T {
        self.first().unwrap_or(default)
    }

    /// Blocks until the first value or terminal event, surfacing errors.
    ///
    /// This is the diagnostic variant of [`Subscribable::first`]: a terminal
    /// error is returned as `Err` instead of being swallowed.
    ///
    /// # Errors
    ///
    /// Returns the stream error if the sequence errors before emitting.
    pub fn try_first(&self) -> Result<Option<T>, Error> {
        for event in self.drain(true) {
            return match event {
                Event::Next(value) => Ok(Some(value)),
                Event::Error(error) => Err(error),
                Event::Completed => Ok(None),
            };
        }
        Ok(None)
    }

    /// Blocks until completion, collecting all values in order.
    ///
    /// A terminal error ends collection silently: the values collected so
    /// far are returned and the error is dropped. Use
    /// [`Subscribable::try_to_array`] to surface it instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_stream::Subscribable;
    ///
    /// // Collect the whole sequence
    /// let subscribable = Subscribable::from_values(vec![1, 2, 3]);
    /// assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_array(&self) -> Vec<T> {
        let mut values = Vec::new();
        for event in self.drain(false) {
            match event {
                Event::Next(value) => values.push(value),
                Event::Error(_) | Event::Completed => break,
            }
        }
        values
    }

    /// Blocks until completion, collecting all values or the error.
    ///
    /// # Errors
    ///
    /// Returns the stream error if the sequence errors; values collected
    /// before the error are discarded.
    pub fn try_to_array(&self) -> Result<Vec<T>, Error> {
        let mut values = Vec::new();
        for event in self.drain(false) {
            match event {
                Event::Next(value) => values.push(value),
                Event::Error(error) => return Err(error),
                Event::Completed => break,
            }
        }
        Ok(values)
    }

    /// Subscribes and returns a blocking iterator over the events.
    ///
    /// The subscription is disposed when the iterator is dropped, so a
    /// caller that stops iterating early still severs the upstream. With
    /// `first_only`, the iterator ends after one event either way.
    fn drain(&self, first_only: bool) -> Drain<T> {
        let (sender, receiver) = unbounded::<Event<T>>();
        let disposable = self.subscribe(&Subscriber::new(move |event| {
            let _ = sender.send(event);
        }));
        Drain {
            receiver,
            disposable,
            first_only,
            done: false,
        }
    }
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Blocking event iterator.
struct Drain<T> {
    /// Event receiver fed by the subscription.
    receiver: Receiver<Event<T>>,
    /// Handle severing the subscription.
    disposable: Disposable,
    /// Whether the iterator ends after one event.
    first_only: bool,
    /// Whether the iterator is exhausted.
    done: bool,
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Iterator for Drain<T> {
    type Item = Event<T>;

    /// Blocks until the next event, if any.
    fn next(&mut self) -> Option<Event<T>> {
        if self.done {
            return None;
        }
        let event = self.receiver.recv().ok()?;
        if self.first_only || event.is_terminal() {
            self.done = true;
        }
        Some(event)
    }
}

impl<T> Drop for Drain<T> {
    /// Severs the subscription.
    fn drop(&mut self) {
        self.disposable.dispose();
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod first {
        use crate::Subscribable;

        #[test]
        fn handles_value() {
            let subscribable = Subscribable::just(42).select(|x| x + 1);
            assert_eq!(subscribable.first(), Some(43));
        }

        #[test]
        fn handles_empty_sequence() {
            assert_eq!(Subscribable::<i32>::empty().first(), None);
        }
    }

    mod first_or_default {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_fallback() {
            let subscribable = Subscribable::<i32>::error(Error::failed("x"));
            assert_eq!(subscribable.first_or_default(7), 7);
        }
    }

    mod to_array {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_order() {
            let subscribable = Subscribable::from_values(vec![1, 2, 3]);
            assert_eq!(subscribable.to_array(), vec![1, 2, 3]);
        }

        #[test]
        fn handles_error_prefix() {
            let subscribable = Subscribable::from_values(vec![1, 2])
                .concat_with(&Subscribable::error(Error::failed("x")));

            // The collected prefix is returned, the error is dropped
            assert_eq!(subscribable.to_array(), vec![1, 2]);
        }
    }

    mod try_to_array {
        use crate::{Error, Subscribable};

        #[test]
        fn handles_error() {
            let subscribable = Subscribable::from_values(vec![1, 2])
                .concat_with(&Subscribable::error(Error::failed("x")));
            assert_eq!(subscribable.try_to_array(), Err(Error::failed("x")));
        }
    }
}

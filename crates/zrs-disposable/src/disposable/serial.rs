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

//! Serial disposable.

use std::fmt;
use std::sync::Arc;

use zrs_lock::Lock;

use super::{Disposable, Dispose};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Serial disposable.
///
/// Serials hold at most one inner disposable at a time. Resubscribing and
/// switching operators use them to track the currently active subscription:
/// [`SerialDisposable::set`] disposes the previous inner, while
/// [`SerialDisposable::replace`] hands it back to the caller. Once the serial
/// itself is disposed, the current inner and every future inner are disposed.
///
/// # Examples
///
/// ```
/// use zrs_disposable::{Disposable, SerialDisposable};
///
/// // Create serial and set inner
/// let serial = SerialDisposable::new();
/// let first = Disposable::new_empty();
/// serial.set(first.clone());
///
/// // Setting a new inner disposes the previous one
/// serial.set(Disposable::new_empty());
/// assert!(first.is_disposed());
/// ```
#[derive(Clone)]
pub struct SerialDisposable {
    /// Shared serial state.
    inner: Arc<Serial>,
}

// ----------------------------------------------------------------------------

/// Serial state.
struct Serial {
    /// Disposal flag and current inner.
    state: Lock<State>,
}

/// Inner state.
#[derive(Default)]
struct State {
    /// Disposal flag.
    disposed: bool,
    /// Current inner disposable.
    current: Option<Disposable>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl SerialDisposable {
    /// Creates a serial disposable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Serial { state: Lock::new(State::default()) }),
        }
    }

    /// Replaces the inner disposable, returning the previous one.
    ///
    /// If the serial is already disposed, the given disposable is disposed
    /// immediately and `None` is returned.
    pub fn replace(&self, next: Disposable) -> Option<Disposable> {
        {
            let mut state = self.inner.state.lock();
            if !state.disposed {
                return state.current.replace(next);
            }
        }

        // Serial is already disposed
        next.dispose();
        None
    }

    /// Replaces the inner disposable, disposing the previous one.
    pub fn set(&self, next: Disposable) {
        if let Some(prior) = self.replace(next) {
            prior.dispose();
        }
    }

    /// Disposes the serial and its current inner disposable.
    #[inline]
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    /// Returns whether the serial is disposed.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Returns a disposable handle controlling this serial.
    #[must_use]
    pub fn to_disposable(&self) -> Disposable {
        Disposable::from_shared(Arc::clone(&self.inner) as Arc<dyn Dispose>)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Dispose for Serial {
    /// Disposes the serial and its current inner disposable.
    fn dispose(&self) {
        let current = {
            let mut state = self.state.lock();
            state.disposed = true;
            state.current.take()
        };

        // Dispose current inner outside the critical section
        if let Some(current) = current {
            current.dispose();
        }
    }

    /// Returns whether the serial is disposed.
    #[inline]
    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }
}

// ----------------------------------------------------------------------------

impl Default for SerialDisposable {
    /// Creates a serial disposable.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SerialDisposable {
    /// Formats the serial for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SerialDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod set {
        use crate::{Disposable, SerialDisposable};

        #[test]
        fn handles_replacement() {
            let serial = SerialDisposable::new();
            let first = Disposable::new_empty();
            serial.set(first.clone());

            // Setting a new inner disposes the previous one
            serial.set(Disposable::new_empty());
            assert!(first.is_disposed());
        }

        #[test]
        fn handles_disposed_serial() {
            let serial = SerialDisposable::new();
            serial.dispose();

            // Setting on a disposed serial disposes immediately
            let inner = Disposable::new_empty();
            serial.set(inner.clone());
            assert!(inner.is_disposed());
        }
    }

    mod dispose {
        use crate::{Disposable, SerialDisposable};

        #[test]
        fn handles_current_inner() {
            let serial = SerialDisposable::new();
            let inner = Disposable::new_empty();
            serial.set(inner.clone());

            // Disposing the serial disposes the current inner
            serial.dispose();
            assert!(inner.is_disposed());
            assert!(serial.is_disposed());
        }
    }
}

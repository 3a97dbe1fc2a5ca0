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

//! Event.

use thiserror::Error as ThisError;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Event.
///
/// Each subscription observes a sequence of events matching `Next* (Error |
/// Completed)?`: any number of values, terminated by at most one terminal
/// event, after which nothing else is delivered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event<T> {
    /// A value.
    Next(T),
    /// Terminal failure.
    Error(Error),
    /// Terminal completion.
    Completed,
}

// ----------------------------------------------------------------------------

/// Error.
///
/// Stream errors are first-class terminal events that flow through pipelines
/// as values. They are never surfaced through panics: operators propagate
/// them downstream, and the error-handling operators consume or transform
/// them.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    /// No event was received within the expected interval.
    #[error("subscription timed out")]
    TimedOut,
    /// Operation failed with a message.
    #[error("{0}")]
    Failed(String),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Event<T> {
    /// Returns whether the event is terminal.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }
}

impl Error {
    /// Creates an error from a message.
    pub fn failed<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self::Failed(message.into())
    }

    /// Returns the numeric error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::TimedOut => 1,
            Self::Failed(_) => 2,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod code {
        use crate::Error;

        #[test]
        fn handles_categories() {
            assert_eq!(Error::TimedOut.code(), 1);
            assert_eq!(Error::failed("boom").code(), 2);
        }
    }
}

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

//! Error.

use crossbeam::channel::SendError;
use thiserror::Error;

use super::task::Task;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Error.
#[derive(Debug, Error)]
pub enum Error {
    /// Task could not be submitted.
    ///
    /// The rejected task is handed back to the caller, which may resubmit it
    /// to another executor.
    #[error("failed to submit task")]
    Submit(Box<dyn Task>),
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<SendError<Box<dyn Task>>> for Error {
    /// Creates an error from a failed channel send.
    #[inline]
    fn from(err: SendError<Box<dyn Task>>) -> Self {
        Self::Submit(err.0)
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Result with error.
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

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

//! Task.

use std::fmt;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Task.
///
/// Tasks are units of work that can be submitted to an [`Executor`][], which
/// forwards them for execution to an execution [`Strategy`][]. Tasks almost
/// always capture environment variables, which is why they're created from
/// [`FnOnce`] and must be [`Send`]. If a task panics, it doesn't take the
/// worker thread or executor with it.
///
/// As task execution must be infallible, tasks should use channels in order
/// to communicate results or errors back to the submitting thread.
///
/// [`Executor`]: crate::Executor
/// [`Strategy`]: crate::strategy::Strategy
pub trait Task: Send + 'static {
    /// Executes the task.
    fn execute(self: Box<Self>);
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<F> From<F> for Box<dyn Task>
where
    F: Task,
{
    /// Creates a boxed task from a task.
    ///
    /// This implementation ensures we can comfortably pass bare closures, as
    /// well as boxed tasks that were handed back as part of a submit error,
    /// to [`Executor::submit`][].
    ///
    /// [`Executor::submit`]: crate::Executor::submit
    #[inline]
    fn from(task: F) -> Self {
        Box::new(task)
    }
}

// ----------------------------------------------------------------------------

impl fmt::Debug for Box<dyn Task> {
    /// Formats the task for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Box<dyn Task>")
    }
}

// ----------------------------------------------------------------------------
// Blanket implementations
// ----------------------------------------------------------------------------

impl<F> Task for F
where
    F: FnOnce() + Send + 'static,
{
    #[inline]
    fn execute(self: Box<Self>) {
        self();
    }
}

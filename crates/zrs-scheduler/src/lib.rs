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

//! Schedulers for immediate, pooled and serial execution.
//!
//! Schedulers decide on which execution context work runs. Three named
//! schedulers are provided: [`Scheduler::immediate`] runs work synchronously
//! on the calling thread, [`Scheduler::background`] dispatches onto a worker
//! pool, and [`Scheduler::main`] serialises work on a dedicated thread. All
//! delayed and recurring work is driven by a shared [`Timers`] service.
//!
//! The named schedulers are process-wide: they initialise on first use and
//! are torn down explicitly with [`shutdown`], which should be called once
//! on process exit.

mod scheduler;

pub use scheduler::timer::Timers;
pub use scheduler::{
    Background, Immediate, RecurringWork, Schedule, Scheduler, Serial, Work,
    shutdown,
};

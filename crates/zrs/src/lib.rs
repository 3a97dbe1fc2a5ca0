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

//! Zen Reactive Streams.
//!
//! Push-based reactive streams for Rust: model asynchronous and event-driven
//! computations as first-class composable values. A [`Subscribable`]
//! produces a sequence of values terminated by at most one error or
//! completion; the operator catalog transforms, filters, combines, times and
//! multicasts such sequences, and pluggable [`Scheduler`]s decide on which
//! execution context events are produced and delivered.
//!
//! # Examples
//!
//! ```
//! use zrs::{Scheduler, Subscribable};
//!
//! // Generate, transform and collect a sequence
//! let values = Subscribable::generator(
//!     &Scheduler::immediate(),
//!     0,
//!     |x| if *x < 5 { Some(x + 1) } else { None },
//! );
//! assert_eq!(
//!     values.select(|x| x * x).to_array(),
//!     vec![0, 1, 4, 9, 16, 25]
//! );
//! ```

pub use zrs_disposable::{CompositeDisposable, Disposable, SerialDisposable};
pub use zrs_executor::Executor;
pub use zrs_lock::{Kind, Lock};
pub use zrs_scheduler::{Schedule, Scheduler, Timers, shutdown};
pub use zrs_stream::{
    CancelableSubscribable, ConnectableSubscribable, Error, Event, Grouped,
    Multicast, ReplaySubject, Subject, Subscribable, Subscriber,
};

/// Commonly used types.
pub mod prelude {
    pub use zrs_disposable::{CompositeDisposable, Disposable};
    pub use zrs_scheduler::Scheduler;
    pub use zrs_stream::{
        Error, Event, ReplaySubject, Subject, Subscribable, Subscriber,
    };
}

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

//! Push-based reactive streams and their operator catalog.
//!
//! A [`Subscribable`] produces a sequence of [`Event`]s for each subscription:
//! any number of `Next` values, terminated by at most one `Error` or
//! `Completed`. Subscriptions are cold by default, so every [`Subscriber`]
//! triggers a fresh producer invocation and receives an independent sequence.
//! A [`Subject`] multicasts to its current observers, and a
//! [`ConnectableSubscribable`] shares one upstream subscription among many
//! downstream subscribers.
//!
//! Operators compose subscribables into pipelines: each operator returns a
//! new cold subscribable that subscribes upstream on demand, transforms the
//! events, and forwards them downstream.

mod connectable;
mod event;
mod subject;
mod subscribable;
mod subscriber;

pub use connectable::ConnectableSubscribable;
pub use connectable::cancelable::CancelableSubscribable;
pub use event::{Error, Event};
pub use subject::replay::ReplaySubject;
pub use subject::{Multicast, Subject};
pub use subscribable::Subscribable;
pub use subscribable::operator::group::Grouped;
pub use subscriber::Subscriber;

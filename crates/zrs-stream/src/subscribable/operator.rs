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

//! Operators.
//!
//! Every operator returns a new cold subscribable: subscribing to it
//! subscribes to the upstream source(s), installs the forwarding logic, and
//! ties the upstream subscription to the downstream subscriber's composite
//! disposable. Unless documented otherwise, operators forward errors
//! immediately and forward completion after draining any buffered state.

mod aggregate;
mod as_results;
mod buffer;
mod catch;
mod combine;
mod concat;
mod delay;
mod deliver_on;
mod distinct;
mod filter;
mod finally;
pub mod group;
mod inspect;
mod merge;
mod multicast;
mod quantifier;
mod repeat;
mod resubscribe;
mod retry;
mod scan;
mod select;
mod skip;
mod start_with;
mod subscribe_on;
mod switch;
mod take;
mod throttle;
mod timeout;
mod window;

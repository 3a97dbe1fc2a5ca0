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

//! Disposable.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use zrs_lock::Lock;

pub mod composite;
pub mod serial;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Disposal behavior.
///
/// This trait is the seam between the cheap [`Disposable`] handle and the
/// state it controls. Implementations must be idempotent: the transition to
/// the disposed state is one-way, and any cleanup runs at most once.
pub trait Dispose: Send + Sync {
    /// Disposes the underlying state.
    fn dispose(&self);

    /// Returns whether the state is disposed.
    fn is_disposed(&self) -> bool;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Disposable.
///
/// Disposables are single-shot cancellation tokens. A disposable starts out
/// active and transitions to disposed exactly once, running its cleanup
/// action at most once, outside of any critical section. Handles are cheap
/// to clone and share the underlying state, so a subscription can be severed
/// from any thread.
///
/// # Examples
///
/// ```
/// use zrs_disposable::Disposable;
///
/// // Create disposable and dispose it
/// let disposable = Disposable::new(|| println!("cleaned up"));
/// disposable.dispose();
/// assert!(disposable.is_disposed());
/// ```
#[derive(Clone)]
pub struct Disposable {
    /// Shared disposal state.
    inner: Arc<dyn Dispose>,
}

// ----------------------------------------------------------------------------

/// Single-shot cleanup action.
struct Action {
    /// Disposal flag.
    disposed: AtomicBool,
    /// Cleanup action, if any.
    action: Lock<Option<Box<dyn FnOnce() + Send>>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Disposable {
    /// Creates a disposable with a cleanup action.
    ///
    /// The action runs exactly once, when the disposable is first disposed.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_disposable::Disposable;
    ///
    /// // Create disposable
    /// let disposable = Disposable::new(|| println!("cleaned up"));
    /// ```
    #[must_use]
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            inner: Arc::new(Action {
                disposed: AtomicBool::new(false),
                action: Lock::new(Some(Box::new(action))),
            }),
        }
    }

    /// Creates a disposable without a cleanup action.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_disposable::Disposable;
    ///
    /// // Create disposable
    /// let disposable = Disposable::new_empty();
    /// assert!(!disposable.is_disposed());
    /// ```
    #[must_use]
    pub fn new_empty() -> Self {
        Self {
            inner: Arc::new(Action {
                disposed: AtomicBool::new(false),
                action: Lock::new(None),
            }),
        }
    }

    /// Creates a disposable from shared disposal state.
    ///
    /// This constructor links a handle to state that is also reachable by
    /// other means, e.g., a [`CompositeDisposable`][] exposing itself as a
    /// disposable to its owner.
    ///
    /// [`CompositeDisposable`]: crate::CompositeDisposable
    #[must_use]
    pub fn from_shared(inner: Arc<dyn Dispose>) -> Self {
        Self { inner }
    }

    /// Disposes the disposable.
    ///
    /// The first call runs the cleanup action, if any. Subsequent calls are
    /// no-ops, so disposal can be raced from multiple threads.
    #[inline]
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    /// Returns whether the disposable is disposed.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Returns whether two handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Dispose for Action {
    /// Disposes the action.
    ///
    /// The action is taken out of the critical section before it is invoked,
    /// so a cleanup action can acquire arbitrary locks without deadlocking
    /// against concurrent disposal.
    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            let action = self.action.lock().take();
            if let Some(action) = action {
                action();
            }
        }
    }

    /// Returns whether the action is disposed.
    #[inline]
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

// ----------------------------------------------------------------------------

impl fmt::Debug for Disposable {
    /// Formats the disposable for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod dispose {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::Disposable;

        #[test]
        fn handles_action() {
            let count = Arc::new(AtomicUsize::new(0));
            let disposable = Disposable::new({
                let count = Arc::clone(&count);
                move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }
            });

            // Disposal must be idempotent
            disposable.dispose();
            disposable.dispose();
            assert_eq!(count.load(Ordering::SeqCst), 1);
            assert!(disposable.is_disposed());
        }

        #[test]
        fn handles_clones() {
            let disposable = Disposable::new_empty();
            let clone = disposable.clone();

            // Clones must share disposal state
            clone.dispose();
            assert!(disposable.is_disposed());
            assert!(disposable.ptr_eq(&clone));
        }
    }
}

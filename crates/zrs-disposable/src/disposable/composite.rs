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

//! Composite disposable.

use std::fmt;
use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use zrs_lock::Lock;

use super::{Disposable, Dispose};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Composite disposable.
///
/// Composites own a set of child disposables that are disposed together.
/// Adding a child to a composite that is already disposed disposes the child
/// immediately, which closes the race between subscription setup and early
/// termination: a subscription that finishes before its cleanup is attached
/// still has that cleanup run.
///
/// # Examples
///
/// ```
/// use zrs_disposable::{CompositeDisposable, Disposable};
///
/// // Create composite and add children
/// let composite = CompositeDisposable::new();
/// let child = Disposable::new_empty();
/// composite.add(child.clone());
///
/// // Disposing the composite disposes all children
/// composite.dispose();
/// assert!(child.is_disposed());
/// ```
#[derive(Clone)]
pub struct CompositeDisposable {
    /// Shared composite state.
    inner: Arc<Composite>,
}

// ----------------------------------------------------------------------------

/// Composite state.
struct Composite {
    /// Disposal flag.
    disposed: AtomicBool,
    /// Child disposables.
    children: Lock<Vec<Disposable>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl CompositeDisposable {
    /// Creates a composite disposable.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_disposable::CompositeDisposable;
    ///
    /// // Create composite
    /// let composite = CompositeDisposable::new();
    /// assert!(!composite.is_disposed());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Composite {
                disposed: AtomicBool::new(false),
                children: Lock::new(Vec::new()),
            }),
        }
    }

    /// Adds a child disposable.
    ///
    /// If the composite is already disposed, the child is disposed
    /// immediately instead of being inserted.
    pub fn add(&self, child: Disposable) {
        {
            let mut children = self.inner.children.lock();
            if !self.inner.disposed.load(Ordering::Acquire) {
                children.push(child);
                return;
            }
        }

        // Composite is already disposed
        child.dispose();
    }

    /// Removes a child disposable without disposing it.
    pub fn remove(&self, child: &Disposable) {
        let mut children = self.inner.children.lock();
        children.retain(|other| !other.ptr_eq(child));
    }

    /// Disposes the composite and all of its children.
    ///
    /// The child set is taken under the lock and disposed outside of it, so
    /// child cleanup actions can themselves interact with the composite.
    #[inline]
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    /// Returns whether the composite is disposed.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Returns a disposable handle controlling this composite.
    #[must_use]
    pub fn to_disposable(&self) -> Disposable {
        Disposable::from_shared(Arc::clone(&self.inner) as Arc<dyn Dispose>)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Dispose for Composite {
    /// Disposes the composite and all of its children.
    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            let children = mem::take(&mut *self.children.lock());
            for child in children {
                child.dispose();
            }
        }
    }

    /// Returns whether the composite is disposed.
    #[inline]
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

// ----------------------------------------------------------------------------

impl Default for CompositeDisposable {
    /// Creates a composite disposable.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompositeDisposable {
    /// Formats the composite for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompositeDisposable")
            .field("disposed", &self.is_disposed())
            .field("children", &self.inner.children.lock().len())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod add {
        use crate::{CompositeDisposable, Disposable};

        #[test]
        fn handles_children() {
            let composite = CompositeDisposable::new();
            let a = Disposable::new_empty();
            let b = Disposable::new_empty();
            composite.add(a.clone());
            composite.add(b.clone());

            // Disposing the composite disposes all children
            composite.dispose();
            assert!(a.is_disposed());
            assert!(b.is_disposed());
        }

        #[test]
        fn handles_disposed_composite() {
            let composite = CompositeDisposable::new();
            composite.dispose();

            // Adding to a disposed composite disposes immediately
            let child = Disposable::new_empty();
            composite.add(child.clone());
            assert!(child.is_disposed());
        }
    }

    mod remove {
        use crate::{CompositeDisposable, Disposable};

        #[test]
        fn handles_withdrawal() {
            let composite = CompositeDisposable::new();
            let child = Disposable::new_empty();
            composite.add(child.clone());
            composite.remove(&child);

            // Removed children are not disposed
            composite.dispose();
            assert!(!child.is_disposed());
        }
    }
}

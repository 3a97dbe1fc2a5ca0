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

//! Lock.

use std::ops::{Deref, DerefMut};
use std::sync::{self, PoisonError};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Lock kind.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Kind {
    /// General-purpose mutex.
    General,
    /// Fast unfair lock.
    #[default]
    Fast,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Lock.
///
/// Locks protect a value with a mutex of the given [`Kind`]. The fast unfair
/// kind is the default, as it is cheaper to acquire under low contention and
/// available on all supported platforms. Guards release on drop, so a lock
/// can never be left in a locked state by accident.
///
/// Poisoning is deliberately ignored for the general-purpose kind: a panic
/// in a critical section must not take unrelated subscriptions down with it.
///
/// # Examples
///
/// ```
/// use zrs_lock::Lock;
///
/// // Create lock and mutate value
/// let lock = Lock::new(1);
/// *lock.lock() += 1;
/// assert_eq!(*lock.lock(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Lock<T> {
    /// Lock state.
    inner: Inner<T>,
}

/// Lock guard.
///
/// Guards provide access to the protected value and release the lock when
/// they are dropped.
#[derive(Debug)]
pub struct Guard<'a, T> {
    /// Guard state.
    inner: GuardInner<'a, T>,
}

// ----------------------------------------------------------------------------

/// Lock state.
#[derive(Debug)]
enum Inner<T> {
    /// General-purpose mutex.
    General(sync::Mutex<T>),
    /// Fast unfair lock.
    Fast(parking_lot::Mutex<T>),
}

/// Guard state.
#[derive(Debug)]
enum GuardInner<'a, T> {
    /// General-purpose mutex guard.
    General(sync::MutexGuard<'a, T>),
    /// Fast unfair lock guard.
    Fast(parking_lot::MutexGuard<'a, T>),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Lock<T> {
    /// Creates a lock of the default kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_lock::Lock;
    ///
    /// // Create lock
    /// let lock = Lock::new(1);
    /// ```
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_kind(Kind::default(), value)
    }

    /// Creates a lock of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use zrs_lock::{Kind, Lock};
    ///
    /// // Create lock with kind
    /// let lock = Lock::with_kind(Kind::General, 1);
    /// ```
    #[must_use]
    pub fn with_kind(kind: Kind, value: T) -> Self {
        Self {
            inner: match kind {
                Kind::General => Inner::General(sync::Mutex::new(value)),
                Kind::Fast => Inner::Fast(parking_lot::Mutex::new(value)),
            },
        }
    }

    /// Acquires the lock, blocking until it is available.
    pub fn lock(&self) -> Guard<'_, T> {
        Guard {
            inner: match &self.inner {
                Inner::General(mutex) => GuardInner::General(
                    mutex.lock().unwrap_or_else(PoisonError::into_inner),
                ),
                Inner::Fast(mutex) => GuardInner::Fast(mutex.lock()),
            },
        }
    }

    /// Attempts to acquire the lock without blocking.
    pub fn try_lock(&self) -> Option<Guard<'_, T>> {
        let inner = match &self.inner {
            Inner::General(mutex) => match mutex.try_lock() {
                Ok(guard) => GuardInner::General(guard),
                Err(sync::TryLockError::Poisoned(err)) => {
                    GuardInner::General(err.into_inner())
                }
                Err(sync::TryLockError::WouldBlock) => return None,
            },
            Inner::Fast(mutex) => GuardInner::Fast(mutex.try_lock()?),
        };
        Some(Guard { inner })
    }

    /// Returns the kind of the lock.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.inner {
            Inner::General(_) => Kind::General,
            Inner::Fast(_) => Kind::Fast,
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Deref for Guard<'_, T> {
    type Target = T;

    /// Dereferences the protected value.
    #[inline]
    fn deref(&self) -> &T {
        match &self.inner {
            GuardInner::General(guard) => guard,
            GuardInner::Fast(guard) => guard,
        }
    }
}

impl<T> DerefMut for Guard<'_, T> {
    /// Mutably dereferences the protected value.
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.inner {
            GuardInner::General(guard) => guard,
            GuardInner::Fast(guard) => guard,
        }
    }
}

// ----------------------------------------------------------------------------

impl<T> Default for Inner<T>
where
    T: Default,
{
    /// Creates a lock state of the default kind.
    #[inline]
    fn default() -> Self {
        Self::Fast(parking_lot::Mutex::new(T::default()))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod lock {
        use crate::{Kind, Lock};

        #[test]
        fn handles_mutation() {
            let lock = Lock::new(0);
            for _ in 0..3 {
                *lock.lock() += 1;
            }
            assert_eq!(*lock.lock(), 3);
        }

        #[test]
        fn handles_kinds() {
            for kind in [Kind::General, Kind::Fast] {
                let lock = Lock::with_kind(kind, 1);
                assert_eq!(lock.kind(), kind);
                assert_eq!(*lock.lock(), 1);
            }
        }
    }

    mod try_lock {
        use crate::Lock;

        #[test]
        fn handles_contention() {
            let lock = Lock::new(1);
            let guard = lock.lock();
            assert!(lock.try_lock().is_none());
            drop(guard);
            assert!(lock.try_lock().is_some());
        }
    }
}

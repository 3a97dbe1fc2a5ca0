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

//! Group operator.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

use crate::event::Event;
use crate::subject::Subject;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Grouped sub-stream.
///
/// Groups are emitted by [`group_by`][] when their key is first seen, and
/// carry every subsequent value with that key. A group terminates when the
/// source terminates.
///
/// [`group_by`]: Subscribable::group_by
pub struct Grouped<K, T> {
    /// Group key.
    key: K,
    /// Subject carrying the group's values.
    subject: Subject<T>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<K, T> Grouped<K, T>
where
    T: Clone + Send + 'static,
{
    /// Returns the group key.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns a subscribable view of the group.
    ///
    /// Values sent into the group before subscription are not replayed, so
    /// groups are usually subscribed from the handler that receives them.
    #[must_use]
    pub fn to_subscribable(&self) -> Subscribable<T> {
        self.subject.to_subscribable()
    }
}

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Divides values into grouped sub-streams by key.
    ///
    /// Each value is routed to the group for `key_fn(value)`; a group is
    /// created and emitted downstream when its key is first seen. All groups
    /// terminate when the source terminates.
    #[must_use]
    pub fn group_by<K, F>(&self, key_fn: F) -> Subscribable<Grouped<K, T>>
    where
        K: Clone + Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Clone + Send + Sync + 'static,
    {
        self.group_by_transform(key_fn, |value| value)
    }

    /// Divides values into grouped sub-streams by key, transformed.
    ///
    /// Behaves like [`Subscribable::group_by`], but each value is passed
    /// through the transform before it is sent into its group.
    #[must_use]
    pub fn group_by_transform<K, U, F, G>(
        &self,
        key_fn: F,
        transform: G,
    ) -> Subscribable<Grouped<K, U>>
    where
        K: Clone + Eq + Hash + Send + 'static,
        U: Clone + Send + 'static,
        F: Fn(&T) -> K + Clone + Send + Sync + 'static,
        G: Fn(T) -> U + Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let key_fn = key_fn.clone();
            let transform = transform.clone();
            let mut groups: AHashMap<K, Subject<U>> = AHashMap::new();
            source.subscribe(&Subscriber::new(move |event| match event {
                Event::Next(value) => {
                    let key = key_fn(&value);
                    let subject = match groups.get(&key) {
                        Some(subject) => subject.clone(),
                        None => {
                            let subject = Subject::new();
                            groups.insert(key.clone(), subject.clone());

                            // Emit the group before its first value, so a
                            // handler subscribing right away sees it
                            downstream.send_next(Grouped {
                                key,
                                subject: subject.clone(),
                            });
                            subject
                        }
                    };
                    subject.send_next(transform(value));
                }
                Event::Error(error) => {
                    for subject in groups.values() {
                        subject.send_error(error.clone());
                    }
                    groups.clear();
                    downstream.send_error(error);
                }
                Event::Completed => {
                    for subject in groups.values() {
                        subject.send_completed();
                    }
                    groups.clear();
                    downstream.send_completed();
                }
            }))
        })
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<K, T> Clone for Grouped<K, T>
where
    K: Clone,
{
    /// Clones the group, sharing its subject.
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            subject: self.subject.clone(),
        }
    }
}

impl<K, T> fmt::Debug for Grouped<K, T>
where
    K: fmt::Debug,
{
    /// Formats the group for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Grouped").field("key", &self.key).finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod group_by {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::Subscribable;

        #[test]
        fn handles_routing() {
            let groups = Arc::new(Lock::new(Vec::new()));
            {
                let groups = Arc::clone(&groups);
                Subscribable::from_values(vec![1, 2, 3, 4, 5])
                    .group_by(|value| value % 2)
                    .subscribe_next(move |group| {
                        let values = Arc::new(Lock::new(Vec::new()));
                        {
                            let values = Arc::clone(&values);
                            group.to_subscribable().subscribe_next(
                                move |value| {
                                    values.lock().push(value);
                                },
                            );
                        }
                        groups.lock().push((*group.key(), values));
                    });
            }

            let groups = groups.lock();
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0].0, 1);
            assert_eq!(*groups[0].1.lock(), vec![1, 3, 5]);
            assert_eq!(*groups[1].1.lock(), vec![2, 4]);
        }
    }

    mod group_by_transform {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::Subscribable;

        #[test]
        fn handles_transformation() {
            let values = Arc::new(Lock::new(Vec::new()));
            {
                let values = Arc::clone(&values);
                Subscribable::from_values(vec![1, 2, 3])
                    .group_by_transform(|_| 0, |value| value * 10)
                    .subscribe_next(move |group| {
                        let values = Arc::clone(&values);
                        group.to_subscribable().subscribe_next(
                            move |value| {
                                values.lock().push(value);
                            },
                        );
                    });
            }
            assert_eq!(*values.lock(), vec![10, 20, 30]);
        }
    }
}

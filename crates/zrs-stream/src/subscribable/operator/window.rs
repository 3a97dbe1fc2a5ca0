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

//! Window operator.

use std::sync::Arc;

use slab::Slab;

use zrs_disposable::{CompositeDisposable, Disposable};
use zrs_lock::Lock;

use crate::event::{Error, Event};
use crate::subject::Subject;
use crate::subscribable::Subscribable;
use crate::subscriber::Subscriber;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Open windows.
struct Windows<T> {
    /// Window subjects and their close subscriptions.
    open: Lock<Slab<(Subject<T>, Disposable)>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Subscribable<T>
where
    T: Clone + Send + 'static,
{
    /// Divides the values into windows, emitted as inner subscribables.
    ///
    /// Whenever the open subscribable emits, a window opens and the close
    /// factory is asked for a subscribable whose first value closes that
    /// window again. Windows may overlap; every open window receives each
    /// upstream value. A terminal from the source terminates all open
    /// windows along with the result.
    #[must_use]
    pub fn window_with_start<O, C, F>(
        &self,
        open: &Subscribable<O>,
        close: F,
    ) -> Subscribable<Subscribable<T>>
    where
        O: Clone + Send + 'static,
        C: Clone + Send + 'static,
        F: Fn(&Subscribable<T>) -> Subscribable<C>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        let source = self.clone();
        let open = open.clone();
        Subscribable::create(move |subscriber| {
            let downstream = subscriber.clone();
            let windows = Arc::new(Windows {
                open: Lock::new(Slab::new()),
            });
            let composite = CompositeDisposable::new();

            // Opening emits the window, then wires up its closing
            let opener = {
                let windows = Arc::clone(&windows);
                let downstream = downstream.clone();
                let close = close.clone();
                open.subscribe(&Subscriber::new(move |event: Event<O>| {
                    match event {
                        Event::Next(_) => {
                            let window = Subject::new();
                            let key = {
                                let mut open = windows.open.lock();
                                open.insert((
                                    window.clone(),
                                    Disposable::new_empty(),
                                ))
                            };
                            downstream.send_next(window.to_subscribable());

                            // The first value of the close subscribable
                            // completes the window and retires it
                            let closer = {
                                let windows = Arc::clone(&windows);
                                close(&window.to_subscribable())
                                    .take(1)
                                    .subscribe_next(move |_| {
                                        windows.close(key);
                                    })
                            };

                            // The window may have closed synchronously
                            let mut open = windows.open.lock();
                            if let Some(entry) = open.get_mut(key) {
                                entry.1 = closer;
                            } else {
                                closer.dispose();
                            }
                        }
                        Event::Error(error) => {
                            windows.fail(&error);
                            downstream.send_error(error);
                        }
                        Event::Completed => {}
                    }
                }))
            };

            let upstream = {
                let windows = Arc::clone(&windows);
                let downstream = downstream.clone();
                source.subscribe(&Subscriber::new(move |event: Event<T>| match event {
                    Event::Next(value) => {
                        for window in windows.snapshot() {
                            window.send_next(value.clone());
                        }
                    }
                    Event::Error(error) => {
                        windows.fail(&error);
                        downstream.send_error(error);
                    }
                    Event::Completed => {
                        for window in windows.drain() {
                            window.send_completed();
                        }
                        downstream.send_completed();
                    }
                }))
            };

            composite.add(opener);
            composite.add(upstream);
            {
                let windows = Arc::clone(&windows);
                composite.add(Disposable::new(move || {
                    for window in windows.drain() {
                        window.send_completed();
                    }
                }));
            }
            composite.to_disposable()
        })
    }
}

impl<T> Windows<T>
where
    T: Clone + Send + 'static,
{
    /// Returns a snapshot of the open window subjects.
    fn snapshot(&self) -> Vec<Subject<T>> {
        let open = self.open.lock();
        open.iter().map(|(_, (window, _))| window.clone()).collect()
    }

    /// Closes the window behind the given key.
    fn close(&self, key: usize) {
        let entry = self.open.lock().try_remove(key);
        if let Some((window, closer)) = entry {
            window.send_completed();
            closer.dispose();
        }
    }

    /// Fails all open windows.
    fn fail(&self, error: &Error) {
        for window in self.drain() {
            window.send_error(error.clone());
        }
    }

    /// Retires all open windows, disposing their close subscriptions.
    fn drain(&self) -> Vec<Subject<T>> {
        let entries: Vec<_> = {
            let mut open = self.open.lock();
            open.drain().collect()
        };
        entries
            .into_iter()
            .map(|(window, closer)| {
                closer.dispose();
                window
            })
            .collect()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod window_with_start {
        use std::sync::Arc;

        use zrs_lock::Lock;

        use crate::{Subject, Subscribable};

        #[test]
        fn handles_window_lifecycle() {
            let source = Subject::new();
            let opens = Subject::<()>::new();
            let closes = Subject::<()>::new();

            let windows = Arc::new(Lock::new(Vec::new()));
            {
                let windows = Arc::clone(&windows);
                let closes = closes.to_subscribable();
                source
                    .to_subscribable()
                    .window_with_start(&opens.to_subscribable(), move |_| {
                        closes.clone()
                    })
                    .subscribe_next(move |window: Subscribable<i32>| {
                        let values = Arc::new(Lock::new(Vec::new()));
                        {
                            let values = Arc::clone(&values);
                            window.subscribe_next(move |value| {
                                values.lock().push(value);
                            });
                        }
                        windows.lock().push(values);
                    });
            }

            // Values outside any window are dropped
            source.send_next(1);
            opens.send_next(());
            source.send_next(2);
            source.send_next(3);
            closes.send_next(());
            source.send_next(4);

            let windows = windows.lock();
            assert_eq!(windows.len(), 1);
            assert_eq!(*windows[0].lock(), vec![2, 3]);
        }
    }
}

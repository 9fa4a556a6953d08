//! Observable state cells.
//!
//! A [`Store`] holds exactly one current value and pushes every new value to
//! its listeners, in the order the writes were issued. Listeners get the
//! current value as soon as they subscribe. Writes issued from inside a
//! listener are queued and delivered after the write being dispatched, so
//! every listener observes the same sequence of whole snapshots.

use parking_lot::{Mutex, ReentrantMutex};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

type ListenerSet<T> = Vec<(u64, Listener<T>)>;

struct Inner<T> {
    value: T,
    listeners: ListenerSet<T>,
    next_id: u64,
    // each queued write carries the listeners registered when it was issued
    pending: VecDeque<(T, ListenerSet<T>)>,
    dispatching: bool,
}

impl<T> Inner<T> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

struct Shared<T> {
    name: &'static str,
    inner: Mutex<Inner<T>>,
    // Serialises writers across threads; re-entrant so listeners may write.
    dispatch: ReentrantMutex<()>,
}

/// A named, observable state record. Cloning yields another handle to the
/// same cell.
pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store({})", self.shared.name)
    }
}

impl<T: Default + Clone + Send + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new("anonymous", T::default())
    }
}

impl<T: Clone + Send + 'static> Store<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                inner: Mutex::new(Inner {
                    value: initial,
                    listeners: Vec::new(),
                    next_id: 0,
                    pending: VecDeque::new(),
                    dispatching: false,
                }),
                dispatch: ReentrantMutex::new(()),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.shared.inner.lock().value.clone()
    }

    /// Reads the current value without cloning it. `f` runs under the store
    /// lock and must not touch this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.inner.lock().value)
    }

    /// Replaces the whole record and notifies every listener.
    pub fn set(&self, value: T) {
        let _guard = self.shared.dispatch.lock();
        {
            let mut inner = self.shared.inner.lock();
            inner.value = value.clone();
            let listeners = inner.listeners.clone();
            inner.pending.push_back((value, listeners));
            if inner.dispatching {
                trace!(store = self.shared.name, "write queued during dispatch");
                return;
            }
            inner.dispatching = true;
        }
        trace!(store = self.shared.name, "store written");
        self.drain();
    }

    /// Replaces the record with `f(current)`. `f` runs without any lock held.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let _guard = self.shared.dispatch.lock();
        let current = self.get();
        self.set(f(&current));
    }

    /// Registers `listener`, calls it with the current value, and keeps
    /// calling it on every later write until the returned guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _guard = self.shared.dispatch.lock();
        let listener: Listener<T> = Arc::new(listener);
        let (id, current) = {
            let mut inner = self.shared.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.value.clone())
        };
        debug!(store = self.shared.name, id, "listener subscribed");
        listener(&current);

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.inner.lock().listeners.retain(|(lid, _)| *lid != id);
                    debug!(store = shared.name, id, "listener removed");
                }
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.shared.inner.lock().listeners.len()
    }

    fn drain(&self) {
        let _reset = DispatchReset(&*self.shared);
        loop {
            let Some((value, listeners)) = self.shared.inner.lock().pending.pop_front() else {
                return;
            };
            for (id, listener) in listeners {
                // skip listeners cancelled by an earlier callback in this round
                if self.shared.inner.lock().is_subscribed(id) {
                    listener(&value);
                }
            }
        }
    }
}

/// Ends a dispatch round even if a listener panics, dropping whatever was
/// still queued.
struct DispatchReset<'a, T>(&'a Shared<T>);

impl<T> Drop for DispatchReset<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.0.inner.lock();
        inner.pending.clear();
        inner.dispatching = false;
    }
}

/// Live subscription to a [`Store`]. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription(active={})", self.cancel.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &T| sink.lock().push(v.clone()))
    }

    #[test]
    fn test_get_set() {
        let store = Store::new("counter", 1u32);
        assert_eq!(store.get(), 1);
        store.set(5);
        assert_eq!(store.get(), 5);
        assert_eq!(store.name(), "counter");
    }

    #[test]
    fn test_subscribe_gets_current_then_each_write() {
        let store = Store::new("counter", 0u32);
        store.set(1);
        store.set(2);

        let (seen, listener) = recorder();
        let _sub = store.subscribe(listener);
        assert_eq!(*seen.lock(), vec![2]);

        store.set(3);
        store.update(|v| v * 10);
        assert_eq!(*seen.lock(), vec![2, 3, 30]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = Store::new("counter", 0u32);
        let (seen, listener) = recorder();
        let sub = store.subscribe(listener);
        assert_eq!(store.listener_count(), 1);

        drop(sub);
        assert_eq!(store.listener_count(), 0);
        store.set(9);
        assert_eq!(*seen.lock(), vec![0]);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let store = Store::new("counter", 0u32);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let sub = store.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        sub.unsubscribe();
        store.set(1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_store() {
        let store = Store::new("short", 0u8);
        let sub = store.subscribe(|_| {});
        drop(store);
        drop(sub);
    }

    #[test]
    fn test_nested_write_is_delivered_in_order() {
        let store = Store::new("nested", 0u32);

        let writer = store.clone();
        let _first = store.subscribe(move |v| {
            if *v == 1 {
                writer.set(2);
            }
        });
        let (seen, listener) = recorder();
        let _second = store.subscribe(listener);

        store.set(1);
        assert_eq!(*seen.lock(), vec![0, 1, 2]);
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn test_subscribe_during_dispatch_sees_queued_value_once() {
        let store = Store::new("late", 0u32);
        let (seen, listener) = recorder();
        let late = Arc::new(Mutex::new(Some(listener)));
        let subs = Arc::new(Mutex::new(Vec::new()));

        let writer = store.clone();
        let held = subs.clone();
        let _first = store.subscribe(move |v| {
            if *v == 1 {
                writer.set(2);
                if let Some(listener) = late.lock().take() {
                    held.lock().push(writer.subscribe(listener));
                }
            }
        });

        store.set(1);
        assert_eq!(*seen.lock(), vec![2]);

        store.set(3);
        assert_eq!(*seen.lock(), vec![2, 3]);
        assert_eq!(store.listener_count(), 2);
    }

    #[test]
    fn test_listener_may_read_store() {
        let store = Store::new("reader", 0u32);
        let reader = store.clone();
        let (seen, listener) = recorder();
        let _sub = store.subscribe(move |v: &u32| {
            assert_eq!(reader.get(), *v);
            listener(v);
        });
        store.set(4);
        assert_eq!(*seen.lock(), vec![0, 4]);
    }

    #[test]
    fn test_writes_from_threads_are_all_observed() {
        let store = Store::new("threads", 0u64);
        let (seen, listener) = recorder();
        let _sub = store.subscribe(listener);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        s.update(|v| v + 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.get(), 100);
        let seen = seen.lock();
        assert_eq!(seen.len(), 101);
        assert!(seen.windows(2).all(|w| w[1] == w[0] + 1));
    }
}

//! Publish/subscribe event registry with scoped subscriptions.
//!
//! Each [`EventRegistry`] belongs to one owner (a buffer, a text area) and is
//! driven from that owner's thread. [`EventRegistry::subscribe`] returns a
//! [`Subscription`]; dropping it unregisters the callback, so an observer
//! never outlives the object that holds its handle.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use textarea_core::event::EventRegistry;
//!
//! let registry = EventRegistry::<u32>::new();
//! let seen = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&seen);
//! let sub = registry.subscribe(move |v| sink.set(sink.get() + *v));
//!
//! registry.emit(&2);
//! drop(sub);
//! registry.emit(&5);
//! assert_eq!(seen.get(), 2);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Listeners<E> {
    next_id: u64,
    entries: Vec<(u64, Callback<E>)>,
}

/// Registry of callbacks for events of type `E`.
pub struct EventRegistry<E> {
    inner: Rc<RefCell<Listeners<E>>>,
}

impl<E: 'static> EventRegistry<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback. It stays registered while the returned handle lives.
    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, Rc::new(RefCell::new(callback))));

        let weak: Weak<RefCell<Listeners<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            unregister: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().entries.retain(|(eid, _)| *eid != id);
                }
            })),
        }
    }

    /// Run every registered callback with `event`, in registration order.
    ///
    /// Callbacks may subscribe or drop subscriptions while running; such
    /// changes take effect from the next emit. A callback that emits on the
    /// registry it is running from is skipped for the nested emit.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in snapshot {
            if let Ok(mut cb) = callback.try_borrow_mut() {
                cb(event);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.inner.borrow().entries.len())
            .finish()
    }
}

/// Handle of a registered callback; unregisters on drop.
pub struct Subscription {
    unregister: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback registered for the registry's whole lifetime.
    pub fn detach(mut self) {
        self.unregister = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let registry = EventRegistry::<&'static str>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&log);
        let b = Rc::clone(&log);
        let _s1 = registry.subscribe(move |e| a.borrow_mut().push(format!("a:{e}")));
        let _s2 = registry.subscribe(move |e| b.borrow_mut().push(format!("b:{e}")));

        registry.emit(&"x");
        assert_eq!(*log.borrow(), vec!["a:x", "b:x"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = EventRegistry::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = registry.subscribe(move |()| h.set(h.get() + 1));
        registry.emit(&());
        drop(sub);
        registry.emit(&());
        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_detach_keeps_callback() {
        let registry = EventRegistry::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        registry.subscribe(move |()| h.set(h.get() + 1)).detach();
        registry.emit(&());
        registry.emit(&());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let registry = EventRegistry::<()>::new();
        let sub = registry.subscribe(|()| {});
        drop(registry);
        drop(sub);
    }

    #[test]
    fn test_unsubscribe_during_emit() {
        let registry = EventRegistry::<()>::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let sub = registry.subscribe(move |()| {
            inner_slot.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        registry.emit(&());
        assert!(registry.is_empty());
    }
}

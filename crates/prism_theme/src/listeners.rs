//! Callback registries keyed by slotmap ids
//!
//! Callbacks are taken out of their slot while they run, so a callback may
//! subscribe or unsubscribe (itself included) without a double borrow.

use std::cell::RefCell;

use slotmap::{new_key_type, Key, SlotMap};

new_key_type! {
    /// Handle for an OS appearance subscription
    pub struct ListenerId;

    /// Handle for a controller change observer
    pub struct ObserverId;
}

pub(crate) type Callback<T> = Box<dyn FnMut(T)>;

pub(crate) struct ListenerSet<K: Key, T> {
    slots: RefCell<SlotMap<K, Option<Callback<T>>>>,
}

impl<K: Key, T: Clone> ListenerSet<K, T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: RefCell::new(SlotMap::with_key()),
        }
    }

    pub(crate) fn insert(&self, callback: Callback<T>) -> K {
        self.slots.borrow_mut().insert(Some(callback))
    }

    pub(crate) fn remove(&self, id: K) -> bool {
        self.slots.borrow_mut().remove(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Invoke every callback registered before the call started
    pub(crate) fn notify(&self, value: T) {
        let ids: Vec<K> = self.slots.borrow().keys().collect();
        for id in ids {
            let taken = self
                .slots
                .borrow_mut()
                .get_mut(id)
                .and_then(Option::take);
            let Some(mut callback) = taken else {
                continue;
            };

            callback(value.clone());

            // The slot is gone if the callback unsubscribed itself.
            if let Some(slot) = self.slots.borrow_mut().get_mut(id) {
                *slot = Some(callback);
            }
        }
    }
}

//! Change subscriptions for state owners.
//!
//! Each owning component keeps a [`Subscribers`] list and publishes its new
//! state after every change. Consumers re-derive their output from the value
//! they receive. Dropping the returned [`Subscription`] unsubscribes.

use std::cell::RefCell;
use std::rc::Rc;

pub type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Subscribers<T> {
    list: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            list: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription<T> {
        let subscriber: Subscriber<T> = Rc::new(callback);
        self.list.borrow_mut().push(Rc::clone(&subscriber));
        Subscription {
            subscriber,
            list: Rc::clone(&self.list),
        }
    }

    /// Call every subscriber with `value`. The list is snapshotted first so
    /// callbacks may subscribe or unsubscribe.
    pub fn notify(&self, value: &T) {
        let subscribers = self.list.borrow().clone();
        for subscriber in subscribers {
            (subscriber)(value);
        }
    }

    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }
}

/// RAII guard for one subscriber.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription<T> {
    subscriber: Subscriber<T>,
    list: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let mut list = self.list.borrow_mut();
        list.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

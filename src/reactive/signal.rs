use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::invalidation::request_layout;
use super::owner::register_signal;

struct SignalInner<T> {
    value: RefCell<T>,
    disposed: Cell<bool>,
}

/// A reactive value owned by the UI thread.
///
/// Writing a different value requests a new layout pass. Once the owner
/// that created the signal is disposed, writes are dropped silently while
/// the last value stays readable. This is what keeps late callbacks (a
/// window change arriving after unmount, for instance) from mutating a
/// destroyed component.
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        let inner = Rc::new(SignalInner {
            value: RefCell::new(value),
            disposed: Cell::new(false),
        });

        let weak = Rc::downgrade(&inner);
        register_signal(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.disposed.set(true);
            }
        }));

        Self { inner }
    }
}

impl<T> Signal<T> {
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.value.borrow())
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the value. Returns `true` only if the value actually changed.
    pub fn set(&self, value: T) -> bool {
        if self.is_disposed() {
            log::trace!("ignoring write to disposed signal");
            return false;
        }
        {
            let mut guard = self.inner.value.borrow_mut();
            if *guard == value {
                return false;
            }
            *guard = value;
        }
        request_layout();
        true
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the value in place. Returns `true` only if it changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }
}

pub fn create_signal<T: 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

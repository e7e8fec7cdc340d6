//! Window dimension query and change subscription.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::layout::Size;

/// Logical window size plus its scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl WindowSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// The same window after a device rotation.
    pub fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            ..self
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

type Listener = Rc<dyn Fn(WindowSize)>;

struct DimensionsInner {
    window: WindowSize,
    listeners: Vec<Option<Listener>>,
}

/// Shared handle to the host window's dimensions.
///
/// Cloning is cheap; all clones observe the same window.
#[derive(Clone)]
pub struct Dimensions {
    inner: Rc<RefCell<DimensionsInner>>,
}

impl Dimensions {
    pub fn new(window: WindowSize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DimensionsInner {
                window,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> WindowSize {
        self.inner.borrow().window
    }

    /// Update the window and notify listeners if it changed.
    ///
    /// Listeners run after the internal borrow is released, so they may
    /// query the window or subscribe and unsubscribe freely.
    pub fn set(&self, window: WindowSize) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.window == window {
                return;
            }
            inner.window = window;
            inner.listeners.iter().flatten().cloned().collect()
        };

        log::debug!(
            "window changed to {}x{} @{}, notifying {} listener(s)",
            window.width,
            window.height,
            window.scale,
            listeners.len()
        );
        for listener in listeners {
            listener(window);
        }
    }

    /// Subscribe to window changes. The listener stays registered until the
    /// returned [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn add_listener<F: Fn(WindowSize) + 'static>(&self, listener: F) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let slot = match inner.listeners.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                inner.listeners.push(None);
                inner.listeners.len() - 1
            }
        };
        inner.listeners[slot] = Some(Rc::new(listener));

        Subscription {
            dimensions: Rc::downgrade(&self.inner),
            slot,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.iter().flatten().count()
    }
}

impl fmt::Debug for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dimensions")
            .field("window", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a window listener registered.
pub struct Subscription {
    dimensions: Weak<RefCell<DimensionsInner>>,
    slot: usize,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.dimensions.upgrade() {
            if let Some(listener) = inner.borrow_mut().listeners.get_mut(self.slot) {
                *listener = None;
            }
        }
    }
}

//! Reactive ownership for automatic resource cleanup.
//!
//! Signals created inside an owner scope belong to that owner. Disposing the
//! owner disposes its child owners first, runs registered cleanups in reverse
//! order and finally marks every owned signal as disposed.
//!
//! Components use one owner per instance: the owner is created with the
//! component's state and disposed on unmount, which releases any external
//! subscriptions registered through [`on_cleanup`].
//!
//! ```ignore
//! let (count, owner) = with_owner(|| {
//!     let count = create_signal(0);
//!     let subscription = window.add_listener(move |_| { /* ... */ });
//!     on_cleanup(move || subscription.unsubscribe());
//!     count
//! });
//!
//! dispose_owner(owner); // listener released, `count` disposed
//! ```

use std::cell::RefCell;

/// Unique identifier for an owner in the owner arena.
pub type OwnerId = usize;

type Disposer = Box<dyn FnOnce()>;

struct Owner {
    signals: Vec<Disposer>,
    cleanups: Vec<Disposer>,
    children: Vec<OwnerId>,
}

impl Owner {
    fn new() -> Self {
        Self {
            signals: Vec::new(),
            cleanups: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Default)]
struct OwnerArena {
    owners: Vec<Option<Owner>>,
}

impl OwnerArena {
    fn allocate(&mut self) -> OwnerId {
        self.owners.push(Some(Owner::new()));
        self.owners.len() - 1
    }

    fn get_mut(&mut self, id: OwnerId) -> Option<&mut Owner> {
        self.owners.get_mut(id).and_then(|o| o.as_mut())
    }

    fn take(&mut self, id: OwnerId) -> Option<Owner> {
        self.owners.get_mut(id).and_then(|o| o.take())
    }
}

thread_local! {
    static CURRENT_OWNER: RefCell<Option<OwnerId>> = const { RefCell::new(None) };
    static OWNERS: RefCell<OwnerArena> = RefCell::new(OwnerArena::default());
}

/// Execute a closure within a new owner scope.
///
/// The new owner becomes a child of the current one, if any.
pub fn with_owner<T>(f: impl FnOnce() -> T) -> (T, OwnerId) {
    let parent = current_owner();

    let owner_id = OWNERS.with(|owners| {
        let mut owners = owners.borrow_mut();
        let id = owners.allocate();
        if let Some(parent_owner) = parent.and_then(|p| owners.get_mut(p)) {
            parent_owner.children.push(id);
        }
        id
    });

    (run_in_owner(owner_id, f), owner_id)
}

/// Re-enter an existing owner scope, e.g. to attach a cleanup after creation.
pub fn run_in_owner<T>(owner_id: OwnerId, f: impl FnOnce() -> T) -> T {
    let prev_owner = CURRENT_OWNER.with(|current| current.replace(Some(owner_id)));
    let result = f();
    CURRENT_OWNER.with(|current| *current.borrow_mut() = prev_owner);
    result
}

/// Get the current owner ID, if any.
pub fn current_owner() -> Option<OwnerId> {
    CURRENT_OWNER.with(|current| *current.borrow())
}

/// Whether the owner is still alive.
pub fn is_alive(id: OwnerId) -> bool {
    OWNERS.with(|owners| {
        owners
            .borrow()
            .owners
            .get(id)
            .is_some_and(|owner| owner.is_some())
    })
}

/// Dispose an owner and all its resources. Disposing twice is a no-op.
pub fn dispose_owner(id: OwnerId) {
    let Some(owner) = OWNERS.with(|owners| owners.borrow_mut().take(id)) else {
        return;
    };

    for child_id in owner.children {
        dispose_owner(child_id);
    }

    for cleanup in owner.cleanups.into_iter().rev() {
        cleanup();
    }

    for dispose in owner.signals {
        dispose();
    }
}

/// Register a cleanup callback to run when the current owner is disposed.
///
/// Outside an owner scope this does nothing.
pub fn on_cleanup(f: impl FnOnce() + 'static) {
    with_current(|owner| owner.cleanups.push(Box::new(f)));
}

pub(crate) fn register_signal(dispose: Disposer) {
    with_current(|owner| owner.signals.push(dispose));
}

fn with_current(f: impl FnOnce(&mut Owner)) {
    if let Some(owner_id) = current_owner() {
        OWNERS.with(|owners| {
            if let Some(owner) = owners.borrow_mut().get_mut(owner_id) {
                f(owner);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_current_owner_inside_scope() {
        let ((inner_owner, outer_owner), _outer_id) = with_owner(|| {
            let outer = current_owner();
            let (inner, _inner_id) = with_owner(current_owner);
            (inner, outer)
        });

        assert!(inner_owner.is_some());
        assert!(outer_owner.is_some());
        assert_ne!(inner_owner, outer_owner);
    }

    #[test]
    fn test_current_owner_outside_scope() {
        assert!(current_owner().is_none());
    }

    #[test]
    fn test_children_disposed_first() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let outer_order = order.clone();
        let (_, outer_id) = with_owner(|| {
            let o = outer_order.clone();
            on_cleanup(move || o.borrow_mut().push("outer"));

            let o = outer_order.clone();
            with_owner(|| on_cleanup(move || o.borrow_mut().push("inner")));
        });

        dispose_owner(outer_id);
        assert_eq!(*order.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_cleanups_run_lifo() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let (_, owner_id) = with_owner(|| {
            for name in ["first", "second", "third"] {
                let o = order.clone();
                on_cleanup(move || o.borrow_mut().push(name));
            }
        });

        dispose_owner(owner_id);
        assert_eq!(*order.borrow(), vec!["third", "second", "first"]);
    }

    #[test]
    fn test_run_in_owner_attaches_late_cleanup() {
        let ran = Rc::new(RefCell::new(false));
        let (_, owner_id) = with_owner(|| {});

        let flag = ran.clone();
        run_in_owner(owner_id, || on_cleanup(move || *flag.borrow_mut() = true));
        assert!(current_owner().is_none());

        dispose_owner(owner_id);
        assert!(*ran.borrow());
    }

    #[test]
    fn test_dispose_owner_twice_is_safe() {
        let (_, owner_id) = with_owner(|| {});
        assert!(is_alive(owner_id));
        dispose_owner(owner_id);
        dispose_owner(owner_id);
        assert!(!is_alive(owner_id));
    }
}

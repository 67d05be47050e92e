use std::cell::RefCell;

/// Somewhere async operations can read and update state after an await
/// point. Hook-owned state implements this in the UI; tests use a plain
/// `RefCell`.
///
/// Borrows never outlive the closure, so no borrow is held across an await.
pub trait StateCell<S> {
    fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T;

    fn reduce(&self, f: impl FnOnce(&mut S));
}

impl<S> StateCell<S> for RefCell<S> {
    fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.borrow())
    }

    fn reduce(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.borrow_mut())
    }
}

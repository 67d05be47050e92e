use admin_state::StateCell;
use std::cell::RefCell;
use std::rc::Rc;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

/// Component-owned state that async tasks can keep updating after an await.
///
/// Unlike `use_state`, reads always see the latest value, so a task that
/// resolves after other updates reduces the current state rather than the
/// one it captured.
pub struct HookCell<S> {
    inner: Rc<RefCell<S>>,
    rerender: UseForceUpdateHandle,
}

impl<S: Clone> HookCell<S> {
    pub fn get(&self) -> S {
        self.inner.borrow().clone()
    }
}

impl<S> Clone for HookCell<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            rerender: self.rerender.clone(),
        }
    }
}

impl<S> PartialEq for HookCell<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> StateCell<S> for HookCell<S> {
    fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.inner.borrow())
    }

    fn reduce(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.inner.borrow_mut());
        self.rerender.force_update();
    }
}

#[hook]
pub fn use_state_cell<S, F>(init: F) -> HookCell<S>
where
    S: 'static,
    F: FnOnce() -> S,
{
    let inner = use_mut_ref(init);
    let rerender = use_force_update();
    HookCell { inner, rerender }
}

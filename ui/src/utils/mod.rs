pub mod file;

use futures::future::{FutureExt, LocalBoxFuture};
use std::future::Future;
use std::rc::Rc;

/// Like [`yew::Callback`], but the caller can await the outcome.
///
/// Modals use it to stay open when the parent's action fails.
pub struct AsyncCallback<IN> {
    inner: Rc<dyn Fn(IN) -> LocalBoxFuture<'static, anyhow::Result<()>>>,
}

impl<IN> AsyncCallback<IN> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(IN) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        Self {
            inner: Rc::new(move |input| f(input).boxed_local()),
        }
    }

    pub fn call(&self, input: IN) -> LocalBoxFuture<'static, anyhow::Result<()>> {
        (self.inner)(input)
    }
}

impl<IN> Clone for AsyncCallback<IN> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<IN> PartialEq for AsyncCallback<IN> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

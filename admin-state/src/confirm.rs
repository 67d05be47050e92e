use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome<E> {
    /// A confirmation was already in flight; nothing ran.
    Skipped,
    /// The action succeeded and the dialog was closed.
    Confirmed,
    /// The action failed; the dialog stays open.
    Failed(E),
}

/// Run the confirmed action, then close the dialog.
///
/// While `is_loading` is set this does nothing, so a second click cannot
/// start the action twice. `on_close` runs only after `on_confirm` has
/// resolved successfully.
pub async fn confirm<E, F, Fut>(
    is_loading: bool,
    on_confirm: F,
    on_close: impl FnOnce(),
) -> ConfirmOutcome<E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    if is_loading {
        return ConfirmOutcome::Skipped;
    }
    match on_confirm().await {
        Ok(()) => {
            on_close();
            ConfirmOutcome::Confirmed
        }
        Err(e) => ConfirmOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[test]
    fn closes_after_the_action_resolves() {
        let log = RefCell::new(Vec::new());

        let outcome = block_on(confirm::<(), _, _>(
            false,
            || async {
                log.borrow_mut().push("confirm");
                Ok(())
            },
            || log.borrow_mut().push("close"),
        ));

        assert_eq!(outcome, ConfirmOutcome::Confirmed);
        assert_eq!(*log.borrow(), ["confirm", "close"]);
    }

    #[test]
    fn does_nothing_while_loading() {
        let log = RefCell::new(Vec::new());

        let outcome = block_on(confirm::<(), _, _>(
            true,
            || async {
                log.borrow_mut().push("confirm");
                Ok(())
            },
            || log.borrow_mut().push("close"),
        ));

        assert_eq!(outcome, ConfirmOutcome::Skipped);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failure_leaves_the_dialog_open() {
        let closed = RefCell::new(false);

        let outcome = block_on(confirm(
            false,
            || async { Err("Product not found") },
            || *closed.borrow_mut() = true,
        ));

        assert_eq!(outcome, ConfirmOutcome::Failed("Product not found"));
        assert!(!*closed.borrow());
    }
}

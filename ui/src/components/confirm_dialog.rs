use admin_state::{ConfirmOutcome, StateCell, confirm};
use yew::prelude::*;

use super::Dialog;
use crate::hooks::use_state_cell;
use crate::utils::AsyncCallback;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub is_open: bool,
    pub heading: AttrValue,
    pub description: AttrValue,
    #[prop_or_else(|| AttrValue::from("Yes, delete"))]
    pub confirm_text: AttrValue,
    pub on_confirm: AsyncCallback<()>,
    pub on_close: Callback<()>,
    /// Set by the parent while its own work is in flight.
    #[prop_or_default]
    pub loading: bool,
}

/// Asks before a destructive action. Confirming runs `on_confirm` and closes
/// once it resolves; clicks while it is running are ignored.
#[function_component]
pub fn ConfirmDialog(props: &ConfirmDialogProps) -> Html {
    let running = use_state_cell(|| false);
    let error = use_state(|| None::<String>);

    {
        let error = error.clone();
        use_effect_with(props.is_open, move |_| error.set(None));
    }

    let on_confirm_click = {
        let running = running.clone();
        let error = error.clone();
        let on_confirm = props.on_confirm.clone();
        let on_close = props.on_close.clone();
        let loading = props.loading;

        Callback::from(move |_: MouseEvent| {
            let running = running.clone();
            let error = error.clone();
            let on_confirm = on_confirm.clone();
            let on_close = on_close.clone();
            // claim the run before yielding so a double click is skipped
            let is_loading = loading || running.get();
            if !is_loading {
                running.reduce(|r| *r = true);
            }

            yew::platform::spawn_local(async move {
                let outcome = confirm(
                    is_loading,
                    || on_confirm.call(()),
                    || on_close.emit(()),
                )
                .await;

                match outcome {
                    ConfirmOutcome::Skipped => {}
                    ConfirmOutcome::Confirmed => {
                        running.reduce(|r| *r = false);
                        error.set(None);
                    }
                    ConfirmOutcome::Failed(e) => {
                        tracing::error!("Confirmed action failed: {e:#}");
                        running.reduce(|r| *r = false);
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    if !props.is_open {
        return html! {};
    }
    let busy = props.loading || running.get();

    html! {
        <Dialog
            title={props.heading.clone()}
            on_dismiss={props.on_close.clone()}
            dismissable={!busy}
        >
            <p class="text-sm text-neutral-600 dark:text-neutral-400 mb-4">
                {&props.description}
            </p>

            if let Some(error) = &*error {
                <div class="text-sm text-red-600 dark:text-red-400 mb-4">
                    {error}
                </div>
            }

            <div class="flex justify-end gap-3">
                <button
                    onclick={props.on_close.reform(|_: MouseEvent| ())}
                    disabled={busy}
                    class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                           hover:text-neutral-900 dark:hover:text-neutral-100
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {"Cancel"}
                </button>
                <button
                    onclick={on_confirm_click}
                    disabled={busy}
                    class="px-4 py-2 text-sm font-medium text-white
                           bg-red-600 hover:bg-red-700 dark:bg-red-700 dark:hover:bg-red-600
                           rounded-md disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                >
                    {if busy { "Deleting..." } else { props.confirm_text.as_str() }}
                </button>
            </div>
        </Dialog>
    }
}

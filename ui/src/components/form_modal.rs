//! Create/edit modal driven by a list of field descriptors.

use admin_state::form::submit;
use admin_state::{
    FieldDescriptor, FieldKind, FormModal as ModalState, StateCell,
    SubmitOutcome,
};
use payloads::requests::{FieldValue, FormData};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{Dialog, SubmitButton};
use crate::hooks::use_state_cell;
use crate::utils::{AsyncCallback, file::read_file_upload};

#[derive(Properties, PartialEq)]
pub struct FormModalProps {
    pub is_open: bool,
    pub heading: AttrValue,
    pub fields: Rc<Vec<FieldDescriptor>>,
    /// Values to edit. Without it the form starts from field defaults.
    #[prop_or_default]
    pub initial_data: Option<FormData>,
    /// Receives the trimmed form data. The modal closes only if it succeeds.
    pub on_submit: AsyncCallback<FormData>,
    pub on_close: Callback<()>,
    #[prop_or_else(|| AttrValue::from("Save"))]
    pub submit_text: AttrValue,
}

#[function_component]
pub fn FormModal(props: &FormModalProps) -> Html {
    let modal = use_state_cell(ModalState::new);

    // Seed on open, and again if the fields or data change while open.
    {
        let modal = modal.clone();
        use_effect_with(
            (
                props.is_open,
                props.fields.clone(),
                props.initial_data.clone(),
            ),
            move |(is_open, fields, initial)| {
                if *is_open {
                    modal.reduce(|m| m.open(fields, initial.as_ref()));
                } else if modal.read(ModalState::is_open) {
                    modal.reduce(ModalState::cancel);
                } else {
                    modal.reduce(ModalState::sync_closed);
                }
            },
        );
    }

    let on_edit = {
        let modal = modal.clone();
        Callback::from(move |(name, value): (String, FieldValue)| {
            modal.reduce(|m| {
                m.edit(name, value);
            });
        })
    };

    let on_file = {
        let modal = modal.clone();
        Callback::from(move |read: FileRead| {
            modal.reduce(|m| match read {
                FileRead::Started(name) => {
                    m.begin_file(name);
                }
                FileRead::Failed(name) => m.abandon_file(&name),
            });
        })
    };

    let on_form_submit = {
        let modal = modal.clone();
        let fields = props.fields.clone();
        let on_submit = props.on_submit.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let modal = modal.clone();
            let fields = fields.clone();
            let on_submit = on_submit.clone();
            let on_close = on_close.clone();

            yew::platform::spawn_local(async move {
                let outcome =
                    submit(&modal, &fields, |payload| on_submit.call(payload))
                        .await;
                if outcome == SubmitOutcome::Closed {
                    on_close.emit(());
                }
            });
        })
    };

    let on_cancel = {
        let modal = modal.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            modal.reduce(ModalState::cancel);
            on_close.emit(());
        })
    };

    let state = modal.get();
    if !props.is_open || !state.is_open() {
        return html! {};
    }
    let submitting = state.is_submitting();

    html! {
        <Dialog
            title={props.heading.clone()}
            on_dismiss={on_cancel.clone()}
            dismissable={!submitting}
        >
            <form onsubmit={on_form_submit} class="space-y-4">
                {for props.fields.iter().map(|field| html! {
                    <div key={field.name.clone()}>
                        <label
                            for={field_id(field)}
                            class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1"
                        >
                            {&field.label}
                        </label>
                        {render_input(field, state.draft().get(&field.name), submitting, &on_edit, &on_file)}
                    </div>
                })}

                if let Some(invalid) = &state.invalid {
                    <div class="text-sm text-red-600 dark:text-red-400">
                        {invalid.to_string()}
                    </div>
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button
                        type="button"
                        onclick={on_cancel.reform(|_: MouseEvent| ())}
                        disabled={submitting}
                        class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                               hover:text-neutral-900 dark:hover:text-neutral-100
                               disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        {"Cancel"}
                    </button>
                    <SubmitButton
                        loading={submitting}
                        text={props.submit_text.clone()}
                        width="w-20"
                    />
                </div>
            </form>
        </Dialog>
    }
}

/// Progress of reading a picked file into the draft.
enum FileRead {
    Started(String),
    Failed(String),
}

fn field_id(field: &FieldDescriptor) -> String {
    format!("field-{}", field.name)
}

const INPUT_CLASS: &str = "w-full px-3 py-2 text-sm border border-neutral-300 \
    dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 \
    text-neutral-900 dark:text-neutral-100 focus:outline-none focus:ring-2 \
    focus:ring-neutral-500 disabled:opacity-50";

fn render_input(
    field: &FieldDescriptor,
    value: Option<&FieldValue>,
    disabled: bool,
    on_edit: &Callback<(String, FieldValue)>,
    on_file: &Callback<FileRead>,
) -> Html {
    let name = field.name.clone();
    let text = value
        .and_then(FieldValue::as_text)
        .unwrap_or_default()
        .to_string();
    let placeholder = field.placeholder.clone().unwrap_or_default();

    match field.kind {
        FieldKind::Checkbox => {
            let onchange = on_edit.reform(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                (name.clone(), FieldValue::Bool(input.checked()))
            });
            html! {
                <input
                    id={field_id(field)}
                    type="checkbox"
                    checked={value.is_some_and(FieldValue::is_truthy)}
                    {onchange}
                    {disabled}
                    class="h-4 w-4"
                />
            }
        }
        FieldKind::File => {
            let on_edit = on_edit.clone();
            let on_file = on_file.clone();
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let Some(file) = input.files().and_then(|files| files.get(0))
                else {
                    return;
                };
                // block submit until the bytes are in the draft
                on_file.emit(FileRead::Started(name.clone()));
                let name = name.clone();
                let on_edit = on_edit.clone();
                let on_file = on_file.clone();
                yew::platform::spawn_local(async move {
                    match read_file_upload(&file).await {
                        Ok(upload) => {
                            on_edit.emit((name, FieldValue::File(upload)))
                        }
                        Err(e) => {
                            tracing::error!("Error reading file: {e}");
                            on_file.emit(FileRead::Failed(name));
                        }
                    }
                });
            });
            let current = match value {
                Some(FieldValue::File(upload)) => Some(upload.name.clone()),
                Some(FieldValue::Text(path)) if !path.trim().is_empty() => {
                    Some(path.clone())
                }
                _ => None,
            };
            html! {
                <div>
                    <input
                        id={field_id(field)}
                        type="file"
                        {onchange}
                        required={field.required && current.is_none()}
                        {disabled}
                        class={INPUT_CLASS}
                    />
                    if let Some(current) = current {
                        <p class="mt-1 text-sm text-neutral-600 dark:text-neutral-400">
                            {current}
                        </p>
                    }
                </div>
            }
        }
        FieldKind::Textarea => {
            let oninput = on_edit.reform(move |e: InputEvent| {
                let input: HtmlTextAreaElement = e.target_unchecked_into();
                (name.clone(), FieldValue::Text(input.value()))
            });
            html! {
                <textarea
                    id={field_id(field)}
                    value={text}
                    {oninput}
                    {placeholder}
                    required={field.required}
                    {disabled}
                    rows="3"
                    class={INPUT_CLASS}
                />
            }
        }
        FieldKind::Select => {
            let onchange = on_edit.reform(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                (name.clone(), FieldValue::Text(select.value()))
            });
            let prompt = field
                .placeholder
                .clone()
                .unwrap_or_else(|| format!("Select {}", field.label.to_lowercase()));
            html! {
                <select
                    id={field_id(field)}
                    {onchange}
                    required={field.required}
                    {disabled}
                    class={INPUT_CLASS}
                >
                    <option value="" selected={text.is_empty()}>{prompt}</option>
                    {for field.options.iter().map(|(value, label)| html! {
                        <option value={value.clone()} selected={*value == text}>
                            {label}
                        </option>
                    })}
                </select>
            }
        }
        FieldKind::Text
        | FieldKind::Number
        | FieldKind::Email
        | FieldKind::Password => {
            let oninput = on_edit.reform(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                (name.clone(), FieldValue::Text(input.value()))
            });
            html! {
                <input
                    id={field_id(field)}
                    type={field.kind.input_type()}
                    step={(field.kind == FieldKind::Number).then_some("any")}
                    value={text}
                    {oninput}
                    {placeholder}
                    required={field.required}
                    {disabled}
                    class={INPUT_CLASS}
                />
            }
        }
    }
}

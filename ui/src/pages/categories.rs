use admin_state::{FieldDescriptor, FieldKind};
use payloads::Category;
use payloads::requests::FormData;
use std::rc::Rc;
use yew::prelude::*;

use crate::components::{ConfirmDialog, FormModal, RequireAuth};
use crate::hooks::use_categories;
use crate::utils::AsyncCallback;

#[function_component]
pub fn CategoriesPage() -> Html {
    html! {
        <RequireAuth>
            <CategoriesTable />
        </RequireAuth>
    }
}

fn category_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("name", "Name", FieldKind::Text)
            .placeholder("Category name")
            .required(),
        FieldDescriptor::new("description", "Description", FieldKind::Textarea),
    ]
}

#[function_component]
fn CategoriesTable() -> Html {
    let categories = use_categories();
    // None: closed, Some(None): creating, Some(Some(c)): editing c
    let editing = use_state(|| None::<Option<Category>>);
    let deleting = use_state(|| None::<Category>);
    let fields = use_memo((), |_| category_fields());

    let state = categories.state();

    let on_submit = {
        let categories = categories.clone();
        let target = (*editing).clone().flatten();
        AsyncCallback::new(move |form: FormData| {
            let categories = categories.clone();
            let target = target.clone();
            async move {
                match target {
                    Some(category) => categories.update(category.id, form).await?,
                    None => categories.create(form).await?,
                }
                Ok::<(), anyhow::Error>(())
            }
        })
    };

    let on_confirm_delete = {
        let categories = categories.clone();
        let target = (*deleting).clone();
        AsyncCallback::new(move |()| {
            let categories = categories.clone();
            let target = target.clone();
            async move {
                if let Some(category) = target {
                    categories.delete(category.id).await?;
                }
                Ok::<(), anyhow::Error>(())
            }
        })
    };

    let on_new = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(None)))
    };
    let close_form = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };
    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |()| deleting.set(None))
    };

    let initial_data = editing.as_ref().and_then(Option::as_ref).map(|category| {
        FormData::new()
            .with("name", category.name.clone())
            .with("description", category.description.clone().unwrap_or_default())
    });
    let heading = if initial_data.is_some() {
        "Edit category"
    } else {
        "New category"
    };

    html! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <h2 class="text-2xl font-bold">{"Categories"}</h2>
                <button
                    onclick={on_new}
                    class="px-4 py-2 text-sm font-medium text-white bg-neutral-900
                           hover:bg-neutral-700 rounded-md"
                >
                    {"New category"}
                </button>
            </div>

            if let Some(error) = &state.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }

            if state.is_loading {
                <p class="text-center py-12 text-neutral-600 dark:text-neutral-400">
                    {"Loading categories..."}
                </p>
            } else if state.collection.is_empty() {
                <p class="text-center py-12 text-neutral-600 dark:text-neutral-400">
                    {"No categories yet"}
                </p>
            } else {
                <ul class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {for state.collection.iter().map(|category| {
                        let on_edit = {
                            let editing = editing.clone();
                            let category = category.clone();
                            Callback::from(move |_: MouseEvent| {
                                editing.set(Some(Some(category.clone())))
                            })
                        };
                        let on_delete = {
                            let deleting = deleting.clone();
                            let category = category.clone();
                            Callback::from(move |_: MouseEvent| {
                                deleting.set(Some(category.clone()))
                            })
                        };
                        html! {
                            <li key={category.id.to_string()} class="py-3 flex justify-between">
                                <div>
                                    <p class="font-medium">{&category.name}</p>
                                    if let Some(description) = &category.description {
                                        <p class="text-sm text-neutral-500">{description}</p>
                                    }
                                </div>
                                <div class="space-x-3 text-sm">
                                    <button onclick={on_edit} class="hover:underline">{"Edit"}</button>
                                    <button onclick={on_delete}
                                        class="text-red-600 dark:text-red-400 hover:underline">
                                        {"Delete"}
                                    </button>
                                </div>
                            </li>
                        }
                    })}
                </ul>
            }

            <FormModal
                is_open={editing.is_some()}
                heading={heading}
                fields={Rc::clone(&fields)}
                {initial_data}
                on_submit={on_submit}
                on_close={close_form}
            />

            <ConfirmDialog
                is_open={deleting.is_some()}
                heading="Delete category"
                description={deleting
                    .as_ref()
                    .map(|c| format!("Delete the \"{}\" category?", c.name))
                    .unwrap_or_default()}
                on_confirm={on_confirm_delete}
                on_close={close_delete}
            />
        </div>
    }
}

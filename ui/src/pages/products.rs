use admin_state::{FieldDescriptor, FieldKind};
use payloads::requests::FormData;
use payloads::{Category, Product};
use std::rc::Rc;
use yew::prelude::*;

use crate::components::{ConfirmDialog, FormModal, RequireAuth};
use crate::hooks::{use_categories, use_products};
use crate::utils::AsyncCallback;

#[function_component]
pub fn ProductsPage() -> Html {
    html! {
        <RequireAuth>
            <ProductsTable />
        </RequireAuth>
    }
}

/// What the form modal is currently for.
#[derive(Clone, PartialEq)]
enum Editing {
    New,
    Existing(Product),
}

fn product_fields(categories: &[Category]) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("name", "Name", FieldKind::Text)
            .placeholder("Product name")
            .required(),
        FieldDescriptor::new("description", "Description", FieldKind::Textarea),
        FieldDescriptor::new("price", "Price", FieldKind::Number)
            .placeholder("0.00")
            .required(),
        FieldDescriptor::new("category", "Category", FieldKind::Select).options(
            categories
                .iter()
                .map(|c| (c.id.to_string(), c.name.clone())),
        ),
        FieldDescriptor::new("image", "Image", FieldKind::File),
        FieldDescriptor::new("featured", "Featured", FieldKind::Checkbox),
    ]
}

/// The modal's starting values for an existing product.
fn product_form_data(product: &Product) -> FormData {
    FormData::new()
        .with("name", product.name.clone())
        .with("description", product.description.clone().unwrap_or_default())
        .with("price", product.price.to_string())
        .with(
            "category",
            product
                .category
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        )
        .with("image", product.image.clone().unwrap_or_default())
        .with("featured", product.featured)
}

#[function_component]
fn ProductsTable() -> Html {
    let products = use_products();
    let categories = use_categories();
    let editing = use_state(|| None::<Editing>);
    let deleting = use_state(|| None::<Product>);

    let state = products.state();
    let category_records = categories.state().records();
    let fields = {
        let category_records = category_records.clone();
        use_memo(category_records, |categories| {
            product_fields(categories)
        })
    };

    let on_submit = {
        let products = products.clone();
        let target = (*editing).clone();
        AsyncCallback::new(move |form: FormData| {
            let products = products.clone();
            let target = target.clone();
            async move {
                match target {
                    Some(Editing::Existing(product)) => {
                        products.update(product.id, form).await?
                    }
                    Some(Editing::New) | None => products.create(form).await?,
                }
                Ok::<(), anyhow::Error>(())
            }
        })
    };

    let on_confirm_delete = {
        let products = products.clone();
        let target = (*deleting).clone();
        AsyncCallback::new(move |()| {
            let products = products.clone();
            let target = target.clone();
            async move {
                if let Some(product) = target {
                    products.delete(product.id).await?;
                }
                Ok::<(), anyhow::Error>(())
            }
        })
    };

    let on_new = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(Editing::New)))
    };
    let close_form = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };
    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |()| deleting.set(None))
    };
    let on_dismiss_error = {
        let products = products.clone();
        Callback::from(move |_: MouseEvent| products.dismiss_error())
    };

    let (heading, initial_data) = match &*editing {
        Some(Editing::Existing(product)) => {
            ("Edit product", Some(product_form_data(product)))
        }
        _ => ("New product", None),
    };

    let category_name = |product: &Product| -> String {
        product
            .category
            .as_ref()
            .and_then(|id| category_records.iter().find(|c| &c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".into())
    };

    html! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <h2 class="text-2xl font-bold">{"Products"}</h2>
                <button
                    onclick={on_new}
                    class="px-4 py-2 text-sm font-medium text-white bg-neutral-900
                           hover:bg-neutral-700 rounded-md"
                >
                    {"New product"}
                </button>
            </div>

            if let Some(error) = &state.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border
                            border-red-200 dark:border-red-800 flex justify-between">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    <button
                        onclick={on_dismiss_error}
                        class="text-sm text-red-700 dark:text-red-400 hover:underline"
                    >
                        {"Dismiss"}
                    </button>
                </div>
            }

            if state.is_loading {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">{"Loading products..."}</p>
                </div>
            } else if state.collection.is_empty() {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">{"No products yet"}</p>
                </div>
            } else {
                <table class="w-full text-sm text-left">
                    <thead class="border-b border-neutral-200 dark:border-neutral-700">
                        <tr>
                            <th class="py-2">{"Name"}</th>
                            <th class="py-2">{"Category"}</th>
                            <th class="py-2 text-right">{"Price"}</th>
                            <th class="py-2 text-center">{"Featured"}</th>
                            <th class="py-2">{"Updated"}</th>
                            <th class="py-2"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for state.collection.iter().map(|product| {
                            let on_edit = {
                                let editing = editing.clone();
                                let product = product.clone();
                                Callback::from(move |_: MouseEvent| {
                                    editing.set(Some(Editing::Existing(product.clone())))
                                })
                            };
                            let on_delete = {
                                let deleting = deleting.clone();
                                let product = product.clone();
                                Callback::from(move |_: MouseEvent| {
                                    deleting.set(Some(product.clone()))
                                })
                            };
                            html! {
                                <tr key={product.id.to_string()}
                                    class="border-b border-neutral-100 dark:border-neutral-800">
                                    <td class="py-2 font-medium">{&product.name}</td>
                                    <td class="py-2">{category_name(product)}</td>
                                    <td class="py-2 text-right">{format!("${:.2}", product.price)}</td>
                                    <td class="py-2 text-center">
                                        {if product.featured { "Yes" } else { "" }}
                                    </td>
                                    <td class="py-2 text-neutral-500">
                                        {product.updated_at
                                            .map(|t| t.strftime("%Y-%m-%d %H:%M").to_string())
                                            .unwrap_or_default()}
                                    </td>
                                    <td class="py-2 text-right space-x-3">
                                        <button onclick={on_edit} class="hover:underline">{"Edit"}</button>
                                        <button onclick={on_delete}
                                            class="text-red-600 dark:text-red-400 hover:underline">
                                            {"Delete"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
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
                heading="Delete product"
                description={deleting
                    .as_ref()
                    .map(|p| format!("Delete \"{}\"? This cannot be undone.", p.name))
                    .unwrap_or_default()}
                on_confirm={on_confirm_delete}
                on_close={close_delete}
            />
        </div>
    }
}

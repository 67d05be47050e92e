use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::hooks::use_auth;
use crate::{Route, State};

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-white dark:bg-neutral-900 text-neutral-900 dark:text-neutral-100">
            <Header />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <Notice />
                {for props.children.iter()}
            </main>
        </div>
    }
}

#[function_component]
fn Header() -> Html {
    let auth = use_auth();
    let navigator = use_navigator().unwrap();
    let (state, _) = use_store::<State>();

    let on_logout = Callback::from(move |_: MouseEvent| {
        auth.logout();
        navigator.push(&Route::Login);
    });

    let link_class = "text-sm font-medium text-neutral-600 dark:text-neutral-300 \
                      hover:text-neutral-900 dark:hover:text-white";

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-8">
                        <h1 class="text-xl font-semibold">{"Catalog Admin"}</h1>
                        <nav class="flex gap-6">
                            <Link<Route> to={Route::Products} classes={link_class}>
                                {"Products"}
                            </Link<Route>>
                            <Link<Route> to={Route::Categories} classes={link_class}>
                                {"Categories"}
                            </Link<Route>>
                        </nav>
                    </div>
                    if state.signed_in {
                        <button onclick={on_logout} class={link_class}>
                            {"Sign out"}
                        </button>
                    }
                </div>
            </div>
        </header>
    }
}

/// Confirmation of the last successful change, until dismissed.
#[function_component]
fn Notice() -> Html {
    let (state, dispatch) = use_store::<State>();

    let Some(notice) = state.notice.clone() else {
        return html! {};
    };
    let on_dismiss = dispatch.reduce_mut_callback(|state| state.notice = None);

    html! {
        <div class="mb-6 p-4 rounded-md bg-green-50 dark:bg-green-900/20 border
                    border-green-200 dark:border-green-800 flex justify-between">
            <p class="text-sm text-green-700 dark:text-green-400">{notice}</p>
            <button
                onclick={on_dismiss}
                class="text-sm text-green-700 dark:text-green-400 hover:underline"
            >
                {"Dismiss"}
            </button>
        </div>
    }
}

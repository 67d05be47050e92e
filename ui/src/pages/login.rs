use payloads::requests::Credentials;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::SubmitButton;
use crate::hooks::{use_auth, use_session};

#[derive(Clone, Copy, PartialEq)]
enum AuthMode {
    Login,
    Register,
}

#[function_component]
pub fn LoginPage() -> Html {
    let auth = use_auth();
    let session = use_session();
    let navigator = use_navigator().unwrap();
    let mode = use_state(|| AuthMode::Login);
    let registered = use_state(|| None::<String>);

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();

    // Already signed in
    {
        let navigator = navigator.clone();
        use_effect_with(session.is_active(), move |signed_in| {
            if *signed_in {
                navigator.push(&Route::Products);
            }
        });
    }

    let on_submit = {
        let auth = auth.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let mode = mode.clone();
        let registered = registered.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(email), Some(password)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let credentials = Credentials {
                email: email.value().trim().to_string(),
                password: password.value(),
            };

            let auth = auth.clone();
            let mode = mode.clone();
            let registered = registered.clone();
            let navigator = navigator.clone();

            yew::platform::spawn_local(async move {
                match *mode {
                    AuthMode::Login => {
                        if auth.login(credentials).await.is_ok() {
                            navigator.push(&Route::Products);
                        }
                    }
                    AuthMode::Register => {
                        if let Ok(message) = auth.register(credentials).await {
                            registered.set(Some(message));
                            mode.set(AuthMode::Login);
                        }
                    }
                }
            });
        })
    };

    let toggle_mode = {
        let mode = mode.clone();
        let registered = registered.clone();
        Callback::from(move |_: MouseEvent| {
            registered.set(None);
            mode.set(match *mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            });
        })
    };

    let (title, submit_text, toggle_text, toggle_link_text) = match *mode {
        AuthMode::Login => (
            "Sign in to Catalog Admin",
            "Sign in",
            "Don't have an account?",
            "Register",
        ),
        AuthMode::Register => (
            "Create an admin account",
            "Register",
            "Already have an account?",
            "Sign in",
        ),
    };

    let input_class = "w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 \
                       rounded-md bg-white dark:bg-neutral-700 \
                       focus:outline-none focus:ring-2 focus:ring-neutral-500";

    html! {
        <div class="min-h-screen flex items-center justify-center bg-neutral-50 dark:bg-neutral-900">
            <div class="max-w-md w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md space-y-6">
                <h2 class="text-2xl font-bold text-center text-neutral-900 dark:text-neutral-100">
                    {title}
                </h2>

                if let Some(message) = &*registered {
                    <div class="p-3 rounded-md bg-green-50 dark:bg-green-900/20 text-sm
                                text-green-700 dark:text-green-400">
                        {format!("{message}. You can now sign in.")}
                    </div>
                }

                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label for="email" class="block text-sm font-medium mb-1">{"Email"}</label>
                        <input
                            ref={email_ref}
                            id="email"
                            type="email"
                            required=true
                            disabled={auth.state.is_loading}
                            class={input_class}
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium mb-1">{"Password"}</label>
                        <input
                            ref={password_ref}
                            id="password"
                            type="password"
                            required=true
                            disabled={auth.state.is_loading}
                            class={input_class}
                        />
                    </div>

                    if let Some(error) = &auth.state.error {
                        <div class="text-sm text-red-600 dark:text-red-400">
                            {error}
                        </div>
                    }

                    <SubmitButton
                        loading={auth.state.is_loading}
                        text={submit_text}
                        width="w-full"
                    />
                </form>

                <p class="text-center text-sm text-neutral-600 dark:text-neutral-400">
                    {toggle_text}{" "}
                    <button
                        onclick={toggle_mode}
                        class="font-medium text-neutral-900 dark:text-neutral-100 underline"
                    >
                        {toggle_link_text}
                    </button>
                </p>
            </div>
        </div>
    }
}

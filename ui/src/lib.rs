use admin_state::Session;
use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

mod components;
mod hooks;
mod logs;
mod pages;
mod session;
mod state;
mod utils;

pub use state::State;

use components::MainLayout;
use pages::{CategoriesPage, LoginPage, NotFoundPage, ProductsPage};
use session::LocalStorageTokenStore;

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client(session: &Session) -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| {
            // Fallback to same origin
            web_sys::window().and_then(|window| window.location().origin().ok())
        })
        .unwrap_or_default();

    APIClient::new(address).with_token(session.token())
}

#[function_component]
pub fn App() -> Html {
    let session = use_memo((), |_| Session::new(LocalStorageTokenStore));
    let (_, dispatch) = use_store::<State>();

    // A token left in storage by an earlier visit counts as signed in.
    {
        let session = (*session).clone();
        use_effect_with((), move |_| {
            logs::init_logging();
            let signed_in = session.is_active();
            dispatch.reduce_mut(|state| state.signed_in = signed_in);
        });
    }

    html! {
        <ContextProvider<Session> context={(*session).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<Session>>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/products")]
    Products,
    #[at("/categories")]
    Categories,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Products} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Products => html! {
            <MainLayout><ProductsPage /></MainLayout>
        },
        Route::Categories => html! {
            <MainLayout><CategoriesPage /></MainLayout>
        },
        Route::NotFound => html! {
            <MainLayout><NotFoundPage /></MainLayout>
        },
    }
}

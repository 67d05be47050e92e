use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::hooks::use_session;
use crate::{Route, State};

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    #[prop_or_default]
    pub children: Children,
}

/// Renders its children only when a session token is present, otherwise
/// sends the user to the login page.
///
/// Children and their hooks (and so their fetches) only run once signed in.
#[function_component]
pub fn RequireAuth(props: &RequireAuthProps) -> Html {
    let session = use_session();
    // subscribe so sign-in and sign-out re-render
    let (_state, _) = use_store::<State>();

    if !session.is_active() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    html! {
        <>
            {for props.children.iter()}
        </>
    }
}

use admin_state::Session;
use yew::prelude::*;

/// The session provided by `App`.
#[hook]
pub fn use_session() -> Session {
    use_context::<Session>().expect("Session context is provided by App")
}

use admin_state::{AuthState, Session, auth};
use payloads::ClientError;
use payloads::requests::Credentials;
use yew::prelude::*;
use yewdux::prelude::*;

use super::{HookCell, use_session, use_state_cell};
use crate::{State, get_api_client};

#[derive(Clone)]
pub struct AuthHandle {
    pub state: AuthState,
    cell: HookCell<AuthState>,
    session: Session,
    dispatch: Dispatch<State>,
}

impl AuthHandle {
    /// Returns the server's confirmation message.
    pub async fn register(self, credentials: Credentials) -> Result<String, ClientError> {
        let client = get_api_client(&self.session);
        let body = auth::register(&client, &self.cell, &credentials).await?;
        Ok(body.message)
    }

    pub async fn login(self, credentials: Credentials) -> Result<(), ClientError> {
        let client = get_api_client(&self.session);
        auth::login(&client, &self.cell, &self.session, &credentials).await?;
        self.dispatch.reduce_mut(|state| state.signed_in = true);
        Ok(())
    }

    pub fn logout(&self) {
        auth::logout(&self.cell, &self.session);
        self.dispatch.reduce_mut(|state| {
            state.signed_in = false;
            state.notice = None;
        });
    }
}

#[hook]
pub fn use_auth() -> AuthHandle {
    let session = use_session();
    let cell = use_state_cell(AuthState::default);
    let (_, dispatch) = use_store::<State>();

    AuthHandle {
        state: cell.get(),
        cell,
        session,
        dispatch,
    }
}

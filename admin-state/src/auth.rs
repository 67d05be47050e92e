//! Register and sign in against the backend.

use payloads::{APIClient, ClientError, requests::Credentials, responses};
use secrecy::SecretString;

use crate::{Session, StateCell};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn finish<T>(&mut self, result: &Result<T, ClientError>) {
        if let Err(e) = result {
            self.error = Some(e.to_string());
        }
        self.is_loading = false;
    }
}

pub async fn register<C: StateCell<AuthState>>(
    client: &APIClient,
    cell: &C,
    credentials: &Credentials,
) -> Result<responses::Message, ClientError> {
    cell.reduce(AuthState::begin);

    let result = client.register(credentials).await;
    if let Err(e) = &result {
        tracing::error!("Registration failed: {e:#}");
    }

    cell.reduce(|state| state.finish(&result));
    result
}

/// Sign in and persist the issued token into `session`. On failure the
/// session is left as it was.
pub async fn login<C: StateCell<AuthState>>(
    client: &APIClient,
    cell: &C,
    session: &Session,
    credentials: &Credentials,
) -> Result<responses::LoginToken, ClientError> {
    cell.reduce(AuthState::begin);

    let result = client.login(credentials).await;
    match &result {
        Ok(body) => session.begin(&SecretString::from(body.token.clone())),
        Err(e) => tracing::error!("Login failed: {e:#}"),
    }

    cell.reduce(|state| state.finish(&result));
    result
}

pub fn logout<C: StateCell<AuthState>>(cell: &C, session: &Session) {
    session.end();
    cell.reduce(|state| *state = AuthState::default());
}

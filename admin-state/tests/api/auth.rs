use admin_state::{AuthState, Session, StateCell, auth};
use payloads::requests::Credentials;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use std::cell::RefCell;
use test_helpers::{alice_credentials, bob_credentials, spawn_app};

/// Auth state that remembers the loading flag after every update.
#[derive(Default)]
struct Recording {
    state: RefCell<AuthState>,
    loading: RefCell<Vec<bool>>,
}

impl StateCell<AuthState> for Recording {
    fn read<T>(&self, f: impl FnOnce(&AuthState) -> T) -> T {
        f(&self.state.borrow())
    }

    fn reduce(&self, f: impl FnOnce(&mut AuthState)) {
        let mut state = self.state.borrow_mut();
        f(&mut state);
        self.loading.borrow_mut().push(state.is_loading);
    }
}

#[tokio::test]
async fn login_persists_token() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cell = RefCell::new(AuthState::default());
    let session = Session::in_memory();

    auth::register(&app.client, &cell, &alice_credentials()).await?;
    let body =
        auth::login(&app.client, &cell, &session, &alice_credentials()).await?;

    assert!(session.is_active());
    let token = session.token().expect("token was stored");
    assert_eq!(token.expose_secret(), body.token);
    assert_eq!(*cell.borrow(), AuthState::default());

    // the stored token authorizes mutations
    app.catalog.authorize(Some(token.expose_secret()))?;
    Ok(())
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cell = Recording::default();
    let session = Session::in_memory();

    let result =
        auth::login(&app.client, &cell, &session, &bob_credentials()).await;

    let e = result.expect_err("bob never registered");
    assert_eq!(e.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(!session.is_active());
    cell.read(|state| {
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_loading);
    });
    assert_eq!(*cell.loading.borrow(), [true, false]);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_reported() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cell = Recording::default();

    let body = auth::register(&app.client, &cell, &alice_credentials()).await?;
    assert_eq!(body.message, "User registered successfully");

    let result = auth::register(&app.client, &cell, &alice_credentials()).await;

    assert!(result.is_err());
    cell.read(|state| {
        assert_eq!(state.error.as_deref(), Some("User already exists"));
    });
    assert_eq!(*cell.loading.borrow(), [true, false, true, false]);
    Ok(())
}

#[tokio::test]
async fn new_attempt_clears_previous_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cell = RefCell::new(AuthState::default());
    let session = Session::in_memory();
    let wrong = Credentials {
        password: "wrong".into(),
        ..alice_credentials()
    };

    auth::register(&app.client, &cell, &alice_credentials()).await?;
    assert!(auth::login(&app.client, &cell, &session, &wrong).await.is_err());
    assert!(cell.borrow().error.is_some());

    auth::login(&app.client, &cell, &session, &alice_credentials()).await?;
    assert_eq!(cell.borrow().error, None);
    assert!(session.is_active());
    Ok(())
}

#[tokio::test]
async fn logout_ends_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cell = RefCell::new(AuthState::default());
    let session = Session::in_memory();
    auth::register(&app.client, &cell, &alice_credentials()).await?;
    auth::login(&app.client, &cell, &session, &alice_credentials()).await?;

    auth::logout(&cell, &session);

    assert!(!session.is_active());
    assert_eq!(*cell.borrow(), AuthState::default());
    Ok(())
}

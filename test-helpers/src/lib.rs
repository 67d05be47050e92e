pub mod mock;
pub mod server;
pub mod store;
pub mod telemetry;

use payloads::requests::{Credentials, FileUpload, FormData};
use payloads::{APIClient, ClientError};
use reqwest::StatusCode;
use secrecy::SecretString;
use std::net::IpAddr;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use store::Catalog;

pub struct TestApp {
    /// Where clients reach the server; loopback when bound to all
    /// interfaces.
    pub host: String,
    pub port: u16,
    pub client: APIClient,
    /// The backend's data, for asserting on what it received.
    pub catalog: Catalog,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// A client for the same backend carrying the given token.
    pub fn client_with_token(&self, token: Option<SecretString>) -> APIClient {
        APIClient::new(self.address()).with_token(token)
    }

    /// Register alice and sign the app's client in as her.
    ///
    /// Using anyhow::Result lets us get a backtrace from when the error was
    /// first converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
    pub async fn sign_in(&mut self) -> anyhow::Result<SecretString> {
        let credentials = alice_credentials();
        self.client.register(&credentials).await?;
        let login = self.client.login(&credentials).await?;
        let token = SecretString::from(login.token);
        self.client.token = Some(token.clone());
        Ok(token)
    }
}

pub fn alice_credentials() -> Credentials {
    Credentials {
        email: "alice@example.com".into(),
        password: "supersecret".into(),
    }
}

pub fn bob_credentials() -> Credentials {
    Credentials {
        email: "bob@example.com".into(),
        password: "bobspw".into(),
    }
}

/// Product form as the modal submits it, without an image.
pub fn widget_form() -> FormData {
    FormData::new()
        .with("name", "Widget")
        .with("description", "A small widget")
        .with("price", "9.99")
        .with("featured", false)
}

pub fn widget_image() -> FileUpload {
    FileUpload::new(
        "widget.png",
        Some("image/png".into()),
        vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    )
}

pub fn category_form(name: &str) -> FormData {
    FormData::new()
        .with("name", name)
        .with("description", format!("Everything in {name}"))
}

/// Start the backend on the configured address. The config's port is
/// updated to the bound one.
pub async fn spawn_app_with_config(mut config: server::Config) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let catalog = Catalog::new();
    let server = server::build(&mut config, catalog.clone()).unwrap();
    tokio::spawn(server);

    let host = match config.ip.parse::<IpAddr>() {
        Ok(ip) if ip.is_unspecified() => "127.0.0.1".to_string(),
        _ => config.ip,
    };
    TestApp {
        client: APIClient::new(format!("http://{host}:{}", config.port)),
        host,
        port: config.port,
        catalog,
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    spawn_app_with_config(server::Config {
        ip: "127.0.0.1".into(),
        port,
    })
    .await
}

/// Start the backend on a random port.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

pub fn assert_status_code<T: std::fmt::Debug>(
    result: Result<T, ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(ClientError::Request { status, .. }) => assert_eq!(status, expected),
        other => panic!("Expected a request error, got {other:?}"),
    };
}

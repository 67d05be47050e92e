use crate::{Resource, requests, responses};
use reqwest::{Method, RequestBuilder, StatusCode, multipart};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Session token sent as a bearer credential, if signed in.
    pub token: Option<SecretString>,
}

impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.prepare(request).send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.prepare(request).send().await
    }

    async fn empty_delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.prepare(request).send().await
    }

    /// Send form data, as multipart when it carries a file and as JSON
    /// otherwise.
    async fn send_form(
        &self,
        method: Method,
        path: &str,
        form: &requests::FormData,
    ) -> ReqwestResult {
        let request = self.inner_client.request(method, self.format_url(path));
        let request = if form.has_file() {
            request.multipart(multipart_form(form)?)
        } else {
            request.json(form)
        };
        self.prepare(request).send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Fetch every record of a resource, in server order.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        let fallback = format!("Failed to fetch {}", R::COLLECTION);
        let response = self
            .empty_get(R::COLLECTION)
            .await
            .map_err(|e| ClientError::transport(&fallback, e))?;
        ok_body(response, &fallback).await
    }

    pub async fn create<R: Resource>(
        &self,
        form: &requests::FormData,
    ) -> Result<responses::Saved<R>, ClientError> {
        let fallback =
            format!("Failed to create {}. Please try again.", R::SINGULAR);
        let response = self
            .send_form(Method::POST, R::COLLECTION, form)
            .await
            .map_err(|e| ClientError::transport(&fallback, e))?;
        ok_saved(response, &fallback).await
    }

    pub async fn update<R: Resource>(
        &self,
        id: &R::Id,
        form: &requests::FormData,
    ) -> Result<responses::Saved<R>, ClientError> {
        let fallback =
            format!("Failed to update {}. Please try again.", R::SINGULAR);
        let response = self
            .send_form(Method::PUT, &format!("{}/{id}", R::COLLECTION), form)
            .await
            .map_err(|e| ClientError::transport(&fallback, e))?;
        ok_saved(response, &fallback).await
    }

    pub async fn delete<R: Resource>(
        &self,
        id: &R::Id,
    ) -> Result<responses::Message, ClientError> {
        let fallback =
            format!("Failed to delete {}. Please try again.", R::SINGULAR);
        let response = self
            .empty_delete(&format!("{}/{id}", R::COLLECTION))
            .await
            .map_err(|e| ClientError::transport(&fallback, e))?;
        ok_body(response, &fallback).await
    }

    pub async fn register(
        &self,
        details: &requests::Credentials,
    ) -> Result<responses::Message, ClientError> {
        let fallback = "Registration failed";
        let response = self
            .post("auth/register", details)
            .await
            .map_err(|e| ClientError::transport(fallback, e))?;
        ok_body(response, fallback).await
    }

    pub async fn login(
        &self,
        details: &requests::Credentials,
    ) -> Result<responses::LoginToken, ClientError> {
        let fallback = "Login failed";
        let response = self
            .post("auth/login", details)
            .await
            .map_err(|e| ClientError::transport(fallback, e))?;
        ok_body(response, fallback).await
    }
}

fn multipart_form(
    form: &requests::FormData,
) -> Result<multipart::Form, reqwest::Error> {
    let mut multipart = multipart::Form::new();
    for (name, value) in form.iter() {
        multipart = match value {
            requests::FieldValue::Text(text) => {
                multipart.text(name.clone(), text.clone())
            }
            requests::FieldValue::Bool(b) => {
                multipart.text(name.clone(), b.to_string())
            }
            requests::FieldValue::File(file) => {
                let part = multipart::Part::bytes(file.data.to_vec())
                    .file_name(file.name.clone());
                let part = match &file.content_type {
                    Some(mime) => part.mime_str(mime)?,
                    None => part,
                };
                multipart.part(name.clone(), part)
            }
        };
    }
    Ok(multipart)
}

/// Every variant displays a message fit for showing to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status. The message comes from
    /// the response body when it has one, otherwise it is the operation's
    /// fallback.
    #[error("{message}")]
    Request { status: StatusCode, message: String },
    /// The request never completed or the body could not be read.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// A success response whose body did not have the expected shape.
    #[error("{message}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    fn transport(message: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            message: message.to_string(),
            source,
        }
    }

    fn decode(message: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            message: message.to_string(),
            source,
        }
    }

    /// The response status, for failures the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Request { message, .. }
            | Self::Transport { message, .. }
            | Self::Decode { message, .. } => message,
        }
    }
}

/// Build the error for a non-success response, preferring the `message` the
/// server put in the body.
async fn request_error(
    response: reqwest::Response,
    fallback: &str,
) -> ClientError {
    let status = response.status();
    let server_message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<responses::ErrorBody>(&text).ok())
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty());

    ClientError::Request {
        status,
        message: server_message.unwrap_or_else(|| fallback.to_string()),
    }
}

async fn success_bytes(
    response: reqwest::Response,
    fallback: &str,
) -> Result<Vec<u8>, ClientError> {
    if !response.status().is_success() {
        return Err(request_error(response, fallback).await);
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::transport(fallback, e))?;
    Ok(bytes.to_vec())
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let bytes = success_bytes(response, fallback).await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(fallback, e))
}

/// Deserialize a `{ <singular>: record, message }` body.
pub async fn ok_saved<R: Resource>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<responses::Saved<R>, ClientError> {
    let bytes = success_bytes(response, fallback).await?;
    let mut body: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::decode(fallback, e))?;

    let message = body
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();
    let record = body.remove(R::SINGULAR).ok_or_else(|| {
        ClientError::decode(
            fallback,
            <serde_json::Error as serde::de::Error>::missing_field(R::SINGULAR),
        )
    })?;
    let record =
        serde_json::from_value(record).map_err(|e| ClientError::decode(fallback, e))?;

    Ok(responses::Saved { record, message })
}

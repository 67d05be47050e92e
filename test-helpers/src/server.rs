//! actix-web routes of the stand-in backend.

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, ResponseError, body::BoxBody,
    delete, dev::HttpServiceFactory, get, http::StatusCode, post, put, web,
};
use futures::StreamExt;
use payloads::{CategoryId, ProductId, requests::Credentials};
use serde_json::json;
use std::net::TcpListener;

use crate::store::{Catalog, Encoding, Field, Fields, StoreError, Upload};

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".into()),
            port: match var("PORT") {
                Ok(port) => port.parse()?,
                Err(_) => 0,
            },
        })
    }
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, catalog: Catalog) -> std::io::Result<Server> {
    let catalog = web::Data::new(catalog);

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .service(api_services())
            .app_data(catalog.clone())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(list_products)
        .service(create_product)
        .service(update_product)
        .service(delete_product)
        .service(list_categories)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(register)
        .service(login)
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("{0}")]
    AuthError(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .json(json!({ "message": self.to_string() }))
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::MissingField(_)
            | StoreError::InvalidPrice
            | StoreError::MissingCredentials
            | StoreError::UserExists => APIError::BadRequest(message),
            StoreError::DuplicateCategory(_) => APIError::Conflict(message),
            StoreError::ProductNotFound | StoreError::CategoryNotFound => {
                APIError::NotFound(message)
            }
            StoreError::InvalidCredentials | StoreError::NotAuthorized => {
                APIError::AuthError(message)
            }
        }
    }
}

fn authorize(req: &HttpRequest, catalog: &Catalog) -> Result<(), APIError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    Ok(catalog.authorize(token)?)
}

/// Decode a JSON or multipart body into fields, noting which one it was.
async fn read_fields(
    req: &HttpRequest,
    payload: web::Payload,
    catalog: &Catalog,
) -> Result<Fields, APIError> {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let fields = if is_multipart {
        read_multipart(Multipart::new(req.headers(), payload)).await?
    } else {
        read_json(payload).await?
    };
    catalog.record_encoding(if is_multipart {
        Encoding::Multipart
    } else {
        Encoding::Json
    });
    Ok(fields)
}

async fn read_multipart(mut multipart: Multipart) -> Result<Fields, APIError> {
    let mut fields = Fields::default();
    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(|e| APIError::BadRequest(e.to_string()))?;
        let Some(disposition) = field.content_disposition().cloned() else {
            continue;
        };
        let Some(name) = disposition.get_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| APIError::BadRequest(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        let value = match disposition.get_filename() {
            Some(file_name) => Field::File(Upload {
                field: name.clone(),
                file_name: file_name.to_string(),
                content_type,
                len: bytes.len(),
            }),
            None => Field::Text(String::from_utf8_lossy(&bytes).into_owned()),
        };
        fields.insert(name, value);
    }
    Ok(fields)
}

async fn read_json(payload: web::Payload) -> Result<Fields, APIError> {
    let body = payload
        .to_bytes()
        .await
        .map_err(|e| APIError::BadRequest(e.to_string()))?;
    let values: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&body)
            .map_err(|e| APIError::BadRequest(e.to_string()))?;

    let mut fields = Fields::default();
    for (name, value) in values {
        let field = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::Bool(b) => Field::Bool(b),
            serde_json::Value::String(text) => Field::Text(text),
            other => Field::Text(other.to_string()),
        };
        fields.insert(name, field);
    }
    Ok(fields)
}

#[get("/products")]
async fn list_products(catalog: web::Data<Catalog>) -> HttpResponse {
    HttpResponse::Ok().json(catalog.products())
}

#[post("/products")]
async fn create_product(
    req: HttpRequest,
    payload: web::Payload,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    authorize(&req, &catalog)?;
    let fields = read_fields(&req, payload, &catalog).await?;
    let product = catalog.create_product(&fields)?;
    Ok(HttpResponse::Created().json(json!({
        "product": product,
        "message": "Product created successfully",
    })))
}

#[put("/products/{id}")]
async fn update_product(
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Payload,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    authorize(&req, &catalog)?;
    let fields = read_fields(&req, payload, &catalog).await?;
    let product =
        catalog.update_product(&ProductId(path.into_inner()), &fields)?;
    Ok(HttpResponse::Ok().json(json!({
        "product": product,
        "message": "Product updated successfully",
    })))
}

#[delete("/products/{id}")]
async fn delete_product(
    req: HttpRequest,
    path: web::Path<String>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    authorize(&req, &catalog)?;
    catalog.delete_product(&ProductId(path.into_inner()))?;
    Ok(HttpResponse::Ok()
        .json(json!({ "message": "Product deleted successfully" })))
}

#[get("/categories")]
async fn list_categories(catalog: web::Data<Catalog>) -> HttpResponse {
    HttpResponse::Ok().json(catalog.categories())
}

#[post("/categories")]
async fn create_category(
    req: HttpRequest,
    payload: web::Payload,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    authorize(&req, &catalog)?;
    let fields = read_fields(&req, payload, &catalog).await?;
    let category = catalog.create_category(&fields)?;
    Ok(HttpResponse::Created().json(json!({
        "category": category,
        "message": "Category created successfully",
    })))
}

#[put("/categories/{id}")]
async fn update_category(
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Payload,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    authorize(&req, &catalog)?;
    let fields = read_fields(&req, payload, &catalog).await?;
    let category =
        catalog.update_category(&CategoryId(path.into_inner()), &fields)?;
    Ok(HttpResponse::Ok().json(json!({
        "category": category,
        "message": "Category updated successfully",
    })))
}

#[delete("/categories/{id}")]
async fn delete_category(
    req: HttpRequest,
    path: web::Path<String>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    authorize(&req, &catalog)?;
    catalog.delete_category(&CategoryId(path.into_inner()))?;
    Ok(HttpResponse::Ok()
        .json(json!({ "message": "Category deleted successfully" })))
}

#[post("/auth/register")]
async fn register(
    credentials: web::Json<Credentials>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    catalog.register(&credentials.email, &credentials.password)?;
    Ok(HttpResponse::Created()
        .json(json!({ "message": "User registered successfully" })))
}

#[post("/auth/login")]
async fn login(
    credentials: web::Json<Credentials>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    let token = catalog.login(&credentials.email, &credentials.password)?;
    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

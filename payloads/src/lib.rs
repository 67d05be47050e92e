pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record managed by the admin backend.
///
/// `COLLECTION` is the path segment under `/api` and `SINGULAR` is both the
/// key of the record in create/update responses and the noun used in
/// fallback error messages.
pub trait Resource: Clone + PartialEq + Debug + DeserializeOwned {
    type Id: Clone + Eq + Hash + Debug + Display;

    const COLLECTION: &'static str;
    const SINGULAR: &'static str;

    fn id(&self) -> &Self::Id;
}

/// Server-assigned product identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ProductId(pub String);

/// Server-assigned category identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct CategoryId(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    /// Location of the uploaded image, as served by the backend.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Resource for Product {
    type Id = ProductId;

    const COLLECTION: &'static str = "products";
    const SINGULAR: &'static str = "product";

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Category names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Resource for Category {
    type Id = CategoryId;

    const COLLECTION: &'static str = "categories";
    const SINGULAR: &'static str = "category";

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

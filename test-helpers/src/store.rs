//! In-memory catalog behind the stand-in backend.

use jiff::Timestamp;
use payloads::{Category, CategoryId, Product, ProductId};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Price must be a number")]
    InvalidPrice,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("A category named {0} already exists")]
    DuplicateCategory(String),
    #[error("Product not found")]
    ProductNotFound,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("User already exists")]
    UserExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not authorized")]
    NotAuthorized,
}

/// How a request body arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// A file received in a multipart body. Only its metadata is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Bool(bool),
    File(Upload),
}

/// Decoded request body, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields(HashMap<String, Field>);

impl Fields {
    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        self.0.insert(name.into(), field);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Non-blank, trimmed text for a field.
    fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Field::Text(text) if !text.trim().is_empty() => {
                Some(text.trim().to_string())
            }
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match self.0.get(name)? {
            Field::Bool(b) => Some(*b),
            Field::Text(text) => Some(text == "true"),
            Field::File(_) => None,
        }
    }

    fn price(&self) -> Result<Option<Decimal>, StoreError> {
        self.text("price")
            .map(|text| Decimal::from_str(&text).map_err(|_| StoreError::InvalidPrice))
            .transpose()
    }

    fn upload(&self, name: &str) -> Option<&Upload> {
        match self.0.get(name)? {
            Field::File(upload) => Some(upload),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    categories: Vec<Category>,
    users: HashMap<String, String>,
    tokens: HashSet<String>,
    uploads: Vec<Upload>,
    encodings: Vec<Encoding>,
}

/// Shared handle to the catalog; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inner: Arc<Mutex<Inner>>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn record_encoding(&self, encoding: Encoding) {
        self.lock().encodings.push(encoding);
    }

    /// Body encodings of every mutation received so far, oldest first.
    pub fn encodings(&self) -> Vec<Encoding> {
        self.lock().encodings.clone()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.lock().uploads.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.lock().categories.clone()
    }

    pub fn create_product(&self, fields: &Fields) -> Result<Product, StoreError> {
        let name = fields.text("name").ok_or(StoreError::MissingField("Name"))?;
        let price = fields.price()?.ok_or(StoreError::MissingField("Price"))?;
        let now = Timestamp::now();
        let mut inner = self.lock();
        let image = store_image(&mut inner, fields);
        let product = Product {
            id: ProductId(new_id()),
            name,
            description: fields.text("description"),
            price,
            image,
            category: fields.text("category").map(CategoryId),
            featured: fields.flag("featured").unwrap_or(false),
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.products.push(product.clone());
        Ok(product)
    }

    /// Apply the fields present in the request, leaving the others alone.
    pub fn update_product(
        &self,
        id: &ProductId,
        fields: &Fields,
    ) -> Result<Product, StoreError> {
        let name = if fields.contains("name") {
            Some(fields.text("name").ok_or(StoreError::MissingField("Name"))?)
        } else {
            None
        };
        let price = fields.price()?;
        let mut inner = self.lock();
        let position = inner
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or(StoreError::ProductNotFound)?;
        let image = store_image(&mut inner, fields);

        let product = &mut inner.products[position];
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = price {
            product.price = price;
        }
        if fields.contains("description") {
            product.description = fields.text("description");
        }
        if fields.contains("category") {
            product.category = fields.text("category").map(CategoryId);
        }
        if let Some(featured) = fields.flag("featured") {
            product.featured = featured;
        }
        if image.is_some() {
            product.image = image;
        }
        product.updated_at = Some(Timestamp::now());
        Ok(product.clone())
    }

    pub fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.products.len();
        inner.products.retain(|p| &p.id != id);
        if inner.products.len() == before {
            return Err(StoreError::ProductNotFound);
        }
        Ok(())
    }

    pub fn create_category(&self, fields: &Fields) -> Result<Category, StoreError> {
        let name = fields.text("name").ok_or(StoreError::MissingField("Name"))?;
        let mut inner = self.lock();
        if inner.categories.iter().any(|c| c.name == name) {
            return Err(StoreError::DuplicateCategory(name));
        }
        let now = Timestamp::now();
        let category = Category {
            id: CategoryId(new_id()),
            name,
            description: fields.text("description"),
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: &CategoryId,
        fields: &Fields,
    ) -> Result<Category, StoreError> {
        let name = if fields.contains("name") {
            Some(fields.text("name").ok_or(StoreError::MissingField("Name"))?)
        } else {
            None
        };
        let mut inner = self.lock();
        if let Some(name) = &name
            && inner.categories.iter().any(|c| &c.name == name && &c.id != id)
        {
            return Err(StoreError::DuplicateCategory(name.clone()));
        }
        let category = inner
            .categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or(StoreError::CategoryNotFound)?;
        if let Some(name) = name {
            category.name = name;
        }
        if fields.contains("description") {
            category.description = fields.text("description");
        }
        category.updated_at = Some(Timestamp::now());
        Ok(category.clone())
    }

    pub fn delete_category(&self, id: &CategoryId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.categories.len();
        inner.categories.retain(|c| &c.id != id);
        if inner.categories.len() == before {
            return Err(StoreError::CategoryNotFound);
        }
        Ok(())
    }

    pub fn register(&self, email: &str, password: &str) -> Result<(), StoreError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::MissingCredentials);
        }
        let mut inner = self.lock();
        if inner.users.contains_key(email) {
            return Err(StoreError::UserExists);
        }
        inner.users.insert(email.to_string(), password.to_string());
        Ok(())
    }

    /// Check credentials and issue a fresh token.
    pub fn login(&self, email: &str, password: &str) -> Result<String, StoreError> {
        let mut inner = self.lock();
        match inner.users.get(email.trim()) {
            Some(stored) if stored == password => {
                let token = new_id();
                inner.tokens.insert(token.clone());
                Ok(token)
            }
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    pub fn authorize(&self, token: Option<&str>) -> Result<(), StoreError> {
        match token {
            Some(token) if self.lock().tokens.contains(token) => Ok(()),
            _ => Err(StoreError::NotAuthorized),
        }
    }
}

/// Keep the metadata of an uploaded image and return the path it would be
/// served from. Existing image paths sent back as text are kept as-is.
fn store_image(inner: &mut Inner, fields: &Fields) -> Option<String> {
    if let Some(upload) = fields.upload("image") {
        inner.uploads.push(upload.clone());
        return Some(format!("/uploads/{}-{}", new_id(), upload.file_name));
    }
    fields.text("image")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        let mut fields = Fields::default();
        for (name, value) in pairs {
            fields.insert(*name, Field::Text(value.to_string()));
        }
        fields
    }

    #[test]
    fn product_requires_numeric_price() {
        let catalog = Catalog::new();

        let result = catalog.create_product(&fields(&[("name", "Widget"), ("price", "cheap")]));

        assert!(matches!(result, Err(StoreError::InvalidPrice)));
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn category_names_are_unique() {
        let catalog = Catalog::new();
        catalog.create_category(&fields(&[("name", "Tools")])).unwrap();

        let result = catalog.create_category(&fields(&[("name", " Tools ")]));

        assert!(matches!(result, Err(StoreError::DuplicateCategory(_))));
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let catalog = Catalog::new();
        let product = catalog
            .create_product(&fields(&[
                ("name", "Widget"),
                ("price", "9.99"),
                ("description", "A widget"),
            ]))
            .unwrap();

        let updated = catalog
            .update_product(&product.id, &fields(&[("price", "12.50")]))
            .unwrap();

        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("A widget"));
        assert_eq!(updated.price, Decimal::new(1250, 2));
    }
}

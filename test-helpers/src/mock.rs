//! Catalog data for the dev-server and tests that want a populated backend.
//!
//! Creates a few categories, products spread across them (one with an
//! image, one uncategorized) and signs the app's client in as alice, whose
//! credentials the UI can use on its login page.

use crate::{TestApp, alice_credentials, category_form, widget_image};
use anyhow::Result;
use payloads::requests::FormData;
use payloads::{Category, Product};

pub struct DevDataset {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl DevDataset {
    pub async fn create(app: &mut TestApp) -> Result<Self> {
        tracing::info!("👤 Registering admin user");
        app.sign_in().await?;

        tracing::info!("🗂️ Creating categories");
        let mut categories = Vec::new();
        for name in ["Hardware", "Garden", "Kitchen"] {
            let saved = app.client.create::<Category>(&category_form(name)).await?;
            categories.push(saved.record);
        }

        tracing::info!("📦 Creating products");
        let forms = [
            product_form("Claw Hammer", "19.99", Some(&categories[0]), true)
                .with("image", widget_image()),
            product_form("Box of Nails", "4.50", Some(&categories[0]), false),
            product_form("Watering Can", "12.00", Some(&categories[1]), false),
            product_form("Chef's Knife", "49.95", Some(&categories[2]), true),
            product_form("Gift Card", "25", None, false),
        ];
        let mut products = Vec::new();
        for form in &forms {
            let saved = app.client.create::<Product>(form).await?;
            products.push(saved.record);
        }

        tracing::info!("✅ Catalog dataset created");
        Ok(DevDataset {
            categories,
            products,
        })
    }

    pub fn print_summary(&self) {
        let credentials = alice_credentials();
        tracing::info!("📋 Available test data:");
        tracing::info!(
            "   🔑 Login: {} / {}",
            credentials.email,
            credentials.password
        );
        for category in &self.categories {
            tracing::info!("   🗂️ {} ({})", category.name, category.id);
            for product in self
                .products
                .iter()
                .filter(|p| p.category.as_ref() == Some(&category.id))
            {
                tracing::info!("      ├─ {} ${}", product.name, product.price);
            }
        }
        for product in self.products.iter().filter(|p| p.category.is_none()) {
            tracing::info!("   📦 {} ${} (uncategorized)", product.name, product.price);
        }
    }
}

fn product_form(
    name: &str,
    price: &str,
    category: Option<&Category>,
    featured: bool,
) -> FormData {
    let form = FormData::new()
        .with("name", name)
        .with("description", format!("{name} from the dev catalog"))
        .with("price", price)
        .with("featured", featured);
    match category {
        Some(category) => form.with("category", category.id.to_string()),
        None => form,
    }
}

use admin_state::{CollectionState, resources};
use payloads::requests::FormData;
use payloads::{APIClient, Product, ProductId};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::cell::RefCell;
use test_helpers::store::Encoding;
use test_helpers::{spawn_app, widget_form, widget_image};

fn names(state: &RefCell<CollectionState<Product>>) -> Vec<String> {
    state.borrow().records().into_iter().map(|p| p.name).collect()
}

async fn seed_products(
    client: &APIClient,
    names: &[&str],
) -> anyhow::Result<Vec<Product>> {
    let mut products = Vec::new();
    for name in names {
        let form = widget_form().with("name", *name);
        products.push(client.create::<Product>(&form).await?.record);
    }
    Ok(products)
}

#[tokio::test]
async fn load_fetches_once() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    seed_products(&app.client, &["Hammer", "Nails"]).await?;

    let state = RefCell::new(CollectionState::<Product>::new());
    assert!(state.borrow().is_loading);

    resources::load(&app.client, &state).await;
    assert!(!state.borrow().is_loading);
    assert_eq!(state.borrow().error, None);
    assert_eq!(names(&state), ["Hammer", "Nails"]);

    // a second load is a no-op, even though the backend has changed
    seed_products(&app.client, &["Saw"]).await?;
    resources::load(&app.client, &state).await;
    assert_eq!(names(&state), ["Hammer", "Nails"]);

    Ok(())
}

#[tokio::test]
async fn load_failure_records_default_message() -> anyhow::Result<()> {
    // nothing listens on port 1
    let client = APIClient::new("http://127.0.0.1:1");
    let state = RefCell::new(CollectionState::<Product>::new());

    resources::load(&client, &state).await;

    let state = state.borrow();
    assert!(!state.is_loading);
    assert!(state.collection.is_empty());
    assert_eq!(state.error.as_deref(), Some("Failed to fetch products"));
    Ok(())
}

#[tokio::test]
async fn create_appends_to_the_end() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    seed_products(&app.client, &["Hammer"]).await?;
    let state = RefCell::new(CollectionState::<Product>::new());
    resources::load(&app.client, &state).await;

    let message =
        resources::create(&app.client, &state, &widget_form()).await?;

    assert_eq!(message, "Product created successfully");
    assert_eq!(names(&state), ["Hammer", "Widget"]);
    let created = state.borrow().records()[1].clone();
    assert_eq!(created.price, Decimal::new(999, 2));
    assert_eq!(app.catalog.products().len(), 2);
    Ok(())
}

#[tokio::test]
async fn form_with_file_is_sent_as_multipart() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Product>::new());

    let form = widget_form().with("image", widget_image());
    resources::create(&app.client, &state, &form).await?;

    assert_eq!(app.catalog.encodings(), [Encoding::Multipart]);
    let uploads = app.catalog.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field, "image");
    assert_eq!(uploads[0].file_name, "widget.png");
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(uploads[0].len, widget_image().data.len());

    let product = state.borrow().records()[0].clone();
    assert!(!product.featured);
    assert!(
        product
            .image
            .as_deref()
            .is_some_and(|path| path.ends_with("widget.png"))
    );
    Ok(())
}

#[tokio::test]
async fn form_without_file_is_sent_as_json() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Product>::new());

    resources::create(&app.client, &state, &widget_form()).await?;

    assert_eq!(app.catalog.encodings(), [Encoding::Json]);
    assert!(app.catalog.uploads().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_create_leaves_collection_unchanged() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    seed_products(&app.client, &["Hammer"]).await?;
    let state = RefCell::new(CollectionState::<Product>::new());
    resources::load(&app.client, &state).await;

    let form = FormData::new().with("name", "No price");
    let result = resources::create(&app.client, &state, &form).await;

    let e = result.expect_err("create without a price should fail");
    assert_eq!(e.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(e.message(), "Price is required");
    assert_eq!(names(&state), ["Hammer"]);
    assert_eq!(state.borrow().error.as_deref(), Some("Price is required"));
    Ok(())
}

#[tokio::test]
async fn create_requires_a_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let state = RefCell::new(CollectionState::<Product>::new());

    let result = resources::create(&app.client, &state, &widget_form()).await;

    test_helpers::assert_status_code(result, StatusCode::UNAUTHORIZED);
    assert_eq!(state.borrow().error.as_deref(), Some("Not authorized"));
    assert!(app.catalog.products().is_empty());
    Ok(())
}

#[tokio::test]
async fn issued_token_authorizes_any_client() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    let token = app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Product>::new());

    let anonymous = app.client_with_token(None);
    let result = resources::create(&anonymous, &state, &widget_form()).await;
    test_helpers::assert_status_code(result, StatusCode::UNAUTHORIZED);

    let second = app.client_with_token(Some(token));
    resources::create(&second, &state, &widget_form()).await?;

    assert_eq!(state.borrow().collection.len(), 1);
    assert_eq!(app.catalog.products().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_uses_default_message() -> anyhow::Result<()> {
    let client = APIClient::new("http://127.0.0.1:1");
    let state = RefCell::new(CollectionState::<Product>::new());

    let result = resources::create(&client, &state, &widget_form()).await;

    let e = result.expect_err("nothing is listening");
    assert_eq!(e.status(), None);
    assert_eq!(e.to_string(), "Failed to create product. Please try again.");

    let result = resources::delete::<Product, _>(
        &client,
        &state,
        &ProductId("missing".into()),
    )
    .await;
    assert_eq!(
        state.borrow().error.as_deref(),
        Some("Failed to delete product. Please try again.")
    );
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn update_replaces_in_place() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let seeded = seed_products(&app.client, &["Hammer", "Nails", "Saw"]).await?;
    let state = RefCell::new(CollectionState::<Product>::new());
    resources::load(&app.client, &state).await;

    let form = FormData::new()
        .with("name", "Box of Nails")
        .with("price", "4.50");
    let message =
        resources::update(&app.client, &state, &seeded[1].id, &form).await?;

    assert_eq!(message, "Product updated successfully");
    assert_eq!(names(&state), ["Hammer", "Box of Nails", "Saw"]);
    let updated = state.borrow().records()[1].clone();
    assert_eq!(updated.id, seeded[1].id);
    assert_eq!(updated.price, Decimal::new(450, 2));
    assert_eq!(updated.description.as_deref(), Some("A small widget"));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_product_is_reported() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    seed_products(&app.client, &["Hammer"]).await?;
    let state = RefCell::new(CollectionState::<Product>::new());
    resources::load(&app.client, &state).await;
    let before = state.borrow().collection.clone();

    let result = resources::update::<Product, _>(
        &app.client,
        &state,
        &ProductId("missing".into()),
        &widget_form(),
    )
    .await;

    test_helpers::assert_status_code(result, StatusCode::NOT_FOUND);
    assert_eq!(state.borrow().collection, before);
    assert_eq!(state.borrow().error.as_deref(), Some("Product not found"));
    Ok(())
}

#[tokio::test]
async fn delete_removes_and_second_delete_fails() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let seeded = seed_products(&app.client, &["Hammer", "Nails"]).await?;
    let state = RefCell::new(CollectionState::<Product>::new());
    resources::load(&app.client, &state).await;

    let message = resources::delete(&app.client, &state, &seeded[0].id).await?;
    assert_eq!(message, "Product deleted successfully");
    assert_eq!(names(&state), ["Nails"]);

    let result = resources::delete(&app.client, &state, &seeded[0].id).await;
    let e = result.expect_err("the product is already gone");
    assert_eq!(e.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(e.message(), "Product not found");
    assert_eq!(names(&state), ["Nails"]);
    assert_eq!(state.borrow().error.as_deref(), Some("Product not found"));
    Ok(())
}

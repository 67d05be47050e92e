use admin_state::{CollectionState, resources};
use payloads::Category;
use payloads::requests::FormData;
use reqwest::StatusCode;
use std::cell::RefCell;
use test_helpers::store::Encoding;
use test_helpers::{category_form, spawn_app};

#[tokio::test]
async fn category_lifecycle() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Category>::new());
    resources::load(&app.client, &state).await;
    assert!(state.borrow().collection.is_empty());

    resources::create(&app.client, &state, &category_form("Tools")).await?;
    resources::create(&app.client, &state, &category_form("Garden")).await?;
    let tools = state.borrow().records()[0].clone();

    let form = FormData::new().with("name", "Hand Tools");
    let message = resources::update(&app.client, &state, &tools.id, &form).await?;
    assert_eq!(message, "Category updated successfully");

    let names: Vec<_> =
        state.borrow().records().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Hand Tools", "Garden"]);

    resources::delete(&app.client, &state, &tools.id).await?;
    assert_eq!(state.borrow().collection.len(), 1);
    assert!(!state.borrow().collection.contains(&tools.id));

    // no file anywhere, so every mutation went out as JSON
    assert!(app.catalog.encodings().iter().all(|e| *e == Encoding::Json));
    assert_eq!(state.borrow().error, None);
    Ok(())
}

#[tokio::test]
async fn duplicate_name_is_rejected() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Category>::new());
    resources::create(&app.client, &state, &category_form("Tools")).await?;

    let result =
        resources::create(&app.client, &state, &category_form("Tools")).await;

    let e = result.expect_err("category names are unique");
    assert_eq!(e.status(), Some(StatusCode::CONFLICT));
    assert_eq!(e.message(), "A category named Tools already exists");
    assert_eq!(state.borrow().collection.len(), 1);
    assert_eq!(
        state.borrow().error.as_deref(),
        Some("A category named Tools already exists")
    );
    Ok(())
}

#[tokio::test]
async fn error_survives_a_later_success() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Category>::new());

    let blank = FormData::new().with("name", "");
    assert!(resources::create(&app.client, &state, &blank).await.is_err());
    resources::create(&app.client, &state, &category_form("Tools")).await?;

    assert_eq!(state.borrow().collection.len(), 1);
    assert_eq!(state.borrow().error.as_deref(), Some("Name is required"));
    Ok(())
}

use admin_state::form::submit;
use admin_state::{
    CollectionState, ConfirmOutcome, FieldDescriptor, FieldKind, FormModal,
    ModalPhase, SubmitOutcome, confirm, resources,
};
use payloads::Product;
use payloads::requests::FormData;
use std::cell::{Cell, RefCell};
use test_helpers::{spawn_app, widget_image};

fn product_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("name", "Name", FieldKind::Text).required(),
        FieldDescriptor::new("description", "Description", FieldKind::Textarea),
        FieldDescriptor::new("price", "Price", FieldKind::Number).required(),
        FieldDescriptor::new("image", "Image", FieldKind::File),
        FieldDescriptor::new("featured", "Featured", FieldKind::Checkbox),
    ]
}

#[tokio::test]
async fn submitted_modal_creates_product() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let products = RefCell::new(CollectionState::<Product>::new());
    let modal = RefCell::new(FormModal::new());
    let fields = product_fields();

    modal.borrow_mut().open(&fields, None);
    modal.borrow_mut().edit("name", "  Lamp  ");
    modal.borrow_mut().edit("price", "30");
    modal.borrow_mut().edit("image", widget_image());

    let client = &app.client;
    let outcome = submit(&modal, &fields, |payload| {
        let products = &products;
        async move {
            resources::create(client, products, &payload).await?;
            Ok::<(), anyhow::Error>(())
        }
    })
    .await;

    assert_eq!(outcome, SubmitOutcome::Closed);
    assert_eq!(modal.borrow().phase(), ModalPhase::Closed);
    let created = products.borrow().records()[0].clone();
    assert_eq!(created.name, "Lamp");
    assert!(created.image.is_some());
    assert_eq!(app.catalog.uploads().len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_submit_keeps_modal_open() -> anyhow::Result<()> {
    // not signed in, so the backend refuses the create
    let app = spawn_app().await;
    let products = RefCell::new(CollectionState::<Product>::new());
    let modal = RefCell::new(FormModal::new());
    let fields = product_fields();

    modal.borrow_mut().open(&fields, None);
    modal.borrow_mut().edit("name", " Lamp ");
    modal.borrow_mut().edit("price", "30");

    let client = &app.client;
    let outcome = submit(&modal, &fields, |payload| {
        let products = &products;
        async move {
            resources::create(client, products, &payload).await?;
            Ok::<(), anyhow::Error>(())
        }
    })
    .await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    let modal = modal.borrow();
    assert_eq!(modal.phase(), ModalPhase::Editing);
    assert_eq!(modal.draft().text("name"), Some("Lamp"));
    assert_eq!(products.borrow().error.as_deref(), Some("Not authorized"));
    assert!(products.borrow().collection.is_empty());
    Ok(())
}

#[tokio::test]
async fn edit_modal_updates_in_place() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let products = RefCell::new(CollectionState::<Product>::new());
    for name in ["Hammer", "Nails"] {
        let form = FormData::new().with("name", name).with("price", "5");
        resources::create(&app.client, &products, &form).await?;
    }
    let hammer = products.borrow().records()[0].clone();

    let initial = FormData::new()
        .with("name", hammer.name.clone())
        .with("price", hammer.price.to_string())
        .with("featured", hammer.featured);
    let modal = RefCell::new(FormModal::new());
    let fields = product_fields();
    modal.borrow_mut().open(&fields, Some(&initial));
    modal.borrow_mut().edit("featured", true);

    let client = &app.client;
    let id = &hammer.id;
    let outcome = submit(&modal, &fields, |payload| {
        let products = &products;
        async move {
            resources::update(client, products, id, &payload).await?;
            Ok::<(), anyhow::Error>(())
        }
    })
    .await;

    assert_eq!(outcome, SubmitOutcome::Closed);
    let records = products.borrow().records();
    assert_eq!(records[0].id, hammer.id);
    assert!(records[0].featured);
    assert_eq!(records[1].name, "Nails");
    Ok(())
}

#[tokio::test]
async fn confirmed_delete_closes_dialog() -> anyhow::Result<()> {
    let mut app = spawn_app().await;
    app.sign_in().await?;
    let products = RefCell::new(CollectionState::<Product>::new());
    let form = FormData::new().with("name", "Hammer").with("price", "5");
    resources::create(&app.client, &products, &form).await?;
    let hammer = products.borrow().records()[0].clone();
    let open = Cell::new(true);

    let outcome = confirm(
        false,
        || async {
            resources::delete(&app.client, &products, &hammer.id)
                .await
                .map(|_| ())
        },
        || open.set(false),
    )
    .await;
    assert!(matches!(outcome, ConfirmOutcome::Confirmed));
    assert!(!open.get());
    assert!(products.borrow().collection.is_empty());

    // deleting again fails and the dialog stays open
    open.set(true);
    let outcome = confirm(
        false,
        || async {
            resources::delete(&app.client, &products, &hammer.id)
                .await
                .map(|_| ())
        },
        || open.set(false),
    )
    .await;
    assert!(matches!(outcome, ConfirmOutcome::Failed(_)));
    assert!(open.get());
    Ok(())
}

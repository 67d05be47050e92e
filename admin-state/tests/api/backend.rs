use admin_state::{CollectionState, resources};
use payloads::Category;
use std::cell::RefCell;
use test_helpers::server::Config;
use test_helpers::{category_form, spawn_app_with_config};

#[tokio::test]
async fn backend_bound_to_all_interfaces_is_reached_over_loopback()
-> anyhow::Result<()> {
    let mut app = spawn_app_with_config(Config {
        ip: "0.0.0.0".into(),
        port: 0,
    })
    .await;
    assert_ne!(app.port, 0);
    assert_eq!(app.address(), format!("http://127.0.0.1:{}", app.port));

    app.sign_in().await?;
    let state = RefCell::new(CollectionState::<Category>::new());
    resources::create(&app.client, &state, &category_form("Tools")).await?;

    assert_eq!(app.catalog.categories().len(), 1);
    Ok(())
}

#[tokio::test]
async fn configured_host_is_used_for_the_client() -> anyhow::Result<()> {
    let app = spawn_app_with_config(Config {
        ip: "127.0.0.1".into(),
        port: 0,
    })
    .await;

    assert_eq!(app.host, "127.0.0.1");
    assert!(app.client.list::<Category>().await?.is_empty());
    Ok(())
}

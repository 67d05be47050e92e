//! Development server for the catalog admin UI
//!
//! This binary runs the in-memory stand-in backend with a populated catalog
//! so the UI can be developed without the real storefront API.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::mock::DevDataset;
use test_helpers::{server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting catalog development server");

    let config = server::Config::from_env()?;
    let mut app = test_helpers::spawn_app_with_config(config).await;

    info!("✅ API server running on {}", app.address());

    info!("📊 Setting up development catalog...");
    let dataset = DevDataset::create(&mut app).await?;

    info!("🎯 Development server ready!");
    info!("   API: {}/api", app.address());
    info!(
        "   UI:  cd ui && BACKEND_URL={} trunk serve",
        app.address()
    );
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    // Keep server running until Ctrl+C
    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}

// File: crates/services/leadwire_backend/src/main.rs
use leadwire_backend::app::app;
use leadwire_backend::store_factory::create_credential_store;
use leadwire_common::logging;
use leadwire_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let store = create_credential_store(&config);

    let app = app(config.clone(), store);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("🚀 Leadwire backend listening on {}", addr);

    axum::serve(listener, app).await.expect("Server error");
}

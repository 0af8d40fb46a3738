use axum::Router;
use std::time::Duration;
use tracing::{error, info, Level};

mod routes;
mod models;
mod utils;
mod state;

use crate::utils::conf_helper::{init_config_and_bind, get_cached_config};
use crate::state::app_state::AppState;
use telemetry_dashboard::PayloadClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let state = AppState::new();

    // === CONFIG + LISTENER ===
    let listener = init_config_and_bind().await.map_err(|e| {
        error!("Startup failed: {:#}", e);
        e
    })?;

    let config = get_cached_config();

    info!(
        "{} listening on {}:{}",
        config.name,
        config.connection.ip,
        config.connection.port
    );

    // === ACTIVATION: single fetch ===
    let client = PayloadClient::with_timeout(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    state.activate(client);

    let app = Router::new()
        .merge(routes::info_routes::health_routes())
        .merge(routes::data_routes::data_routes(state.clone()));

    axum::serve(listener, app).await?;

    Ok(())
}

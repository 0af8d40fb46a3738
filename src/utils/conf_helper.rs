use anyhow::{Context, Result};
use std::sync::OnceLock;
use tokio::fs;
use tokio::net::TcpListener;
use tracing::info;

use crate::models::dashboard_config::DashboardConfig;

const CONFIG_FILE: &str = "dashboard.json";

static CONFIG_CACHE: OnceLock<DashboardConfig> = OnceLock::new();

pub async fn read_config(file_path: &str) -> Result<DashboardConfig> {
    let data = fs::read_to_string(file_path)
        .await
        .with_context(|| format!("reading config file {file_path}"))?;

    serde_json::from_str(&data).with_context(|| format!("parsing config file {file_path}"))
}

pub async fn init_config_and_bind() -> Result<TcpListener> {
    let mut config = read_config(CONFIG_FILE).await?;

    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    // port 0 in the file means "pick one"; record the real port
    let actual_port = listener.local_addr().context("reading bound address")?.port();
    config.connection.port = actual_port;

    CONFIG_CACHE
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;

    info!("Config initialized with port: {}", actual_port);

    Ok(listener)
}

pub fn get_cached_config() -> &'static DashboardConfig {
    CONFIG_CACHE.get().expect("Config not initialized")
}

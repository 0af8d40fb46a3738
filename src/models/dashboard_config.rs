use serde::{Deserialize, Serialize};

use telemetry_dashboard::core::constants::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub api: ApiConfig,
    pub connection: Connection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

use axum::{
    routing::get,
    Router,
    response::{IntoResponse, Response},
    Json,
};

use tracing::debug;
use serde::Serialize;


pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(info_check))
}

pub async fn info_check() -> Response {
    let config = crate::utils::conf_helper::get_cached_config();

    debug!("{} info requested", config.name);
    Json(config).into_response()
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
    })
}


#[derive(Serialize)]
pub struct HealthStatus {
    status: String,
}

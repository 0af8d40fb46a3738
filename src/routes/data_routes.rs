use axum::{
    routing::get,
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
    extract::State,
};

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::state::app_state::AppState;
use telemetry_dashboard::{render_html, Dashboard, ViewState};


/// =======================
/// ROUTER
/// =======================

pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/readings", get(readings))
        .route("/averages", get(averages))
        .route("/chart", get(chart))
        .with_state(state)
}


/// =======================
/// HANDLERS
/// =======================

async fn index_page(State(state): State<AppState>) -> Html<String> {
    Html(render_html(&state.snapshot().await))
}

async fn readings(State(state): State<AppState>) -> Response {
    with_dashboard(&state, |d| d.readings().to_vec()).await
}

async fn averages(State(state): State<AppState>) -> Response {
    with_dashboard(&state, |d| d.averages().clone()).await
}

async fn chart(State(state): State<AppState>) -> Response {
    with_dashboard(&state, |d| d.chart().clone()).await
}

// Loading -> 503, Failed -> 502, Loaded -> 200 with the projected body
async fn with_dashboard<T, F>(state: &AppState, project: F) -> Response
where
    T: Serialize,
    F: FnOnce(&Dashboard) -> T,
{
    let view = state.view.read().await;

    match &*view {
        ViewState::Loading => {
            debug!("Data requested while still loading");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "state": "loading" }))).into_response()
        }
        ViewState::Failed { reason } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "state": "failed", "reason": reason })),
        )
            .into_response(),
        ViewState::Loaded(dashboard) => Json(project(dashboard)).into_response(),
    }
}

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use telemetry_dashboard::{load, render_text, PayloadClient, ViewState};

#[derive(Clone)]
pub struct AppState {
    pub view: Arc<RwLock<ViewState>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: Arc::new(RwLock::new(ViewState::Loading)),
        }
    }

    /// Spawns the one-shot fetch; the view moves out of `Loading` exactly once.
    pub fn activate(&self, client: PayloadClient) -> JoinHandle<()> {
        let view = self.view.clone();
        tokio::spawn(async move {
            info!("Activating dashboard, fetching {}", client.payloads_url());
            let next = load(&client).await;
            info!("\n{}", render_text(&next));
            *view.write().await = next;
        })
    }

    pub async fn snapshot(&self) -> ViewState {
        self.view.read().await.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// HTTP client for the upstream payloads API

use crate::core::constants::{DEFAULT_TIMEOUT_SECS, PAYLOADS_PATH};
use crate::core::error::{DashboardError, Result};
use crate::core::format::Reading;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct PayloadClient {
    client: Client,
    payloads_url: Url,
}

impl PayloadClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let joined = format!("{}{}", base_url.trim_end_matches('/'), PAYLOADS_PATH);
        let payloads_url =
            Url::parse(&joined).map_err(|e| DashboardError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            payloads_url,
        })
    }

    pub fn payloads_url(&self) -> &Url {
        &self.payloads_url
    }

    /// Reads the whole readings collection in the order the server returns it.
    pub async fn fetch_readings(&self) -> Result<Vec<Reading>> {
        debug!("Fetching readings from {}", self.payloads_url);

        let response = self
            .client
            .get(self.payloads_url.clone())
            .send()
            .await
            .map_err(|e| {
                error!("Readings request failed: {}", e);
                DashboardError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Payloads server returned {}", status);
            return Err(DashboardError::Status {
                status: status.as_u16(),
                url: self.payloads_url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let readings: Vec<Reading> = serde_json::from_slice(&body)?;

        info!("Fetched {} readings", readings.len());
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_payloads_url_joins_base() {
        let client = PayloadClient::new("http://localhost:3333/").unwrap();
        assert_eq!(client.payloads_url().as_str(), "http://localhost:3333/payloads");

        let client = PayloadClient::new("http://api.local/v1").unwrap();
        assert_eq!(client.payloads_url().as_str(), "http://api.local/v1/payloads");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = PayloadClient::new("not a url").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_keeps_server_order() {
        let app = Router::new().route(
            "/payloads",
            get(|| async {
                Json(vec![
                    Reading::new("B", "2024-01-02T00:00:00Z", 5.0),
                    Reading::new("A", "2024-01-01T10:00:00Z", 10.0),
                ])
            }),
        );
        let base = serve(app).await;

        let readings = PayloadClient::new(&base).unwrap().fetch_readings().await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].equipment_id, "B");
        assert_eq!(readings[1].value, 10.0);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let app = Router::new().route(
            "/payloads",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(app).await;

        let err = PayloadClient::new(&base).unwrap().fetch_readings().await.unwrap_err();
        match err {
            DashboardError::Status { status, url } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/payloads"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let app = Router::new().route("/payloads", get(|| async { r#"{"items": []}"# }));
        let base = serve(app).await;

        let err = PayloadClient::new(&base).unwrap().fetch_readings().await.unwrap_err();
        assert!(matches!(err, DashboardError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = PayloadClient::new(&format!("http://{}", addr))
            .unwrap()
            .fetch_readings()
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Http(_)));
    }
}

// Tri-state view model for the dashboard

use crate::core::aggregate::aggregate_in;
use crate::core::constants::{CHART_LABEL_FORMAT, INVALID_DATE, SERIES_LABEL};
use crate::core::fetcher::PayloadClient;
use crate::core::format::{ChartData, DailyAverageTable, Reading};
use chrono::{Local, TimeZone};
use tracing::{error, info};

/// Raw readings together with the averages and chart derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    readings: Vec<Reading>,
    averages: DailyAverageTable,
    chart: ChartData,
}

impl Dashboard {
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Self::from_readings_in(readings, &Local)
    }

    /// Derives averages and chart labels with day boundaries taken in `tz`.
    pub fn from_readings_in<Tz: TimeZone>(readings: Vec<Reading>, tz: &Tz) -> Self {
        let averages = aggregate_in(&readings, tz);
        let chart = ChartData {
            label: SERIES_LABEL.to_string(),
            labels: readings
                .iter()
                .map(|r| {
                    r.label_date_in(tz)
                        .map(|date| date.format(CHART_LABEL_FORMAT).to_string())
                        .unwrap_or_else(|| INVALID_DATE.to_string())
                })
                .collect(),
            values: readings.iter().map(|r| r.value).collect(),
        };

        Self {
            readings,
            averages,
            chart,
        }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn averages(&self) -> &DailyAverageTable {
        &self.averages
    }

    /// Chart series over the raw readings, in source order.
    pub fn chart(&self) -> &ChartData {
        &self.chart
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Failed {
        reason: String,
    },
    Loaded(Dashboard),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            ViewState::Loaded(dashboard) => Some(dashboard),
            _ => None,
        }
    }
}

/// Performs the single activation fetch and folds the outcome into a view state.
pub async fn load(client: &PayloadClient) -> ViewState {
    match client.fetch_readings().await {
        Ok(readings) => {
            let dashboard = Dashboard::from_readings(readings);
            info!(
                "Dashboard loaded: {} readings, {} equipment",
                dashboard.readings().len(),
                dashboard.averages().len()
            );
            ViewState::Loaded(dashboard)
        }
        Err(e) => {
            error!("Failed to load readings: {}", e);
            ViewState::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::SpringForward;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use chrono::Utc;
    use tokio::net::TcpListener;

    #[test]
    fn test_chart_keeps_raw_order_and_values() {
        let dashboard = Dashboard::from_readings_in(
            vec![
                Reading::new("A", "2024-01-01T12:00:00", 10.0),
                Reading::new("B", "2024-01-02T12:00:00", 5.0),
                Reading::new("A", "2024-01-01T13:00:00", 20.0),
                Reading::new("A", "bogus", 1.0),
            ],
            &Utc,
        );

        let chart = dashboard.chart();
        assert_eq!(chart.label, "Equipment Values");
        assert_eq!(chart.values, vec![10.0, 5.0, 20.0, 1.0]);
        assert_eq!(chart.labels, vec!["1/1/2024", "1/2/2024", "1/1/2024", "Invalid Date"]);
    }

    #[test]
    fn test_chart_and_averages_share_time_zone() {
        let dashboard = Dashboard::from_readings_in(
            vec![
                Reading::new("X", "2024-03-10T02:30:00", 1.0),
                Reading::new("X", "2024-03-10T05:00:00Z", 3.0),
            ],
            &SpringForward,
        );

        assert_eq!(dashboard.chart().labels, vec!["3/10/2024", "3/10/2024"]);
        assert_eq!(dashboard.averages().get("X", "2024-03-10"), Some(2.0));
    }

    #[test]
    fn test_default_state_is_loading() {
        let state = ViewState::default();
        assert!(state.is_loading());
        assert!(state.dashboard().is_none());
    }

    #[tokio::test]
    async fn test_load_success_and_failure() {
        let app = Router::new()
            .route(
                "/ok/payloads",
                get(|| async { Json(vec![Reading::new("X", "2024-01-01T12:00:00", 7.0)]) }),
            )
            .route("/down/payloads", get(|| async { StatusCode::BAD_GATEWAY }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let ok = PayloadClient::new(&format!("http://{}/ok", addr)).unwrap();
        let state = load(&ok).await;
        let dashboard = state.dashboard().unwrap();
        assert_eq!(dashboard.readings().len(), 1);
        assert_eq!(dashboard.averages().get("X", "2024-01-01"), Some(7.0));

        let down = PayloadClient::new(&format!("http://{}/down", addr)).unwrap();
        match load(&down).await {
            ViewState::Failed { reason } => assert!(reason.contains("502")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

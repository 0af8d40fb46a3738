// Fetch readings once and print the text dashboard
//
// cargo run --example print_dashboard -- http://localhost:3333

use telemetry_dashboard::{load, render_text, PayloadClient, Result};
use tracing::{debug, Level};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3333".to_string());

    let client = PayloadClient::new(&base_url)?;
    debug!("Using {}", client.payloads_url());

    let state = load(&client).await;
    println!("{}", render_text(&state));

    if let Some(dashboard) = state.dashboard() {
        for equipment in dashboard.averages().iter() {
            debug!(
                "{}: {} day(s) averaged",
                equipment.equipment_id,
                equipment.days.len()
            );
        }
    }

    Ok(())
}

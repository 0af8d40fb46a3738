// Equipment telemetry dashboard
// Main library entry point

pub mod core;

// Re-export main types
pub use core::aggregate::{aggregate, aggregate_in};
pub use core::error::{DashboardError, Result};
pub use core::fetcher::PayloadClient;
pub use core::format::{ChartData, DailyAverage, DailyAverageTable, EquipmentAverages, Reading};
pub use core::render::{render_html, render_text};
pub use core::view::{load, Dashboard, ViewState};

// Constants shared by the fetcher, aggregator and renderers

/// Upstream endpoint holding the readings collection.
pub const PAYLOADS_PATH: &str = "/payloads";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Day-granularity key used by the averages table
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

// Locale-style label used on the chart x-axis (M/D/YYYY)
pub const CHART_LABEL_FORMAT: &str = "%-m/%-d/%Y";

/// Key/label produced for a timestamp that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

pub const SERIES_LABEL: &str = "Equipment Values";
pub const SERIES_BORDER_COLOR: &str = "rgb(75, 192, 192)";
pub const SERIES_FILL_COLOR: &str = "rgba(75, 192, 192, 0.5)";

// Timestamps without an offset, read as wall-clock time
pub const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

// Text chart bar width in characters
pub const TEXT_BAR_WIDTH: usize = 40;

// SVG chart geometry
pub const SVG_WIDTH: f64 = 800.0;
pub const SVG_HEIGHT: f64 = 320.0;
pub const SVG_PADDING: f64 = 40.0;

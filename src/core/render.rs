// Text and HTML renderings of the dashboard view

use crate::core::constants::*;
use crate::core::format::{ChartData, DailyAverageTable};
use crate::core::view::ViewState;
use std::fmt;

const TITLE: &str = "Equipment Telemetry";
const LOADING_NOTICE: &str = "Loading readings…";

pub fn format_average(average: f64) -> String {
    format!("{:.2}", average)
}

pub fn equipment_heading(equipment_id: &str) -> String {
    format!("Equipment ID: {}", equipment_id)
}

pub fn failure_notice(reason: &str) -> String {
    format!("Failed to load readings: {}", reason)
}

/// Plain-text dashboard for terminals and logs.
pub fn render_text(state: &ViewState) -> String {
    TextView(state).to_string()
}

/// Standalone HTML page with an inline SVG line chart and the averages listing.
pub fn render_html(state: &ViewState) -> String {
    HtmlPage(state).to_string()
}

pub struct TextView<'a>(pub &'a ViewState);

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", "=".repeat(TITLE.chars().count()))?;

        match self.0 {
            ViewState::Loading => writeln!(f, "{}", LOADING_NOTICE),
            ViewState::Failed { reason } => writeln!(f, "{}", failure_notice(reason)),
            ViewState::Loaded(dashboard) => {
                write_text_chart(f, dashboard.chart())?;
                writeln!(f)?;
                write_text_averages(f, dashboard.averages())
            }
        }
    }
}

fn write_text_chart(f: &mut fmt::Formatter<'_>, chart: &ChartData) -> fmt::Result {
    writeln!(f, "[{}]", chart.label)?;
    if chart.is_empty() {
        return Ok(());
    }

    let (min, max) = value_range(&chart.values);
    let span = max - min;
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (label, value) in chart.labels.iter().zip(chart.values.iter()) {
        let filled = if span > 0.0 {
            (((value - min) / span) * TEXT_BAR_WIDTH as f64).round() as usize
        } else {
            TEXT_BAR_WIDTH
        };
        writeln!(
            f,
            "{:<width$}  {:>10.2}  {}",
            label,
            value,
            "#".repeat(filled.min(TEXT_BAR_WIDTH)),
            width = label_width
        )?;
    }

    Ok(())
}

fn write_text_averages(f: &mut fmt::Formatter<'_>, averages: &DailyAverageTable) -> fmt::Result {
    for equipment in averages.iter() {
        writeln!(f, "{}", equipment_heading(&equipment.equipment_id))?;
        for day in &equipment.days {
            writeln!(f, "  {}: {}", day.date, format_average(day.average))?;
        }
    }
    Ok(())
}

pub struct HtmlPage<'a>(pub &'a ViewState);

impl fmt::Display for HtmlPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n\
             <style>body {{ font-family: system-ui, sans-serif; margin: 2rem; }} \
             .error {{ color: #b91c1c; }} svg text {{ font-size: 10px; }}</style>\n\
             </head>\n<body>",
            TITLE
        )?;
        writeln!(f, "<h2>{}</h2>", TITLE)?;

        match self.0 {
            ViewState::Loading => writeln!(f, "<p class=\"loading\">{}</p>", LOADING_NOTICE)?,
            ViewState::Failed { reason } => writeln!(
                f,
                "<p class=\"error\">{}</p>",
                escape_html(&failure_notice(reason))
            )?,
            ViewState::Loaded(dashboard) => {
                write_svg_chart(f, dashboard.chart())?;
                write_html_averages(f, dashboard.averages())?;
            }
        }

        writeln!(f, "</body>\n</html>")
    }
}

fn write_svg_chart(f: &mut fmt::Formatter<'_>, chart: &ChartData) -> fmt::Result {
    writeln!(
        f,
        "<svg class=\"chart\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = SVG_WIDTH,
        h = SVG_HEIGHT
    )?;
    writeln!(
        f,
        "<rect x=\"{p}\" y=\"8\" width=\"12\" height=\"12\" fill=\"{fill}\" stroke=\"{stroke}\"/>\
         <text x=\"{tx}\" y=\"18\">{label}</text>",
        p = SVG_PADDING,
        tx = SVG_PADDING + 18.0,
        fill = SERIES_FILL_COLOR,
        stroke = SERIES_BORDER_COLOR,
        label = escape_html(&chart.label)
    )?;

    if !chart.is_empty() {
        let points = chart_points(&chart.values);
        let polyline = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            f,
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/>",
            SERIES_BORDER_COLOR, polyline
        )?;

        for ((x, y), (label, value)) in points.iter().zip(chart.labels.iter().zip(chart.values.iter())) {
            writeln!(
                f,
                "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"3\" fill=\"{fill}\"><title>{label}: {value}</title></circle>\
                 <text x=\"{x:.1}\" y=\"{ly:.1}\" text-anchor=\"middle\">{label}</text>",
                fill = SERIES_FILL_COLOR,
                label = escape_html(label),
                value = value,
                ly = SVG_HEIGHT - SVG_PADDING / 2.0
            )?;
        }
    }

    writeln!(f, "</svg>")
}

fn write_html_averages(f: &mut fmt::Formatter<'_>, averages: &DailyAverageTable) -> fmt::Result {
    for equipment in averages.iter() {
        writeln!(f, "<div>")?;
        writeln!(f, "<h3>{}</h3>", escape_html(&equipment_heading(&equipment.equipment_id)))?;
        for day in &equipment.days {
            writeln!(f, "<p>{}: {}</p>", escape_html(&day.date), format_average(day.average))?;
        }
        writeln!(f, "</div>")?;
    }
    Ok(())
}

// Maps values into SVG coordinates, evenly spaced on x
fn chart_points(values: &[f64]) -> Vec<(f64, f64)> {
    let (min, max) = value_range(values);
    let span = if max > min { max - min } else { 1.0 };
    let plot_w = SVG_WIDTH - 2.0 * SVG_PADDING;
    let plot_h = SVG_HEIGHT - 2.0 * SVG_PADDING;
    let step = if values.len() > 1 {
        plot_w / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if values.len() > 1 {
                SVG_PADDING + step * i as f64
            } else {
                SVG_WIDTH / 2.0
            };
            let y = SVG_HEIGHT - SVG_PADDING - ((v - min) / span) * plot_h;
            (x, y)
        })
        .collect()
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

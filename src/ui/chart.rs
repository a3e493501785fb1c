//! Live trend chart of temperature and vibration.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::time::format_clock;

/// Render the sensor trend chart for the samples currently in the window.
///
/// Temperature and vibration are drawn as lines; anomalous samples are
/// overlaid as scatter points on the temperature series.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Live Sensor Data ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.window.is_empty() {
        let placeholder = Paragraph::new("Waiting for data...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let temperature: Vec<(f64, f64)> =
        app.window.iter().map(|s| (s.timestamp as f64, s.temperature)).collect();
    let vibration: Vec<(f64, f64)> =
        app.window.iter().map(|s| (s.timestamp as f64, s.vibration)).collect();
    let anomalies: Vec<(f64, f64)> = app
        .window
        .iter()
        .filter(|s| s.is_anomaly)
        .map(|s| (s.timestamp as f64, s.temperature))
        .collect();

    let (x_min, x_max) = bounds(temperature.iter().map(|(x, _)| *x));
    let (y_min, y_max) = padded_bounds(
        temperature.iter().chain(vibration.iter()).map(|(_, y)| *y),
    );

    let datasets = vec![
        Dataset::default()
            .name("Temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.temperature))
            .data(&temperature),
        Dataset::default()
            .name("Vibration (Hz)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.vibration))
            .data(&vibration),
        Dataset::default()
            .name("Anomaly")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD))
            .data(&anomalies),
    ];

    let x_labels = vec![
        Span::raw(format_clock(x_min as i64)),
        Span::raw(format_clock(((x_min + x_max) / 2.0) as i64)),
        Span::raw(format_clock(x_max as i64)),
    ];
    let y_labels = vec![
        Span::raw(format!("{y_min:.1}")),
        Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{y_max:.1}")),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Min/max of a value sequence, widened slightly when degenerate so the
/// chart axes never collapse to a zero-width range.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min >= max {
        (min - 1.0, min + 1.0)
    } else {
        (min, max)
    }
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = bounds(values);
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}

//! Current-value stat tiles under the chart.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the three stat tiles: current temperature, current vibration, and
/// total anomaly count.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let tiles = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .split(area);

    let latest = app.window.latest();

    let temperature = latest
        .map(|s| format!("{:.1}°C", s.temperature))
        .unwrap_or_else(|| "--".to_string());
    let vibration = latest
        .map(|s| format!("{:.2} Hz", s.vibration))
        .unwrap_or_else(|| "--".to_string());
    let anomaly_count = app.anomalies.len().to_string();

    render_tile(frame, app, tiles[0], "Current Temperature", &temperature, app.theme.temperature);
    render_tile(frame, app, tiles[1], "Current Vibration", &vibration, app.theme.vibration);
    render_tile(frame, app, tiles[2], "Total Anomalies", &anomaly_count, app.theme.critical);
}

fn render_tile(frame: &mut Frame, app: &App, area: Rect, title: &str, value: &str, color: Color) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let line = Line::from(Span::styled(
        format!(" {value}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

//! Status banner: current system status and connection health.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::time::format_clock;
use crate::data::SystemStatus;
use crate::feed::ConnectionState;

/// Render the banner shown above the chart.
///
/// Displays the current status badge with the latest anomaly's severity and
/// time, and a connection notice with a retry hint when the feed is down.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status.status();
    let status_style = app.theme.status_style(status);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", status.label()),
            status_style.add_modifier(Modifier::REVERSED),
        ),
        Span::raw("  "),
    ];

    match status {
        SystemStatus::Anomaly => {
            let severity = app.status.severity();
            spans.push(Span::styled(
                format!("[{}]", severity.label().to_uppercase()),
                app.theme.severity_style(severity),
            ));
            if let Some(ms) = app.status.last_anomaly_ms() {
                spans.push(Span::raw(format!("  Last detected at {}", format_clock(ms))));
            }
        }
        SystemStatus::Normal => {
            spans.push(Span::styled(
                "Monitoring active",
                Style::default().add_modifier(Modifier::DIM),
            ));
            if let Some(ms) = app.status.last_anomaly_ms() {
                spans.push(Span::styled(
                    format!("  (last anomaly {})", format_clock(ms)),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
        }
    }

    // Connection trouble is surfaced here too, with the recovery action.
    let connection_note = match app.connection_state() {
        ConnectionState::Connected => None,
        ConnectionState::Connecting => Some("Connecting...".to_string()),
        ConnectionState::Retrying => Some("Reconnecting...".to_string()),
        ConnectionState::Disconnected => Some("Disconnected".to_string()),
        ConnectionState::Failed => Some(format!(
            "DISCONNECTED: {} (press r to retry)",
            app.last_error().unwrap_or("max reconnection attempts reached")
        )),
    };
    if let Some(note) = connection_note {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            note,
            app.theme.connection_style(app.connection_state()),
        ));
    }

    let border_style = match (status, app.connection_state()) {
        (_, ConnectionState::Failed) | (SystemStatus::Anomaly, _) => {
            Style::default().fg(app.theme.critical)
        }
        _ => Style::default().fg(app.theme.healthy),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

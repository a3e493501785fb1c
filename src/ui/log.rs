//! Anomaly log view.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::time::format_full;

/// Render the scrollable anomaly log, most recent first.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.anomalies.len();
    let title = if app.log_scroll > 0 {
        format!(" Anomaly Log ({total} total, ↑{}) ", app.log_scroll)
    } else {
        format!(" Anomaly Log ({total} total) ")
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.anomalies.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No anomalies detected yet",
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(
                "  System is running normally",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .anomalies
        .iter()
        .skip(app.log_scroll)
        .take(visible)
        .map(|event| {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", format_full(event.timestamp)),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::styled(
                    format!("[{:^8}]", event.severity.label().to_uppercase()),
                    app.theme.severity_style(event.severity),
                ),
                Span::raw(format!(
                    " {}  ({:.1}°C, {:.2} Hz)",
                    event.reason, event.temperature, event.vibration
                )),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

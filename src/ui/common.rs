//! Common UI components: header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::time::range_label;

/// Render the header bar with the connection indicator and active source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.connection_state();
    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.connection_style(state)),
        Span::styled("HYDROWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(state.label(), app.theme.connection_style(state)),
        Span::raw(" │ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ range: "),
        Span::styled(
            range_label(app.window.range_minutes()),
            Style::default().fg(app.theme.highlight),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages, the last feed error, or key hints.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(err) = app.last_error() {
        format!(" {} | r:retry m:mode ?:help q:quit", err)
    } else {
        " 1-5:range ↑↓:log r:retry m:mode ?:help q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Time range",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1         5 minutes"),
        Line::from("  2         15 minutes"),
        Line::from("  3         1 hour"),
        Line::from("  4         6 hours"),
        Line::from("  5         24 hours"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Anomaly log",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k   Scroll"),
        Line::from("  PgUp/PgDn Jump 10 entries"),
        Line::from("  Home      Back to latest"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Connection",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Retry connection"),
        Line::from("  m         Toggle stream/poll mode"),
        Line::from(""),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

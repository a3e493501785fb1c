//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Severity, SystemStatus};
use crate::feed::ConnectionState;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the normal/healthy state.
    pub healthy: Color,
    /// Color for transitional states (connecting, retrying).
    pub warning: Color,
    /// Color for anomalies and failures.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for the temperature chart series.
    pub temperature: Color,
    /// Color for the vibration chart series.
    pub vibration: Color,
    /// Style for headers and titles.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            temperature: Color::LightBlue,
            vibration: Color::LightCyan,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            temperature: Color::Blue,
            vibration: Color::Cyan,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for an anomaly severity. Colors follow the feed's taxonomy:
    /// yellow, orange, red, purple from Low through Critical.
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Low => Style::default().fg(Color::Yellow),
            Severity::Medium => Style::default().fg(Color::LightRed),
            Severity::High => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Severity::Critical => {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Style for a connection state indicator.
    pub fn connection_style(&self, state: ConnectionState) -> Style {
        match state {
            ConnectionState::Connected => Style::default().fg(self.healthy),
            ConnectionState::Connecting | ConnectionState::Retrying => {
                Style::default().fg(self.warning)
            }
            ConnectionState::Disconnected | ConnectionState::Failed => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Style for the current system status.
    pub fn status_style(&self, status: SystemStatus) -> Style {
        match status {
            SystemStatus::Normal => Style::default().fg(self.healthy),
            SystemStatus::Anomaly => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }
}

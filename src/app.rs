//! Application state: the ingestion core plus TUI interaction state.

use std::time::Instant;

use crate::config::FeedConfig;
use crate::data::time::{epoch_ms_now, RANGE_PRESETS};
use crate::data::{AnomalyEvent, AnomalyLog, Sample, SampleWindow, StatusAggregator};
use crate::feed::{ConnectionManager, ConnectionState, FeedMode};
use crate::ui::Theme;

/// Main application state.
///
/// Owns the ingestion core (connection manager, sample window, anomaly log,
/// status aggregator) and the presentation-side state around it. The UI
/// reads this struct each frame and mutates it only through its methods.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Ingestion core
    manager: ConnectionManager,
    pub window: SampleWindow,
    pub anomalies: AnomalyLog,
    pub status: StatusAggregator,

    // Anomaly log scroll position (0 = most recent at top)
    pub log_scroll: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around a connection manager.
    ///
    /// The window starts on the narrowest time range preset.
    pub fn new(manager: ConnectionManager, config: &FeedConfig) -> Self {
        Self {
            running: true,
            show_help: false,
            manager,
            window: SampleWindow::new(config.max_chart_points, RANGE_PRESETS[0].1),
            anomalies: AnomalyLog::new(config.max_anomaly_log),
            status: StatusAggregator::new(),
            log_scroll: 0,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Begin connecting the feed.
    pub fn start(&mut self) {
        self.manager.start();
    }

    /// Drain transport events and ingest any new samples.
    ///
    /// Called once per frame; all buffer mutation happens here, on the TUI
    /// thread.
    pub fn pump(&mut self) {
        let now_ms = epoch_ms_now();
        let window = &mut self.window;
        let anomalies = &mut self.anomalies;
        let status = &mut self.status;

        self.manager.pump(&mut |sample: Sample| {
            status.observe(&sample);
            if let Some(event) = AnomalyEvent::from_sample(&sample) {
                anomalies.push(event);
            }
            window.append(sample, now_ms);
        });
    }

    /// Change the operator-selected time range, re-evicting immediately.
    pub fn set_time_range(&mut self, minutes: u32) {
        self.window.set_range(minutes, epoch_ms_now());
        self.set_status_message(format!(
            "Time range: {}",
            crate::data::time::range_label(minutes)
        ));
    }

    /// Select a time range by preset index (0-based).
    pub fn set_range_preset(&mut self, index: usize) {
        if let Some((_, minutes)) = RANGE_PRESETS.get(index) {
            self.set_time_range(*minutes);
        }
    }

    /// Operator-triggered reconnect; the only way out of a Failed feed.
    pub fn retry_connection(&mut self) {
        self.manager.retry();
        self.set_status_message("Reconnecting...".to_string());
    }

    /// Switch between the streaming feed and the polling fallback.
    pub fn toggle_mode(&mut self) {
        let next = match self.manager.mode() {
            FeedMode::Streaming => FeedMode::Polling,
            FeedMode::Polling => FeedMode::Streaming,
        };
        self.manager.set_mode(next);
        self.set_status_message(format!("Feed mode: {}", next.label()));
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    pub fn feed_mode(&self) -> FeedMode {
        self.manager.mode()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.manager.last_error()
    }

    /// Description of the active source, for the status bar.
    pub fn source_description(&self) -> &str {
        self.manager.description()
    }

    /// Scroll the anomaly log down by `n` entries.
    pub fn scroll_log_down(&mut self, n: usize) {
        let max = self.anomalies.len().saturating_sub(1);
        self.log_scroll = (self.log_scroll + n).min(max);
    }

    /// Scroll the anomaly log up by `n` entries.
    pub fn scroll_log_up(&mut self, n: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(n);
    }

    /// Jump back to the most recent anomaly.
    pub fn scroll_log_top(&mut self) {
        self.log_scroll = 0;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Ingest one sample directly, bypassing the transport.
    #[cfg(test)]
    pub(crate) fn ingest_for_test(&mut self, sample: Sample, now_ms: i64) {
        self.status.observe(&sample);
        if let Some(event) = AnomalyEvent::from_sample(&sample) {
            self.anomalies.push(event);
        }
        self.window.append(sample, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Severity, SystemStatus};
    use tokio::runtime::Handle;

    fn app() -> App {
        let config = FeedConfig::default();
        let manager = ConnectionManager::new(config.clone(), FeedMode::Streaming, Handle::current());
        App::new(manager, &config)
    }

    #[tokio::test]
    async fn test_normal_sample_fills_window_and_stays_normal() {
        let mut app = app();
        let sample = Sample {
            timestamp: 1000,
            temperature: 25.0,
            vibration: 0.5,
            is_anomaly: false,
            severity: Severity::Low,
            reason: None,
        };

        app.ingest_for_test(sample, 1000);

        assert_eq!(app.window.len(), 1);
        assert_eq!(app.window.latest().unwrap().timestamp, 1000);
        assert_eq!(app.status.status(), SystemStatus::Normal);
        assert!(app.anomalies.is_empty());
    }

    #[tokio::test]
    async fn test_anomalous_sample_updates_status_and_log() {
        let mut app = app();
        let sample = Sample {
            timestamp: 2000,
            temperature: 40.0,
            vibration: 3.0,
            is_anomaly: true,
            severity: Severity::High,
            reason: Some("Temperature spike".to_string()),
        };

        app.ingest_for_test(sample, 2000);

        assert_eq!(app.status.status(), SystemStatus::Anomaly);
        assert_eq!(app.status.severity(), Severity::High);
        assert_eq!(app.status.last_anomaly_ms(), Some(2000));
        assert_eq!(app.anomalies.latest().unwrap().reason, "Temperature spike");
    }

    #[tokio::test]
    async fn test_set_time_range_evicts_old_samples() {
        let mut app = app();
        let now_ms = epoch_ms_now();
        let sample = Sample {
            // 10 minutes old
            timestamp: now_ms - 10 * 60_000,
            temperature: 25.0,
            vibration: 0.5,
            is_anomaly: false,
            severity: Severity::Low,
            reason: None,
        };
        // Fits the widest range
        app.set_time_range(1440);
        app.ingest_for_test(sample, now_ms);
        assert_eq!(app.window.len(), 1);

        app.set_time_range(5);
        assert!(app.window.is_empty());
    }

    #[tokio::test]
    async fn test_log_scroll_clamps() {
        let mut app = app();
        for i in 0..3 {
            let sample = Sample {
                timestamp: i,
                temperature: 40.0,
                vibration: 3.0,
                is_anomaly: true,
                severity: Severity::Low,
                reason: None,
            };
            app.ingest_for_test(sample, 100);
        }

        app.scroll_log_down(10);
        assert_eq!(app.log_scroll, 2);
        app.scroll_log_up(1);
        assert_eq!(app.log_scroll, 1);
        app.scroll_log_top();
        assert_eq!(app.log_scroll, 0);
    }
}

//! Current system status derived from the latest ingested sample.

use super::sample::{Sample, Severity};

/// Whether the system is currently in a normal or anomalous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    Normal,
    Anomaly,
}

impl SystemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SystemStatus::Normal => "SYSTEM NORMAL",
            SystemStatus::Anomaly => "ANOMALY DETECTED",
        }
    }
}

/// Derives the single "current status" shown in the banner.
///
/// Tracks only the most recently ingested sample: an anomalous sample sets
/// the status and records its severity and time, and a single normal sample
/// clears it again. No hysteresis or debouncing. The severity of the last
/// anomaly is retained for display, gated by `status`.
#[derive(Debug, Clone)]
pub struct StatusAggregator {
    status: SystemStatus,
    severity: Severity,
    last_anomaly_ms: Option<i64>,
}

impl Default for StatusAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self {
            status: SystemStatus::Normal,
            severity: Severity::Low,
            last_anomaly_ms: None,
        }
    }

    /// Update the status from a newly ingested sample.
    pub fn observe(&mut self, sample: &Sample) {
        if sample.is_anomaly {
            self.status = SystemStatus::Anomaly;
            self.severity = sample.severity;
            self.last_anomaly_ms = Some(sample.timestamp);
        } else {
            self.status = SystemStatus::Normal;
        }
    }

    pub fn status(&self) -> SystemStatus {
        self.status
    }

    /// Severity of the most recent anomaly. Only meaningful for display when
    /// `status()` is `Anomaly`.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Timestamp (epoch ms) of the most recent anomaly, if any was ever seen.
    pub fn last_anomaly_ms(&self) -> Option<i64> {
        self.last_anomaly_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(timestamp: i64) -> Sample {
        Sample {
            timestamp,
            temperature: 25.0,
            vibration: 0.5,
            is_anomaly: false,
            severity: Severity::Low,
            reason: None,
        }
    }

    fn anomalous(timestamp: i64, severity: Severity) -> Sample {
        Sample {
            timestamp,
            temperature: 40.0,
            vibration: 3.0,
            is_anomaly: true,
            severity,
            reason: Some("Temperature spike".to_string()),
        }
    }

    #[test]
    fn test_starts_normal() {
        let agg = StatusAggregator::new();
        assert_eq!(agg.status(), SystemStatus::Normal);
        assert!(agg.last_anomaly_ms().is_none());
    }

    #[test]
    fn test_anomaly_sets_status_and_severity() {
        let mut agg = StatusAggregator::new();
        agg.observe(&anomalous(2_000, Severity::High));

        assert_eq!(agg.status(), SystemStatus::Anomaly);
        assert_eq!(agg.severity(), Severity::High);
        assert_eq!(agg.last_anomaly_ms(), Some(2_000));
    }

    #[test]
    fn test_single_normal_sample_clears_anomaly() {
        let mut agg = StatusAggregator::new();
        agg.observe(&anomalous(2_000, Severity::Critical));
        agg.observe(&normal(3_000));

        assert_eq!(agg.status(), SystemStatus::Normal);
        // Severity and last anomaly time are retained for display.
        assert_eq!(agg.severity(), Severity::Critical);
        assert_eq!(agg.last_anomaly_ms(), Some(2_000));
    }
}

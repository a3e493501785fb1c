//! Wire types for telemetry samples.
//!
//! These types match the JSON format emitted by the telemetry feed, both
//! over the streaming transport (one object per line) and per poll response.
//! They are the common contract between the feed producer and this dashboard.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordinal severity of an anomaly, as classified by the upstream feed.
///
/// Ordering follows the taxonomy: LOW < MEDIUM < HIGH < CRITICAL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Numeric level, 1 (Low) through 4 (Critical).
    pub fn level(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// One telemetry reading from the feed.
///
/// Created by the connection manager on every successful message parse or
/// poll response, and immutable after that. `severity` and `reason` are only
/// meaningful when `is_anomaly` is set; the feed may omit both otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Producer-assigned timestamp in epoch milliseconds. Non-monotonic
    /// arrival is tolerated; samples are kept in arrival order regardless.
    pub timestamp: i64,
    /// Temperature reading in degrees Celsius.
    pub temperature: f64,
    /// Vibration reading in Hz.
    pub vibration: f64,
    /// Whether the feed classified this reading as anomalous.
    #[serde(default)]
    pub is_anomaly: bool,
    /// Severity of the anomaly; defaults to Low when absent.
    #[serde(default)]
    pub severity: Severity,
    /// Free-text explanation, present only for anomalous readings.
    #[serde(default, rename = "anomaly_reason")]
    pub reason: Option<String>,
}

/// A sample known to be anomalous, promoted into the anomaly log.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyEvent {
    /// Unique per event: the sample timestamp plus a random disambiguator,
    /// so duplicate timestamps never collide.
    pub id: String,
    pub timestamp: i64,
    pub severity: Severity,
    pub reason: String,
    pub temperature: f64,
    pub vibration: f64,
}

impl AnomalyEvent {
    /// Promote an anomalous sample into an event.
    ///
    /// Returns `None` for samples the feed did not flag as anomalous.
    pub fn from_sample(sample: &Sample) -> Option<Self> {
        if !sample.is_anomaly {
            return None;
        }
        let suffix: u32 = rand::thread_rng().gen();
        Some(Self {
            id: format!("{}-{:08x}", sample.timestamp, suffix),
            timestamp: sample.timestamp,
            severity: sample.severity,
            reason: sample.reason.clone().unwrap_or_else(|| "Unknown anomaly".to_string()),
            temperature: sample.temperature,
            vibration: sample.vibration,
        })
    }
}

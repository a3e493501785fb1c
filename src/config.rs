//! Feed configuration: defaults, optional TOML file, environment overrides.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Configuration for the feed layer and its buffers.
///
/// Values come from, in increasing precedence: built-in defaults, an
/// optional TOML file, `HYDROWATCH_*` environment variables, and CLI flags
/// (applied by the binary on top of the loaded config).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Address of the NDJSON streaming feed (host:port).
    pub stream_addr: String,
    /// URL polled in fallback mode.
    pub poll_url: String,
    /// Interval between poll requests, in milliseconds.
    pub poll_interval_ms: u64,
    /// Count ceiling for the sliding sample window.
    pub max_chart_points: usize,
    /// Capacity of the anomaly log.
    pub max_anomaly_log: usize,
    /// Fixed delay before each automatic reconnect, in milliseconds.
    pub retry_interval_ms: u64,
    /// Transport failures tolerated before giving up.
    pub max_retry_attempts: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            stream_addr: "127.0.0.1:9600".to_string(),
            poll_url: "http://127.0.0.1:8000/api/stream".to_string(),
            poll_interval_ms: 1000,
            max_chart_points: 50,
            max_anomaly_log: 100,
            retry_interval_ms: 3000,
            max_retry_attempts: 10,
        }
    }
}

impl FeedConfig {
    /// Load configuration, layering an optional file and the environment
    /// over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix("HYDROWATCH"));

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.max_chart_points, 50);
        assert_eq!(config.max_anomaly_log, 100);
        assert_eq!(config.retry_interval_ms, 3000);
        assert_eq!(config.max_retry_attempts, 10);
    }

    #[test]
    fn test_load_without_file_gives_defaults() {
        let config = FeedConfig::load(None).unwrap();
        assert_eq!(config.max_chart_points, 50);
        assert_eq!(config.stream_addr, "127.0.0.1:9600");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
            stream_addr = "telemetry.local:9700"
            max_chart_points = 120
            "#
        )
        .unwrap();

        let config = FeedConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.stream_addr, "telemetry.local:9700");
        assert_eq!(config.max_chart_points, 120);
        // Untouched keys keep their defaults.
        assert_eq!(config.max_retry_attempts, 10);
    }
}

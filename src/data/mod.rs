//! Data models and buffering for ingested telemetry.
//!
//! This module holds the state the feed layer writes into and the UI reads
//! from. All of it is mutated on the single TUI thread, in response to
//! samples delivered by the connection manager or to operator actions.
//!
//! ## Submodules
//!
//! - [`sample`]: Wire types ([`Sample`], [`AnomalyEvent`], [`Severity`])
//! - [`window`]: Sliding, time-and-count-bounded sample buffer for the chart
//! - [`anomaly`]: Most-recent-first ring buffer backing the anomaly log
//! - [`status`]: Current system status derived from the latest sample
//! - [`time`]: Epoch-ms clock helpers and time range presets
//!
//! ## Data flow
//!
//! ```text
//! feed (parsed Sample)
//!        │
//!        ├──▶ SampleWindow::append()        (chart, stat tiles)
//!        ├──▶ StatusAggregator::observe()   (status banner)
//!        └──▶ AnomalyLog::push()            (anomaly log, if anomalous)
//! ```

pub mod anomaly;
pub mod sample;
pub mod status;
pub mod time;
pub mod window;

pub use anomaly::AnomalyLog;
pub use sample::{AnomalyEvent, Sample, Severity};
pub use status::{StatusAggregator, SystemStatus};
pub use window::SampleWindow;

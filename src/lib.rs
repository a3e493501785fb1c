//! # hydrowatch
//!
//! A real-time terminal dashboard for hydro sensor telemetry.
//!
//! This crate ingests a continuous stream of sensor samples (temperature,
//! vibration) with upstream-reported anomaly classification, and renders
//! live status, a trend chart, and an anomaly log. The core is the feed
//! layer: a connection manager that keeps one live transport to the
//! telemetry source, reconnects automatically on a fixed-interval policy,
//! and can fall back to HTTP polling.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │ (buffers)│    │(render) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │  feed   │◀── TCP stream (NDJSON) | HTTP poller            │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state and the public operations the UI calls
//! - **[`feed`]**: Transports and the [`ConnectionManager`] state machine
//!   (connect, fixed-interval retry, polling fallback)
//! - **[`data`]**: Wire types, the sliding sample window, the anomaly ring
//!   buffer, and the status aggregator
//! - **[`ui`]**: Terminal rendering using ratatui - banner, chart, stat
//!   tiles, anomaly log, theme support
//! - **[`config`]**: Feed configuration (file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Connect to a streaming NDJSON feed
//! hydrowatch --stream localhost:9600
//!
//! # Fall back to HTTP polling
//! hydrowatch --poll http://localhost:8000/api/stream
//! ```
//!
//! ### As a library
//!
//! ```
//! use hydrowatch::config::FeedConfig;
//! use hydrowatch::feed::{ConnectionManager, FeedMode};
//! use hydrowatch::App;
//!
//! # tokio_test::block_on(async {
//! let config = FeedConfig::default();
//! let manager = ConnectionManager::new(
//!     config.clone(),
//!     FeedMode::Streaming,
//!     tokio::runtime::Handle::current(),
//! );
//! let mut app = App::new(manager, &config);
//! app.start();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod feed;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::FeedConfig;
pub use data::{
    AnomalyEvent, AnomalyLog, Sample, SampleWindow, Severity, StatusAggregator, SystemStatus,
};
pub use feed::{ConnectionManager, ConnectionState, FeedMode};

//! Terminal rendering using ratatui.
//!
//! Every widget here is a stateless projection of [`App`](crate::app::App):
//! it reads the current snapshots (window, anomaly log, status, connection
//! state) and draws. Nothing in this module mutates core state.

pub mod banner;
pub mod chart;
pub mod common;
pub mod log;
pub mod stats;
pub mod theme;

pub use theme::Theme;

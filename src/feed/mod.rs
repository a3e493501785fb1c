//! Feed layer: transports and the connection manager.
//!
//! This module owns the single live subscription to the telemetry source.
//! Two transports are supported: a persistent streaming connection reading
//! newline-delimited JSON over TCP, and a fallback HTTP poller issuing one
//! request per interval. Both run as background tokio tasks and push
//! [`TransportEvent`]s into a channel; the [`ConnectionManager`] drains that
//! channel on the TUI thread, drives the connection state machine, and hands
//! parsed samples to the caller.

pub mod connection;
mod poll;
mod stream;

pub use connection::{ConnectionManager, ConnectionState, FeedMode};

use crate::data::Sample;

/// Event emitted by a transport task.
///
/// Events arrive in the order the transport produced them; the manager never
/// reorders or duplicates them.
#[derive(Debug)]
pub enum TransportEvent {
    /// The transport is established (stream connected, or first successful
    /// poll response).
    Opened,
    /// A successfully parsed sample.
    Sample(Sample),
    /// A payload that failed to parse. Non-fatal; the message is dropped.
    ParseFailed(String),
    /// The transport is gone (connect failure, read error, or EOF). The
    /// task terminates after sending this.
    Closed(String),
    /// One poll request failed. Non-fatal; the poller keeps its schedule.
    PollFailed(String),
}

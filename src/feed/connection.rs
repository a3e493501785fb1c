//! Connection manager: one live transport, reconnection, and fallback.

use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{poll, stream, TransportEvent};
use crate::config::FeedConfig;
use crate::data::Sample;

/// Connection lifecycle, modeled as an explicit tagged state rather than
/// boolean flags, so invalid combinations (connected and retrying at once)
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// An automatic reconnect is scheduled.
    Retrying,
    /// Attempts exhausted; inert until an explicit `retry()`.
    Failed,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Connected => "Connected",
            ConnectionState::Retrying => "Retrying",
            ConnectionState::Failed => "Failed",
        }
    }
}

/// Which ingestion source is active. Only one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Persistent NDJSON stream over TCP.
    Streaming,
    /// One HTTP request per fixed interval.
    Polling,
}

impl FeedMode {
    pub fn label(&self) -> &'static str {
        match self {
            FeedMode::Streaming => "streaming",
            FeedMode::Polling => "polling",
        }
    }
}

/// Maintains the single logical subscription to the telemetry feed.
///
/// Transports run as background tasks and push [`TransportEvent`]s into a
/// channel owned here. All state mutation happens in [`pump`], called from
/// the TUI thread once per frame, so connection state, retry timing, and
/// sample delivery never race. The retry policy is fixed-interval with a
/// hard attempt ceiling; once the ceiling is reached the manager goes
/// `Failed` and stays there until [`retry`] is called.
///
/// [`pump`]: ConnectionManager::pump
/// [`retry`]: ConnectionManager::retry
#[derive(Debug)]
pub struct ConnectionManager {
    state: ConnectionState,
    mode: FeedMode,
    attempts: u32,
    retry_at: Option<Instant>,
    last_error: Option<String>,
    config: FeedConfig,
    runtime: Handle,
    events: Option<mpsc::Receiver<TransportEvent>>,
    task: Option<JoinHandle<()>>,
    description: String,
}

impl ConnectionManager {
    /// Create a manager in the Disconnected state. Call [`start`] to connect.
    ///
    /// [`start`]: ConnectionManager::start
    pub fn new(config: FeedConfig, mode: FeedMode, runtime: Handle) -> Self {
        let description = describe(mode, &config);
        Self {
            state: ConnectionState::Disconnected,
            mode,
            attempts: 0,
            retry_at: None,
            last_error: None,
            config,
            runtime,
            events: None,
            task: None,
            description,
        }
    }

    /// Begin connecting. No-op when already Connected or Connecting.
    pub fn start(&mut self) {
        match self.state {
            ConnectionState::Connected | ConnectionState::Connecting => {}
            _ => self.connect(),
        }
    }

    /// Tear down the transport and any pending retry. Safe from any state.
    pub fn stop(&mut self) {
        self.teardown();
        self.retry_at = None;
        self.state = ConnectionState::Disconnected;
    }

    /// Operator-triggered reset: clear the attempt counter and reconnect.
    ///
    /// This is the only way out of the Failed state.
    pub fn retry(&mut self) {
        info!("manual retry requested");
        self.attempts = 0;
        self.last_error = None;
        self.stop();
        self.start();
    }

    /// Switch the ingestion source. No-op when the mode is unchanged.
    pub fn set_mode(&mut self, mode: FeedMode) {
        if mode == self.mode {
            return;
        }
        info!("switching feed mode to {}", mode.label());
        self.mode = mode;
        self.attempts = 0;
        self.stop();
        self.start();
    }

    /// Drain pending transport events and drive the retry timer.
    ///
    /// Parsed samples are handed to `on_sample` synchronously, in arrival
    /// order. Call once per frame from the TUI thread.
    pub fn pump(&mut self, on_sample: &mut dyn FnMut(Sample)) {
        let now = Instant::now();
        loop {
            let polled = match self.events.as_mut() {
                Some(rx) => rx.try_recv(),
                None => break,
            };
            match polled {
                Ok(event) => self.handle_event(event, now, on_sample),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.events = None;
                    // Transport task ended without a Closed event.
                    if matches!(
                        self.state,
                        ConnectionState::Connecting | ConnectionState::Connected
                    ) {
                        self.on_transport_closed("Transport ended".to_string(), now);
                    }
                    break;
                }
            }
        }
        self.tick(now);
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of transport failures since the last successful connection.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Human-readable description of the active source, for the status bar.
    pub fn description(&self) -> &str {
        &self.description
    }

    fn connect(&mut self) {
        self.teardown();
        self.retry_at = None;
        self.state = ConnectionState::Connecting;
        self.description = describe(self.mode, &self.config);

        let (tx, rx) = mpsc::channel(64);
        let task = match self.mode {
            FeedMode::Streaming => {
                info!("connecting to {}", self.config.stream_addr);
                stream::spawn(&self.runtime, self.config.stream_addr.clone(), tx)
            }
            FeedMode::Polling => {
                info!("polling {}", self.config.poll_url);
                poll::spawn(
                    &self.runtime,
                    self.config.poll_url.clone(),
                    Duration::from_millis(self.config.poll_interval_ms),
                    tx,
                )
            }
        };
        self.events = Some(rx);
        self.task = Some(task);
    }

    fn teardown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.events = None;
    }

    fn handle_event(
        &mut self,
        event: TransportEvent,
        now: Instant,
        on_sample: &mut dyn FnMut(Sample),
    ) {
        match event {
            TransportEvent::Opened => {
                if self.state != ConnectionState::Connected {
                    info!("feed connected ({})", self.mode.label());
                    self.state = ConnectionState::Connected;
                    self.attempts = 0;
                    self.last_error = None;
                }
            }
            TransportEvent::Sample(sample) => on_sample(sample),
            TransportEvent::ParseFailed(reason) => {
                // Non-fatal: the payload is dropped without a state change.
                debug!("malformed payload dropped: {reason}");
            }
            TransportEvent::Closed(reason) => self.on_transport_closed(reason, now),
            TransportEvent::PollFailed(reason) => {
                // Surfaced like a transport error, but the poller keeps its
                // schedule and the streaming retry counter is untouched.
                warn!("poll failed: {reason}");
                self.last_error = Some(reason);
            }
        }
    }

    fn on_transport_closed(&mut self, reason: String, now: Instant) {
        warn!("transport closed: {reason}");
        self.teardown();
        self.last_error = Some(reason);
        self.attempts += 1;

        if self.attempts >= self.config.max_retry_attempts {
            warn!(
                "giving up after {} attempts; waiting for manual retry",
                self.attempts
            );
            self.state = ConnectionState::Failed;
            self.retry_at = None;
        } else {
            let delay = Duration::from_millis(self.config.retry_interval_ms);
            debug!("reconnect attempt {} scheduled in {:?}", self.attempts, delay);
            self.state = ConnectionState::Retrying;
            self.retry_at = Some(now + delay);
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.state == ConnectionState::Retrying
            && self.retry_at.is_some_and(|deadline| now >= deadline)
        {
            self.connect();
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn describe(mode: FeedMode, config: &FeedConfig) -> String {
    match mode {
        FeedMode::Streaming => format!("stream: {}", config.stream_addr),
        FeedMode::Polling => format!("poll: {}", config.poll_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Severity;

    fn config(max_retry_attempts: u32, retry_interval_ms: u64) -> FeedConfig {
        FeedConfig {
            // Nothing listens on port 1; connects fail fast.
            stream_addr: "127.0.0.1:1".to_string(),
            poll_url: "http://127.0.0.1:1/api/stream".to_string(),
            max_retry_attempts,
            retry_interval_ms,
            ..FeedConfig::default()
        }
    }

    fn manager(max_retry_attempts: u32, retry_interval_ms: u64) -> ConnectionManager {
        ConnectionManager::new(
            config(max_retry_attempts, retry_interval_ms),
            FeedMode::Streaming,
            Handle::current(),
        )
    }

    fn drop_sample(_: Sample) {}

    fn sample(timestamp: i64, is_anomaly: bool) -> Sample {
        Sample {
            timestamp,
            temperature: 25.0,
            vibration: 0.5,
            is_anomaly,
            severity: Severity::Low,
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_start_is_idempotent_while_connecting() {
        let mut mgr = manager(10, 3000);
        assert_eq!(mgr.state(), ConnectionState::Disconnected);

        mgr.start();
        assert_eq!(mgr.state(), ConnectionState::Connecting);

        mgr.start();
        assert_eq!(mgr.state(), ConnectionState::Connecting);
    }

    #[tokio::test]
    async fn test_opened_connects_and_resets_counter() {
        let mut mgr = manager(10, 3000);
        mgr.attempts = 4;
        mgr.last_error = Some("old".to_string());

        let now = Instant::now();
        mgr.handle_event(TransportEvent::Opened, now, &mut drop_sample);

        assert_eq!(mgr.state(), ConnectionState::Connected);
        assert_eq!(mgr.attempts(), 0);
        assert!(mgr.last_error().is_none());
    }

    #[tokio::test]
    async fn test_closed_schedules_fixed_interval_retry() {
        let mut mgr = manager(10, 3000);
        let now = Instant::now();

        mgr.handle_event(
            TransportEvent::Closed("Connection failed".to_string()),
            now,
            &mut drop_sample,
        );

        assert_eq!(mgr.state(), ConnectionState::Retrying);
        assert_eq!(mgr.attempts(), 1);
        assert_eq!(mgr.retry_at, Some(now + Duration::from_millis(3000)));
        assert_eq!(mgr.last_error(), Some("Connection failed"));
    }

    #[tokio::test]
    async fn test_exhausted_attempts_reach_failed_with_no_timer() {
        let mut mgr = manager(3, 3000);
        let now = Instant::now();

        for _ in 0..2 {
            mgr.handle_event(TransportEvent::Closed("refused".to_string()), now, &mut drop_sample);
            assert_eq!(mgr.state(), ConnectionState::Retrying);
        }

        mgr.handle_event(TransportEvent::Closed("refused".to_string()), now, &mut drop_sample);
        assert_eq!(mgr.state(), ConnectionState::Failed);
        assert_eq!(mgr.attempts(), 3);
        assert!(mgr.retry_at.is_none());

        // Failed is inert: the timer never fires.
        mgr.tick(now + Duration::from_secs(60));
        assert_eq!(mgr.state(), ConnectionState::Failed);
    }

    #[tokio::test]
    async fn test_retry_from_failed_resets_and_reconnects() {
        let mut mgr = manager(1, 3000);
        let now = Instant::now();
        mgr.handle_event(TransportEvent::Closed("refused".to_string()), now, &mut drop_sample);
        assert_eq!(mgr.state(), ConnectionState::Failed);

        mgr.retry();
        assert_eq!(mgr.state(), ConnectionState::Connecting);
        assert_eq!(mgr.attempts(), 0);
        assert!(mgr.last_error().is_none());
    }

    #[tokio::test]
    async fn test_stop_cancels_pending_retry() {
        let mut mgr = manager(10, 3000);
        let now = Instant::now();
        mgr.handle_event(TransportEvent::Closed("refused".to_string()), now, &mut drop_sample);
        assert_eq!(mgr.state(), ConnectionState::Retrying);

        mgr.stop();
        assert_eq!(mgr.state(), ConnectionState::Disconnected);
        assert!(mgr.retry_at.is_none());

        mgr.tick(now + Duration::from_secs(60));
        assert_eq!(mgr.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_retry_timer_fires_into_connecting() {
        let mut mgr = manager(10, 0);
        let now = Instant::now();
        mgr.handle_event(TransportEvent::Closed("refused".to_string()), now, &mut drop_sample);
        assert_eq!(mgr.state(), ConnectionState::Retrying);

        mgr.tick(now);
        assert_eq!(mgr.state(), ConnectionState::Connecting);
        assert!(mgr.retry_at.is_none());
    }

    #[tokio::test]
    async fn test_parse_failure_changes_nothing() {
        let mut mgr = manager(10, 3000);
        let now = Instant::now();
        mgr.handle_event(TransportEvent::Opened, now, &mut drop_sample);

        let mut delivered = 0;
        mgr.handle_event(
            TransportEvent::ParseFailed("bad json".to_string()),
            now,
            &mut |_| delivered += 1,
        );

        assert_eq!(mgr.state(), ConnectionState::Connected);
        assert_eq!(mgr.attempts(), 0);
        assert!(mgr.last_error().is_none());
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_poll_failure_does_not_touch_retry_counter() {
        let config = config(10, 3000);
        let mut mgr = ConnectionManager::new(config, FeedMode::Polling, Handle::current());
        let now = Instant::now();
        mgr.handle_event(TransportEvent::Opened, now, &mut drop_sample);

        mgr.handle_event(
            TransportEvent::PollFailed("request timed out".to_string()),
            now,
            &mut drop_sample,
        );

        assert_eq!(mgr.state(), ConnectionState::Connected);
        assert_eq!(mgr.attempts(), 0);
        assert_eq!(mgr.last_error(), Some("request timed out"));
    }

    #[tokio::test]
    async fn test_samples_forwarded_in_arrival_order() {
        let mut mgr = manager(10, 3000);
        let now = Instant::now();
        mgr.handle_event(TransportEvent::Opened, now, &mut drop_sample);

        let mut seen = Vec::new();
        let mut record = |s: Sample| seen.push(s.timestamp);
        mgr.handle_event(TransportEvent::Sample(sample(1000, false)), now, &mut record);
        mgr.handle_event(TransportEvent::Sample(sample(900, true)), now, &mut record);
        mgr.handle_event(TransportEvent::Sample(sample(2000, false)), now, &mut record);

        assert_eq!(seen, vec![1000, 900, 2000]);
    }

    #[tokio::test]
    async fn test_set_mode_switches_source() {
        let mut mgr = manager(10, 3000);
        mgr.start();
        assert!(mgr.description().starts_with("stream:"));

        mgr.set_mode(FeedMode::Polling);
        assert_eq!(mgr.mode(), FeedMode::Polling);
        assert_eq!(mgr.state(), ConnectionState::Connecting);
        assert!(mgr.description().starts_with("poll:"));

        // Same mode is a no-op.
        let attempts = mgr.attempts();
        mgr.set_mode(FeedMode::Polling);
        assert_eq!(mgr.attempts(), attempts);
    }

    #[tokio::test]
    async fn test_refused_stream_connect_ends_in_retrying() {
        let mut mgr = manager(10, 60_000);
        mgr.start();

        // The connect to 127.0.0.1:1 fails quickly; pump until the Closed
        // event lands.
        for _ in 0..100 {
            mgr.pump(&mut drop_sample);
            if mgr.state() == ConnectionState::Retrying {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert_eq!(mgr.state(), ConnectionState::Retrying);
        assert_eq!(mgr.attempts(), 1);
        assert!(mgr.last_error().is_some());
    }
}

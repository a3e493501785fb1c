//! Polling transport: one HTTP request per fixed interval.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::TransportEvent;
use crate::data::Sample;

/// Why a single poll round produced no sample.
enum FetchError {
    /// Request-level failure: refused, timed out, non-2xx status.
    Transport(String),
    /// The response body was not a valid sample.
    Parse(String),
}

/// Spawn a task that fetches `url` every `interval` until the receiver drops.
///
/// `Opened` is sent once, before the first successful sample. Request
/// failures surface as `PollFailed` and never end the task; the poller keeps
/// its schedule regardless.
pub(crate) fn spawn(
    runtime: &Handle,
    url: String,
    interval: Duration,
    tx: mpsc::Sender<TransportEvent>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        let client = reqwest::Client::new();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut opened = false;

        loop {
            ticker.tick().await;
            let event = match fetch_once(&client, &url).await {
                Ok(sample) => {
                    if !opened {
                        opened = true;
                        if tx.send(TransportEvent::Opened).await.is_err() {
                            return;
                        }
                    }
                    TransportEvent::Sample(sample)
                }
                Err(FetchError::Transport(reason)) => TransportEvent::PollFailed(reason),
                Err(FetchError::Parse(reason)) => {
                    debug!("dropping malformed poll response: {reason}");
                    TransportEvent::ParseFailed(reason)
                }
            };
            if tx.send(event).await.is_err() {
                return;
            }
        }
    })
}

async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<Sample, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| FetchError::Transport(format!("Poll request failed: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Transport(format!("Poll request failed: {e}")))?;

    serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
}

//! Streaming transport: newline-delimited JSON over TCP.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::TransportEvent;
use crate::data::Sample;

/// Spawn a task that connects to `addr` and reads samples until the
/// connection drops.
///
/// The task sends `Opened` once the TCP connection is established, one
/// `Sample` or `ParseFailed` per line, and finally a single `Closed` with a
/// human-readable reason before terminating.
pub(crate) fn spawn(
    runtime: &Handle,
    addr: String,
    tx: mpsc::Sender<TransportEvent>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        match TcpStream::connect(&addr).await {
            Ok(stream) => {
                if tx.send(TransportEvent::Opened).await.is_err() {
                    return;
                }
                let reason = read_lines(stream, &tx).await;
                let _ = tx.send(TransportEvent::Closed(reason)).await;
            }
            Err(e) => {
                let _ = tx
                    .send(TransportEvent::Closed(format!("Connection failed: {e}")))
                    .await;
            }
        }
    })
}

/// Read newline-delimited JSON samples from `reader` until EOF or error.
///
/// Returns the close reason. Malformed lines are reported as `ParseFailed`
/// and skipped; they never end the stream.
async fn read_lines<R>(reader: R, tx: &mpsc::Sender<TransportEvent>) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => return "Connection closed by feed".to_string(),
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match serde_json::from_str::<Sample>(trimmed) {
                    Ok(sample) => {
                        if tx.send(TransportEvent::Sample(sample)).await.is_err() {
                            return "Receiver dropped".to_string();
                        }
                    }
                    Err(e) => {
                        debug!("dropping malformed stream payload: {e}");
                        if tx.send(TransportEvent::ParseFailed(e.to_string())).await.is_err() {
                            return "Receiver dropped".to_string();
                        }
                    }
                }
            }
            Err(e) => return format!("Read error: {e}"),
        }
    }
}

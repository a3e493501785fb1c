//! Simulated telemetry feed for exercising the dashboard.
//!
//! Serves newline-delimited JSON samples over TCP: sinusoidal temperature
//! and vibration baselines with noise, and a configurable chance per sample
//! of an anomalous spike.
//!
//! ```bash
//! hydrosim --listen 127.0.0.1:9600 &
//! hydrowatch --stream 127.0.0.1:9600
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use hydrowatch::data::time::epoch_ms_now;
use hydrowatch::data::{Sample, Severity};

#[derive(Parser, Debug)]
#[command(name = "hydrosim")]
#[command(about = "Simulated hydro telemetry feed (NDJSON over TCP)")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:9600")]
    listen: String,

    /// Milliseconds between samples
    #[arg(short, long, default_value = "1000")]
    interval: u64,

    /// Probability of an anomalous sample, 0.0 to 1.0
    #[arg(short, long, default_value = "0.1")]
    anomaly_rate: f64,
}

const REASONS: &[&str] = &["Temperature spike", "Vibration anomaly", "Sensor malfunction"];

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let listener = TcpListener::bind(&args.listen).await?;
    println!("hydrosim listening on {}", args.listen);

    loop {
        let (socket, peer) = listener.accept().await?;
        println!("feed subscriber connected: {peer}");
        let interval = args.interval;
        let anomaly_rate = args.anomaly_rate;
        tokio::spawn(async move {
            if let Err(e) = serve(socket, interval, anomaly_rate).await {
                println!("feed subscriber {peer} dropped: {e}");
            }
        });
    }
}

async fn serve(mut socket: TcpStream, interval: u64, anomaly_rate: f64) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_millis(interval));
    loop {
        ticker.tick().await;
        let sample = generate(anomaly_rate);
        let mut line = serde_json::to_string(&sample)?;
        line.push('\n');
        socket.write_all(line.as_bytes()).await?;
    }
}

/// Generate one mock sample: slow sine/cosine baselines plus noise, with the
/// noise amplitude blown up on anomalous samples.
fn generate(anomaly_rate: f64) -> Sample {
    let mut rng = rand::thread_rng();
    let now = epoch_ms_now();
    let is_anomaly = rng.gen_bool(anomaly_rate.clamp(0.0, 1.0));

    let temp_noise = if is_anomaly { 15.0 } else { 2.0 };
    let vib_noise = if is_anomaly { 2.0 } else { 0.1 };
    let temperature =
        20.0 + (now as f64 / 10_000.0).sin() * 5.0 + (rng.gen::<f64>() - 0.5) * temp_noise;
    let vibration =
        0.5 + (now as f64 / 8_000.0).cos() * 0.3 + (rng.gen::<f64>() - 0.5) * vib_noise;

    let (severity, reason) = if is_anomaly {
        let severity = match rng.gen_range(0..4) {
            0 => Severity::Low,
            1 => Severity::Medium,
            2 => Severity::High,
            _ => Severity::Critical,
        };
        let reason = REASONS[rng.gen_range(0..REASONS.len())].to_string();
        (severity, Some(reason))
    } else {
        (Severity::Low, None)
    };

    Sample {
        timestamp: now,
        temperature,
        vibration,
        is_anomaly,
        severity,
        reason,
    }
}

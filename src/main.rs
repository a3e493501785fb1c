use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use hydrowatch::app::App;
use hydrowatch::config::FeedConfig;
use hydrowatch::events;
use hydrowatch::feed::{ConnectionManager, FeedMode};
use hydrowatch::ui;

#[derive(Parser, Debug)]
#[command(name = "hydrowatch")]
#[command(about = "Real-time TUI dashboard for hydro sensor telemetry")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Streaming feed address (host:port), NDJSON over TCP
    #[arg(short, long, conflicts_with = "poll")]
    stream: Option<String>,

    /// Poll a URL instead of streaming
    #[arg(short, long)]
    poll: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Maximum chart points kept in the sliding window
    #[arg(long)]
    max_points: Option<usize>,

    /// Maximum entries kept in the anomaly log
    #[arg(long)]
    max_anomalies: Option<usize>,

    /// Reconnect delay in milliseconds
    #[arg(long)]
    retry_interval: Option<u64>,

    /// Reconnect attempts before giving up
    #[arg(long)]
    max_retries: Option<u32>,

    /// Write diagnostics to this file (stdout belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }

    let mut config = FeedConfig::load(args.config.as_deref())?;

    // CLI flags win over file and environment.
    let mode = match (&args.stream, &args.poll) {
        (Some(addr), _) => {
            config.stream_addr = addr.clone();
            FeedMode::Streaming
        }
        (None, Some(url)) => {
            config.poll_url = url.clone();
            FeedMode::Polling
        }
        (None, None) => FeedMode::Streaming,
    };
    if let Some(v) = args.poll_interval {
        config.poll_interval_ms = v;
    }
    if let Some(v) = args.max_points {
        config.max_chart_points = v;
    }
    if let Some(v) = args.max_anomalies {
        config.max_anomaly_log = v;
    }
    if let Some(v) = args.retry_interval {
        config.retry_interval_ms = v;
    }
    if let Some(v) = args.max_retries {
        config.max_retry_attempts = v;
    }

    // The TUI loop stays synchronous; transports run on this runtime.
    let runtime = tokio::runtime::Runtime::new()?;
    let manager = ConnectionManager::new(config.clone(), mode, runtime.handle().clone());

    run_tui(manager, &config)
}

/// Run the TUI around the given connection manager
fn run_tui(manager: ConnectionManager, config: &FeedConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(manager, config);
    app.start();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 20;

    while app.running {
        // Drain transport events and ingest new samples
        app.pump();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1),  // Header bar
                Constraint::Length(3),  // Status banner
                Constraint::Min(8),     // Trend chart
                Constraint::Length(3),  // Stat tiles
                Constraint::Length(10), // Anomaly log
                Constraint::Length(1),  // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::banner::render(frame, app, chunks[1]);
            ui::chart::render(frame, app, chunks[2]);
            ui::stats::render(frame, app, chunks[3]);
            ui::log::render(frame, app, chunks[4]);
            ui::common::render_status_bar(frame, app, chunks[5]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

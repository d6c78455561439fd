//! Greenhouse monitor replay entry point.
//!
//! Loads an optional history file into an in-memory telemetry table, then
//! streams live samples (JSON lines from a file or stdin) through the
//! bounded sample feed into the dashboard service.
//!
//! ```text
//! ┌──────────────┐  publish  ┌────────────┐  drain_feed  ┌──────────────────┐
//! │ reader thread│──────────▶│ SampleFeed │─────────────▶│ DashboardService │──▶ LogEventSink
//! │ (JSON lines) │           │ (bounded)  │              │                  │──▶ DashboardView
//! └──────────────┘           └────────────┘              └──────────────────┘
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::{info, warn};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use greenhouse::adapters::jsonl::JsonLinesReader;
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::memory::{InMemoryStore, InMemoryTelemetry};
use greenhouse::app::commands::AppCommand;
use greenhouse::app::ports::EventSink;
use greenhouse::app::service::DashboardService;
use greenhouse::config::DashboardConfig;
use greenhouse::feed::{FeedStatus, SampleFeed};

#[derive(Parser, Debug)]
#[command(author, version, about = "Greenhouse VPD / growth-score monitor", long_about = None)]
struct Cli {
    /// Live samples as JSON lines; reads stdin when omitted.
    input: Option<PathBuf>,

    /// JSON-lines file preloaded as recorded telemetry.
    #[arg(long)]
    history: Option<PathBuf>,

    /// Dashboard configuration (JSON). Defaults apply when omitted.
    #[arg(long, env = "GREENHOUSE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `greenhouse=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Switch automatic fan control on or off.
    #[arg(long)]
    auto_mode: Option<bool>,

    /// Humidity threshold (%) for automatic fan control.
    #[arg(long)]
    threshold: Option<u8>,

    /// Manual fan state.
    #[arg(long)]
    manual_fan: Option<bool>,

    /// Print the final dashboard view as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn init_logging(filter: &str) -> Result<()> {
    LogTracer::init().context("Failed to initialize log tracer")?;
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: DashboardConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    if let Err(e) = config.validate() {
        bail!("Invalid config {}: {e}", path.display());
    }
    Ok(config)
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead + Send>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("Failed to open {}", p.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn load_history(path: Option<&PathBuf>) -> Result<InMemoryTelemetry> {
    let mut table = InMemoryTelemetry::default();
    if path.is_none() {
        return Ok(table);
    }
    for (line, result) in JsonLinesReader::new(open_input(path)?) {
        match result {
            Ok(sample) => table.insert(sample),
            Err(e) => warn!("history line {line}: {e}"),
        }
    }
    Ok(table)
}

/// Stream `input` through `feed` into the service until the input ends.
///
/// A reader thread publishes samples; this thread drains them. Both
/// subscription status changes go through the service so they reach the
/// sink.
fn replay<R, S>(service: &mut DashboardService, feed: &SampleFeed, input: R, sink: &mut S)
where
    R: BufRead + Send,
    S: EventSink,
{
    let input_done = AtomicBool::new(false);

    thread::scope(|scope| {
        service.update_feed_status(feed, FeedStatus::Subscribed, sink);

        scope.spawn(|| {
            for (line, result) in JsonLinesReader::new(input) {
                match result {
                    Ok(sample) => futures_lite::future::block_on(feed.publish(sample)),
                    Err(e) => warn!("input line {line}: {e}"),
                }
            }
            input_done.store(true, Ordering::Release);
        });

        loop {
            let done = input_done.load(Ordering::Acquire);
            if service.drain_feed(feed, sink) == 0 {
                if done {
                    break;
                }
                thread::sleep(Duration::from_millis(5));
            }
        }
    });

    service.update_feed_status(feed, FeedStatus::Closed, sink);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    info!("Greenhouse monitor starting");

    let config = load_config(cli.config.as_ref())?;
    let telemetry = load_history(cli.history.as_ref())?;
    let mut store = InMemoryStore::new();
    let mut sink = LogEventSink::new();

    let mut service = DashboardService::new(config);
    service.bootstrap(&telemetry, &store, &mut sink);

    let commands = [
        cli.auto_mode.map(AppCommand::SetAutoMode),
        cli.threshold.map(AppCommand::SetHumidityThreshold),
        cli.manual_fan.map(AppCommand::SetManualFan),
    ];
    for cmd in commands.into_iter().flatten() {
        service
            .handle_command(cmd, &mut store, &mut sink)
            .context("Control update failed")?;
    }

    let input = open_input(cli.input.as_ref())?;
    let feed: SampleFeed = SampleFeed::new();
    replay(&mut service, &feed, input, &mut sink);
    info!(
        "Feed closed: {} samples ingested, {} dropped",
        service.ingested_count(),
        feed.dropped()
    );

    let view = service.view();
    if cli.json {
        let out = serde_json::to_string_pretty(&view).context("Failed to encode view")?;
        println!("{out}");
    } else {
        info!(
            "Current: T={:.1}C RH={:.1}% | VPD={:.2}kPa AH={:.2}g/m3 | score={} | {} ({}){}",
            view.current.temperature_c,
            view.current.humidity_pct,
            view.metrics.vpd_kpa,
            view.metrics.absolute_humidity_g_m3,
            view.metrics.growth_score,
            view.metrics.status,
            view.metrics.status.color(),
            if view.critical { " | CRITICAL" } else { "" },
        );
    }
    Ok(())
}

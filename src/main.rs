//! Trading Agent Runner
//!
//! Drives the tick engine over the harness pipe: one `TickSnapshot` JSON
//! document per stdin line, one telemetry record per stdout line.

use anyhow::Context;
use std::io::{self, BufRead, Write};
use trading_agent::config::Config;
use trading_agent::models::TickSnapshot;
use trading_agent::quoting::Engine;
use trading_agent::telemetry;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing. Diagnostics go to stderr: stdout is the data
    // channel the harness reads tick records from.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load product configuration from AGENT_CONFIG, or run the built-in set.
    let config = match std::env::var("AGENT_CONFIG") {
        Ok(path) => {
            Config::load(&path).with_context(|| format!("loading config from {path}"))?
        }
        Err(_) => Config::default(),
    };

    info!(
        products = config.products.len(),
        quoted = config.quoted_products().count(),
        "starting trading agent"
    );

    let engine = Engine::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading tick from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let tick: TickSnapshot =
            serde_json::from_str(&line).context("decoding tick snapshot")?;
        let timestamp = tick.timestamp;

        let (output, log) = engine
            .run(&tick)
            .with_context(|| format!("processing tick {timestamp}"))?;

        let record = telemetry::tick_record(&tick, &output, &log);
        telemetry::write_record(&mut stdout, &record).context("writing tick record")?;
        stdout.flush().context("flushing tick record")?;
    }

    info!("input closed, shutting down");
    Ok(())
}

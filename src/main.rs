use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use tick_trader::domain::TradingState;
use tick_trader::{monitoring, Config, Trader};

/// Reads one `TradingState` JSON per line on stdin and writes one
/// `TraderOutput` JSON per line on stdout. When a line carries no
/// `trader_data`, the blob from the previous output is threaded in.
fn main() -> Result<()> {
    // Load local .env if present
    let _ = dotenvy::dotenv();

    let cfg = Config::from_env()?;
    monitoring::init_tracing(cfg.log_json);
    info!(?cfg, "boot");

    let trader = Trader::new(&cfg);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let mut carried: Option<String> = None;
    let mut ticks = 0u64;

    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut ts: TradingState = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid trading state", lineno + 1))?;
        if ts.trader_data.is_none() {
            ts.trader_data = carried.take();
        }

        let output = trader.run(&ts)?;
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;

        carried = Some(output.trader_data);
        ticks += 1;
    }

    out.flush()?;
    info!(ticks, "done");
    Ok(())
}

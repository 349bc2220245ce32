//! Market monitor: run one monitor in a loop and push alerts to Feishu.
//!
//! Usage: monit <apr|rsi|td|vol> [config.toml]
//!
//! Settings are read from the monitor's section of the TOML file
//! (`[Cetus]`, `[RSI]`, `[TD9]` or `[VOL]`). An invalid section aborts
//! startup with a non-zero exit code.

mod logging;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clients_feishu::FeishuBot;
use monit::{
    build_monitor, AlertGate, ConfigFile, MonitorKind, MonitorRunner, Notifier, SilentNotifier,
};
use tracing::info;

const DEFAULT_CONFIG: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <apr|rsi|td|vol> [config.toml]",
            args.first().map(|s| s.as_str()).unwrap_or("monit")
        );
        std::process::exit(1);
    }

    let kind: MonitorKind = args[1].trim().parse().map_err(|e: String| anyhow!(e))?;
    let path = PathBuf::from(args.get(2).map(|s| s.trim()).unwrap_or(DEFAULT_CONFIG));

    let file = ConfigFile::load(&path)?;
    logging::init_logging(&file.log)?;
    info!(monitor = %kind, config = %path.display(), "starting");

    let config = file.monitor(kind)?;
    info!("{}", config.to_json_pretty());

    let client = file.http.build_client()?;
    let notifier: Box<dyn Notifier> = match config.feishu() {
        Some(webhook) => Box::new(FeishuBot::new(client.clone(), webhook.to_string())),
        None => Box::new(SilentNotifier),
    };
    let monitor = build_monitor(&config, &file.http, client);

    let runner = MonitorRunner::new(monitor, notifier, config.schedule()?)
        .with_symbol_delay(config.symbol_delay())
        .with_gate(AlertGate::new(config.edge_triggered()));
    runner.run().await;
    Ok(())
}

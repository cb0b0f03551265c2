use anyhow::anyhow;
use clap::Parser;
use depdiff_cli::{logging, runner, Cli, ConfigManager};
use depdiff_core::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = manager.load().map_err(|e| anyhow!(e.user_message()))?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            ctrl_c.cancel();
        }
    });

    let report = runner::run(&cli, &config, &cancel)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    println!("{}", report);
    Ok(())
}

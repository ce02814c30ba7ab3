use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use tokio::time::timeout;
use tracing::*;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    // A wildcard listen address is not something we can connect to
    let host = match config.host.as_str() {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
        host => host,
    };
    let url = format!("http://{host}:{}/test", config.port);

    let client = reqwest::Client::builder().build()?;

    let response = timeout(std::time::Duration::from_secs(5), client.get(&url).send())
        .await
        .context("Timeout")?
        .context("Failed to send request")?
        .error_for_status()?;

    let report: JsonValue = response
        .json()
        .await
        .context("Failed to parse the health report")?;
    info!(
        backend = %report["backend"],
        database = %report["database"],
        "Health report"
    );

    Ok(())
}

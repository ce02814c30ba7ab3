use anyhow::Result;
use tracing::*;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    if config.database_url.is_none() {
        warn!("DATABASE_URL is not set; the server would start without a document store");
    }
    info!("No problems found");
    Ok(())
}

use std::net::ToSocketAddrs;

use anyhow::Result;
use idsboard_api::ApiServer;
use idsboard_core::Services;
use tracing::*;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    info!(%version, "IDS dashboard backend");

    let config = load_config(&cli.config)?;
    let address = config
        .listen_address()
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Failed to resolve the listen address"))?;

    let services = Services::new(&config).await;
    if !services.store.is_available() {
        warn!("Document store is not available; storage endpoints will fail until restart");
    }

    if console::user_attended() {
        info!("--------------------------------------------");
        info!("IDS dashboard backend is now running.");
        info!("Accepting HTTP connections on http://{}", address);
        info!("Health report at http://{}/test", address);
        info!("--------------------------------------------");
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
        result = ApiServer::new(&services).run(address) => {
            if let Err(error) = result {
                error!(?error, "API server error");
                return Err(error);
            }
        }
    }

    info!("Exiting");
    Ok(())
}

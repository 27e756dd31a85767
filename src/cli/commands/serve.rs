use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::database::{Connector, MemoryConnector, PgConnector};

pub async fn handle(mut config: AppConfig, port: Option<u16>, memory: bool) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let connector: Arc<dyn Connector> = if memory {
        tracing::warn!("Using in-memory store; posts are lost on shutdown");
        Arc::new(MemoryConnector::new())
    } else {
        let pg = PgConnector::new(config.database_url()?)?;
        tracing::info!("Using database {}", pg.redacted_url());
        Arc::new(pg)
    };

    let app = crate::app(&config, connector)?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        "Blog API listening on http://{} ({:?}, posts under {})",
        bind_addr,
        config.environment,
        config.server.base_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Blog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

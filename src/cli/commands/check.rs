use crate::config::AppConfig;
use crate::database::{Connector, PgConnector};

pub async fn handle(config: &AppConfig) -> anyhow::Result<()> {
    config.jwt_secret()?;

    let connector = PgConnector::new(config.database_url()?)?;
    let mut gateway = connector.connect().await?;
    gateway.ping().await?;
    gateway.close().await?;

    println!("Configuration OK ({:?}); database {} reachable", config.environment, connector.redacted_url());
    Ok(())
}

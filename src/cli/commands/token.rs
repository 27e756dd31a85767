use chrono::Duration;

use crate::auth::issue_token;
use crate::config::AppConfig;

/// Print a token for local testing. Not a replacement for the signin service.
pub fn handle(config: &AppConfig, subject: i32, hours: Option<u64>, no_expiry: bool) -> anyhow::Result<()> {
    let ttl = if no_expiry {
        None
    } else {
        let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
        Some(Duration::hours(i64::try_from(hours)?))
    };

    let token = issue_token(subject, config.jwt_secret()?, ttl)?;
    println!("{}", token);
    Ok(())
}

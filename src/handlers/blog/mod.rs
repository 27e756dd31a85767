// handlers/blog/mod.rs - Post endpoints behind the auth gate
//
// Per request: gate → body shape → gateway → JSON.
// Each handler opens its own gateway and closes it before responding.

pub mod bulk;
pub mod create;
pub mod show;
pub mod update;

pub use bulk::bulk;
pub use create::create;
pub use show::show;
pub use update::update;

use crate::app::AppState;
use crate::database::PostGateway;
use crate::error::ApiError;

pub(crate) async fn open_gateway(state: &AppState) -> Result<Box<dyn PostGateway>, ApiError> {
    Ok(state.connector.connect().await?)
}

/// Close a gateway whose work is done. A failed close does not change the
/// response; the result of the operation has already been decided.
pub(crate) async fn release_gateway(gateway: Box<dyn PostGateway>) {
    if let Err(e) = gateway.close().await {
        tracing::warn!("Failed to close database gateway: {}", e);
    }
}

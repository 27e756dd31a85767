use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service information
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let base = state.base_path.as_str();

    Json(json!({
        "name": "Blog API",
        "version": version,
        "endpoints": {
            "create": format!("POST {base} (auth)"),
            "update": format!("PUT {base} (auth)"),
            "bulk": format!("GET {base}/bulk (auth)"),
            "show": format!("GET {base}/:id (auth)"),
            "health": "GET /health (public)",
        }
    }))
}

/// GET /health - opens one gateway and pings the store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let checked = match state.connector.connect().await {
        Ok(mut gateway) => {
            let pinged = gateway.ping().await;
            if let Err(e) = gateway.close().await {
                tracing::warn!("Failed to close health check gateway: {}", e);
            }
            pinged
        }
        Err(e) => Err(e),
    };

    match checked {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

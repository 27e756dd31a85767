use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::database::Post;
use crate::error::ApiError;

use super::{open_gateway, release_gateway};

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub blogs: Vec<Post>,
}

/// GET /bulk - every post, regardless of author. No paging.
pub async fn bulk(State(state): State<AppState>) -> Result<Json<BulkResponse>, ApiError> {
    let mut gateway = open_gateway(&state).await?;
    let result = gateway.list_posts().await;
    release_gateway(gateway).await;

    let blogs = result?;
    tracing::debug!("Listed {} posts", blogs.len());

    Ok(Json(BulkResponse { blogs }))
}

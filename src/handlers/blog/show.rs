use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::Post;
use crate::error::ApiError;

use super::{open_gateway, release_gateway};

/// GET /:id - a single post, or `null` with 200 when the id is unknown
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Post>>, ApiError> {
    let id: i32 = id
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid post id '{}'", id)))?;

    let mut gateway = open_gateway(&state).await?;
    let result = gateway.get_post(id).await;
    release_gateway(gateway).await;

    Ok(Json(result?))
}

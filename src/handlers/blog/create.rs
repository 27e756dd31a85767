use axum::{body::Bytes, extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::NewPost;
use crate::error::ApiError;
use crate::middleware::Subject;
use crate::validation::{parse_body, CreatePostInput};

use super::{open_gateway, release_gateway};

/// POST / - create a post authored by the caller.
///
/// `authorId` always comes from the verified token; a value in the body is ignored.
/// Responds `{ "id": <new id> }`.
pub async fn create(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let input: CreatePostInput = parse_body(&body)?;

    let mut gateway = open_gateway(&state).await?;
    let result = gateway
        .create_post(NewPost {
            title: input.title,
            content: input.content,
            author_id: subject.user_id,
        })
        .await;
    release_gateway(gateway).await;

    let post = result?;
    tracing::info!("Created post {} for author {}", post.id, post.author_id);

    Ok(Json(json!({ "id": post.id })))
}

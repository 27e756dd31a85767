use axum::{body::Bytes, extract::State, Extension, Json};

use crate::app::AppState;
use crate::config::UpdatePolicy;
use crate::database::{Post, PostGateway};
use crate::error::ApiError;
use crate::middleware::Subject;
use crate::validation::{parse_body, UpdatePostInput};

use super::{open_gateway, release_gateway};

/// PUT / - replace title and content of an existing post.
///
/// Responds with the updated post. Under `UpdatePolicy::AnyAuthenticated`
/// (the default) the caller's identity is not compared with the author.
/// Concurrent updates to one id are not ordered; the last write wins.
pub async fn update(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    body: Bytes,
) -> Result<Json<Post>, ApiError> {
    let input: UpdatePostInput = parse_body(&body)?;

    let mut gateway = open_gateway(&state).await?;
    let result = apply(gateway.as_mut(), state.update_policy, subject, &input).await;
    release_gateway(gateway).await;

    let post = result?;
    tracing::info!("Subject {} updated post {}", subject.user_id, post.id);

    Ok(Json(post))
}

async fn apply(
    gateway: &mut dyn PostGateway,
    policy: UpdatePolicy,
    subject: Subject,
    input: &UpdatePostInput,
) -> Result<Post, ApiError> {
    if policy == UpdatePolicy::AuthorOnly {
        let existing = gateway
            .get_post(input.id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Post {} not found", input.id)))?;

        if existing.author_id != subject.user_id {
            tracing::warn!(
                "Subject {} tried to update post {} owned by {}",
                subject.user_id,
                existing.id,
                existing.author_id
            );
            return Err(ApiError::forbidden("Only the author may update this post"));
        }
    }

    Ok(gateway.update_post(input.id, &input.title, &input.content).await?)
}

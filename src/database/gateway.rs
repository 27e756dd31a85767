use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewPost, Post};

/// Errors from the persistence gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Per-request client for the post store.
///
/// A gateway lives for exactly one request: it is opened by a [`Connector`]
/// after the request passed the gate and validation, and closed before the
/// response is sent. No transactions, retries or timeouts are added here.
#[async_trait]
pub trait PostGateway: Send {
    /// Insert a post; the store assigns the id
    async fn create_post(&mut self, post: NewPost) -> Result<Post, DatabaseError>;

    /// Replace title and content of post `id`. Fails with
    /// [`DatabaseError::NotFound`] when no such post exists.
    async fn update_post(&mut self, id: i32, title: &str, content: &str) -> Result<Post, DatabaseError>;

    /// Every post in the store, unfiltered and unpaginated
    async fn list_posts(&mut self) -> Result<Vec<Post>, DatabaseError>;

    async fn get_post(&mut self, id: i32) -> Result<Option<Post>, DatabaseError>;

    /// Round-trip to the store without touching data
    async fn ping(&mut self) -> Result<(), DatabaseError>;

    /// Release the underlying connection
    async fn close(self: Box<Self>) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Opens a fresh [`PostGateway`] for each request
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn PostGateway>, DatabaseError>;
}

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::gateway::{Connector, DatabaseError, PostGateway};
use crate::database::models::{NewPost, Post};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Post>,
    next_id: i32,
}

/// In-process post store shared by every gateway it hands out.
///
/// Stands in for the remote database in tests and `serve --memory`.
/// Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct MemoryConnector {
    table: Arc<RwLock<Table>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored post, ordered by id
    pub async fn snapshot(&self) -> Vec<Post> {
        self.table.read().await.rows.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self) -> Result<Box<dyn PostGateway>, DatabaseError> {
        Ok(Box::new(MemoryGateway {
            table: Arc::clone(&self.table),
        }))
    }
}

pub struct MemoryGateway {
    table: Arc<RwLock<Table>>,
}

#[async_trait]
impl PostGateway for MemoryGateway {
    async fn create_post(&mut self, post: NewPost) -> Result<Post, DatabaseError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let created = Post {
            id: table.next_id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
        };
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_post(&mut self, id: i32, title: &str, content: &str) -> Result<Post, DatabaseError> {
        let mut table = self.table.write().await;
        let post = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Post {} not found", id)))?;
        post.title = title.to_string();
        post.content = content.to_string();
        Ok(post.clone())
    }

    async fn list_posts(&mut self) -> Result<Vec<Post>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_post(&mut self, id: i32) -> Result<Option<Post>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn ping(&mut self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

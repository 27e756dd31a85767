use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `"Blog"` table, serialized with the column names clients expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(rename = "authorId")]
    #[sqlx(rename = "authorId")]
    pub author_id: i32,
}

/// Values for a post that does not exist yet; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

use std::sync::Arc;

use shared::{
    domain::PostId,
    error::{ApiError, ErrorCode},
    protocol::{Post, PostFields},
};
use tokio::sync::RwLock;

/// In-memory posts collection, kept in insertion order.
#[derive(Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    posts: Vec<Post>,
    last_id: i64,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. New ids continue after the largest numeric seed id.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let last_id = posts
            .iter()
            .filter_map(|post| post.id.as_number())
            .max()
            .unwrap_or(0)
            .max(0);
        Self {
            inner: Arc::new(RwLock::new(StoreInner { posts, last_id })),
        }
    }

    pub async fn list(&self) -> Vec<Post> {
        self.inner.read().await.posts.clone()
    }

    pub async fn get(&self, id: &PostId) -> Option<Post> {
        let guard = self.inner.read().await;
        guard.posts.iter().find(|post| &post.id == id).cloned()
    }

    /// Appends a post under the next numeric id.
    pub async fn insert(&self, fields: PostFields) -> Result<Post, ApiError> {
        let mut guard = self.inner.write().await;
        let next_id = guard.last_id.checked_add(1).ok_or_else(|| {
            ApiError::new(ErrorCode::Internal, "post id space is exhausted")
        })?;
        guard.last_id = next_id;
        let post = fields.with_id(PostId::Number(next_id));
        guard.posts.push(post.clone());
        Ok(post)
    }

    pub async fn replace(&self, id: &PostId, fields: PostFields) -> Option<Post> {
        let mut guard = self.inner.write().await;
        let slot = guard.posts.iter_mut().find(|post| &post.id == id)?;
        *slot = fields.with_id(id.clone());
        Some(slot.clone())
    }

    pub async fn remove(&self, id: &PostId) -> Option<Post> {
        let mut guard = self.inner.write().await;
        let index = guard.posts.iter().position(|post| &post.id == id)?;
        Some(guard.posts.remove(index))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;

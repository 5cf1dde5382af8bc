//! Client-side synchronization between a local post list and a remote
//! `/posts` collection resource.

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::PostId,
    protocol::{DeletedPost, Post, PostFields},
};

pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod transport;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::PostsController;
pub use error::{Operation, SyncError, ValidationError};
pub use state::{Action, Draft, Effect, Notice, NoticeKind, PostsState, ViewState};
pub use transport::HttpPostsApi;
pub use view::{render, View};

/// Remote collection resource holding the posts.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn create_post(&self, fields: &PostFields) -> Result<Post>;
    async fn update_post(&self, post: &Post) -> Result<Post>;
    async fn delete_post(&self, id: &PostId) -> Result<DeletedPost>;
}

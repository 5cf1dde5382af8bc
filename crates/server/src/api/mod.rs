use shared::{
    domain::{PostField, PostId},
    error::ApiError,
    protocol::{Post, PostFields},
};
use tracing::info;

use crate::store::PostStore;

#[derive(Clone)]
pub struct ApiContext {
    pub store: PostStore,
}

pub fn posts_route() -> &'static str {
    "/posts"
}

pub async fn list_posts(ctx: &ApiContext) -> Vec<Post> {
    ctx.store.list().await
}

pub async fn get_post(ctx: &ApiContext, id: &PostId) -> Result<Post, ApiError> {
    ctx.store.get(id).await.ok_or_else(|| missing(id))
}

pub async fn create_post(ctx: &ApiContext, fields: PostFields) -> Result<Post, ApiError> {
    ensure_complete(&fields)?;
    let post = ctx.store.insert(fields).await?;
    info!(post_id = %post.id, "created post");
    Ok(post)
}

/// Replaces a post. The id in the path wins over any id in the payload.
pub async fn update_post(
    ctx: &ApiContext,
    id: &PostId,
    fields: PostFields,
) -> Result<Post, ApiError> {
    ensure_complete(&fields)?;
    let post = ctx
        .store
        .replace(id, fields)
        .await
        .ok_or_else(|| missing(id))?;
    info!(post_id = %post.id, "updated post");
    Ok(post)
}

pub async fn delete_post(ctx: &ApiContext, id: &PostId) -> Result<Post, ApiError> {
    let post = ctx.store.remove(id).await.ok_or_else(|| missing(id))?;
    info!(post_id = %post.id, "deleted post");
    Ok(post)
}

fn ensure_complete(fields: &PostFields) -> Result<(), ApiError> {
    match fields.first_empty_field() {
        Some(PostField::Title) => Err(ApiError::validation("title must not be empty")),
        Some(PostField::Body) => Err(ApiError::validation("body must not be empty")),
        None => Ok(()),
    }
}

fn missing(id: &PostId) -> ApiError {
    ApiError::not_found(format!("post {id} not found"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

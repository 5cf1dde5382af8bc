use std::sync::Arc;

use shared::{
    domain::{PostField, PostId},
    protocol::{Post, PostFields},
};
use tracing::{debug, info, warn};

use crate::{
    error::{Operation, SyncError, ValidationError},
    state::{reduce, Action, Effect, PostsState},
    view::{render, View},
    PostsApi,
};

/// Drives the post list: one network call per operation, then one reducer
/// transition with the outcome. Failures end up in the state as a notice or
/// the error view and are never returned to the caller.
pub struct PostsController {
    api: Arc<dyn PostsApi>,
    state: PostsState,
}

impl PostsController {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            state: PostsState::default(),
        }
    }

    pub fn state(&self) -> &PostsState {
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        reduce(&mut self.state, action)
    }

    pub async fn fetch_all(&mut self) -> Vec<Effect> {
        self.dispatch(Action::FetchStarted);
        match self.api.list_posts().await {
            Ok(posts) => {
                info!(count = posts.len(), "fetched posts");
                self.dispatch(Action::FetchSucceeded(posts))
            }
            Err(err) => {
                let err = SyncError::network(Operation::Fetch, &err);
                warn!(error = %err, "failed to fetch posts");
                self.dispatch(Action::FetchFailed(err.to_string()))
            }
        }
    }

    /// Submits the draft: create when no edit is open, update otherwise.
    pub async fn submit(&mut self) -> Vec<Effect> {
        let draft = self.state.draft().clone();
        match self.state.editing().cloned() {
            None => self.create(draft.fields()).await,
            Some(id) => self.update(draft.fields().with_id(id)).await,
        }
    }

    pub async fn create(&mut self, fields: PostFields) -> Vec<Effect> {
        if let Err(err) = validate(&fields) {
            return self.dispatch(Action::ValidationFailed(err));
        }
        match self.api.create_post(&fields).await {
            Ok(post) => {
                info!(post_id = %post.id, "created post");
                self.dispatch(Action::Created(post))
            }
            Err(err) => self.request_failed(Operation::Create, &err),
        }
    }

    pub async fn update(&mut self, post: Post) -> Vec<Effect> {
        if let Err(err) = validate(&post.fields()) {
            return self.dispatch(Action::ValidationFailed(err));
        }
        match self.api.update_post(&post).await {
            Ok(updated) => {
                info!(post_id = %updated.id, "updated post");
                self.dispatch(Action::Updated(updated))
            }
            Err(err) => self.request_failed(Operation::Update, &err),
        }
    }

    pub async fn delete(&mut self, id: &PostId) -> Vec<Effect> {
        if self.state.is_editing() {
            debug!(post_id = %id, "delete ignored while an edit is open");
            return Vec::new();
        }
        match self.api.delete_post(id).await {
            Ok(deleted) => {
                if let Some(returned) = deleted.id().filter(|returned| *returned != id) {
                    debug!(post_id = %id, returned = %returned, "delete response names another id");
                }
                info!(post_id = %id, "deleted post");
                self.dispatch(Action::Deleted(id.clone()))
            }
            Err(err) => self.request_failed(Operation::Delete, &err),
        }
    }

    pub fn begin_edit(&mut self, id: &PostId) -> Vec<Effect> {
        match self.state.post(id).cloned() {
            Some(post) => self.dispatch(Action::EditStarted(post)),
            None => {
                debug!(post_id = %id, "edit requested for unknown post");
                Vec::new()
            }
        }
    }

    pub fn cancel_edit(&mut self) -> Vec<Effect> {
        self.dispatch(Action::EditCancelled)
    }

    pub fn set_field(&mut self, field: PostField, value: impl Into<String>) -> Vec<Effect> {
        self.dispatch(Action::FieldChanged {
            field,
            value: value.into(),
        })
    }

    pub fn dismiss_notice(&mut self) -> Vec<Effect> {
        self.dispatch(Action::NoticeDismissed)
    }

    fn request_failed(&mut self, operation: Operation, err: &anyhow::Error) -> Vec<Effect> {
        let err = SyncError::network(operation, err);
        warn!(error = %err, "request failed");
        self.dispatch(Action::RequestFailed(err))
    }
}

fn validate(fields: &PostFields) -> Result<(), ValidationError> {
    match fields.first_empty_field() {
        Some(PostField::Title) => Err(ValidationError::EmptyTitle),
        Some(PostField::Body) => Err(ValidationError::EmptyBody),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

//! Post list state and the reducer that owns every transition.
//!
//! `reduce` is the only way to change a [`PostsState`]. It never performs I/O;
//! the controller makes the network call and feeds the outcome back in as an
//! [`Action`]. Follow-up work for the view layer comes back as [`Effect`]s.

use shared::{
    domain::{PostField, PostId},
    protocol::{Post, PostFields},
};
use tracing::debug;

use crate::error::{SyncError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready,
}

/// Post being composed or edited. `id` is set only while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: Option<PostId>,
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn fields(&self) -> PostFields {
        PostFields::new(self.title.clone(), self.body.clone())
    }
}

impl From<Post> for Draft {
    fn from(post: Post) -> Self {
        Self {
            id: Some(post.id),
            title: post.title,
            body: post.body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl From<&SyncError> for Notice {
    fn from(err: &SyncError) -> Self {
        let kind = match err {
            SyncError::Validation(_) => NoticeKind::Validation,
            SyncError::Network { .. } => NoticeKind::Network,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Move input focus back to the title field.
    FocusTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FieldChanged { field: PostField, value: String },
    EditStarted(Post),
    EditCancelled,
    NoticeDismissed,
    ValidationFailed(ValidationError),
    FetchStarted,
    FetchSucceeded(Vec<Post>),
    FetchFailed(String),
    Created(Post),
    Updated(Post),
    Deleted(PostId),
    RequestFailed(SyncError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsState {
    posts: Vec<Post>,
    draft: Draft,
    editing: Option<PostId>,
    view: ViewState,
    notice: Option<Notice>,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            draft: Draft::default(),
            editing: None,
            view: ViewState::Loading,
            notice: None,
        }
    }
}

impl PostsState {
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Id of the post open for editing; `None` while composing a new post.
    pub fn editing(&self) -> Option<&PostId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
    }
}

pub fn reduce(state: &mut PostsState, action: Action) -> Vec<Effect> {
    match action {
        Action::FieldChanged { field, value } => {
            match field {
                PostField::Title => state.draft.title = value,
                PostField::Body => state.draft.body = value,
            }
            Vec::new()
        }
        Action::EditStarted(post) => {
            if let Some(current) = &state.editing {
                debug!(editing = %current, requested = %post.id, "edit already in progress");
                return Vec::new();
            }
            state.editing = Some(post.id.clone());
            state.draft = Draft::from(post);
            vec![Effect::FocusTitle]
        }
        Action::EditCancelled => {
            state.reset_draft();
            vec![Effect::FocusTitle]
        }
        Action::NoticeDismissed => {
            state.notice = None;
            Vec::new()
        }
        Action::ValidationFailed(err) => {
            state.notice = Some(Notice::from(&SyncError::from(err)));
            Vec::new()
        }
        Action::FetchStarted => {
            state.view = ViewState::Loading;
            Vec::new()
        }
        Action::FetchSucceeded(posts) => {
            state.posts = posts;
            state.view = ViewState::Ready;
            vec![Effect::FocusTitle]
        }
        Action::FetchFailed(message) => {
            state.view = ViewState::Error(message);
            Vec::new()
        }
        Action::Created(post) => {
            state.posts.push(post);
            state.reset_draft();
            state.notice = None;
            vec![Effect::FocusTitle]
        }
        Action::Updated(post) => {
            if let Some(slot) = state.posts.iter_mut().find(|p| p.id == post.id) {
                *slot = post;
            } else {
                debug!(post_id = %post.id, "updated post is no longer listed");
            }
            state.reset_draft();
            state.notice = None;
            vec![Effect::FocusTitle]
        }
        Action::Deleted(id) => {
            state.posts.retain(|post| post.id != id);
            state.notice = None;
            vec![Effect::FocusTitle]
        }
        Action::RequestFailed(err) => {
            state.notice = Some(Notice::from(&err));
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;

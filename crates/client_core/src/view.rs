//! Maps a [`PostsState`] onto one of three mutually exclusive views.

use shared::{domain::PostId, protocol::Post};

use crate::state::{Notice, PostsState, ViewState};

pub const LOADING_HEADING: &str = "Loading posts...";
pub const ERROR_HEADING: &str = "Error loading posts...";
pub const READY_HEADING: &str = "Welcome to the post machine!";
pub const ADD_LABEL: &str = "Add";
pub const UPDATE_LABEL: &str = "Update";
pub const CANCEL_EDIT_LABEL: &str = "Cancel Edit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading {
        heading: &'static str,
    },
    Error {
        heading: &'static str,
        detail: String,
    },
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub heading: &'static str,
    pub posts: Vec<PostItem>,
    pub form: FormView,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostItem {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub body: String,
    pub submit_label: &'static str,
    /// `Some` only while an edit is in progress.
    pub cancel_label: Option<&'static str>,
}

pub fn render(state: &PostsState) -> View {
    match state.view() {
        ViewState::Loading => View::Loading {
            heading: LOADING_HEADING,
        },
        ViewState::Error(detail) => View::Error {
            heading: ERROR_HEADING,
            detail: detail.clone(),
        },
        ViewState::Ready => View::Ready(render_ready(state)),
    }
}

fn render_ready(state: &PostsState) -> ReadyView {
    let editing = state.is_editing();
    let draft = state.draft();
    ReadyView {
        heading: READY_HEADING,
        posts: state
            .posts()
            .iter()
            .map(|post| post_item(post, !editing))
            .collect(),
        form: FormView {
            title: draft.title.clone(),
            body: draft.body.clone(),
            submit_label: if editing { UPDATE_LABEL } else { ADD_LABEL },
            cancel_label: editing.then_some(CANCEL_EDIT_LABEL),
        },
        notice: state.notice().cloned(),
    }
}

fn post_item(post: &Post, actions_enabled: bool) -> PostItem {
    PostItem {
        id: post.id.clone(),
        title: post.title.clone(),
        body: post.body.clone(),
        can_edit: actions_enabled,
        can_delete: actions_enabled,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;

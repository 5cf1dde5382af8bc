use serde::{Deserialize, Serialize};

use crate::domain::{PostField, PostId};

/// A persisted post as served by the collection resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// Post payload without an id, sent on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub body: String,
}

impl PostFields {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// First field that is empty, title checked before body.
    pub fn first_empty_field(&self) -> Option<PostField> {
        if self.title.is_empty() {
            Some(PostField::Title)
        } else if self.body.is_empty() {
            Some(PostField::Body)
        } else {
            None
        }
    }

    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
        }
    }
}

/// Body of a DELETE response.
///
/// Servers answer with the deleted post, a bare id, or an empty object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeletedPost {
    Post(Post),
    Id(PostId),
    IdOnly { id: PostId },
    Other(serde_json::Value),
}

impl DeletedPost {
    pub fn id(&self) -> Option<&PostId> {
        match self {
            DeletedPost::Post(post) => Some(&post.id),
            DeletedPost::Id(id) | DeletedPost::IdOnly { id } => Some(id),
            DeletedPost::Other(_) => None,
        }
    }
}

use std::fmt;

use thiserror::Error;
use url::Url;

/// Network round-trip a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Fetch => "fetching posts",
            Operation::Create => "creating post",
            Operation::Update => "editing post",
            Operation::Delete => "deleting post",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("post title must not be empty")]
    EmptyTitle,
    #[error("post body must not be empty")]
    EmptyBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error {operation}: {message}")]
    Network { operation: Operation, message: String },
}

impl SyncError {
    pub fn network(operation: Operation, err: &anyhow::Error) -> Self {
        SyncError::Network {
            operation,
            message: format!("{err:#}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid posts endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("posts endpoint must use http or https, got '{0}'")]
    UnsupportedScheme(Url),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

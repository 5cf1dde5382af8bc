use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Server-assigned post identifier.
///
/// Collection servers hand out either numeric or string ids, so the value is
/// kept opaque and compared exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl PostId {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            PostId::Number(value) => Some(*value),
            PostId::Text(_) => None,
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(value) => write!(f, "{value}"),
            PostId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        PostId::Number(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        PostId::Text(value.to_string())
    }
}

impl FromStr for PostId {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        // Only canonical integers become numbers so "007" keeps its spelling.
        Ok(match raw.parse::<i64>() {
            Ok(value) if value.to_string() == raw => PostId::Number(value),
            _ => PostId::Text(raw.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    Title,
    Body,
}

impl FromStr for PostField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(PostField::Title),
            "body" => Ok(PostField::Body),
            other => Err(format!("unknown post field '{other}'")),
        }
    }
}

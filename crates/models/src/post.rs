use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A single post record as stored and returned over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(id: u64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id, title: title.into(), content: content.into() }
    }
}

/// Create payload. Both fields must be present; empty strings are accepted.
///
/// Fields are optional at the serde level so that a missing field surfaces as
/// [`ModelError::MissingField`] instead of a deserialization failure.
/// A JSON `null` is indistinguishable from an absent field here and is
/// rejected the same way, since both fields are text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: Some(title.into()), content: Some(content.into()) }
    }

    /// Check presence of both fields and hand back the owned values.
    pub fn validate(self) -> Result<(String, String), ModelError> {
        match (self.title, self.content) {
            (Some(title), Some(content)) => Ok((title, content)),
            _ => Err(ModelError::MissingField),
        }
    }
}

/// Update payload: only the fields that are present get overwritten.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::post::Post;

/// Text fields a listing may be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Content,
}

impl SortField {
    pub const ALL: [SortField; 2] = [SortField::Title, SortField::Content];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Content => "content",
        }
    }

    /// Case-folded sort key for `post`.
    pub fn key(self, post: &Post) -> String {
        match self {
            SortField::Title => post.title.to_lowercase(),
            SortField::Content => post.content.to_lowercase(),
        }
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ModelError::InvalidSortField(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the exact value `desc` selects descending order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// A validated sort request, resolved once per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Raw `GET /api/posts` query string.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListQuery {
    pub fn sorted_by(field: &str, direction: &str) -> Self {
        Self { sort: Some(field.into()), direction: Some(direction.into()) }
    }

    /// Build from raw query pairs; the first value of a repeated key wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self { sort: first_value(pairs, "sort"), direction: first_value(pairs, "direction") }
    }

    /// `Ok(None)` when no sort was requested; an empty `sort` counts as none.
    pub fn sort_spec(&self) -> Result<Option<SortSpec>, ModelError> {
        let field = match self.sort.as_deref() {
            None | Some("") => return Ok(None),
            Some(raw) => raw.parse::<SortField>()?,
        };
        Ok(Some(SortSpec { field, direction: SortDirection::parse(self.direction.as_deref()) }))
    }
}

/// Raw `GET /api/posts/search` query string.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl SearchQuery {
    /// Build from raw query pairs; the first value of a repeated key wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self { title: first_value(pairs, "title"), content: first_value(pairs, "content") }
    }
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// Case-insensitive substring filter built from a [`SearchQuery`].
/// An empty needle matches every post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFilter {
    title: String,
    content: String,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        contains_folded(&post.title, &self.title) && contains_folded(&post.content, &self.content)
    }
}

impl From<SearchQuery> for PostFilter {
    fn from(q: SearchQuery) -> Self {
        Self {
            title: q.title.unwrap_or_default().to_lowercase(),
            content: q.content.unwrap_or_default().to_lowercase(),
        }
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

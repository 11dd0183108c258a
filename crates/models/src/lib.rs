//! Plain data types shared by the service and HTTP layers.
//! - `post`: the post record and its create/update payloads.
//! - `query`: list/search query parameters and their typed, validated forms.

pub mod errors;
pub mod post;
pub mod query;

pub use post::{NewPost, Post, PostPatch};
pub use query::{ListQuery, PostFilter, SearchQuery, SortDirection, SortField, SortSpec};

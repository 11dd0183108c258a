use async_trait::async_trait;
use models::{ListQuery, NewPost, Post, PostPatch, SearchQuery};

use crate::errors::ServiceError;

/// Storage abstraction for posts, as consumed by the HTTP handlers.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, ServiceError>;
    async fn create(&self, input: NewPost) -> Result<Post, ServiceError>;
    async fn search(&self, query: SearchQuery) -> Vec<Post>;
    async fn get(&self, id: u64) -> Result<Post, ServiceError>;
    async fn update(&self, id: u64, patch: PostPatch) -> Result<Post, ServiceError>;
    /// Removes the post and returns it.
    async fn delete(&self, id: u64) -> Result<Post, ServiceError>;
}

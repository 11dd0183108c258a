//! Service layer for the post collection.
//! - `post_store`: the in-memory, lock-guarded collection and its operations.
//! - `repository`: trait the HTTP layer depends on, so handlers never see the concrete store.
//! - `seed`: the posts a fresh process starts with.

pub mod errors;
pub mod post_store;
pub mod repository;
pub mod seed;

pub use errors::ServiceError;
pub use post_store::PostStore;
pub use repository::PostRepository;

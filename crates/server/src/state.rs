use std::sync::Arc;

use service::{PostRepository, PostStore};

/// Shared handler state. The repository is injected here rather than living
/// in a global, so tests and alternative stores plug in the same way.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new<R: PostRepository + 'static>(repo: R) -> Self {
        Self { posts: Arc::new(repo) }
    }

    /// In-memory store, optionally holding the startup posts.
    pub fn in_memory(seed: bool) -> Self {
        if seed {
            Self::new(PostStore::seeded())
        } else {
            Self::new(PostStore::new())
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use models::{ListQuery, NewPost, Post, PostFilter, PostPatch, SearchQuery, SortDirection, SortSpec};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::repository::PostRepository;
use crate::seed::seed_posts;

/// In-memory post collection kept in insertion order.
///
/// Every operation takes the lock once for its whole duration, so
/// read-modify-write steps such as id assignment on create are atomic.
/// Cloning is cheap and shares the same collection.
#[derive(Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<Vec<Post>>>,
}

impl PostStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `posts` in the given order. Ids are expected to be unique.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { inner: Arc::new(RwLock::new(posts)) }
    }

    /// Store holding the startup posts.
    pub fn seeded() -> Self {
        Self::with_posts(seed_posts())
    }

    /// Snapshot of all posts, optionally sorted.
    pub async fn list(&self, sort: Option<SortSpec>) -> Vec<Post> {
        let mut posts = self.inner.read().await.clone();
        if let Some(spec) = sort {
            sort_posts(&mut posts, spec);
        }
        posts
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, ServiceError> {
        let (title, content) = input.validate()?;
        let mut posts = self.inner.write().await;
        let id = next_id(&posts);
        let post = Post { id, title, content };
        posts.push(post.clone());
        info!(post_id = id, "post created");
        Ok(post)
    }

    /// Posts matching `filter`, in collection order.
    pub async fn search(&self, filter: &PostFilter) -> Vec<Post> {
        let posts = self.inner.read().await;
        posts.iter().filter(|p| filter.matches(p)).cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Result<Post, ServiceError> {
        let posts = self.inner.read().await;
        posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn update(&self, id: u64, patch: PostPatch) -> Result<Post, ServiceError> {
        let mut posts = self.inner.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        patch.apply_to(post);
        info!(post_id = id, "post updated");
        Ok(post.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<Post, ServiceError> {
        let mut posts = self.inner.write().await;
        let idx = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        let removed = posts.remove(idx);
        info!(post_id = id, remaining = posts.len(), "post deleted");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// Max id plus one; 1 for an empty collection. A deleted maximum id is
/// handed out again.
fn next_id(posts: &[Post]) -> u64 {
    posts.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

/// Stable ascending sort on the case-folded field. Descending reverses the
/// ascending result as a whole, so equal keys come out in reverse insertion order.
pub fn sort_posts(posts: &mut [Post], spec: SortSpec) {
    posts.sort_by_cached_key(|p| spec.field.key(p));
    if spec.direction == SortDirection::Desc {
        posts.reverse();
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, ServiceError> {
        let spec = query.sort_spec()?;
        debug!(?spec, "listing posts");
        Ok(PostStore::list(self, spec).await)
    }

    async fn create(&self, input: NewPost) -> Result<Post, ServiceError> {
        PostStore::create(self, input).await
    }

    async fn search(&self, query: SearchQuery) -> Vec<Post> {
        PostStore::search(self, &PostFilter::from(query)).await
    }

    async fn get(&self, id: u64) -> Result<Post, ServiceError> {
        PostStore::get(self, id).await
    }

    async fn update(&self, id: u64, patch: PostPatch) -> Result<Post, ServiceError> {
        PostStore::update(self, id, patch).await
    }

    async fn delete(&self, id: u64) -> Result<Post, ServiceError> {
        PostStore::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;
    use models::SortField;

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    fn titled(pairs: &[(&str, u64)]) -> Vec<Post> {
        pairs.iter().map(|(t, id)| Post::new(*id, *t, "")).collect()
    }

    #[tokio::test]
    async fn create_from_empty_assigns_sequential_ids() {
        let store = PostStore::new();
        for n in 1..=5u64 {
            let post = store.create(NewPost::new(format!("t{n}"), "c")).await.expect("create");
            assert_eq!(post.id, n);
        }
        assert_eq!(ids(&store.list(None).await), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn create_requires_both_fields_and_leaves_store_untouched() {
        let store = PostStore::seeded();
        let err = store
            .create(NewPost { title: Some("only title".into()), content: None })
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Model(ModelError::MissingField));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn deleting_max_id_then_creating_reuses_it() {
        let store = PostStore::seeded();
        store.delete(2).await.expect("delete");
        let post = store.create(NewPost::new("T", "C")).await.expect("create");
        assert_eq!(post.id, 2);
        assert_eq!(ids(&store.list(None).await), vec![1, 2]);
    }

    #[tokio::test]
    async fn get_finds_by_id() {
        let store = PostStore::seeded();
        assert_eq!(store.get(2).await.expect("get").title, "Second post");
        assert_eq!(store.get(3).await, Err(ServiceError::NotFound(3)));
    }

    #[tokio::test]
    async fn empty_until_first_create() {
        let store = PostStore::new();
        assert!(store.is_empty().await);
        store.create(NewPost::new("T", "C")).await.expect("create");
        assert!(!store.is_empty().await);
        store.delete(1).await.expect("delete");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn deleting_lower_id_does_not_reuse_it() {
        let store = PostStore::seeded();
        store.delete(1).await.expect("delete");
        let post = store.create(NewPost::new("T", "C")).await.expect("create");
        assert_eq!(post.id, 3);
    }

    #[test]
    fn sort_ascending_and_descending() {
        let spec = |direction| SortSpec { field: SortField::Title, direction };

        let mut posts = titled(&[("b", 1), ("a", 2)]);
        sort_posts(&mut posts, spec(SortDirection::Asc));
        assert_eq!(ids(&posts), vec![2, 1]);

        let mut posts = titled(&[("b", 1), ("a", 2)]);
        sort_posts(&mut posts, spec(SortDirection::Desc));
        assert_eq!(ids(&posts), vec![1, 2]);
    }

    #[test]
    fn sort_descending_reverses_ties_too() {
        let spec = |direction| SortSpec { field: SortField::Title, direction };

        let mut posts = titled(&[("a", 1), ("a", 2), ("b", 3)]);
        sort_posts(&mut posts, spec(SortDirection::Asc));
        assert_eq!(ids(&posts), vec![1, 2, 3]);

        sort_posts(&mut posts, spec(SortDirection::Desc));
        assert_eq!(ids(&posts), vec![3, 2, 1]);
    }

    #[test]
    fn sort_ignores_case_and_keeps_insertion_order_for_ties() {
        let mut posts = titled(&[("beta", 1), ("Alpha", 2), ("ALPHA", 3), ("alpha", 4)]);
        sort_posts(&mut posts, SortSpec { field: SortField::Title, direction: SortDirection::Asc });
        assert_eq!(ids(&posts), vec![2, 3, 4, 1]);
    }

    #[tokio::test]
    async fn list_sorts_snapshot_without_reordering_store() {
        let store = PostStore::seeded();
        let sorted = store
            .list(Some(SortSpec { field: SortField::Content, direction: SortDirection::Desc }))
            .await;
        assert_eq!(ids(&sorted), vec![2, 1]);
        assert_eq!(ids(&store.list(None).await), vec![1, 2]);
    }

    #[tokio::test]
    async fn repository_list_rejects_unknown_field() {
        let store = PostStore::seeded();
        let err = PostRepository::list(&store, &ListQuery::sorted_by("id", "asc"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Model(ModelError::InvalidSortField("id".into())));
        assert_eq!(err.to_string(), "Invalid sort field: id");
    }

    #[tokio::test]
    async fn search_filters_in_collection_order() {
        let store = PostStore::seeded();
        let hits = PostRepository::search(
            &store,
            SearchQuery { title: Some("First".into()), content: None },
        )
        .await;
        assert_eq!(ids(&hits), vec![1]);

        let all = PostRepository::search(&store, SearchQuery::default()).await;
        assert_eq!(ids(&all), vec![1, 2]);

        let hits = PostRepository::search(
            &store,
            SearchQuery { title: Some("post".into()), content: Some("SECOND".into()) },
        )
        .await;
        assert_eq!(ids(&hits), vec![2]);
    }

    #[tokio::test]
    async fn update_is_partial() {
        let store = PostStore::seeded();
        let post = store
            .update(1, PostPatch { title: None, content: Some("x".into()) })
            .await
            .expect("update");
        assert_eq!(post, Post::new(1, "First post", "x"));
        assert_eq!(store.list(None).await[0], post);
    }

    #[tokio::test]
    async fn update_and_delete_missing_id_is_not_found() {
        let store = PostStore::seeded();
        assert_eq!(
            store.update(42, PostPatch::default()).await,
            Err(ServiceError::NotFound(42))
        );
        let err = store.delete(42).await.unwrap_err();
        assert_eq!(err.to_string(), "Post with id 42 not found");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_post() {
        let store = PostStore::seeded();
        let removed = store.delete(1).await.expect("delete");
        assert_eq!(removed.id, 1);
        assert_eq!(ids(&store.list(None).await), vec![2]);
    }

    #[tokio::test]
    async fn concurrent_creates_keep_ids_unique() {
        let store = PostStore::new();
        let mut handles = Vec::new();
        for n in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(NewPost::new(format!("t{n}"), "c")).await
            }));
        }
        for h in handles {
            h.await.expect("join").expect("create");
        }
        let mut got = ids(&store.list(None).await);
        got.sort_unstable();
        assert_eq!(got, (1..=32u64).collect::<Vec<_>>());
    }
}

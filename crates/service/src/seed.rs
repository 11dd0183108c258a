use models::Post;

/// Posts present when the process starts.
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post::new(1, "First post", "This is the first post."),
        Post::new(2, "Second post", "This is the second post."),
    ]
}

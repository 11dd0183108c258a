use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use common::types::Message;
use models::{ListQuery, NewPost, Post, PostPatch, SearchQuery};

use crate::errors::ApiError;
use crate::state::AppState;

/// Raw query pairs; repeated keys are resolved by the model types.
type QueryPairs = Vec<(String, String)>;

/// `GET /api/posts?sort=title|content&direction=asc|desc`
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(pairs) = query?;
    let posts = state.posts.list(&ListQuery::from_pairs(&pairs)).await?;
    Ok(Json(posts))
}

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let Json(input) = payload?;
    let post = state.posts.create(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /api/posts/search?title=..&content=..`
pub async fn search_posts(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(pairs) = query?;
    Ok(Json(state.posts.search(SearchQuery::from_pairs(&pairs)).await))
}

/// `PUT /api/posts/:id`
///
/// An unknown id is reported as 404 before the body is looked at.
pub async fn update_post(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<PostPatch>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Path(id) = id?;
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            state.posts.get(id).await?;
            return Err(rejection.into());
        }
    };
    let post = state.posts.update(id, patch).await?;
    Ok(Json(post))
}

/// `DELETE /api/posts/:id`
pub async fn delete_post(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    let removed = state.posts.delete(id).await?;
    Ok(Json(Message::new(format!("Post with id {} deleted successfully.", removed.id))))
}

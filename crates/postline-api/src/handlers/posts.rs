use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use postline_core::models::{CreatePostRequest, CreatedPostResponse, Post};
use postline_core::AppError;

use crate::auth::OrgContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/public/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Submission ingested", body = CreatedPostResponse),
        (status = 400, description = "Invalid submission", body = ErrorResponse),
        (status = 404, description = "Unknown integration", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(organization_id = %org.organization_id))]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    org: OrgContext,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state.ingest.ingest(org.organization_id, &request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Publish-date window for the listing endpoint. Defaults to the week
/// starting now.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/public/v1/posts",
    tag = "posts",
    params(
        ("startDate" = Option<String>, Query, description = "Window start (RFC 3339), defaults to now"),
        ("endDate" = Option<String>, Query, description = "Window end (RFC 3339), defaults to start + 7 days")
    ),
    responses(
        (status = 200, description = "Posts in the window", body = [Post]),
        (status = 401, description = "Missing organization", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(organization_id = %org.organization_id))]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    org: OrgContext,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, HttpAppError> {
    let start = query.start_date.unwrap_or_else(Utc::now);
    let end = query.end_date.unwrap_or(start + Duration::days(7));

    if end <= start {
        return Err(
            AppError::BadRequest("endDate must be after startDate".to_string()).into(),
        );
    }

    let posts = state.db.posts.list_posts(org.organization_id, start, end).await?;
    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/public/v1/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(organization_id = %org.organization_id, post_id = %id))]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    org: OrgContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, HttpAppError> {
    let post = state
        .db
        .posts
        .get_post(org.organization_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/public/v1/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id; the post's whole group is deleted")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(organization_id = %org.organization_id, post_id = %id))]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    org: OrgContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = state.posts.delete_post(org.organization_id, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Post not found".to_string()).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

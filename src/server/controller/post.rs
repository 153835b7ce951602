use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::PostKind;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        post::{PaginatedPostsDto, PostDto, PostFormDto, PostKindDto},
    },
    server::{
        controller::{extract::ApiJson, param::{default_entries, PaginationParam}},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{post::PostParams, PageParams},
        service::post::PostService,
        state::AppState,
    },
};

/// Tag for grouping post endpoints in OpenAPI documentation
pub static POST_TAG: &str = "post";

/// Pagination plus an optional post kind filter.
#[derive(Deserialize)]
pub struct PostQueryParam {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub kind: Option<PostKindDto>,
}

impl PostQueryParam {
    fn into_parts(self) -> (PageParams, Option<PostKind>) {
        let page = PaginationParam {
            page: self.page,
            entries: self.entries,
        }
        .into_page();
        (page, self.kind.map(Into::into))
    }
}

/// Create a blog post or announcement.
///
/// The Markdown body is stored as written and rendered to HTML whenever the post is read.
///
/// # Access Control
/// - `Admin` - Only admins can write posts
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Post form (title, slug, kind, Markdown body, tier gate, status)
///
/// # Returns
/// - `201 Created` - The new post
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `409 Conflict` - Slug already used
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/posts",
    tag = POST_TAG,
    request_body = PostFormDto,
    responses(
        (status = 201, description = "Created post", body = PostDto),
        (status = 400, description = "Invalid post data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<PostFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let post = PostService::new(&state.db)
        .create(PostParams::from_dto(payload), user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(post.into_dto())))
}

/// Get a page of posts in every status, optionally of one kind.
///
/// # Access Control
/// - `Admin` - Only admins can see drafts
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Page, entries per page and optional post kind
///
/// # Returns
/// - `200 OK` - Paginated posts
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/posts",
    tag = POST_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("kind" = Option<PostKindDto>, Query, description = "Only posts of this kind")
    ),
    responses(
        (status = 200, description = "Posts in every status", body = PaginatedPostsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_posts(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PostQueryParam>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let (page, kind) = query.into_parts();
    let page = PostService::new(&state.db).get_all(page, kind).await?;

    Ok((StatusCode::OK, Json(page.into_dto(&viewer))))
}

/// Update a post.
///
/// # Access Control
/// - `Admin` - Only admins can edit posts
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Post ID
/// - `payload` - Post form
///
/// # Returns
/// - `200 OK` - Updated post
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No post with this ID
/// - `409 Conflict` - Slug already used
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = PostFormDto,
    responses(
        (status = 200, description = "Updated post", body = PostDto),
        (status = 400, description = "Invalid post data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<PostFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let post = PostService::new(&state.db)
        .update(id, PostParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Delete a post.
///
/// # Access Control
/// - `Admin` - Only admins can delete posts
#[utoipa::path(
    delete,
    path = "/api/admin/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    PostService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List published posts, newest first, optionally of one kind.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = POST_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("kind" = Option<PostKindDto>, Query, description = "Only posts of this kind")
    ),
    responses(
        (status = 200, description = "Published posts, newest first", body = PaginatedPostsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_published_posts(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PostQueryParam>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let (page, kind) = query.into_parts();
    let page = PostService::new(&state.db).get_published(page, kind).await?;

    Ok((StatusCode::OK, Json(page.into_dto(&viewer))))
}

/// Get a published post by slug with its rendered HTML body.
///
/// # Access Control
/// - Public, but posts gated above the viewer's tier are refused
///
/// # Returns
/// - `200 OK` - Post with rendered body
/// - `403 Forbidden` - Membership tier too low
/// - `404 Not Found` - Unknown slug or post not published
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = POST_TAG,
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post with rendered HTML body", body = PostDto),
        (status = 403, description = "Membership tier too low", body = ErrorDto),
        (status = 404, description = "Post not found or not published", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let post = PostService::new(&state.db)
        .get_by_slug(&slug, &viewer)
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

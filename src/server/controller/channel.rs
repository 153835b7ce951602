use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        channel::{ChannelDto, ChannelFormDto, VideoDto, VideoFormDto},
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::channel::{ChannelParams, VideoParams},
        service::channel::ChannelService,
        state::AppState,
    },
};

/// Tag for grouping channel and video endpoints in OpenAPI documentation
pub static CHANNEL_TAG: &str = "channel";

/// Create a video channel.
///
/// When the Discord bot is running a matching Discord text channel is created as well; the
/// channel is stored even if that step fails.
///
/// # Access Control
/// - `Admin` - Only admins can create channels
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `payload` - Channel form (name, slug, description, tier gate)
///
/// # Returns
/// - `201 Created` - The new channel
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `409 Conflict` - Slug already used
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/channels",
    tag = CHANNEL_TAG,
    request_body = ChannelFormDto,
    responses(
        (status = 201, description = "Created channel, linked to Discord when possible", body = ChannelDto),
        (status = 400, description = "Invalid channel data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_channel(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<ChannelFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let channel = ChannelService::new(&state.db, &state.integrations)
        .create(ChannelParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(channel.into_dto(&viewer))))
}

/// Get every channel for the admin panel.
///
/// # Access Control
/// - `Admin` - Only admins can list all channels
///
/// # Returns
/// - `200 OK` - All channels
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/channels",
    tag = CHANNEL_TAG,
    responses(
        (status = 200, description = "All channels", body = Vec<ChannelDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_channels(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let channels = ChannelService::new(&state.db, &state.integrations)
        .get_all()
        .await?;
    let dto: Vec<ChannelDto> = channels.into_iter().map(|c| c.into_dto(&viewer)).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Update a channel's name, slug, description and tier gate.
///
/// # Access Control
/// - `Admin` - Only admins can edit channels
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Channel ID
/// - `payload` - Channel form
///
/// # Returns
/// - `200 OK` - Updated channel
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No channel with this ID
/// - `409 Conflict` - Slug already used
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/channels/{id}",
    tag = CHANNEL_TAG,
    params(
        ("id" = i32, Path, description = "Channel ID")
    ),
    request_body = ChannelFormDto,
    responses(
        (status = 200, description = "Updated channel", body = ChannelDto),
        (status = 400, description = "Invalid channel data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_channel(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ChannelFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let channel = ChannelService::new(&state.db, &state.integrations)
        .update(id, ChannelParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto(&viewer))))
}

/// Delete a channel and its videos.
///
/// # Access Control
/// - `Admin` - Only admins can delete channels
///
/// # Returns
/// - `204 No Content` - Channel deleted
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No channel with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/admin/channels/{id}",
    tag = CHANNEL_TAG,
    params(
        ("id" = i32, Path, description = "Channel ID")
    ),
    responses(
        (status = 204, description = "Channel and its videos deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_channel(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ChannelService::new(&state.db, &state.integrations)
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get every video of a channel, drafts included.
///
/// # Access Control
/// - `Admin` - Only admins can see unpublished videos
#[utoipa::path(
    get,
    path = "/api/admin/channels/{id}/videos",
    tag = CHANNEL_TAG,
    params(
        ("id" = i32, Path, description = "Channel ID")
    ),
    responses(
        (status = 200, description = "Videos in every status", body = Vec<VideoDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_channel_videos(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let videos = ChannelService::new(&state.db, &state.integrations)
        .get_videos(id)
        .await?;
    let dto: Vec<VideoDto> = videos.into_iter().map(|v| v.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Add a video to a channel.
///
/// # Access Control
/// - `Admin` - Only admins can add videos
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Channel ID
/// - `payload` - Video form (title, http(s) URL, description, position, status)
///
/// # Returns
/// - `201 Created` - The new video
/// - `400 Bad Request` - Missing title or non-http(s) URL
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No channel with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/channels/{id}/videos",
    tag = CHANNEL_TAG,
    params(
        ("id" = i32, Path, description = "Channel ID")
    ),
    request_body = VideoFormDto,
    responses(
        (status = 201, description = "Created video", body = VideoDto),
        (status = 400, description = "Missing title or non-http(s) URL", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_video(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<VideoFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let video = ChannelService::new(&state.db, &state.integrations)
        .create_video(id, VideoParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(video.into_dto())))
}

/// Update a video.
///
/// # Access Control
/// - `Admin` - Only admins can edit videos
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Video ID
/// - `payload` - Video form
///
/// # Returns
/// - `200 OK` - Updated video
/// - `400 Bad Request` - Missing title or non-http(s) URL
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No video with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/videos/{id}",
    tag = CHANNEL_TAG,
    params(
        ("id" = i32, Path, description = "Video ID")
    ),
    request_body = VideoFormDto,
    responses(
        (status = 200, description = "Updated video", body = VideoDto),
        (status = 400, description = "Missing title or non-http(s) URL", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Video not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_video(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<VideoFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let video = ChannelService::new(&state.db, &state.integrations)
        .update_video(id, VideoParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(video.into_dto())))
}

/// Delete a video.
///
/// # Access Control
/// - `Admin` - Only admins can delete videos
#[utoipa::path(
    delete,
    path = "/api/admin/videos/{id}",
    tag = CHANNEL_TAG,
    params(
        ("id" = i32, Path, description = "Video ID")
    ),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Video not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_video(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ChannelService::new(&state.db, &state.integrations)
        .delete_video(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List channels. Channels above the viewer's tier are listed as locked.
#[utoipa::path(
    get,
    path = "/api/channels",
    tag = CHANNEL_TAG,
    responses(
        (status = 200, description = "Channels, locked when above the viewer's tier", body = Vec<ChannelDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_channels(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let channels = ChannelService::new(&state.db, &state.integrations)
        .get_all()
        .await?;
    let dto: Vec<ChannelDto> = channels.into_iter().map(|c| c.into_dto(&viewer)).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get the published videos of a channel, in channel order.
///
/// # Access Control
/// - Public, but channels gated above the viewer's tier are refused
///
/// # Returns
/// - `200 OK` - Published videos
/// - `403 Forbidden` - Membership tier too low
/// - `404 Not Found` - Unknown slug
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/channels/{slug}/videos",
    tag = CHANNEL_TAG,
    params(
        ("slug" = String, Path, description = "Channel slug")
    ),
    responses(
        (status = 200, description = "Published videos of the channel", body = Vec<VideoDto>),
        (status = 403, description = "Membership tier too low", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_published_videos(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let (_, videos) = ChannelService::new(&state.db, &state.integrations)
        .get_published_videos(&slug, &viewer)
        .await?;
    let dto: Vec<VideoDto> = videos.into_iter().map(|v| v.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

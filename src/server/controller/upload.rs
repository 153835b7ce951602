use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, upload::UploadDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::upload::UploadService,
        state::AppState,
    },
};

/// Tag for grouping upload endpoints in OpenAPI documentation
pub static UPLOAD_TAG: &str = "upload";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Deserialize)]
pub struct UploadParam {
    #[serde(default)]
    pub filename: String,
}

/// Store a file in blob storage and return its public URL.
///
/// The request body is the raw file; its `Content-Type` is kept and defaults to
/// `application/octet-stream`.
///
/// # Access Control
/// - `Admin` - Only admins can upload files
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `params` - File name to store under
/// - `headers` - Request headers, for the content type
/// - `body` - File bytes
///
/// # Returns
/// - `201 Created` - Public URL of the stored file
/// - `400 Bad Request` - Empty body or missing file name
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Blob storage not configured or unreachable
#[utoipa::path(
    put,
    path = "/api/admin/uploads",
    tag = UPLOAD_TAG,
    params(
        ("filename" = String, Query, description = "Name to store the file under")
    ),
    request_body(content = Vec<u8>, description = "Raw file bytes", content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Public URL of the stored file", body = UploadDto),
        (status = 400, description = "Empty body or missing file name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Blob storage error", body = ErrorDto)
    ),
)]
pub async fn upload(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UploadParam>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let url = UploadService::new(&state.integrations)
        .upload(&params.filename, body.to_vec(), content_type)
        .await?;

    Ok((StatusCode::CREATED, Json(UploadDto { url })))
}

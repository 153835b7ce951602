use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        program::{PaginatedProgramsDto, ProgramDto, ProgramFormDto},
    },
    server::{
        controller::{extract::ApiJson, param::PaginationParam},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::program::ProgramParams,
        service::program::ProgramService,
        state::AppState,
    },
};

/// Tag for grouping program endpoints in OpenAPI documentation
pub static PROGRAM_TAG: &str = "program";

/// Create a new program.
///
/// # Access Control
/// - `Admin` - Only admins can create programs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Program data including slug, title, required tier and status
///
/// # Returns
/// - `201 Created` - Created program
/// - `400 Bad Request` - Invalid program data
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `409 Conflict` - Slug already used by another program
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/programs",
    tag = PROGRAM_TAG,
    request_body = ProgramFormDto,
    responses(
        (status = 201, description = "Created program", body = ProgramDto),
        (status = 400, description = "Invalid program data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_program(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<ProgramFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let program = ProgramService::new(&state.db)
        .create(ProgramParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(program.into_dto())))
}

/// Get a page of programs in every status.
///
/// # Access Control
/// - `Admin` - Only admins can see draft and archived programs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `pagination` - Page number and entries per page
///
/// # Returns
/// - `200 OK` - Paginated programs
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/programs",
    tag = PROGRAM_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Programs in every status", body = PaginatedProgramsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_programs(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let page = ProgramService::new(&state.db)
        .get_all(pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&viewer))))
}

/// Update a program.
///
/// # Access Control
/// - `Admin` - Only admins can update programs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Program ID
/// - `payload` - Replacement program data
///
/// # Returns
/// - `200 OK` - Updated program
/// - `400 Bad Request` - Invalid program data
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No program with this ID
/// - `409 Conflict` - Slug already used by another program
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/programs/{id}",
    tag = PROGRAM_TAG,
    params(
        ("id" = i32, Path, description = "Program ID")
    ),
    request_body = ProgramFormDto,
    responses(
        (status = 200, description = "Updated program", body = ProgramDto),
        (status = 400, description = "Invalid program data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_program(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ProgramFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let program = ProgramService::new(&state.db)
        .update(id, ProgramParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(program.into_dto())))
}

/// Delete a program.
///
/// # Access Control
/// - `Admin` - Only admins can delete programs
///
/// # Returns
/// - `204 No Content` - Program deleted
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No program with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/admin/programs/{id}",
    tag = PROGRAM_TAG,
    params(
        ("id" = i32, Path, description = "Program ID")
    ),
    responses(
        (status = 204, description = "Program deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_program(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ProgramService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get a page of published programs.
///
/// Anonymous visitors may browse. Programs above the viewer's tier are returned
/// locked, without their body.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - Optional session used to resolve the viewer's tier
/// - `pagination` - Page number and entries per page
///
/// # Returns
/// - `200 OK` - Paginated programs
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/programs",
    tag = PROGRAM_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Published programs, locked when above the viewer's tier", body = PaginatedProgramsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_published_programs(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let page = ProgramService::new(&state.db)
        .get_published(pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&viewer))))
}

/// Get a published program by slug.
///
/// # Access Control
/// - Public for free programs, otherwise the viewer's tier must reach the program's tier
///
/// # Returns
/// - `200 OK` - Program detail
/// - `403 Forbidden` - Membership tier too low
/// - `404 Not Found` - Program missing or not published
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/programs/{slug}",
    tag = PROGRAM_TAG,
    params(
        ("slug" = String, Path, description = "Program slug")
    ),
    responses(
        (status = 200, description = "Program detail", body = ProgramDto),
        (status = 403, description = "Membership tier too low", body = ErrorDto),
        (status = 404, description = "Program not found or not published", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_program(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let program = ProgramService::new(&state.db)
        .get_by_slug(&slug, &viewer)
        .await?;

    Ok((StatusCode::OK, Json(program.into_dto())))
}

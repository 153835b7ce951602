use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        personalized_program::{
            ChecklistItemDto, PersonalizedProgramDto, PersonalizedProgramFormDto,
            ToggleChecklistItemDto,
        },
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::personalized_program::PersonalizedProgramParams,
        service::personalized_program::PersonalizedProgramService,
        state::AppState,
    },
};

/// Tag for grouping personalized program endpoints in OpenAPI documentation
pub static PERSONALIZED_PROGRAM_TAG: &str = "personalized_program";

/// Optional member filter of the admin listing.
#[derive(Deserialize)]
pub struct MemberFilterParam {
    pub user_id: Option<i32>,
}

/// Assign a personalized program to a member.
///
/// The checklist is generated from the date range, training weekdays and daily tasks, and
/// stored together with the program.
///
/// # Access Control
/// - `Admin` - Only coaches with admin access can assign programs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Program form (member, title, notes, dates, training days, tasks, status)
///
/// # Returns
/// - `201 Created` - Program with its checklist and progress
/// - `400 Bad Request` - Blank title, inverted or over-long range, or no training days
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - Unknown member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/personalized-programs",
    tag = PERSONALIZED_PROGRAM_TAG,
    request_body = PersonalizedProgramFormDto,
    responses(
        (status = 201, description = "Created program with its generated checklist", body = PersonalizedProgramDto),
        (status = 400, description = "Invalid dates, training days or tasks", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_personalized_program(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<PersonalizedProgramFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (program, items) = PersonalizedProgramService::new(&state.db)
        .create(PersonalizedProgramParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(program.into_dto(items, true))))
}

/// Get personalized programs with their progress, optionally for one member.
///
/// # Access Control
/// - `Admin` - Only admins can see every member's programs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `filter` - Optional `user_id` to restrict the list to one member
///
/// # Returns
/// - `200 OK` - Programs with checklists and progress
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/personalized-programs",
    tag = PERSONALIZED_PROGRAM_TAG,
    params(
        ("user_id" = Option<i32>, Query, description = "Only programs of this member")
    ),
    responses(
        (status = 200, description = "Programs with their progress", body = Vec<PersonalizedProgramDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_personalized_programs(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<MemberFilterParam>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let programs = PersonalizedProgramService::new(&state.db)
        .get_all(filter.user_id)
        .await?;
    let dto: Vec<PersonalizedProgramDto> = programs
        .into_iter()
        .map(|(program, items)| program.into_dto(items, false))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Update a personalized program.
///
/// The checklist is regenerated only when the dates, training days or tasks changed. Items
/// that keep their date and title stay completed.
///
/// # Access Control
/// - `Admin` - Only admins can edit programs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Program ID
/// - `payload` - Program form
///
/// # Returns
/// - `200 OK` - Updated program with its checklist
/// - `400 Bad Request` - Blank title or unusable schedule
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - Unknown program or member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/personalized-programs/{id}",
    tag = PERSONALIZED_PROGRAM_TAG,
    params(
        ("id" = i32, Path, description = "Personalized program ID")
    ),
    request_body = PersonalizedProgramFormDto,
    responses(
        (status = 200, description = "Updated program, checklist regenerated when the schedule changed", body = PersonalizedProgramDto),
        (status = 400, description = "Invalid dates, training days or tasks", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Program or member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_personalized_program(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<PersonalizedProgramFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (program, items) = PersonalizedProgramService::new(&state.db)
        .update(id, PersonalizedProgramParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(program.into_dto(items, true))))
}

/// Delete a personalized program and its checklist.
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
    path = "/api/admin/personalized-programs/{id}",
    tag = PERSONALIZED_PROGRAM_TAG,
    params(
        ("id" = i32, Path, description = "Personalized program ID")
    ),
    responses(
        (status = 204, description = "Program and checklist deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_personalized_program(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    PersonalizedProgramService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the current member's programs with checklist progress.
#[utoipa::path(
    get,
    path = "/api/me/programs",
    tag = PERSONALIZED_PROGRAM_TAG,
    responses(
        (status = 200, description = "The member's programs with progress", body = Vec<PersonalizedProgramDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_programs(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let programs = PersonalizedProgramService::new(&state.db)
        .get_all(Some(user.id))
        .await?;
    let dto: Vec<PersonalizedProgramDto> = programs
        .into_iter()
        .map(|(program, items)| program.into_dto(items, false))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get one of the current member's programs.
///
/// Programs of other members are reported as missing.
#[utoipa::path(
    get,
    path = "/api/me/programs/{id}",
    tag = PERSONALIZED_PROGRAM_TAG,
    params(
        ("id" = i32, Path, description = "Personalized program ID")
    ),
    responses(
        (status = 200, description = "Program with checklist and progress", body = PersonalizedProgramDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_program(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let (program, items) = PersonalizedProgramService::new(&state.db)
        .get_mine(id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(program.into_dto(items, true))))
}

/// Mark a checklist item done or not done.
///
/// # Access Control
/// - `LoggedIn` - Only the member owning the item's program
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `item_id` - Checklist item ID
/// - `payload` - Whether the item is completed
///
/// # Returns
/// - `200 OK` - Updated item
/// - `401 Unauthorized` - User not authenticated
/// - `404 Not Found` - No such item, or it belongs to someone else
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/me/checklist/{item_id}",
    tag = PERSONALIZED_PROGRAM_TAG,
    params(
        ("item_id" = i32, Path, description = "Checklist item ID")
    ),
    request_body = ToggleChecklistItemDto,
    responses(
        (status = 200, description = "Updated checklist item", body = ChecklistItemDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Checklist item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    ApiJson(payload): ApiJson<ToggleChecklistItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let item = PersonalizedProgramService::new(&state.db)
        .set_item_completed(item_id, user.id, payload.completed, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

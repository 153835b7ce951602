use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use entity::sea_orm_active_enums::TierLevel;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        coach_call::{BookCoachCallDto, CoachCallDto},
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::coach_call::BookCoachCallParams,
        service::coach_call::CoachCallService,
        state::AppState,
    },
};

/// Tag for grouping coach call endpoints in OpenAPI documentation
pub static COACH_CALL_TAG: &str = "coach_call";

/// Book a one-on-one coach call.
///
/// The slot must lie in the future on a call-length boundary, the member may hold only one
/// call per UTC day, and the coach calendar must be free when one is configured. A calendar
/// event with a meeting link and a confirmation email follow on a best-effort basis.
///
/// # Access Control
/// - `Tier(ProPlus)` - Only pro_plus members can book calls
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `payload` - Requested start time and optional topic
///
/// # Returns
/// - `201 Created` - The scheduled call
/// - `400 Bad Request` - Start in the past or off a slot boundary
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Membership tier below pro_plus
/// - `409 Conflict` - Already booked that day, or the coach is busy
/// - `500 Internal Server Error` - Calendar unreachable or database error
#[utoipa::path(
    post,
    path = "/api/coach-calls",
    tag = COACH_CALL_TAG,
    request_body = BookCoachCallDto,
    responses(
        (status = 201, description = "Booked call", body = CoachCallDto),
        (status = 400, description = "Slot in the past or not aligned", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the pro_plus tier", body = ErrorDto),
        (status = 409, description = "Already booked that day, or the coach is busy", body = ErrorDto),
        (status = 500, description = "Calendar error", body = ErrorDto)
    ),
)]
pub async fn book_coach_call(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<BookCoachCallDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Tier(TierLevel::ProPlus)])
        .await?;

    let call = CoachCallService::new(&state.db, &state.integrations, state.coach_call_minutes)
        .book(
            &user,
            BookCoachCallParams {
                user_id: user.id,
                starts_at: payload.start_at,
                topic: payload.topic,
            },
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(call.into_dto())))
}

/// Get the current user's coach calls, soonest first.
#[utoipa::path(
    get,
    path = "/api/coach-calls",
    tag = COACH_CALL_TAG,
    responses(
        (status = 200, description = "The user's calls", body = Vec<CoachCallDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_coach_calls(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let calls = CoachCallService::new(&state.db, &state.integrations, state.coach_call_minutes)
        .get_mine(user.id)
        .await?;
    let dto: Vec<CoachCallDto> = calls.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Cancel a scheduled call and remove its calendar event.
///
/// Members may cancel their own calls; admins may cancel any. Cancelling an already
/// cancelled call returns it unchanged.
///
/// # Access Control
/// - `LoggedIn` - The call's member, or an admin
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `id` - Coach call ID
///
/// # Returns
/// - `200 OK` - The cancelled call
/// - `400 Bad Request` - Call already completed
/// - `401 Unauthorized` - User not authenticated
/// - `404 Not Found` - No such call, or it belongs to someone else
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/coach-calls/{id}/cancel",
    tag = COACH_CALL_TAG,
    params(
        ("id" = i32, Path, description = "Coach call ID")
    ),
    responses(
        (status = 200, description = "Cancelled call", body = CoachCallDto),
        (status = 400, description = "Call already completed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Coach call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_coach_call(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let call = CoachCallService::new(&state.db, &state.integrations, state.coach_call_minutes)
        .cancel(id, &user)
        .await?;

    Ok((StatusCode::OK, Json(call.into_dto())))
}

/// Get every coach call across members.
///
/// # Access Control
/// - `Admin` - Only admins can see all calls
///
/// # Returns
/// - `200 OK` - All coach calls
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/coach-calls",
    tag = COACH_CALL_TAG,
    responses(
        (status = 200, description = "All coach calls", body = Vec<CoachCallDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_coach_calls(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let calls = CoachCallService::new(&state.db, &state.integrations, state.coach_call_minutes)
        .get_all()
        .await?;
    let dto: Vec<CoachCallDto> = calls.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Mark a call as held.
///
/// # Access Control
/// - `Admin` - Only admins can complete calls
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Coach call ID
///
/// # Returns
/// - `200 OK` - The completed call
/// - `400 Bad Request` - Call was cancelled
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No call with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/coach-calls/{id}/complete",
    tag = COACH_CALL_TAG,
    params(
        ("id" = i32, Path, description = "Coach call ID")
    ),
    responses(
        (status = 200, description = "Completed call", body = CoachCallDto),
        (status = 400, description = "Call was cancelled", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Coach call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_coach_call(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let call = CoachCallService::new(&state.db, &state.integrations, state.coach_call_minutes)
        .complete(id)
        .await?;

    Ok((StatusCode::OK, Json(call.into_dto())))
}

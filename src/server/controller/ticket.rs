use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        ticket::{CheckInDto, TicketDto},
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::ticket::TicketService,
        state::AppState,
    },
};

/// Tag for grouping ticket endpoints in OpenAPI documentation
pub static TICKET_TAG: &str = "ticket";

/// Get the tickets held by the current user.
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = TICKET_TAG,
    responses(
        (status = 200, description = "Tickets held by the user", body = Vec<TicketDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_tickets(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let tickets = TicketService::new(&state.db).get_mine(user.id).await?;
    let dto: Vec<TicketDto> = tickets.into_iter().map(|t| t.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a ticket by its code.
///
/// Visible to the ticket holder and to admins; anyone else gets 404.
#[utoipa::path(
    get,
    path = "/api/tickets/{code}",
    tag = TICKET_TAG,
    params(
        ("code" = String, Path, description = "Ticket code, case-insensitive")
    ),
    responses(
        (status = 200, description = "Ticket", body = TicketDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let ticket = TicketService::new(&state.db)
        .get_by_code(&code, &user)
        .await?;

    Ok((StatusCode::OK, Json(ticket.into_dto())))
}

/// Check in a ticket at the door by its code.
///
/// # Access Control
/// - `Admin` - Only admins can check tickets in
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Ticket code, usually read from the QR code
///
/// # Returns
/// - `200 OK` - Ticket now checked in
/// - `400 Bad Request` - Ticket unpaid or cancelled
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - Unknown code
/// - `409 Conflict` - Ticket already checked in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/tickets/check-in",
    tag = TICKET_TAG,
    request_body = CheckInDto,
    responses(
        (status = 200, description = "Ticket checked in", body = TicketDto),
        (status = 400, description = "Ticket unpaid or cancelled", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Ticket already checked in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_in(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CheckInDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let ticket = TicketService::new(&state.db)
        .check_in(&payload.code, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(ticket.into_dto())))
}

/// Cancel a ticket, releasing its seat.
///
/// # Access Control
/// - `Admin` - Only admins can cancel tickets
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Ticket ID
///
/// # Returns
/// - `200 OK` - The cancelled ticket
/// - `400 Bad Request` - Ticket already checked in
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No ticket with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/tickets/{id}/cancel",
    tag = TICKET_TAG,
    params(
        ("id" = i32, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Cancelled ticket", body = TicketDto),
        (status = 400, description = "Ticket already used", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let ticket = TicketService::new(&state.db).cancel(id).await?;

    Ok((StatusCode::OK, Json(ticket.into_dto())))
}

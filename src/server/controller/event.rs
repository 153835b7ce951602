use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        coupon::{CouponPreviewDto, CouponPreviewRequestDto},
        event::{AttendeesDto, EventDto, EventFormDto, PaginatedEventsDto, RsvpDto},
        ticket::{CheckoutRequestDto, CheckoutResponseDto},
    },
    server::{
        controller::{extract::ApiJson, param::PaginationParam},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{event::EventParams, ticket::CheckoutOutcome},
        service::{checkout::CheckoutService, coupon::CouponService, event::EventService},
        state::AppState,
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

/// Create an event.
///
/// Creates a draft or published event from the admin form. Ticketed events need a price
/// and a capacity may be left open.
///
/// # Access Control
/// - `Admin` - Only admins can create events
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Event form (title, slug, times, tier gate, price, capacity, status)
///
/// # Returns
/// - `201 Created` - The new event
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `409 Conflict` - Slug already used by another event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/events",
    tag = EVENT_TAG,
    request_body = EventFormDto,
    responses(
        (status = 201, description = "Created event", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<EventFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let event = EventService::new(&state.db)
        .create(EventParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(event.into_dto(0, &viewer))))
}

/// Get a page of events in every status, newest start first.
///
/// # Access Control
/// - `Admin` - Only admins can see drafts and cancelled events
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `pagination` - Page number and entries per page
///
/// # Returns
/// - `200 OK` - Paginated events
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/events",
    tag = EVENT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Events in every status", body = PaginatedEventsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_events(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let page = EventService::new(&state.db)
        .get_all(pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&viewer))))
}

/// Update an event.
///
/// Replaces every field of the event with the form contents. Existing RSVPs and tickets
/// are kept even if the new capacity is lower than the seats already taken.
///
/// # Access Control
/// - `Admin` - Only admins can edit events
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Event ID
/// - `payload` - Event form
///
/// # Returns
/// - `200 OK` - Updated event with its taken seat count
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No event with this ID
/// - `409 Conflict` - Slug already used by another event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = EventFormDto,
    responses(
        (status = 200, description = "Updated event", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 409, description = "Slug already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<EventFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let _ = guard.require(&[Permission::Admin]).await?;
    let viewer = guard.viewer().await?;

    let service = EventService::new(&state.db);
    let event = service.update(id, EventParams::from_dto(payload)).await?;
    let taken = service.taken_seats(event.id).await?;

    Ok((StatusCode::OK, Json(event.into_dto(taken, &viewer))))
}

/// Delete an event together with its RSVPs and tickets.
///
/// # Access Control
/// - `Admin` - Only admins can delete events
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Event ID
///
/// # Returns
/// - `204 No Content` - Event deleted
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No event with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/admin/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted with its RSVPs and tickets"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    EventService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get everyone attending an event: RSVPs and holders of live tickets.
///
/// # Access Control
/// - `Admin` - Only admins can see attendee lists
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Event ID
///
/// # Returns
/// - `200 OK` - RSVPs and tickets with their users
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No event with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/events/{id}/attendees",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "RSVPs and ticket holders", body = AttendeesDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_attendees(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (rsvps, tickets) = EventService::new(&state.db).get_attendees(id).await?;

    Ok((
        StatusCode::OK,
        Json(AttendeesDto {
            rsvps: rsvps.into_iter().map(|a| a.into_dto()).collect(),
            tickets: tickets.into_iter().map(|a| a.into_dto()).collect(),
        }),
    ))
}

/// List published events that have not ended yet, soonest first.
///
/// Anonymous visitors are served too. Events above the viewer's tier are listed but marked
/// as locked.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Published events that have not ended, soonest first", body = PaginatedEventsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_upcoming_events(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let page = EventService::new(&state.db)
        .get_upcoming(pagination.into_page(), Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&viewer))))
}

/// Get a published event by slug.
///
/// # Access Control
/// - Public, but events gated above the viewer's tier are refused
///
/// # Returns
/// - `200 OK` - Event with remaining capacity
/// - `403 Forbidden` - Membership tier too low
/// - `404 Not Found` - Unknown slug or event not published
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/events/{event}",
    tag = EVENT_TAG,
    params(
        ("event" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Event detail with remaining capacity", body = EventDto),
        (status = 403, description = "Membership tier too low", body = ErrorDto),
        (status = 404, description = "Event not found or not published", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).viewer().await?;

    let (event, taken) = EventService::new(&state.db)
        .get_by_slug(&slug, &viewer)
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto(taken, &viewer))))
}

/// RSVP to a free event.
///
/// # Access Control
/// - `LoggedIn` - Any signed-in member whose tier meets the event's gate
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Event ID
///
/// # Returns
/// - `201 Created` - RSVP recorded
/// - `400 Bad Request` - Event is ticketed or has already started
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Membership tier too low
/// - `404 Not Found` - Event missing or not published
/// - `409 Conflict` - Already RSVP'd or no seats left
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{event}/rsvp",
    tag = EVENT_TAG,
    params(
        ("event" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 201, description = "RSVP recorded", body = RsvpDto),
        (status = 400, description = "Ticketed event or already started", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Membership tier too low", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 409, description = "Already RSVP'd or event full", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn rsvp(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let user = guard.require(&[Permission::LoggedIn]).await?;
    let viewer = guard.viewer().await?;

    let rsvp = EventService::new(&state.db)
        .rsvp(id, user.id, &viewer, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(rsvp.into_dto())))
}

/// Withdraw the current user's RSVP.
#[utoipa::path(
    delete,
    path = "/api/events/{event}/rsvp",
    tag = EVENT_TAG,
    params(
        ("event" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "RSVP withdrawn"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "No RSVP for this event", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_rsvp(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    EventService::new(&state.db).cancel_rsvp(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Buy a ticket for an event.
///
/// Prices the ticket, applying the optional coupon. When nothing is left to pay the ticket
/// is issued straight away; otherwise a pending ticket is created and the member is sent to
/// Stripe Checkout. An unpaid ticket from an earlier attempt is replaced. The body may be
/// omitted when no coupon is used.
///
/// # Access Control
/// - `LoggedIn` - Any signed-in member whose tier meets the event's gate
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `id` - Event ID
/// - `payload` - Optional coupon code
///
/// # Returns
/// - `201 Created` - Free or fully discounted ticket issued
/// - `200 OK` - Stripe checkout URL for the pending ticket
/// - `400 Bad Request` - Not on sale, already started, or coupon rejected
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Membership tier too low
/// - `404 Not Found` - Event missing or not published
/// - `409 Conflict` - Sold out or user already holds a ticket
/// - `500 Internal Server Error` - Stripe not configured or unreachable, or database error
#[utoipa::path(
    post,
    path = "/api/events/{event}/checkout",
    tag = EVENT_TAG,
    params(
        ("event" = i32, Path, description = "Event ID")
    ),
    request_body = CheckoutRequestDto,
    responses(
        (status = 201, description = "Nothing to pay, ticket issued", body = CheckoutResponseDto),
        (status = 200, description = "Payment required at the returned checkout URL", body = CheckoutResponseDto),
        (status = 400, description = "Not on sale, already started or coupon rejected", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Membership tier too low", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 409, description = "Sold out or already holding a ticket", body = ErrorDto),
        (status = 500, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    payload: Option<ApiJson<CheckoutRequestDto>>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let user = guard.require(&[Permission::LoggedIn]).await?;
    let viewer = guard.viewer().await?;

    let ApiJson(payload) = payload.unwrap_or_default();

    let outcome = CheckoutService::new(&state.db, &state.integrations, &state.app_url)
        .checkout(
            id,
            &user,
            &viewer,
            payload.coupon_code.as_deref(),
            Utc::now(),
        )
        .await?;

    let response = match outcome {
        CheckoutOutcome::Issued(ticket) => (
            StatusCode::CREATED,
            Json(CheckoutResponseDto::Issued {
                ticket: ticket.into_dto(),
            }),
        ),
        CheckoutOutcome::PaymentRequired {
            ticket_id,
            checkout_url,
        } => (
            StatusCode::OK,
            Json(CheckoutResponseDto::PaymentRequired {
                ticket_id,
                checkout_url,
            }),
        ),
    };

    Ok(response)
}

/// Preview a coupon against an event's ticket price without reserving anything.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `id` - Event ID
/// - `payload` - Coupon code to try
///
/// # Returns
/// - `200 OK` - Original and discounted price
/// - `400 Bad Request` - Unknown or rejected coupon, or event not ticketed
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{event}/coupon-preview",
    tag = EVENT_TAG,
    params(
        ("event" = i32, Path, description = "Event ID")
    ),
    request_body = CouponPreviewRequestDto,
    responses(
        (status = 200, description = "Original and discounted ticket price", body = CouponPreviewDto),
        (status = 400, description = "Coupon rejected or event not ticketed", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn preview_coupon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<CouponPreviewRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let quote = CouponService::new(&state.db)
        .preview(id, &payload.code, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(CouponPreviewDto {
            code: quote
                .coupon
                .map(|coupon| coupon.code)
                .unwrap_or_default(),
            original_cents: quote.original_cents,
            discounted_cents: quote.amount_cents,
        }),
    ))
}

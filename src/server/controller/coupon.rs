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
        coupon::{CouponDto, CouponFormDto},
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::coupon::CouponParams,
        service::coupon::CouponService,
        state::AppState,
    },
};

/// Tag for grouping coupon endpoints in OpenAPI documentation
pub static COUPON_TAG: &str = "coupon";

/// Create a coupon.
///
/// Coupons take either a percentage or a fixed amount off a ticket, optionally limited to
/// one event, a number of redemptions, or an expiry date.
///
/// # Access Control
/// - `Admin` - Only admins can create coupons
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Coupon form (code, discount, limits, event, active flag)
///
/// # Returns
/// - `201 Created` - The new coupon
/// - `400 Bad Request` - Invalid discount, limit or event
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `409 Conflict` - Code already used
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/coupons",
    tag = COUPON_TAG,
    request_body = CouponFormDto,
    responses(
        (status = 201, description = "Created coupon", body = CouponDto),
        (status = 400, description = "Invalid discount, limit or event", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Code already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CouponFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let coupon = CouponService::new(&state.db)
        .create(CouponParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(coupon.into_dto())))
}

/// Get every coupon with its redemption count.
///
/// # Access Control
/// - `Admin` - Only admins can list coupons
///
/// # Returns
/// - `200 OK` - All coupons
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/coupons",
    tag = COUPON_TAG,
    responses(
        (status = 200, description = "All coupons", body = Vec<CouponDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_coupons(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let coupons = CouponService::new(&state.db).get_all().await?;
    let dto: Vec<CouponDto> = coupons.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Update a coupon. The redemption count is kept.
///
/// # Access Control
/// - `Admin` - Only admins can edit coupons
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Coupon ID
/// - `payload` - Coupon form
///
/// # Returns
/// - `200 OK` - Updated coupon
/// - `400 Bad Request` - Invalid discount, limit or event
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No coupon with this ID
/// - `409 Conflict` - Code already used
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/coupons/{id}",
    tag = COUPON_TAG,
    params(
        ("id" = i32, Path, description = "Coupon ID")
    ),
    request_body = CouponFormDto,
    responses(
        (status = 200, description = "Updated coupon", body = CouponDto),
        (status = 400, description = "Invalid discount, limit or event", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Coupon not found", body = ErrorDto),
        (status = 409, description = "Code already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_coupon(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<CouponFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let coupon = CouponService::new(&state.db)
        .update(id, CouponParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(coupon.into_dto())))
}

/// Delete a coupon. Tickets that used it keep their recorded price.
///
/// # Access Control
/// - `Admin` - Only admins can delete coupons
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Coupon ID
///
/// # Returns
/// - `204 No Content` - Coupon deleted
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No coupon with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/admin/coupons/{id}",
    tag = COUPON_TAG,
    params(
        ("id" = i32, Path, description = "Coupon ID")
    ),
    responses(
        (status = 204, description = "Coupon deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Coupon not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_coupon(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    CouponService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

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
        membership::{
            CheckoutRedirectDto, GrantMembershipDto, MembershipCheckoutDto, MembershipDto,
            TierDto, UpdateTierDto,
        },
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::membership::{parse_tier_level, GrantMembershipParams, UpdateTierParams},
        service::membership::MembershipService,
        state::AppState,
    },
};

/// Tag for grouping membership and tier endpoints in OpenAPI documentation
pub static MEMBERSHIP_TAG: &str = "membership";

/// List membership tiers from free to pro_plus with their monthly price.
#[utoipa::path(
    get,
    path = "/api/tiers",
    tag = MEMBERSHIP_TAG,
    responses(
        (status = 200, description = "Membership tiers from free to pro_plus", body = Vec<TierDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tiers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tiers = MembershipService::new(&state.db, &state.integrations, &state.app_url)
        .get_tiers()
        .await?;
    let dto: Vec<TierDto> = tiers.into_iter().map(|tier| tier.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Update a tier's name, price, Stripe price and Discord role.
///
/// # Access Control
/// - `Admin` - Only admins can change tiers
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `level` - Tier level in path form: `free`, `pro` or `pro_plus`
/// - `payload` - New tier settings
///
/// # Returns
/// - `200 OK` - Updated tier
/// - `400 Bad Request` - Unknown level, blank name, negative price or non-numeric role
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/tiers/{level}",
    tag = MEMBERSHIP_TAG,
    params(
        ("level" = String, Path, description = "Tier level: free, pro or pro_plus")
    ),
    request_body = UpdateTierDto,
    responses(
        (status = 200, description = "Updated tier", body = TierDto),
        (status = 400, description = "Unknown level or invalid tier data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_tier(
    State(state): State<AppState>,
    session: Session,
    Path(level): Path<String>,
    ApiJson(payload): ApiJson<UpdateTierDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let level = parse_tier_level(&level)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown tier '{}'", level)))?;

    let tier = MembershipService::new(&state.db, &state.integrations, &state.app_url)
        .update_tier(UpdateTierParams {
            level,
            name: payload.name,
            description: payload.description,
            monthly_price_cents: payload.monthly_price_cents,
            stripe_price_id: payload.stripe_price_id,
            discord_role_id: payload.discord_role_id,
        })
        .await?;

    Ok((StatusCode::OK, Json(tier.into_dto())))
}

/// Start a Stripe subscription checkout for a paid tier.
///
/// Records a pending membership that the Stripe webhook activates once the first payment
/// completes. Later paid invoices of the subscription extend it.
///
/// # Access Control
/// - `LoggedIn` - Any signed-in user
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `payload` - Tier to subscribe to
///
/// # Returns
/// - `200 OK` - Stripe-hosted checkout URL
/// - `400 Bad Request` - Free tier, or the tier has no Stripe price
/// - `401 Unauthorized` - User not authenticated
/// - `500 Internal Server Error` - Stripe not configured or unreachable
#[utoipa::path(
    post,
    path = "/api/memberships/checkout",
    tag = MEMBERSHIP_TAG,
    request_body = MembershipCheckoutDto,
    responses(
        (status = 200, description = "Stripe checkout page for the subscription", body = CheckoutRedirectDto),
        (status = 400, description = "Tier cannot be purchased", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn start_checkout(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<MembershipCheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let checkout_url = MembershipService::new(&state.db, &state.integrations, &state.app_url)
        .start_checkout(&user, payload.tier.into())
        .await?;

    Ok((StatusCode::OK, Json(CheckoutRedirectDto { checkout_url })))
}

/// Grant a membership without payment.
///
/// The grant replaces the user's other active memberships and moves their Discord role to
/// the granted tier.
///
/// # Access Control
/// - `Admin` - Only admins can grant memberships
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `payload` - User, tier and length in days
///
/// # Returns
/// - `201 Created` - The active membership
/// - `400 Bad Request` - Free tier or non-positive length
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - Unknown user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/memberships",
    tag = MEMBERSHIP_TAG,
    request_body = GrantMembershipDto,
    responses(
        (status = 201, description = "Granted membership", body = MembershipDto),
        (status = 400, description = "Invalid tier or length", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grant_membership(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<GrantMembershipDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let membership = MembershipService::new(&state.db, &state.integrations, &state.app_url)
        .grant(GrantMembershipParams {
            user_id: payload.user_id,
            tier: payload.tier.into(),
            days: payload.days,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(membership.into_dto())))
}

/// Cancel a membership and remove its Discord role.
///
/// # Access Control
/// - `Admin` - Only admins can cancel memberships
///
/// # Arguments
/// - `state` - Application state containing the database connection and integrations
/// - `session` - User's session for authentication
/// - `id` - Membership ID
///
/// # Returns
/// - `200 OK` - The cancelled membership
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No membership with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/memberships/{id}/cancel",
    tag = MEMBERSHIP_TAG,
    params(
        ("id" = i32, Path, description = "Membership ID")
    ),
    responses(
        (status = 200, description = "Cancelled membership", body = MembershipDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_membership(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let membership = MembershipService::new(&state.db, &state.integrations, &state.app_url)
        .cancel(id)
        .await?;

    Ok((StatusCode::OK, Json(membership.into_dto())))
}

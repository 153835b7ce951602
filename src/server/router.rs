//! HTTP routes, OpenAPI document and the cross-cutting layers around them.

use axum::{
    http::{
        header::{CONTENT_TYPE, COOKIE},
        HeaderValue, Method,
    },
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth::{self, AUTH_TAG},
        channel::{self, CHANNEL_TAG},
        coach_call::{self, COACH_CALL_TAG},
        coupon::{self, COUPON_TAG},
        event::{self, EVENT_TAG},
        membership::{self, MEMBERSHIP_TAG},
        personalized_program::{self, PERSONALIZED_PROGRAM_TAG},
        post::{self, POST_TAG},
        program::{self, PROGRAM_TAG},
        questionnaire::{self, QUESTIONNAIRE_TAG},
        ticket::{self, TICKET_TAG},
        upload::{self, UPLOAD_TAG},
        user::{self, USER_TAG},
        webhook::{self, WEBHOOK_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "memberhub", description = "Membership platform API"),
    tags(
        (name = AUTH_TAG, description = "Discord login and session"),
        (name = USER_TAG, description = "Users and admin roles"),
        (name = MEMBERSHIP_TAG, description = "Tiers and memberships"),
        (name = PROGRAM_TAG, description = "Training programs"),
        (name = EVENT_TAG, description = "Events, RSVPs and ticket checkout"),
        (name = COUPON_TAG, description = "Discount coupons"),
        (name = TICKET_TAG, description = "Tickets and door check-in"),
        (name = WEBHOOK_TAG, description = "Payment provider webhooks"),
        (name = POST_TAG, description = "Blog, poetry and story posts"),
        (name = CHANNEL_TAG, description = "Video channels"),
        (name = PERSONALIZED_PROGRAM_TAG, description = "Personalized programs and checklists"),
        (name = COACH_CALL_TAG, description = "One-on-one coach calls"),
        (name = QUESTIONNAIRE_TAG, description = "Questionnaires and responses"),
        (name = UPLOAD_TAG, description = "Admin file uploads"),
    )
)]
pub struct ApiDoc;

/// API routes and the OpenAPI document describing them.
pub fn router() -> (Router<AppState>, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(user::get_all_users))
        .routes(routes!(user::set_admin))
        .routes(routes!(user::get_my_memberships))
        .routes(routes!(membership::get_tiers))
        .routes(routes!(membership::update_tier))
        .routes(routes!(membership::start_checkout))
        .routes(routes!(membership::grant_membership))
        .routes(routes!(membership::cancel_membership))
        .routes(routes!(program::create_program, program::get_all_programs))
        .routes(routes!(program::update_program, program::delete_program))
        .routes(routes!(program::get_published_programs))
        .routes(routes!(program::get_program))
        .routes(routes!(event::create_event, event::get_all_events))
        .routes(routes!(event::update_event, event::delete_event))
        .routes(routes!(event::get_attendees))
        .routes(routes!(event::get_upcoming_events))
        .routes(routes!(event::get_event))
        .routes(routes!(event::rsvp, event::cancel_rsvp))
        .routes(routes!(event::checkout))
        .routes(routes!(event::preview_coupon))
        .routes(routes!(coupon::create_coupon, coupon::get_all_coupons))
        .routes(routes!(coupon::update_coupon, coupon::delete_coupon))
        .routes(routes!(ticket::get_my_tickets))
        .routes(routes!(ticket::get_ticket))
        .routes(routes!(ticket::check_in))
        .routes(routes!(ticket::cancel_ticket))
        .routes(routes!(webhook::stripe_webhook))
        .routes(routes!(post::create_post, post::get_all_posts))
        .routes(routes!(post::update_post, post::delete_post))
        .routes(routes!(post::get_published_posts))
        .routes(routes!(post::get_post))
        .routes(routes!(channel::create_channel, channel::get_all_channels))
        .routes(routes!(channel::update_channel, channel::delete_channel))
        .routes(routes!(channel::get_channel_videos, channel::create_video))
        .routes(routes!(channel::update_video, channel::delete_video))
        .routes(routes!(channel::get_channels))
        .routes(routes!(channel::get_published_videos))
        .routes(routes!(
            personalized_program::create_personalized_program,
            personalized_program::get_all_personalized_programs
        ))
        .routes(routes!(
            personalized_program::update_personalized_program,
            personalized_program::delete_personalized_program
        ))
        .routes(routes!(personalized_program::get_my_programs))
        .routes(routes!(personalized_program::get_my_program))
        .routes(routes!(personalized_program::toggle_checklist_item))
        .routes(routes!(
            coach_call::book_coach_call,
            coach_call::get_my_coach_calls
        ))
        .routes(routes!(coach_call::cancel_coach_call))
        .routes(routes!(coach_call::get_all_coach_calls))
        .routes(routes!(coach_call::complete_coach_call))
        .routes(routes!(
            questionnaire::create_questionnaire,
            questionnaire::get_all_questionnaires
        ))
        .routes(routes!(
            questionnaire::update_questionnaire,
            questionnaire::delete_questionnaire
        ))
        .routes(routes!(questionnaire::get_responses))
        .routes(routes!(questionnaire::get_active_questionnaires))
        .routes(routes!(questionnaire::get_questionnaire))
        .routes(routes!(questionnaire::submit_response))
        .routes(routes!(upload::upload))
        .split_for_parts()
}

/// Complete application: API routes, Swagger UI, sessions, CORS and request tracing.
///
/// # Arguments
/// - `state` - Shared application state
/// - `session` - Session layer backed by the application database
/// - `cors_origins` - Origins allowed to make credentialed requests; invalid entries are
///   skipped with a warning
pub fn app(
    state: AppState,
    session: SessionManagerLayer<SqliteStore>,
    cors_origins: &[String],
) -> Router {
    let (api, openapi) = router();

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .with_state(state)
        .layer(session)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, COOKIE])
}

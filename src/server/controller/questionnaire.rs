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
        questionnaire::{
            QuestionnaireDto, QuestionnaireFormDto, QuestionnaireResponseDto, SubmitResponseDto,
        },
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::questionnaire::QuestionnaireParams,
        service::questionnaire::QuestionnaireService,
        state::AppState,
    },
};

/// Tag for grouping questionnaire endpoints in OpenAPI documentation
pub static QUESTIONNAIRE_TAG: &str = "questionnaire";

/// Create a questionnaire.
///
/// Question ids must be unique within the questionnaire.
///
/// # Access Control
/// - `Admin` - Only admins can create questionnaires
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Title, active flag and questions
///
/// # Returns
/// - `201 Created` - Created questionnaire
/// - `400 Bad Request` - Missing title, incomplete or duplicate questions
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/questionnaires",
    tag = QUESTIONNAIRE_TAG,
    request_body = QuestionnaireFormDto,
    responses(
        (status = 201, description = "Created questionnaire", body = QuestionnaireDto),
        (status = 400, description = "Missing title or duplicate question ids", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_questionnaire(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<QuestionnaireFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let questionnaire = QuestionnaireService::new(&state.db)
        .create(QuestionnaireParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(questionnaire.into_dto())))
}

/// Get every questionnaire, active or not.
///
/// # Access Control
/// - `Admin` - Only admins can list inactive questionnaires
///
/// # Returns
/// - `200 OK` - All questionnaires
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires",
    tag = QUESTIONNAIRE_TAG,
    responses(
        (status = 200, description = "All questionnaires", body = Vec<QuestionnaireDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_questionnaires(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let questionnaires = QuestionnaireService::new(&state.db).get_all().await?;
    let dto: Vec<QuestionnaireDto> = questionnaires.into_iter().map(|q| q.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Replace a questionnaire's title, active flag and questions.
///
/// Existing responses are kept as submitted.
///
/// # Access Control
/// - `Admin` - Only admins can update questionnaires
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Questionnaire ID
/// - `payload` - Replacement questionnaire data
///
/// # Returns
/// - `200 OK` - Updated questionnaire
/// - `400 Bad Request` - Missing title, incomplete or duplicate questions
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No questionnaire with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/questionnaires/{id}",
    tag = QUESTIONNAIRE_TAG,
    params(
        ("id" = i32, Path, description = "Questionnaire ID")
    ),
    request_body = QuestionnaireFormDto,
    responses(
        (status = 200, description = "Updated questionnaire", body = QuestionnaireDto),
        (status = 400, description = "Missing title or duplicate question ids", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Questionnaire not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_questionnaire(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<QuestionnaireFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let questionnaire = QuestionnaireService::new(&state.db)
        .update(id, QuestionnaireParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(questionnaire.into_dto())))
}

/// Delete a questionnaire along with its responses.
///
/// # Access Control
/// - `Admin` - Only admins can delete questionnaires
///
/// # Returns
/// - `204 No Content` - Questionnaire and responses deleted
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No questionnaire with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/admin/questionnaires/{id}",
    tag = QUESTIONNAIRE_TAG,
    params(
        ("id" = i32, Path, description = "Questionnaire ID")
    ),
    responses(
        (status = 204, description = "Questionnaire and responses deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Questionnaire not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_questionnaire(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    QuestionnaireService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the responses submitted to a questionnaire.
///
/// # Access Control
/// - `Admin` - Only admins can read responses
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Questionnaire ID
///
/// # Returns
/// - `200 OK` - Submitted responses
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
/// - `404 Not Found` - No questionnaire with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/responses",
    tag = QUESTIONNAIRE_TAG,
    params(
        ("id" = i32, Path, description = "Questionnaire ID")
    ),
    responses(
        (status = 200, description = "Submitted responses", body = Vec<QuestionnaireResponseDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Questionnaire not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_responses(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let responses = QuestionnaireService::new(&state.db)
        .get_responses(id)
        .await?;
    let dto: Vec<QuestionnaireResponseDto> = responses.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get the questionnaires open for answers.
#[utoipa::path(
    get,
    path = "/api/questionnaires",
    tag = QUESTIONNAIRE_TAG,
    responses(
        (status = 200, description = "Active questionnaires", body = Vec<QuestionnaireDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_active_questionnaires(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let questionnaires = QuestionnaireService::new(&state.db)
        .get_active_list()
        .await?;
    let dto: Vec<QuestionnaireDto> = questionnaires.into_iter().map(|q| q.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get an active questionnaire.
///
/// # Access Control
/// - Any logged in user
///
/// # Returns
/// - `200 OK` - Questionnaire
/// - `401 Unauthorized` - User not authenticated
/// - `404 Not Found` - Questionnaire missing or inactive
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/questionnaires/{id}",
    tag = QUESTIONNAIRE_TAG,
    params(
        ("id" = i32, Path, description = "Questionnaire ID")
    ),
    responses(
        (status = 200, description = "Active questionnaire", body = QuestionnaireDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Questionnaire not found or inactive", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_questionnaire(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let questionnaire = QuestionnaireService::new(&state.db).get_active(id).await?;

    Ok((StatusCode::OK, Json(questionnaire.into_dto())))
}

/// Submit answers to an active questionnaire.
///
/// Every required question must be answered and every answer must name a question
/// of this questionnaire.
///
/// # Access Control
/// - Any logged in user
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - Questionnaire ID
/// - `payload` - Answers keyed by question id
///
/// # Returns
/// - `201 Created` - Stored response
/// - `400 Bad Request` - Unknown questions or missing required answers
/// - `401 Unauthorized` - User not authenticated
/// - `404 Not Found` - Questionnaire missing or inactive
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/questionnaires/{id}/responses",
    tag = QUESTIONNAIRE_TAG,
    params(
        ("id" = i32, Path, description = "Questionnaire ID")
    ),
    request_body = SubmitResponseDto,
    responses(
        (status = 201, description = "Stored response", body = QuestionnaireResponseDto),
        (status = 400, description = "Unknown questions or missing required answers", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Questionnaire not found or inactive", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_response(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<SubmitResponseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::LoggedIn])
        .await?;

    let response = QuestionnaireService::new(&state.db)
        .submit(id, user.id, payload.answers)
        .await?;

    Ok((StatusCode::CREATED, Json(response.into_dto())))
}

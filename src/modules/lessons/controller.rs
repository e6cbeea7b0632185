use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};
use uuid::Uuid;

use lessons_core::{AppError, ErrorResponse};

use crate::middleware::auth::AuthIdentity;
use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, LessonPath, UpdateLessonPatchDto, UpdateLessonPutDto,
};
use crate::modules::lessons::service::{LessonService, lesson_not_found};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/v1/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 409, description = "A lesson with this sequence and date already exists", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_lesson(
    State(state): State<AppState>,
    identity: AuthIdentity,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, dto).await?;

    info!(lesson_id = %lesson.id, subject = ?identity.subject(), "Lesson created");
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons",
    responses(
        (status = 200, description = "All lessons", body = Vec<Lesson>),
        (status = 204, description = "No lessons recorded"),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lessons(State(state): State<AppState>) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::find_all_lessons(&state.db).await?;

    if lessons.is_empty() {
        return Err(AppError::no_content());
    }

    Ok(Json(lessons))
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/{lesson_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Lesson ID (uuid v4)")
    ),
    responses(
        (status = 200, description = "Lesson found", body = Lesson),
        (status = 400, description = "Lesson ID is not a uuid v4", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lesson_by_id(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<LessonPath>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::find_lesson(&state.db, path.lesson_id)
        .await?
        .ok_or_else(|| lesson_not_found(path.lesson_id))?;

    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/v1/lessons/{lesson_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Lesson ID (uuid v4)")
    ),
    request_body = CreateLessonDto,
    responses(
        (status = 200, description = "Lesson replaced", body = Lesson),
        (status = 400, description = "Invalid ID or body", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 409, description = "A lesson with this sequence and date already exists", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_lesson(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<LessonPath>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonPutDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::update_lesson(&state.db, path.lesson_id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    patch,
    path = "/api/v1/lessons/{lesson_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Lesson ID (uuid v4)")
    ),
    request_body = UpdateLessonPatchDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 400, description = "Invalid ID or body", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 409, description = "A lesson with this sequence and date already exists", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn patch_lesson(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<LessonPath>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonPatchDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::patch_lesson(&state.db, path.lesson_id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{lesson_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Lesson ID (uuid v4)")
    ),
    responses(
        (status = 200, description = "Lesson and its subjects deleted", body = Lesson),
        (status = 400, description = "Lesson ID is not a uuid v4", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    identity: AuthIdentity,
    ValidatedPath(path): ValidatedPath<LessonPath>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::delete_lesson(&state.db, path.lesson_id).await?;

    info!(lesson_id = %lesson.id, subject = ?identity.subject(), "Lesson deleted");
    Ok(Json(lesson))
}

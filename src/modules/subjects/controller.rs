use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};
use uuid::Uuid;

use lessons_core::{AppError, ErrorResponse};

use crate::middleware::auth::AuthIdentity;
use crate::modules::lessons::model::LessonPath;
use crate::modules::lessons::service::LessonService;
use crate::modules::subjects::model::{
    CreateSubjectDto, Subject, SubjectPath, UpdateSubjectPatchDto, UpdateSubjectPutDto,
};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/v1/lessons/{lesson_id}/subjects",
    params(
        ("lesson_id" = Uuid, Path, description = "Owning lesson ID (uuid v4)")
    ),
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Invalid ID or body", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    identity: AuthIdentity,
    ValidatedPath(path): ValidatedPath<LessonPath>,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = LessonService::create_subject(&state.db, path.lesson_id, dto).await?;

    info!(
        lesson_id = %path.lesson_id,
        subject_id = %subject.id,
        caller = ?identity.subject(),
        "Subject created"
    );
    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/{lesson_id}/subjects",
    params(
        ("lesson_id" = Uuid, Path, description = "Owning lesson ID (uuid v4)")
    ),
    responses(
        (status = 200, description = "Subjects of the lesson", body = Vec<Subject>),
        (status = 204, description = "The lesson has no subjects"),
        (status = 400, description = "Lesson ID is not a uuid v4", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<LessonPath>,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = LessonService::find_subjects(&state.db, path.lesson_id).await?;

    if subjects.is_empty() {
        return Err(AppError::no_content());
    }

    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/{lesson_id}/subjects/{subject_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Owning lesson ID (uuid v4)"),
        ("subject_id" = Uuid, Path, description = "Subject ID (uuid v4)")
    ),
    responses(
        (status = 200, description = "Subject found", body = Subject),
        (status = 400, description = "An ID is not a uuid v4", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found, or subject not found under this lesson", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subject_by_id(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<SubjectPath>,
) -> Result<Json<Subject>, AppError> {
    let subject = LessonService::find_subject(&state.db, path.lesson_id, path.subject_id).await?;
    Ok(Json(subject))
}

#[utoipa::path(
    put,
    path = "/api/v1/lessons/{lesson_id}/subjects/{subject_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Owning lesson ID (uuid v4)"),
        ("subject_id" = Uuid, Path, description = "Subject ID (uuid v4)")
    ),
    request_body = CreateSubjectDto,
    responses(
        (status = 200, description = "Subject replaced", body = Subject),
        (status = 400, description = "Invalid ID or body", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found, or subject not found under this lesson", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_subject(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<SubjectPath>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectPutDto>,
) -> Result<Json<Subject>, AppError> {
    let subject =
        LessonService::update_subject(&state.db, path.lesson_id, path.subject_id, dto).await?;
    Ok(Json(subject))
}

#[utoipa::path(
    patch,
    path = "/api/v1/lessons/{lesson_id}/subjects/{subject_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Owning lesson ID (uuid v4)"),
        ("subject_id" = Uuid, Path, description = "Subject ID (uuid v4)")
    ),
    request_body = UpdateSubjectPatchDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 400, description = "Invalid ID or body", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found, or subject not found under this lesson", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn patch_subject(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<SubjectPath>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectPatchDto>,
) -> Result<Json<Subject>, AppError> {
    let subject =
        LessonService::patch_subject(&state.db, path.lesson_id, path.subject_id, dto).await?;
    Ok(Json(subject))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{lesson_id}/subjects/{subject_id}",
    params(
        ("lesson_id" = Uuid, Path, description = "Owning lesson ID (uuid v4)"),
        ("subject_id" = Uuid, Path, description = "Subject ID (uuid v4)")
    ),
    responses(
        (status = 200, description = "Subject deleted", body = Subject),
        (status = 400, description = "An ID is not a uuid v4", body = ErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorResponse),
        (status = 404, description = "Lesson not found, or subject not found under this lesson", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    identity: AuthIdentity,
    ValidatedPath(path): ValidatedPath<SubjectPath>,
) -> Result<Json<Subject>, AppError> {
    let subject =
        LessonService::delete_subject(&state.db, path.lesson_id, path.subject_id).await?;

    info!(
        lesson_id = %path.lesson_id,
        subject_id = %subject.id,
        caller = ?identity.subject(),
        "Subject deleted"
    );
    Ok(Json(subject))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validator::validate_uuid_v4;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub description: String,
    pub credits: i32,
    /// Owning lesson. A subject is only ever addressed through it.
    pub lesson_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Complete attribute set of a subject. Used for `POST` and `PUT`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(
        min = 1,
        max = 255,
        message = "description must be between 1 and 255 characters"
    ))]
    pub description: String,
    #[validate(range(min = 0, message = "credits must be a non-negative integer"))]
    pub credits: i32,
}

pub type UpdateSubjectPutDto = CreateSubjectDto;

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectPatchDto {
    #[validate(length(
        min = 1,
        max = 255,
        message = "description must be between 1 and 255 characters"
    ))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "credits must be a non-negative integer"))]
    pub credits: Option<i32>,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct SubjectPath {
    #[validate(custom(function = "validate_uuid_v4"))]
    pub lesson_id: Uuid,
    #[validate(custom(function = "validate_uuid_v4"))]
    pub subject_id: Uuid,
}

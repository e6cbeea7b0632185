use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validator::validate_uuid_v4;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub sequence: i32,
    pub date: DateTime<Utc>,
    /// Room owned by another service; not checked for existence
    pub room_id: Uuid,
    /// Class owned by another service; not checked for existence
    pub class_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Complete attribute set of a lesson. Used for `POST` and `PUT`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonDto {
    #[validate(range(min = 0, message = "sequence must be a non-negative integer"))]
    pub sequence: i32,
    pub date: DateTime<Utc>,
    pub room_id: Uuid,
    pub class_id: Uuid,
}

pub type UpdateLessonPutDto = CreateLessonDto;

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonPatchDto {
    #[validate(range(min = 0, message = "sequence must be a non-negative integer"))]
    pub sequence: Option<i32>,
    pub date: Option<DateTime<Utc>>,
    pub room_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
}

impl UpdateLessonPatchDto {
    /// The `(sequence, date)` pair the lesson will hold once the patch is applied.
    pub fn resulting_key(&self, existing: &Lesson) -> (i32, DateTime<Utc>) {
        (
            self.sequence.unwrap_or(existing.sequence),
            self.date.unwrap_or(existing.date),
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct LessonPath {
    #[validate(custom(function = "validate_uuid_v4"))]
    pub lesson_id: Uuid,
}

//! Store adapter for the `lessons` table.
//!
//! No business rules live here. Constraint violations come back as
//! [`StoreError`] variants; uniqueness of `(sequence, date)` is enforced by
//! the `lessons_sequence_date_key` constraint, never by a prior read.

use lessons_db::{StoreError, StoreResult};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::lessons::model::{CreateLessonDto, Lesson, UpdateLessonPatchDto};

pub struct LessonRepository;

impl LessonRepository {
    #[instrument(skip(db))]
    pub async fn insert(db: &PgPool, attrs: &CreateLessonDto) -> StoreResult<Lesson> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"INSERT INTO lessons (sequence, date, room_id, class_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, sequence, date, room_id, class_id, created_at, updated_at"#,
        )
        .bind(attrs.sequence)
        .bind(attrs.date)
        .bind(attrs.room_id)
        .bind(attrs.class_id)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> StoreResult<Vec<Lesson>> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, sequence, date, room_id, class_id, created_at, updated_at
               FROM lessons
               ORDER BY date ASC, sequence ASC"#,
        )
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> StoreResult<Option<Lesson>> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, sequence, date, room_id, class_id, created_at, updated_at
               FROM lessons WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, id: Uuid) -> StoreResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM lessons WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    /// Overwrites every attribute. [`StoreError::NotFound`] if the row is gone.
    #[instrument(skip(db))]
    pub async fn replace(db: &PgPool, id: Uuid, attrs: &CreateLessonDto) -> StoreResult<Lesson> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"UPDATE lessons
               SET sequence = $1, date = $2, room_id = $3, class_id = $4, updated_at = NOW()
               WHERE id = $5
               RETURNING id, sequence, date, room_id, class_id, created_at, updated_at"#,
        )
        .bind(attrs.sequence)
        .bind(attrs.date)
        .bind(attrs.room_id)
        .bind(attrs.class_id)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    /// Overwrites only the attributes present in `patch`.
    #[instrument(skip(db))]
    pub async fn merge(db: &PgPool, id: Uuid, patch: &UpdateLessonPatchDto) -> StoreResult<Lesson> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"UPDATE lessons
               SET sequence = COALESCE($1, sequence),
                   date = COALESCE($2, date),
                   room_id = COALESCE($3, room_id),
                   class_id = COALESCE($4, class_id),
                   updated_at = NOW()
               WHERE id = $5
               RETURNING id, sequence, date, room_id, class_id, created_at, updated_at"#,
        )
        .bind(patch.sequence)
        .bind(patch.date)
        .bind(patch.room_id)
        .bind(patch.class_id)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    /// Deletes the row and returns it. Owned subjects go with it (FK cascade).
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> StoreResult<Lesson> {
        sqlx::query_as::<_, Lesson>(
            r#"DELETE FROM lessons WHERE id = $1
               RETURNING id, sequence, date, room_id, class_id, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

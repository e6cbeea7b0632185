//! Store adapter for the `subjects` table.
//!
//! Every per-subject statement filters on both `id` and `lesson_id`, so a
//! subject can never be read or written through a lesson that does not own it.

use lessons_db::{StoreError, StoreResult};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectPatchDto};

pub struct SubjectRepository;

impl SubjectRepository {
    /// [`StoreError::ForeignKey`] if `lesson_id` does not reference a lesson.
    #[instrument(skip(db))]
    pub async fn insert(
        db: &PgPool,
        lesson_id: Uuid,
        attrs: &CreateSubjectDto,
    ) -> StoreResult<Subject> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (description, credits, lesson_id)
               VALUES ($1, $2, $3)
               RETURNING id, description, credits, lesson_id, created_at, updated_at"#,
        )
        .bind(&attrs.description)
        .bind(attrs.credits)
        .bind(lesson_id)
        .fetch_one(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn find_all_by_lesson(db: &PgPool, lesson_id: Uuid) -> StoreResult<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, description, credits, lesson_id, created_at, updated_at
               FROM subjects
               WHERE lesson_id = $1
               ORDER BY created_at ASC"#,
        )
        .bind(lesson_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn find_in_lesson(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
    ) -> StoreResult<Option<Subject>> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"SELECT id, description, credits, lesson_id, created_at, updated_at
               FROM subjects
               WHERE id = $1 AND lesson_id = $2"#,
        )
        .bind(subject_id)
        .bind(lesson_id)
        .fetch_optional(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn replace(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
        attrs: &CreateSubjectDto,
    ) -> StoreResult<Subject> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"UPDATE subjects
               SET description = $1, credits = $2, updated_at = NOW()
               WHERE id = $3 AND lesson_id = $4
               RETURNING id, description, credits, lesson_id, created_at, updated_at"#,
        )
        .bind(&attrs.description)
        .bind(attrs.credits)
        .bind(subject_id)
        .bind(lesson_id)
        .fetch_one(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn merge(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
        patch: &UpdateSubjectPatchDto,
    ) -> StoreResult<Subject> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"UPDATE subjects
               SET description = COALESCE($1, description),
                   credits = COALESCE($2, credits),
                   updated_at = NOW()
               WHERE id = $3 AND lesson_id = $4
               RETURNING id, description, credits, lesson_id, created_at, updated_at"#,
        )
        .bind(&patch.description)
        .bind(patch.credits)
        .bind(subject_id)
        .bind(lesson_id)
        .fetch_one(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, lesson_id: Uuid, subject_id: Uuid) -> StoreResult<Subject> {
        sqlx::query_as::<_, Subject>(
            r#"DELETE FROM subjects WHERE id = $1 AND lesson_id = $2
               RETURNING id, description, credits, lesson_id, created_at, updated_at"#,
        )
        .bind(subject_id)
        .bind(lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

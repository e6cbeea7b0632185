use anyhow::anyhow;
use chrono::{DateTime, Utc};
use lessons_core::AppError;
use lessons_db::StoreError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, UpdateLessonPatchDto, UpdateLessonPutDto,
};
use crate::modules::lessons::repository::LessonRepository;
use crate::modules::subjects::model::{
    CreateSubjectDto, Subject, UpdateSubjectPatchDto, UpdateSubjectPutDto,
};
use crate::modules::subjects::service::SubjectService;

pub(crate) fn lesson_not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("Lesson with ID {} not found", id))
}

fn lesson_conflict(sequence: i32, date: DateTime<Utc>) -> AppError {
    metrics::track_conflict("lesson");
    AppError::conflict(anyhow!(
        "Lesson with sequence {} on {} already exists",
        sequence,
        date.to_rfc3339()
    ))
}

/// Maps a failed lesson write. `key` is the `(sequence, date)` the write tried to hold.
fn map_write_error(err: StoreError, id: Uuid, key: (i32, DateTime<Utc>)) -> AppError {
    match err {
        StoreError::DuplicateKey { .. } => lesson_conflict(key.0, key.1),
        StoreError::NotFound => lesson_not_found(id),
        other => AppError::from(other),
    }
}

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db))]
    pub async fn create_lesson(db: &PgPool, dto: CreateLessonDto) -> Result<Lesson, AppError> {
        let lesson = LessonRepository::insert(db, &dto).await.map_err(|e| {
            if e.is_duplicate_key() {
                return lesson_conflict(dto.sequence, dto.date);
            }
            AppError::from(e)
        })?;

        metrics::track_lesson_created();
        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn find_all_lessons(db: &PgPool) -> Result<Vec<Lesson>, AppError> {
        let lessons = LessonRepository::find_all(db).await?;
        Ok(lessons)
    }

    /// `None` when no lesson has this id. The caller decides how to report it.
    #[instrument(skip(db))]
    pub async fn find_lesson(db: &PgPool, id: Uuid) -> Result<Option<Lesson>, AppError> {
        let lesson = LessonRepository::find_by_id(db, id).await?;
        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn get_lesson(db: &PgPool, id: Uuid) -> Result<Lesson, AppError> {
        Self::find_lesson(db, id)
            .await?
            .ok_or_else(|| lesson_not_found(id))
    }

    #[instrument(skip(db))]
    pub async fn ensure_lesson_exists(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        if LessonRepository::exists(db, id).await? {
            Ok(())
        } else {
            Err(lesson_not_found(id))
        }
    }

    #[instrument(skip(db))]
    pub async fn update_lesson(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLessonPutDto,
    ) -> Result<Lesson, AppError> {
        Self::ensure_lesson_exists(db, id).await?;

        LessonRepository::replace(db, id, &dto)
            .await
            .map_err(|e| map_write_error(e, id, (dto.sequence, dto.date)))
    }

    #[instrument(skip(db))]
    pub async fn patch_lesson(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLessonPatchDto,
    ) -> Result<Lesson, AppError> {
        let existing = Self::get_lesson(db, id).await?;
        let key = dto.resulting_key(&existing);

        LessonRepository::merge(db, id, &dto)
            .await
            .map_err(|e| map_write_error(e, id, key))
    }

    /// Removes the lesson together with every subject it owns.
    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &PgPool, id: Uuid) -> Result<Lesson, AppError> {
        LessonRepository::delete(db, id).await.map_err(|e| match e {
            StoreError::NotFound => lesson_not_found(id),
            other => AppError::from(other),
        })
    }

    // Subjects are only reachable through their lesson. Each operation checks
    // the parent first, then hands over to the subject manager.

    #[instrument(skip(db))]
    pub async fn create_subject(
        db: &PgPool,
        lesson_id: Uuid,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_lesson_exists(db, lesson_id).await?;
        SubjectService::create_subject(db, lesson_id, dto).await
    }

    #[instrument(skip(db))]
    pub async fn find_subjects(db: &PgPool, lesson_id: Uuid) -> Result<Vec<Subject>, AppError> {
        Self::ensure_lesson_exists(db, lesson_id).await?;
        SubjectService::find_subjects(db, lesson_id).await
    }

    #[instrument(skip(db))]
    pub async fn find_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        Self::ensure_lesson_exists(db, lesson_id).await?;
        SubjectService::find_subject(db, lesson_id, subject_id).await
    }

    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
        dto: UpdateSubjectPutDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_lesson_exists(db, lesson_id).await?;
        SubjectService::update_subject(db, lesson_id, subject_id, dto).await
    }

    #[instrument(skip(db))]
    pub async fn patch_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
        dto: UpdateSubjectPatchDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_lesson_exists(db, lesson_id).await?;
        SubjectService::patch_subject(db, lesson_id, subject_id, dto).await
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        Self::ensure_lesson_exists(db, lesson_id).await?;
        SubjectService::delete_subject(db, lesson_id, subject_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;

    fn lesson_dto(sequence: i32, day: u32) -> CreateLessonDto {
        CreateLessonDto {
            sequence,
            date: Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
            room_id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_find_lesson(pool: PgPool) {
        let created = LessonService::create_lesson(&pool, lesson_dto(1, 10))
            .await
            .unwrap();

        let found = LessonService::find_lesson(&pool, created.id).await.unwrap();
        assert_eq!(found.map(|l| l.id), Some(created.id));

        let missing = LessonService::find_lesson(&pool, Uuid::new_v4())
            .await
            .unwrap();
        assert!(missing.is_none());

        let all = LessonService::find_all_lessons(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_sequence_and_date_conflicts(pool: PgPool) {
        LessonService::create_lesson(&pool, lesson_dto(1, 10))
            .await
            .unwrap();

        let err = LessonService::create_lesson(&pool, lesson_dto(1, 10))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(
            err.error.to_string(),
            "Lesson with sequence 1 on 2025-03-10T09:00:00+00:00 already exists"
        );

        // Same sequence on another day is fine
        LessonService::create_lesson(&pool, lesson_dto(1, 11))
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_updates_report_conflicts_and_missing_lessons(pool: PgPool) {
        LessonService::create_lesson(&pool, lesson_dto(1, 10))
            .await
            .unwrap();
        let second = LessonService::create_lesson(&pool, lesson_dto(2, 10))
            .await
            .unwrap();

        let err = LessonService::update_lesson(&pool, second.id, lesson_dto(1, 10))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = LessonService::patch_lesson(
            &pool,
            second.id,
            UpdateLessonPatchDto {
                sequence: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(
            err.error.to_string(),
            "Lesson with sequence 1 on 2025-03-10T09:00:00+00:00 already exists"
        );

        let missing = Uuid::new_v4();
        let err = LessonService::update_lesson(&pool, missing, lesson_dto(5, 12))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = LessonService::patch_lesson(&pool, missing, UpdateLessonPatchDto::default())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            err.error.to_string(),
            format!("Lesson with ID {} not found", missing)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_patch_keeps_absent_fields(pool: PgPool) {
        let created = LessonService::create_lesson(&pool, lesson_dto(1, 10))
            .await
            .unwrap();

        let patched = LessonService::patch_lesson(
            &pool,
            created.id,
            UpdateLessonPatchDto {
                sequence: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(patched.sequence, 3);
        assert_eq!(patched.date, created.date);
        assert_eq!(patched.room_id, created.room_id);
        assert_eq!(patched.class_id, created.class_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_cascades_to_subjects(pool: PgPool) {
        let lesson = LessonService::create_lesson(&pool, lesson_dto(1, 10))
            .await
            .unwrap();
        let subject = LessonService::create_subject(
            &pool,
            lesson.id,
            CreateSubjectDto {
                description: "Algebra".to_string(),
                credits: 4,
            },
        )
        .await
        .unwrap();

        let deleted = LessonService::delete_lesson(&pool, lesson.id).await.unwrap();
        assert_eq!(deleted.id, lesson.id);

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects WHERE id = $1")
            .bind(subject.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let err = LessonService::delete_lesson(&pool, lesson.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_subject_operations_require_parent(pool: PgPool) {
        let missing = Uuid::new_v4();

        let err = LessonService::find_subjects(&pool, missing)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            err.error.to_string(),
            format!("Lesson with ID {} not found", missing)
        );

        let err = LessonService::find_subject(&pool, missing, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}

use anyhow::anyhow;
use lessons_core::AppError;
use lessons_db::StoreError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::modules::lessons::service::lesson_not_found;
use crate::modules::subjects::model::{
    CreateSubjectDto, Subject, UpdateSubjectPatchDto, UpdateSubjectPutDto,
};
use crate::modules::subjects::repository::SubjectRepository;

pub(crate) fn subject_not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("Subject with ID {} not found", id))
}

pub struct SubjectService;

impl SubjectService {
    /// Returns the subject only if it exists and is owned by `lesson_id`.
    ///
    /// A subject living under another lesson is reported exactly like a
    /// missing one.
    #[instrument(skip(db))]
    pub async fn ensure_belongs_to_lesson(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        SubjectRepository::find_in_lesson(db, lesson_id, subject_id)
            .await?
            .ok_or_else(|| subject_not_found(subject_id))
    }

    #[instrument(skip(db))]
    pub async fn create_subject(
        db: &PgPool,
        lesson_id: Uuid,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        // The lesson may vanish between the parent check and this insert
        let subject = SubjectRepository::insert(db, lesson_id, &dto)
            .await
            .map_err(|e| match e {
                StoreError::ForeignKey { .. } => lesson_not_found(lesson_id),
                other => AppError::from(other),
            })?;

        metrics::track_subject_created();
        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn find_subjects(db: &PgPool, lesson_id: Uuid) -> Result<Vec<Subject>, AppError> {
        let subjects = SubjectRepository::find_all_by_lesson(db, lesson_id).await?;
        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn find_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        Self::ensure_belongs_to_lesson(db, lesson_id, subject_id).await
    }

    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
        dto: UpdateSubjectPutDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_belongs_to_lesson(db, lesson_id, subject_id).await?;

        SubjectRepository::replace(db, lesson_id, subject_id, &dto)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => subject_not_found(subject_id),
                other => AppError::from(other),
            })
    }

    #[instrument(skip(db))]
    pub async fn patch_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
        dto: UpdateSubjectPatchDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_belongs_to_lesson(db, lesson_id, subject_id).await?;

        SubjectRepository::merge(db, lesson_id, subject_id, &dto)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => subject_not_found(subject_id),
                other => AppError::from(other),
            })
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(
        db: &PgPool,
        lesson_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        Self::ensure_belongs_to_lesson(db, lesson_id, subject_id).await?;

        SubjectRepository::delete(db, lesson_id, subject_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => subject_not_found(subject_id),
                other => AppError::from(other),
            })
    }
}

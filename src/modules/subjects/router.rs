use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_subject, delete_subject, get_subject_by_id, get_subjects, patch_subject,
    update_subject,
};

/// Mounted under `/lessons/{lesson_id}/subjects`.
pub fn init_lesson_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_subjects).post(create_subject))
        .route(
            "/{subject_id}",
            get(get_subject_by_id)
                .put(update_subject)
                .patch(patch_subject)
                .delete(delete_subject),
        )
}

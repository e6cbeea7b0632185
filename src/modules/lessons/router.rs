use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::subjects::init_lesson_subjects_router;
use crate::state::AppState;

use super::controller::{
    create_lesson, delete_lesson, get_lesson_by_id, get_lessons, patch_lesson, update_lesson,
};

pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lesson).get(get_lessons))
        .route(
            "/{lesson_id}",
            get(get_lesson_by_id)
                .put(update_lesson)
                .patch(patch_lesson)
                .delete(delete_lesson),
        )
        .nest("/{lesson_id}/subjects", init_lesson_subjects_router())
}

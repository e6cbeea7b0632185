use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use lessons_core::ErrorResponse;

use crate::modules::health::controller::{HealthStatus, ServiceInfo};
use crate::modules::lessons::model::{CreateLessonDto, Lesson, UpdateLessonPatchDto};
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectPatchDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::service_info,
        crate::modules::health::controller::health_check,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::get_lesson_by_id,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::patch_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject_by_id,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::patch_subject,
        crate::modules::subjects::controller::delete_subject,
    ),
    components(
        schemas(
            Lesson,
            CreateLessonDto,
            UpdateLessonPatchDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectPatchDto,
            ErrorResponse,
            ServiceInfo,
            HealthStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service information and liveness"),
        (name = "Lessons", description = "Lesson management endpoints"),
        (name = "Subjects", description = "Subjects owned by a lesson")
    ),
    info(
        title = "Lessons API",
        version = "0.1.0",
        description = "CRUD API for lessons and the subjects they own. Bearer tokens are validated by an external OAuth introspection endpoint.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            )
        }
    }
}

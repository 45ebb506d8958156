mod cancel_enrollment;
mod create_enrollment;
mod get_session_enrollments;
pub mod subscribers;

use actix_web::web;
use cancel_enrollment::cancel_enrollment_controller;
use create_enrollment::create_enrollment_controller;
use get_session_enrollments::get_session_enrollments_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/sessions/{session_id}/enrollments",
        web::post().to(create_enrollment_controller),
    );
    cfg.route(
        "/sessions/{session_id}/enrollments",
        web::get().to(get_session_enrollments_controller),
    );
    cfg.route(
        "/sessions/{session_id}/enrollments/{user_id}",
        web::delete().to(cancel_enrollment_controller),
    );
}

mod checkin_attendance;
mod clear_session_attendance;
mod get_session_attendance;
mod review_attendance;
mod upload_attendance;

use actix_web::web;
use checkin_attendance::checkin_attendance_controller;
use clear_session_attendance::clear_session_attendance_controller;
use get_session_attendance::get_session_attendance_controller;
use review_attendance::review_attendance_controller;
use upload_attendance::upload_attendance_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Parse an uploaded Teams report and upsert attendance rows
    cfg.route("/attendance/upload", web::post().to(upload_attendance_controller));
    cfg.route(
        "/sessions/{session_id}/attendance",
        web::get().to(get_session_attendance_controller),
    );
    cfg.route(
        "/sessions/{session_id}/attendance",
        web::delete().to(clear_session_attendance_controller),
    );
    cfg.route(
        "/sessions/{session_id}/attendance/checkin",
        web::post().to(checkin_attendance_controller),
    );
    cfg.route(
        "/attendance/{attendance_id}/review",
        web::put().to(review_attendance_controller),
    );
}

mod batch;
mod pending;
pub mod process_due_reminders;
pub mod schedule_enrollment_reminders;
pub mod send_individual_reminder;
mod trigger_session_reminders;

use actix_web::web;
use process_due_reminders::sweep_reminders_controller;
use trigger_session_reminders::trigger_session_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/sweep",
        web::post().to(sweep_reminders_controller),
    );
    cfg.route(
        "/sessions/{session_id}/reminders/trigger",
        web::post().to(trigger_session_reminders_controller),
    );
}

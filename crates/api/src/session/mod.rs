use actix_web::web;

mod create_session;
mod delete_session;
mod get_session;
mod get_session_settings;
mod update_session;
mod update_session_settings;

use create_session::create_session_controller;
use delete_session::delete_session_controller;
use get_session::get_session_controller;
use get_session_settings::get_session_settings_controller;
use update_session::update_session_controller;
use update_session_settings::update_session_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions", web::post().to(create_session_controller));
    cfg.route("/sessions/{session_id}", web::get().to(get_session_controller));
    cfg.route(
        "/sessions/{session_id}",
        web::put().to(update_session_controller),
    );
    cfg.route(
        "/sessions/{session_id}",
        web::delete().to(delete_session_controller),
    );

    cfg.route(
        "/sessions/{session_id}/settings",
        web::get().to(get_session_settings_controller),
    );
    cfg.route(
        "/sessions/{session_id}/settings",
        web::put().to(update_session_settings_controller),
    );
}

mod create_reminder_config;
mod delete_reminder_config;
mod get_reminder_configs;
mod update_reminder_config;

use actix_web::web;
use create_reminder_config::create_reminder_config_controller;
use delete_reminder_config::delete_reminder_config_controller;
use get_reminder_configs::get_reminder_configs_controller;
use update_reminder_config::update_reminder_config_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/configs",
        web::post().to(create_reminder_config_controller),
    );
    cfg.route(
        "/reminders/configs",
        web::get().to(get_reminder_configs_controller),
    );
    cfg.route(
        "/reminders/configs/{config_id}",
        web::put().to(update_reminder_config_controller),
    );
    cfg.route(
        "/reminders/configs/{config_id}",
        web::delete().to(delete_reminder_config_controller),
    );
}

use actix_web::web;

use crate::handlers::home::home;

mod public;
mod admin;
mod cron;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.configure(public::config_routes)
        .configure(admin::config_routes)
        .configure(cron::config_routes);

    cfg.configure(json_error::config_routes);
}

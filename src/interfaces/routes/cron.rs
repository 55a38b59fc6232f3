use actix_web::web;

use crate::handlers::cron;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cron")
            .service(
                web::resource("/check-database")
                    .route(web::get().to(cron::check_database))
            )
    );
}

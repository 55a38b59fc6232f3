use actix_web::web;

use crate::handlers::{experiences, submissions};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/submissions")
            .route(web::post().to(submissions::create_submission))
    );

    cfg.service(
        web::resource("/experiences")
            .route(web::get().to(experiences::list_public_experiences))
    );
}

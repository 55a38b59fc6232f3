use actix_web::web;

use crate::handlers::admin;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/submissions")
                    .route(web::get().to(admin::list_submissions))
                    .route(web::patch().to(admin::update_submission))
                    .route(web::delete().to(admin::delete_submission))
            )
            .service(
                web::resource("/submissions/{submission_id}/approve")
                    .route(web::post().to(admin::approve_submission))
            )
            .service(
                web::resource("/submissions/{submission_id}/reject")
                    .route(web::post().to(admin::reject_submission))
            )
            .service(
                web::resource("/stats")
                    .route(web::get().to(admin::submission_stats))
            )
            .service(
                web::resource("/export")
                    .route(web::get().to(admin::export_approved))
            )
    );
}

use crate::modules::session::handle::*;
use actix_web::web;
use actix_web::web::{resource, scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/session")
            .service(resource("").route(web::get().to(get_session)))
            .service(
                resource("/worker-profile")
                    .route(web::post().to(create_worker_profile))
                    .route(web::put().to(update_worker_profile)),
            )
            .service(
                resource("/employer-profile")
                    .route(web::post().to(create_employer_profile))
                    .route(web::put().to(update_employer_profile)),
            ),
    );
}

use crate::modules::job::handle::*;
use actix_web::web::{resource, scope, ServiceConfig};
use actix_web::web;

pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/jobs")
            .service(
                resource("")
                    .route(web::get().to(list_jobs))
                    .route(web::post().to(create_job)),
            )
            .service(
                resource("/{id:[0-9a-fA-F-]{36}}")
                    .route(web::get().to(get_job))
                    .route(web::put().to(update_job))
                    .route(web::delete().to(delete_job)),
            ),
    );
}
